//! Shared utilities: latency parsing and validation.

pub mod latency;
pub mod validation;

pub use latency::parse_latency_ms;
pub use validation::{validate_coverage, validate_edge_set, validate_node_count, validate_weight_range};
