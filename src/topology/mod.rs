//! Network topology module.
//!
//! This module contains the weighted topology model and the factory that
//! assigns reproducible random weights to an edge set.

pub mod factory;
pub mod graph;
pub mod types;

// Re-export key types for easier access
pub use factory::{TopologyFactory, DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT, DEFAULT_SEED};
pub use graph::Topology;
pub use types::{node_names, Connection, Edge, EdgeSpec, Node, NodeIndex, Weight, DEFAULT_NODE_PREFIX, MAX_NODES};
