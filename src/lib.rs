//! # Torus Routes - Shortest-path forwarding tables for emulated networks
//!
//! This library computes, for every node of a small weighted network, the
//! static routes that send traffic along shortest paths, and addresses every
//! link so the routes can be installed on an emulated host.
//!
//! ## Overview
//!
//! A topology of at most 23 nodes is connected by undirected links whose
//! weights are propagation delays in milliseconds, drawn from a seeded
//! random source unless fixed. Each link gets its own `/24` block: the first
//! endpoint holds `.1`, the second `.2`. From each node a shortest-path tree
//! is grown with Dijkstra's algorithm, and every interface of every reachable
//! node is routed via the neighbor that starts the path.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - `topology`: Weighted graph model and the seeded topology factory
//! - `ip`: Per-link addressing scheme and interface registry
//! - `routing`: Shortest-path trees, routing tables and the all-sources plan
//! - `emulator`: Install directives and link descriptions for the emulator
//! - `viz`: Graphviz text for topologies and shortest-path trees
//! - `gml_parser`: GML edge-set loader
//! - `config`: Type-safe configuration structures and validation
//! - `config_loader`: Configuration file loading and CLI overrides
//! - `utils`: Latency parsing and validation helpers
//! - `orchestrator`: High-level pipeline from configuration to output files
//!
//! ## Example Usage
//!
//! ```rust
//! use torus_routes::ip::{AddressingScheme, InterfaceRegistry};
//! use torus_routes::routing::RoutingPlan;
//! use torus_routes::topology::Topology;
//!
//! let mut topology = Topology::with_prefix("v", 3)?;
//! topology.add_edge(0, 1, 1)?;
//! topology.add_edge(1, 2, 1)?;
//!
//! let registry = InterfaceRegistry::build(&topology, AddressingScheme::default())?;
//! let plan = RoutingPlan::compute(&topology, &registry)?;
//!
//! let table = plan.table(0).unwrap();
//! assert_eq!(table.len(), 3);
//! assert_eq!(table.routes()[0].next_hop.to_string(), "10.0.0.2");
//! # Ok::<(), torus_routes::error::RoutingError>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! general:
//!   seed: 7
//!   parallel: false
//!
//! topology:
//!   nodes: 4
//!   weights: { min: 1, max: 20 }
//!   edges:
//!     - [0, 1]
//!     - { a: 1, b: 2, weight: 6 }
//!     - [2, 3]
//!     - [3, 0]
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`error::RoutingResult`]; configuration checks
//! return [`config::ConfigError`]. File-level operations in `config_loader`,
//! `gml_parser` and `orchestrator` return `color_eyre` results with context.

pub mod config;
pub mod config_loader;
pub mod emulator;
pub mod error;
pub mod gml_parser;
pub mod ip;
pub mod orchestrator;
pub mod routing;
pub mod topology;
pub mod utils;
pub mod viz;
