//! Routing error types.
//!
//! Structural problems (bad edges, non-positive weights, oversized
//! topologies) surface here eagerly. A disconnected graph is not an error:
//! it yields partial routing tables and is reported through
//! [`crate::routing::Coverage`].

use thiserror::Error;

use crate::topology::{NodeIndex, Weight};

/// Errors raised by the topology model, addressing scheme and routing engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// Self-loop, duplicate edge, zero weight or asymmetric adjacency
    #[error("Invalid edge {u}-{v}: {reason}")]
    InvalidEdge {
        u: NodeIndex,
        v: NodeIndex,
        reason: String,
    },

    /// The queried pair is not adjacent
    #[error("No edge between {u} and {v}")]
    NoSuchEdge { u: NodeIndex, v: NodeIndex },

    /// A non-positive weight reached the shortest-path engine
    #[error("Invalid weight {weight} on edge {u}-{v}: weights must be positive")]
    InvalidWeight {
        u: NodeIndex,
        v: NodeIndex,
        weight: Weight,
    },

    /// Empty, duplicate or path-unsafe node display name
    #[error("Invalid name {name:?} for node {index}: {reason}")]
    InvalidNodeName {
        index: NodeIndex,
        name: String,
        reason: String,
    },

    /// Adjacency lists that disagree with the edge list
    #[error("Malformed topology: {reason}")]
    MalformedTopology { reason: String },

    /// Topology size beyond the supported maximum
    #[error("Topology of {requested} nodes exceeds the supported maximum of {max}")]
    NodeCapExceeded { requested: usize, max: usize },

    /// Node index outside `0..len`
    #[error("Unknown node {index} (topology has {len} nodes)")]
    UnknownNode { index: NodeIndex, len: usize },

    /// Weight range with `min < 1` or `min > max`
    #[error("Invalid weight range [{min}, {max}]")]
    InvalidWeightRange { min: Weight, max: Weight },

    /// Edge index has no reserved address block left
    #[error("No address block left for edge {edge_index}")]
    AddressSpaceExhausted { edge_index: usize },
}

/// Result type for routing operations
pub type RoutingResult<T> = Result<T, RoutingError>;
