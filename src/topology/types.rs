//! Topology type definitions.
//!
//! Plain data shared by the topology model, the factory and the routing
//! engine. Nodes carry no routing state; all mutation goes through
//! [`super::Topology`].

use serde::{Deserialize, Serialize};

/// Dense node index in `0..n`
pub type NodeIndex = usize;

/// Link weight, interpreted as propagation delay in milliseconds
pub type Weight = u32;

/// Largest topology the routing core supports
pub const MAX_NODES: usize = 23;

/// Default prefix for generated node names (`v1`, `v2`, ...)
pub const DEFAULT_NODE_PREFIX: &str = "v";

/// A graph vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub index: NodeIndex,
    pub name: String,
}

/// One direction of an undirected edge, as stored in a node's adjacency list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Neighbor on the other end
    pub node: NodeIndex,
    pub weight: Weight,
    /// Creation-order index of the undirected edge
    pub edge: usize,
}

/// An undirected edge in creation order.
///
/// `a` is the endpoint given first to `add_edge`; the addressing scheme
/// hands it the `.1` interface of the edge's block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub a: NodeIndex,
    pub b: NodeIndex,
    pub weight: Weight,
}

impl Edge {
    /// Returns the endpoint opposite to `node`, if `node` is an endpoint
    pub fn other(&self, node: NodeIndex) -> Option<NodeIndex> {
        if node == self.a {
            Some(self.b)
        } else if node == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

/// An edge handed to the topology factory; `weight` is drawn at random
/// when absent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeSpec {
    pub a: NodeIndex,
    pub b: NodeIndex,
    pub weight: Option<Weight>,
}

impl EdgeSpec {
    pub fn fixed(a: NodeIndex, b: NodeIndex, weight: Weight) -> Self {
        Self { a, b, weight: Some(weight) }
    }
}

impl From<(NodeIndex, NodeIndex)> for EdgeSpec {
    fn from((a, b): (NodeIndex, NodeIndex)) -> Self {
        Self { a, b, weight: None }
    }
}

/// Generate node names `prefix1..prefixN`
pub fn node_names(prefix: &str, count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("{}{}", prefix, i)).collect()
}
