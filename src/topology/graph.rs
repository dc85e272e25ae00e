//! Weighted undirected topology container.
//!
//! Nodes are plain data indexed `0..n`. Edges are stored twice: once in
//! creation order (the addressing scheme keys on that order) and once per
//! direction in each endpoint's adjacency list, in insertion order. Route
//! emission order depends on that adjacency order being stable.

use std::collections::{HashSet, VecDeque};

use log::debug;
use serde::{Deserialize, Serialize};

use super::types::{Connection, Edge, Node, NodeIndex, Weight, MAX_NODES};
use crate::error::{RoutingError, RoutingResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    adjacency: Vec<Vec<Connection>>,
}

impl Topology {
    /// Create an edgeless topology with the given node names.
    ///
    /// Names key install directives and per-node output files, so they must
    /// be unique, non-empty and free of whitespace and path separators.
    pub fn new(names: Vec<String>) -> RoutingResult<Self> {
        if names.len() > MAX_NODES {
            return Err(RoutingError::NodeCapExceeded {
                requested: names.len(),
                max: MAX_NODES,
            });
        }

        let nodes: Vec<Node> = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Node { index, name })
            .collect();
        check_names(&nodes)?;
        let adjacency = vec![Vec::new(); nodes.len()];

        Ok(Self {
            nodes,
            edges: Vec::new(),
            adjacency,
        })
    }

    /// Create an edgeless topology named `prefix1..prefixN`
    pub fn with_prefix(prefix: &str, count: usize) -> RoutingResult<Self> {
        Self::new(super::types::node_names(prefix, count))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Undirected edges in creation order
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, index: NodeIndex) -> RoutingResult<&Node> {
        self.nodes.get(index).ok_or(RoutingError::UnknownNode {
            index,
            len: self.nodes.len(),
        })
    }

    pub fn name(&self, index: NodeIndex) -> Option<&str> {
        self.nodes.get(index).map(|n| n.name.as_str())
    }

    /// Add an undirected edge and return its creation-order index.
    ///
    /// Fails with `InvalidEdge` on self-loops, duplicates and zero weights.
    pub fn add_edge(&mut self, u: NodeIndex, v: NodeIndex, weight: Weight) -> RoutingResult<usize> {
        self.check_index(u)?;
        self.check_index(v)?;

        if u == v {
            return Err(invalid_edge(u, v, "self-loops are not allowed"));
        }
        if weight == 0 {
            return Err(invalid_edge(u, v, "weight must be positive"));
        }
        if self.edge_between(u, v).is_some() {
            return Err(invalid_edge(u, v, "edge already exists"));
        }

        let edge = self.edges.len();
        self.edges.push(Edge { a: u, b: v, weight });
        self.adjacency[u].push(Connection { node: v, weight, edge });
        self.adjacency[v].push(Connection { node: u, weight, edge });

        debug!(
            "Added edge {} {}-{} ({}ms)",
            edge, self.nodes[u].name, self.nodes[v].name, weight
        );
        Ok(edge)
    }

    /// `(neighbor, weight)` pairs of `u` in edge-insertion order
    pub fn neighbors(
        &self,
        u: NodeIndex,
    ) -> RoutingResult<impl Iterator<Item = (NodeIndex, Weight)> + '_> {
        self.check_index(u)?;
        Ok(self.adjacency[u].iter().map(|c| (c.node, c.weight)))
    }

    /// Adjacency entries of `u`; empty for an unknown index
    pub fn connections(&self, u: NodeIndex) -> &[Connection] {
        self.adjacency.get(u).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn degree(&self, u: NodeIndex) -> usize {
        self.connections(u).len()
    }

    /// Weight of the edge between `u` and `v`; identical in both directions
    pub fn weight(&self, u: NodeIndex, v: NodeIndex) -> RoutingResult<Weight> {
        self.check_index(u)?;
        self.check_index(v)?;
        self.adjacency[u]
            .iter()
            .find(|c| c.node == v)
            .map(|c| c.weight)
            .ok_or(RoutingError::NoSuchEdge { u, v })
    }

    /// Creation-order index of the edge between `u` and `v`
    pub fn edge_between(&self, u: NodeIndex, v: NodeIndex) -> Option<usize> {
        self.connections(u)
            .iter()
            .find(|c| c.node == v)
            .map(|c| c.edge)
    }

    /// Re-check every structural invariant.
    ///
    /// `add_edge` keeps these by construction; a topology read back from a
    /// serialized snapshot has to be checked explicitly.
    pub fn validate(&self) -> RoutingResult<()> {
        let n = self.nodes.len();
        if n > MAX_NODES {
            return Err(RoutingError::NodeCapExceeded {
                requested: n,
                max: MAX_NODES,
            });
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if node.index != i {
                return Err(RoutingError::UnknownNode { index: node.index, len: n });
            }
        }
        check_names(&self.nodes)?;
        if self.adjacency.len() != n {
            return Err(RoutingError::MalformedTopology {
                reason: format!("{} adjacency lists for {} nodes", self.adjacency.len(), n),
            });
        }

        let mut pairs = HashSet::new();
        for (i, edge) in self.edges.iter().enumerate() {
            let (a, b) = (edge.a, edge.b);
            self.check_index(a)?;
            self.check_index(b)?;
            if a == b {
                return Err(invalid_edge(a, b, "self-loops are not allowed"));
            }
            if edge.weight == 0 {
                return Err(RoutingError::InvalidWeight { u: a, v: b, weight: 0 });
            }
            if !pairs.insert((a.min(b), a.max(b))) {
                return Err(invalid_edge(a, b, "edge already exists"));
            }

            let forward = Connection { node: b, weight: edge.weight, edge: i };
            let backward = Connection { node: a, weight: edge.weight, edge: i };
            if !self.adjacency[a].contains(&forward) || !self.adjacency[b].contains(&backward) {
                return Err(invalid_edge(a, b, "weight is not recorded symmetrically"));
            }
        }

        let directed: usize = self.adjacency.iter().map(Vec::len).sum();
        if directed != 2 * self.edges.len() {
            return Err(RoutingError::MalformedTopology {
                reason: format!(
                    "{} adjacency entries for {} edges",
                    directed,
                    self.edges.len()
                ),
            });
        }
        Ok(())
    }

    /// Nodes reachable from `source`, as a membership mask
    pub fn reachable_from(&self, source: NodeIndex) -> Vec<bool> {
        let mut seen = vec![false; self.nodes.len()];
        let Some(slot) = seen.get_mut(source) else {
            return seen;
        };
        *slot = true;

        let mut queue = VecDeque::from([source]);
        while let Some(u) = queue.pop_front() {
            for c in self.connections(u) {
                if !seen[c.node] {
                    seen[c.node] = true;
                    queue.push_back(c.node);
                }
            }
        }
        seen
    }

    pub fn is_connected(&self) -> bool {
        self.is_empty() || self.reachable_from(0).into_iter().all(|r| r)
    }

    fn check_index(&self, index: NodeIndex) -> RoutingResult<()> {
        if index < self.nodes.len() {
            Ok(())
        } else {
            Err(RoutingError::UnknownNode {
                index,
                len: self.nodes.len(),
            })
        }
    }
}

fn check_names(nodes: &[Node]) -> RoutingResult<()> {
    let mut seen = HashSet::new();
    for node in nodes {
        let reason = if node.name.is_empty() {
            Some("name is empty")
        } else if node.name == "." || node.name == ".." {
            Some("name is a relative path")
        } else if node.name.contains(['/', '\\']) {
            Some("name contains a path separator")
        } else if node.name.chars().any(|c| c.is_whitespace() || c.is_control()) {
            Some("name contains whitespace")
        } else if !seen.insert(node.name.as_str()) {
            Some("name is already taken")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(RoutingError::InvalidNodeName {
                index: node.index,
                name: node.name.clone(),
                reason: reason.to_string(),
            });
        }
    }
    Ok(())
}

fn invalid_edge(u: NodeIndex, v: NodeIndex, reason: &str) -> RoutingError {
    RoutingError::InvalidEdge {
        u,
        v,
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Topology {
        let mut topo = Topology::with_prefix("v", 4).unwrap();
        topo.add_edge(0, 1, 3).unwrap();
        topo.add_edge(1, 2, 4).unwrap();
        topo.add_edge(2, 3, 5).unwrap();
        topo.add_edge(3, 0, 6).unwrap();
        topo
    }

    #[test]
    fn test_add_edge_rejects_self_loop_duplicate_and_zero_weight() {
        let mut topo = square();

        assert!(matches!(topo.add_edge(2, 2, 1), Err(RoutingError::InvalidEdge { .. })));
        assert!(matches!(topo.add_edge(1, 0, 9), Err(RoutingError::InvalidEdge { .. })));
        assert!(matches!(topo.add_edge(0, 2, 0), Err(RoutingError::InvalidEdge { .. })));
        assert_eq!(
            topo.add_edge(0, 7, 1),
            Err(RoutingError::UnknownNode { index: 7, len: 4 })
        );
        assert_eq!(topo.edge_count(), 4);
    }

    #[test]
    fn test_node_cap() {
        assert!(Topology::with_prefix("v", MAX_NODES).is_ok());
        assert_eq!(
            Topology::with_prefix("v", MAX_NODES + 1),
            Err(RoutingError::NodeCapExceeded { requested: 24, max: 23 })
        );
    }

    #[test]
    fn test_node_names_must_be_unique_and_path_safe() {
        let names = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert!(Topology::new(names(&["a", "b", "c"])).is_ok());
        assert_eq!(
            Topology::new(names(&["a", "a", "b"])),
            Err(RoutingError::InvalidNodeName {
                index: 1,
                name: "a".to_string(),
                reason: "name is already taken".to_string(),
            })
        );
        for bad in ["", "..", "../escaped", "x\\y", "two words"] {
            assert!(
                matches!(
                    Topology::new(names(&["ok", bad])),
                    Err(RoutingError::InvalidNodeName { index: 1, .. })
                ),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_validate_catches_renamed_snapshot() {
        let mut json = serde_json::to_value(square()).unwrap();
        json["nodes"][2]["name"] = serde_json::json!("v1");
        let tampered: Topology = serde_json::from_value(json).unwrap();
        assert!(matches!(
            tampered.validate(),
            Err(RoutingError::InvalidNodeName { index: 2, .. })
        ));
    }

    #[test]
    fn test_validate_reports_malformed_adjacency() {
        let mut json = serde_json::to_value(square()).unwrap();
        json["adjacency"][0]
            .as_array_mut()
            .unwrap()
            .push(serde_json::json!({ "node": 2, "weight": 1, "edge": 0 }));
        let tampered: Topology = serde_json::from_value(json).unwrap();
        assert!(matches!(
            tampered.validate(),
            Err(RoutingError::MalformedTopology { .. })
        ));

        let mut json = serde_json::to_value(square()).unwrap();
        json["adjacency"].as_array_mut().unwrap().pop();
        let tampered: Topology = serde_json::from_value(json).unwrap();
        assert_eq!(
            tampered.validate(),
            Err(RoutingError::MalformedTopology {
                reason: "3 adjacency lists for 4 nodes".to_string(),
            })
        );
    }

    #[test]
    fn test_weight_is_symmetric() {
        let topo = square();
        for edge in topo.edges() {
            assert_eq!(topo.weight(edge.a, edge.b), topo.weight(edge.b, edge.a));
        }
        assert_eq!(topo.weight(0, 3), Ok(6));
        assert_eq!(topo.weight(0, 2), Err(RoutingError::NoSuchEdge { u: 0, v: 2 }));
    }

    #[test]
    fn test_neighbors_follow_insertion_order_and_restart() {
        let topo = square();
        let first: Vec<_> = topo.neighbors(0).unwrap().collect();
        let second: Vec<_> = topo.neighbors(0).unwrap().collect();
        assert_eq!(first, vec![(1, 3), (3, 6)]);
        assert_eq!(first, second);
        assert!(topo.neighbors(9).is_err());
    }

    #[test]
    fn test_connectivity() {
        let mut topo = Topology::with_prefix("v", 4).unwrap();
        topo.add_edge(0, 1, 5).unwrap();
        topo.add_edge(2, 3, 7).unwrap();
        assert!(!topo.is_connected());
        assert_eq!(topo.reachable_from(0), vec![true, true, false, false]);
        assert!(square().is_connected());
    }

    #[test]
    fn test_validate_catches_asymmetric_snapshot() {
        let topo = square();
        assert!(topo.validate().is_ok());

        let mut json = serde_json::to_value(&topo).unwrap();
        json["adjacency"][0][0]["weight"] = serde_json::json!(42);
        let tampered: Topology = serde_json::from_value(json).unwrap();
        assert!(matches!(tampered.validate(), Err(RoutingError::InvalidEdge { .. })));
    }

    #[test]
    fn test_validate_catches_zero_weight_snapshot() {
        let topo = square();
        let mut json = serde_json::to_value(&topo).unwrap();
        json["edges"][1]["weight"] = serde_json::json!(0);
        json["adjacency"][1][1]["weight"] = serde_json::json!(0);
        json["adjacency"][2][0]["weight"] = serde_json::json!(0);
        let tampered: Topology = serde_json::from_value(json).unwrap();
        assert_eq!(
            tampered.validate(),
            Err(RoutingError::InvalidWeight { u: 1, v: 2, weight: 0 })
        );
    }
}
