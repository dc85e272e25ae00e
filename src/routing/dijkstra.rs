//! Single-source shortest paths.
//!
//! Classic dense Dijkstra with an explicit known set. Each round selects
//! the unknown node with the lowest cost; among equal costs the lowest
//! index wins, which keeps trees and routing tables reproducible. The
//! O(n²) scan is fine at the supported node cap.

use log::debug;
use serde::Serialize;

use crate::error::{RoutingError, RoutingResult};
use crate::topology::{NodeIndex, Topology, Weight};

/// Cumulative path weight in milliseconds
pub type Cost = u64;

/// Per-node state of a shortest-path tree. `cost == None` means unreachable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TreeEntry {
    pub known: bool,
    pub cost: Option<Cost>,
    pub predecessor: Option<NodeIndex>,
}

/// A tree link `child -> parent` with the weight of the edge between them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TreeLink {
    pub child: NodeIndex,
    pub weight: Weight,
    pub parent: NodeIndex,
}

/// Predecessor tree rooted at one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortestPathTree {
    source: NodeIndex,
    entries: Vec<TreeEntry>,
}

impl ShortestPathTree {
    /// Run Dijkstra from `source` over `topology`.
    ///
    /// Fails with `InvalidWeight` before doing any work if the graph holds a
    /// non-positive weight.
    pub fn compute(topology: &Topology, source: NodeIndex) -> RoutingResult<Self> {
        let n = topology.len();
        if source >= n {
            return Err(RoutingError::UnknownNode { index: source, len: n });
        }
        check_adjacency(topology)?;

        let mut entries = vec![TreeEntry::default(); n];
        entries[source].cost = Some(0);

        for _ in 0..n {
            let Some(u) = select_min(&entries) else {
                break;
            };
            entries[u].known = true;
            let Some(cost_u) = entries[u].cost else {
                break;
            };

            for conn in topology.connections(u) {
                let candidate = cost_u + Cost::from(conn.weight);
                let entry = &mut entries[conn.node];
                if entry.cost.map_or(true, |c| candidate < c) {
                    entry.cost = Some(candidate);
                    entry.predecessor = Some(u);
                }
            }
        }

        let reached = entries.iter().filter(|e| e.cost.is_some()).count();
        debug!("Shortest-path tree from {}: {}/{} nodes reachable", source, reached, n);

        Ok(Self { source, entries })
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn entry(&self, node: NodeIndex) -> Option<&TreeEntry> {
        self.entries.get(node)
    }

    pub fn cost(&self, node: NodeIndex) -> Option<Cost> {
        self.entries.get(node).and_then(|e| e.cost)
    }

    pub fn predecessor(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.entries.get(node).and_then(|e| e.predecessor)
    }

    pub fn is_reachable(&self, node: NodeIndex) -> bool {
        self.cost(node).is_some()
    }

    /// The source's direct neighbor that `node` hangs under in this tree.
    ///
    /// Walks predecessors from `node` until the step before the source.
    /// `None` for the source itself and for unreachable nodes.
    pub fn first_hop(&self, node: NodeIndex) -> Option<NodeIndex> {
        if node == self.source || !self.is_reachable(node) {
            return None;
        }
        let mut current = node;
        // A well-formed tree reaches the source in fewer than n steps.
        for _ in 0..self.entries.len() {
            let parent = self.predecessor(current)?;
            if parent == self.source {
                return Some(current);
            }
            current = parent;
        }
        None
    }

    /// Nodes from the source to `node` inclusive
    pub fn path_to(&self, node: NodeIndex) -> Option<Vec<NodeIndex>> {
        if !self.is_reachable(node) {
            return None;
        }
        let mut path = vec![node];
        let mut current = node;
        while current != self.source {
            current = self.predecessor(current)?;
            path.push(current);
            if path.len() > self.entries.len() {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }

    /// Tree links of every reachable node except the source, by node index.
    ///
    /// Unreachable nodes contribute nothing.
    pub fn links(&self, topology: &Topology) -> RoutingResult<Vec<TreeLink>> {
        let mut links = Vec::new();
        for (child, entry) in self.entries.iter().enumerate() {
            if let Some(parent) = entry.predecessor {
                links.push(TreeLink {
                    child,
                    weight: topology.weight(child, parent)?,
                    parent,
                });
            }
        }
        Ok(links)
    }
}

/// Lowest-cost unknown node with a finite cost; lowest index on ties
fn select_min(entries: &[TreeEntry]) -> Option<NodeIndex> {
    let mut best: Option<(Cost, NodeIndex)> = None;
    for (i, entry) in entries.iter().enumerate() {
        if entry.known {
            continue;
        }
        if let Some(cost) = entry.cost {
            // Strict comparison keeps the first (lowest) index among equals.
            if best.map_or(true, |(c, _)| cost < c) {
                best = Some((cost, i));
            }
        }
    }
    best.map(|(_, i)| i)
}

fn check_adjacency(topology: &Topology) -> RoutingResult<()> {
    for node in topology.nodes() {
        for conn in topology.connections(node.index) {
            if conn.node >= topology.len() {
                return Err(RoutingError::UnknownNode {
                    index: conn.node,
                    len: topology.len(),
                });
            }
            if conn.weight == 0 {
                return Err(RoutingError::InvalidWeight {
                    u: node.index,
                    v: conn.node,
                    weight: conn.weight,
                });
            }
        }
    }
    Ok(())
}
