//! Interface registry.
//!
//! Resolves the addressing scheme against a topology: which interfaces each
//! node owns (one per incident edge, in adjacency order) and which node owns
//! a given interface.

use std::collections::HashMap;

use log::debug;

use super::allocator::{AddressingScheme, InterfaceId, Side};
use crate::error::{RoutingError, RoutingResult};
use crate::topology::{NodeIndex, Topology};

/// One interface of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeInterface {
    pub interface: InterfaceId,
    /// Node at the other end of the link
    pub peer: NodeIndex,
    pub edge: usize,
}

/// Owner of an interface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InterfaceOwner {
    pub node: NodeIndex,
    pub edge: usize,
}

#[derive(Debug, Clone)]
pub struct InterfaceRegistry {
    scheme: AddressingScheme,
    by_node: Vec<Vec<NodeInterface>>,
    owners: HashMap<InterfaceId, InterfaceOwner>,
}

impl InterfaceRegistry {
    /// Assign interfaces to every edge of `topology`
    pub fn build(topology: &Topology, scheme: AddressingScheme) -> RoutingResult<Self> {
        for (i, edge) in topology.edges().iter().enumerate() {
            let block = scheme.block(i)?;
            debug!("Edge {} {}-{}: {}", i, edge.a, edge.b, block);
        }

        let mut by_node = Vec::with_capacity(topology.len());
        let mut owners = HashMap::new();
        for node in topology.nodes() {
            let mut interfaces = Vec::new();
            for conn in topology.connections(node.index) {
                let edge = topology
                    .edges()
                    .get(conn.edge)
                    .filter(|edge| edge.other(node.index) == Some(conn.node))
                    .ok_or_else(|| RoutingError::MalformedTopology {
                        reason: format!(
                            "adjacency of node {} names edge {} toward {}, which the edge list does not hold",
                            node.index, conn.edge, conn.node
                        ),
                    })?;
                let side = if edge.a == node.index { Side::First } else { Side::Second };
                let interface = scheme.interface_for(conn.edge, side)?;

                let owner = InterfaceOwner { node: node.index, edge: conn.edge };
                if let Some(existing) = owners.insert(interface, owner) {
                    return Err(RoutingError::MalformedTopology {
                        reason: format!(
                            "interface {} assigned to nodes {} and {}",
                            interface, existing.node, node.index
                        ),
                    });
                }
                interfaces.push(NodeInterface {
                    interface,
                    peer: conn.node,
                    edge: conn.edge,
                });
            }
            by_node.push(interfaces);
        }

        Ok(Self { scheme, by_node, owners })
    }

    pub fn scheme(&self) -> AddressingScheme {
        self.scheme
    }

    /// Interfaces of `node` in adjacency order; empty for an unknown node
    pub fn interfaces_of(&self, node: NodeIndex) -> impl Iterator<Item = InterfaceId> + '_ {
        self.entries_of(node).iter().map(|e| e.interface)
    }

    pub fn entries_of(&self, node: NodeIndex) -> &[NodeInterface] {
        self.by_node.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn owner_of(&self, interface: InterfaceId) -> Option<InterfaceOwner> {
        self.owners.get(&interface).copied()
    }

    /// The interface `from` presents on its link to `to`
    pub fn interface_toward(&self, from: NodeIndex, to: NodeIndex) -> Option<InterfaceId> {
        self.entries_of(from)
            .iter()
            .find(|e| e.peer == to)
            .map(|e| e.interface)
    }

    /// Total number of interfaces (twice the edge count)
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path() -> Topology {
        let mut topo = Topology::with_prefix("v", 3).unwrap();
        topo.add_edge(0, 1, 4).unwrap();
        topo.add_edge(1, 2, 6).unwrap();
        topo
    }

    #[test]
    fn test_interfaces_per_node() {
        let topo = path();
        let registry = InterfaceRegistry::build(&topo, AddressingScheme::default()).unwrap();

        let names = |n| registry.interfaces_of(n).map(|i| i.to_string()).collect::<Vec<_>>();
        assert_eq!(names(0), vec!["10.0.0.1"]);
        assert_eq!(names(1), vec!["10.0.0.2", "10.0.1.1"]);
        assert_eq!(names(2), vec!["10.0.1.2"]);
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_owner_and_toward_lookups_agree() {
        let topo = path();
        let registry = InterfaceRegistry::build(&topo, AddressingScheme::default()).unwrap();

        let toward = registry.interface_toward(1, 2).unwrap();
        assert_eq!(toward.to_string(), "10.0.1.1");
        assert_eq!(registry.owner_of(toward), Some(InterfaceOwner { node: 1, edge: 1 }));

        let peer = registry.scheme().peer_of(toward).unwrap();
        assert_eq!(registry.owner_of(peer).map(|o| o.node), Some(2));
        assert_eq!(registry.interface_toward(0, 2), None);
    }

    #[test]
    fn test_rejects_adjacency_pointing_at_wrong_edge() {
        let mut json = serde_json::to_value(path()).unwrap();
        json["adjacency"][0][0]["edge"] = serde_json::json!(1);
        let tampered: Topology = serde_json::from_value(json).unwrap();
        assert!(matches!(
            InterfaceRegistry::build(&tampered, AddressingScheme::default()),
            Err(RoutingError::MalformedTopology { .. })
        ));
    }

    #[test]
    fn test_every_interface_has_one_owner() {
        let mut topo = Topology::with_prefix("v", 5).unwrap();
        for u in 0..5 {
            for v in (u + 1)..5 {
                topo.add_edge(u, v, 1).unwrap();
            }
        }
        let registry = InterfaceRegistry::build(&topo, AddressingScheme::default()).unwrap();
        assert_eq!(registry.len(), 2 * topo.edge_count());
        for node in 0..5 {
            assert_eq!(registry.interfaces_of(node).count(), topo.degree(node));
            for iface in registry.interfaces_of(node) {
                assert_eq!(registry.owner_of(iface).map(|o| o.node), Some(node));
            }
        }
    }
}
