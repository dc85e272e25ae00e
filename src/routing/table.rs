//! Next-hop forwarding tables.
//!
//! A table for source `s` is keyed by destination *interface*: every node
//! exposes one address per incident link, so each reachable node `d`
//! contributes one route per interface it owns. All of them point at the
//! interface that `s`'s first hop toward `d` presents on the link to `s`.

use log::debug;
use serde::Serialize;

use super::dijkstra::ShortestPathTree;
use crate::error::{RoutingError, RoutingResult};
use crate::ip::{InterfaceId, InterfaceRegistry};
use crate::topology::{NodeIndex, Topology};

/// One forwarding rule: to reach `destination`, send via `next_hop`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub destination: InterfaceId,
    pub next_hop: InterfaceId,
    /// Node owning `destination`
    pub destination_node: NodeIndex,
    /// Node owning `next_hop`, a direct neighbor of the source
    pub via_node: NodeIndex,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingTable {
    source: NodeIndex,
    routes: Vec<Route>,
}

impl RoutingTable {
    /// Collapse `tree` into routes for its source.
    ///
    /// Routes are emitted per direct neighbor in adjacency order, then by
    /// ascending destination index, then in the destination's interface
    /// order. Nodes unreachable from the source get no routes.
    pub fn build(
        topology: &Topology,
        registry: &InterfaceRegistry,
        tree: &ShortestPathTree,
    ) -> RoutingResult<Self> {
        let source = tree.source();
        if tree.len() != topology.len() {
            return Err(RoutingError::UnknownNode {
                index: tree.len(),
                len: topology.len(),
            });
        }

        let first_hops: Vec<Option<NodeIndex>> =
            (0..topology.len()).map(|d| tree.first_hop(d)).collect();

        let mut routes = Vec::new();
        for conn in topology.connections(source) {
            let hop = conn.node;
            // The neighbor's end of the link the source faces it on
            let next_hop = registry
                .interface_toward(source, hop)
                .and_then(|own| registry.scheme().peer_of(own))
                .ok_or(RoutingError::NoSuchEdge { u: source, v: hop })?;

            for (destination_node, first) in first_hops.iter().enumerate() {
                if *first != Some(hop) {
                    continue;
                }
                for destination in registry.interfaces_of(destination_node) {
                    routes.push(Route {
                        destination,
                        next_hop,
                        destination_node,
                        via_node: hop,
                    });
                }
            }
        }

        debug!("Routing table for node {}: {} routes", source, routes.len());
        Ok(Self { source, routes })
    }

    pub fn source(&self) -> NodeIndex {
        self.source
    }

    /// Routes in emission order
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn route(&self, destination: InterfaceId) -> Option<&Route> {
        self.routes.iter().find(|r| r.destination == destination)
    }

    pub fn next_hop(&self, destination: InterfaceId) -> Option<InterfaceId> {
        self.route(destination).map(|r| r.next_hop)
    }

    /// Destination nodes with at least one route, without duplicates
    pub fn destination_nodes(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = self.routes.iter().map(|r| r.destination_node).collect();
        nodes.sort_unstable();
        nodes.dedup();
        nodes
    }
}
