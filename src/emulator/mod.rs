//! # Emulator Contract Module
//!
//! Translates a computed routing plan into the in-process data handed to the
//! network emulation collaborator. The emulator itself (namespaces, virtual
//! links, delay shaping, connectivity tests) lives outside this crate.
//!
//! ## Key Components
//!
//! - `types.rs`: directive, node and link records plus the manifest
//!
//! ## Data Flow
//!
//! 1. **Links**: every edge becomes a link record with both interface
//!    addresses and its delay
//! 2. **Nodes**: every node lists its interfaces in adjacency order
//! 3. **Routes**: every routing table is flattened into install directives,
//!    source by source, in table emission order

pub mod types;

pub use types::{EmulatorManifest, InstallDirective, LinkRecord, NodeInterfaces};

use log::debug;

use crate::error::{RoutingError, RoutingResult};
use crate::ip::InterfaceRegistry;
use crate::routing::{RoutingPlan, RoutingTable};
use crate::topology::Topology;

/// Install directives of one table, applied at its source node
pub fn table_directives(topology: &Topology, table: &RoutingTable) -> RoutingResult<Vec<InstallDirective>> {
    let node = topology.node(table.source())?.name.clone();
    Ok(table
        .routes()
        .iter()
        .map(|route| InstallDirective {
            node: node.clone(),
            destination: route.destination,
            via: route.next_hop,
        })
        .collect())
}

/// Install directives of every table, in source order
pub fn plan_directives(topology: &Topology, plan: &RoutingPlan) -> RoutingResult<Vec<InstallDirective>> {
    let mut directives = Vec::with_capacity(plan.route_count());
    for table in plan.tables() {
        directives.extend(table_directives(topology, table)?);
    }
    for directive in &directives {
        debug!("{} {}", directive.node, directive.command());
    }
    Ok(directives)
}

/// Interfaces of every node, with prefix length
pub fn node_interfaces(topology: &Topology, registry: &InterfaceRegistry) -> Vec<NodeInterfaces> {
    topology
        .nodes()
        .iter()
        .map(|node| NodeInterfaces {
            node: node.name.clone(),
            interfaces: registry.interfaces_of(node.index).map(|i| i.with_prefix()).collect(),
        })
        .collect()
}

/// Link records in edge creation order
pub fn link_records(topology: &Topology, registry: &InterfaceRegistry) -> RoutingResult<Vec<LinkRecord>> {
    let scheme = registry.scheme();
    let mut links = Vec::with_capacity(topology.edge_count());
    for (i, edge) in topology.edges().iter().enumerate() {
        let (a_interface, b_interface) = scheme.assign(i)?;
        links.push(LinkRecord {
            edge: i,
            block: scheme.block(i)?,
            a: topology.node(edge.a)?.name.clone(),
            a_interface,
            b: topology.node(edge.b)?.name.clone(),
            b_interface,
            weight: edge.weight,
            delay: format!("{}ms", edge.weight),
        });
    }
    Ok(links)
}

/// Assemble the full emulator manifest
pub fn build_manifest(
    topology: &Topology,
    registry: &InterfaceRegistry,
    plan: &RoutingPlan,
) -> RoutingResult<EmulatorManifest> {
    if plan.sources().len() != topology.len() {
        return Err(RoutingError::UnknownNode {
            index: plan.sources().len(),
            len: topology.len(),
        });
    }
    Ok(EmulatorManifest {
        nodes: node_interfaces(topology, registry),
        links: link_records(topology, registry)?,
        routes: plan_directives(topology, plan)?,
    })
}

/// One `"<node> <command>"` line per directive
pub fn render_commands(directives: &[InstallDirective]) -> String {
    let mut out = String::new();
    for directive in directives {
        out.push_str(&directive.node);
        out.push(' ');
        out.push_str(&directive.command());
        out.push('\n');
    }
    out
}
