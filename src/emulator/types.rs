//! Emulator-facing type definitions.
//!
//! These structures are the whole contract with the network emulation
//! collaborator: which interfaces to configure on which node, how links are
//! shaped, and which routes to install. They serialize to JSON as written
//! into the output directory.

use serde::Serialize;

use crate::ip::InterfaceId;
use crate::topology::Weight;

// ============================================================================
// Install Directives
// ============================================================================

/// One route to install: at `node`, reach `destination` via `via`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallDirective {
    /// Name of the node the route is applied at
    pub node: String,
    /// Destination interface address
    pub destination: InterfaceId,
    /// Next-hop interface address
    pub via: InterfaceId,
}

impl InstallDirective {
    /// Host-level command the emulator runs on `node`
    pub fn command(&self) -> String {
        format!("ip route add {} via {}", self.destination, self.via)
    }
}

// ============================================================================
// Node and Link Descriptions
// ============================================================================

/// Interfaces the emulator must bring up on one node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeInterfaces {
    pub node: String,
    /// Addresses with prefix length, in adjacency order
    pub interfaces: Vec<String>,
}

/// A shaped point-to-point link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkRecord {
    pub edge: usize,
    /// CIDR block reserved for the link
    pub block: String,
    pub a: String,
    pub a_interface: InterfaceId,
    pub b: String,
    pub b_interface: InterfaceId,
    pub weight: Weight,
    /// Propagation delay in emulator notation, e.g. `"5ms"`
    pub delay: String,
}

// ============================================================================
// Manifest
// ============================================================================

/// Everything the emulator needs to instantiate and route the network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmulatorManifest {
    pub nodes: Vec<NodeInterfaces>,
    pub links: Vec<LinkRecord>,
    pub routes: Vec<InstallDirective>,
}
