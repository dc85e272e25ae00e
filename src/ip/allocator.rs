//! Per-link address allocation.
//!
//! Every undirected edge `i` (creation order) owns the block `10.0.i.0/24`.
//! The edge's first endpoint presents `10.0.i.1`, the second `10.0.i.2`.
//! Blocks never overlap, so interface identifiers are unique for the whole
//! topology and stable for its lifetime.

use std::fmt;
use std::net::Ipv4Addr;

use serde::{Deserialize, Serialize};

use crate::error::{RoutingError, RoutingResult};

/// Number of `/24` blocks available under the base prefix
pub const MAX_EDGE_BLOCKS: usize = 256;

/// Host octet of the first endpoint's interface
const FIRST_HOST: u8 = 1;
/// Host octet of the second endpoint's interface
const SECOND_HOST: u8 = 2;

/// Address of one endpoint of one link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InterfaceId(Ipv4Addr);

impl InterfaceId {
    /// Address with the block's prefix length, as handed to the emulator
    pub fn with_prefix(&self) -> String {
        format!("{}/24", self.0)
    }
}

impl fmt::Display for InterfaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Ipv4Addr> for InterfaceId {
    fn from(addr: Ipv4Addr) -> Self {
        InterfaceId(addr)
    }
}

impl From<InterfaceId> for Ipv4Addr {
    fn from(id: InterfaceId) -> Self {
        id.0
    }
}

/// Which endpoint of an edge an interface belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

/// Deterministic edge-index to interface mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressingScheme {
    base: [u8; 2],
}

impl Default for AddressingScheme {
    fn default() -> Self {
        Self { base: [10, 0] }
    }
}

impl AddressingScheme {
    /// Scheme allocating blocks under `first.second.0.0/16`
    pub fn new(first: u8, second: u8) -> Self {
        Self { base: [first, second] }
    }

    /// Interfaces of edge `edge_index`: `(first endpoint, second endpoint)`
    pub fn assign(&self, edge_index: usize) -> RoutingResult<(InterfaceId, InterfaceId)> {
        let block = u8::try_from(edge_index)
            .map_err(|_| RoutingError::AddressSpaceExhausted { edge_index })?;
        Ok((
            self.interface(block, FIRST_HOST),
            self.interface(block, SECOND_HOST),
        ))
    }

    /// Interface of one side of edge `edge_index`
    pub fn interface_for(&self, edge_index: usize, side: Side) -> RoutingResult<InterfaceId> {
        let (first, second) = self.assign(edge_index)?;
        Ok(match side {
            Side::First => first,
            Side::Second => second,
        })
    }

    /// The other endpoint's interface on the same edge
    pub fn peer_of(&self, interface: InterfaceId) -> Option<InterfaceId> {
        let [a, b, block, host] = interface.0.octets();
        if [a, b] != self.base {
            return None;
        }
        match host {
            FIRST_HOST => Some(self.interface(block, SECOND_HOST)),
            SECOND_HOST => Some(self.interface(block, FIRST_HOST)),
            _ => None,
        }
    }

    /// CIDR of the block reserved for `edge_index`
    pub fn block(&self, edge_index: usize) -> RoutingResult<String> {
        let block = u8::try_from(edge_index)
            .map_err(|_| RoutingError::AddressSpaceExhausted { edge_index })?;
        Ok(format!("{}.{}.{}.0/24", self.base[0], self.base[1], block))
    }

    fn interface(&self, block: u8, host: u8) -> InterfaceId {
        InterfaceId(Ipv4Addr::new(self.base[0], self.base[1], block, host))
    }
}
