//! Interface addressing module.
//!
//! This module maps every undirected link to two interface identifiers,
//! one per endpoint, and resolves which node owns which interface.

pub mod allocator;
pub mod registry;

// Re-export commonly used types
pub use allocator::{AddressingScheme, InterfaceId, Side, MAX_EDGE_BLOCKS};
pub use registry::{InterfaceOwner, InterfaceRegistry, NodeInterface};
