//! Shortest-path routing module.
//!
//! Dijkstra trees per source, their collapse into per-interface next-hop
//! tables, and the all-sources plan handed to the emulator.

pub mod dijkstra;
pub mod plan;
pub mod table;

pub use dijkstra::{Cost, ShortestPathTree, TreeEntry, TreeLink};
pub use plan::{Coverage, CoverageGap, RoutingPlan, SourceRoutes};
pub use table::{Route, RoutingTable};
