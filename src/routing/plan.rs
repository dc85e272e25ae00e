//! Routing for every source of a topology.
//!
//! Per-source runs only read the shared topology and interface registry, so
//! they may run on the rayon pool. Results are collected in source order and
//! are identical to a sequential run.

use log::info;
use rayon::prelude::*;

use super::dijkstra::ShortestPathTree;
use super::table::RoutingTable;
use crate::error::RoutingResult;
use crate::ip::InterfaceRegistry;
use crate::topology::{NodeIndex, Topology};

/// Tree and table computed for one source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceRoutes {
    pub tree: ShortestPathTree,
    pub table: RoutingTable,
}

/// Nodes a source has no path to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageGap {
    pub source: NodeIndex,
    pub unreachable: Vec<NodeIndex>,
}

/// Reachability summary of a plan. Gaps are informational, not errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Coverage {
    gaps: Vec<CoverageGap>,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.gaps.is_empty()
    }

    pub fn gaps(&self) -> &[CoverageGap] {
        &self.gaps
    }

    /// Number of ordered (source, destination) pairs without a path
    pub fn unreachable_pairs(&self) -> usize {
        self.gaps.iter().map(|g| g.unreachable.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPlan {
    sources: Vec<SourceRoutes>,
}

impl RoutingPlan {
    /// Compute every source one after another
    pub fn compute(topology: &Topology, registry: &InterfaceRegistry) -> RoutingResult<Self> {
        let sources = (0..topology.len())
            .map(|s| route_source(topology, registry, s))
            .collect::<RoutingResult<Vec<_>>>()?;
        Ok(Self::finish(sources))
    }

    /// Compute every source on the rayon thread pool
    pub fn compute_parallel(topology: &Topology, registry: &InterfaceRegistry) -> RoutingResult<Self> {
        let sources = (0..topology.len())
            .into_par_iter()
            .map(|s| route_source(topology, registry, s))
            .collect::<RoutingResult<Vec<_>>>()?;
        Ok(Self::finish(sources))
    }

    pub fn compute_with(
        topology: &Topology,
        registry: &InterfaceRegistry,
        parallel: bool,
    ) -> RoutingResult<Self> {
        if parallel {
            Self::compute_parallel(topology, registry)
        } else {
            Self::compute(topology, registry)
        }
    }

    fn finish(sources: Vec<SourceRoutes>) -> Self {
        let routes: usize = sources.iter().map(|s| s.table.len()).sum();
        info!("Computed routing tables for {} sources ({} routes)", sources.len(), routes);
        Self { sources }
    }

    pub fn sources(&self) -> &[SourceRoutes] {
        &self.sources
    }

    pub fn tree(&self, source: NodeIndex) -> Option<&ShortestPathTree> {
        self.sources.get(source).map(|s| &s.tree)
    }

    pub fn table(&self, source: NodeIndex) -> Option<&RoutingTable> {
        self.sources.get(source).map(|s| &s.table)
    }

    pub fn tables(&self) -> impl Iterator<Item = &RoutingTable> + '_ {
        self.sources.iter().map(|s| &s.table)
    }

    pub fn route_count(&self) -> usize {
        self.tables().map(RoutingTable::len).sum()
    }

    /// Sources with unreachable nodes, in source order
    pub fn coverage(&self) -> Coverage {
        let mut gaps = Vec::new();
        for entry in &self.sources {
            let tree = &entry.tree;
            let unreachable: Vec<NodeIndex> =
                (0..tree.len()).filter(|&d| !tree.is_reachable(d)).collect();
            if !unreachable.is_empty() {
                gaps.push(CoverageGap {
                    source: tree.source(),
                    unreachable,
                });
            }
        }
        Coverage { gaps }
    }
}

fn route_source(
    topology: &Topology,
    registry: &InterfaceRegistry,
    source: NodeIndex,
) -> RoutingResult<SourceRoutes> {
    let tree = ShortestPathTree::compute(topology, source)?;
    let table = RoutingTable::build(topology, registry, &tree)?;
    Ok(SourceRoutes { tree, table })
}
