//! Weight assignment for unweighted edge sets.
//!
//! The factory does not lay out adjacency; it takes an edge set produced
//! elsewhere and gives every undirected edge exactly one weight, drawn
//! uniformly from an inclusive range using a caller-supplied random source.

use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::graph::Topology;
use super::types::{EdgeSpec, Weight};
use crate::error::{RoutingError, RoutingResult};

/// Default inclusive weight range in milliseconds
pub const DEFAULT_MIN_WEIGHT: Weight = 1;
pub const DEFAULT_MAX_WEIGHT: Weight = 20;

/// Default seed for weight assignment
pub const DEFAULT_SEED: u64 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TopologyFactory {
    min_weight: Weight,
    max_weight: Weight,
}

impl Default for TopologyFactory {
    fn default() -> Self {
        Self {
            min_weight: DEFAULT_MIN_WEIGHT,
            max_weight: DEFAULT_MAX_WEIGHT,
        }
    }
}

impl TopologyFactory {
    /// Factory drawing from `[min_weight, max_weight]`; `min_weight >= 1`
    pub fn new(min_weight: Weight, max_weight: Weight) -> RoutingResult<Self> {
        if min_weight < 1 || min_weight > max_weight {
            return Err(RoutingError::InvalidWeightRange {
                min: min_weight,
                max: max_weight,
            });
        }
        Ok(Self { min_weight, max_weight })
    }

    pub fn weight_range(&self) -> (Weight, Weight) {
        (self.min_weight, self.max_weight)
    }

    /// Build a weighted topology from `edges` using `rng`.
    ///
    /// Edges are added in the given order. An edge with a fixed weight keeps
    /// it; every other edge consumes exactly one draw, so a given seed and
    /// edge order always yield the same weights.
    pub fn build<R: Rng>(
        &self,
        names: Vec<String>,
        edges: &[EdgeSpec],
        rng: &mut R,
    ) -> RoutingResult<Topology> {
        let mut topology = Topology::new(names)?;

        for spec in edges {
            let weight = match spec.weight {
                Some(fixed) => fixed,
                None => rng.gen_range(self.min_weight..=self.max_weight),
            };
            let edge = topology.add_edge(spec.a, spec.b, weight)?;
            debug!(
                "Edge {} ({}-{}) weight {}ms{}",
                edge,
                spec.a,
                spec.b,
                weight,
                if spec.weight.is_some() { " (fixed)" } else { "" }
            );
        }

        info!(
            "Built topology with {} nodes and {} edges (weights in [{}, {}])",
            topology.len(),
            topology.edge_count(),
            self.min_weight,
            self.max_weight
        );
        Ok(topology)
    }

    /// Build with a fresh `StdRng` seeded from `seed`
    pub fn build_seeded(
        &self,
        names: Vec<String>,
        edges: &[EdgeSpec],
        seed: u64,
    ) -> RoutingResult<Topology> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.build(names, edges, &mut rng)
    }
}
