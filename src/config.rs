use serde::{Deserialize, Serialize};

use crate::topology::factory::{DEFAULT_MAX_WEIGHT, DEFAULT_MIN_WEIGHT, DEFAULT_SEED};
use crate::topology::{EdgeSpec, NodeIndex, Weight, DEFAULT_NODE_PREFIX};
use crate::utils::validation::{validate_edge_set, validate_node_count, validate_weight_range};

/// Top-level YAML configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    pub topology: TopologyConfig,
}

impl Config {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(level) = &self.general.log_level {
            if level.parse::<log::LevelFilter>().is_err() {
                return Err(ConfigError::InvalidGeneral(format!(
                    "Unknown log level '{}'",
                    level
                )));
            }
        }

        let topology = &self.topology;
        validate_weight_range(topology.weights.min, topology.weights.max)
            .map_err(ConfigError::InvalidWeights)?;

        if topology.node_prefix.is_empty() {
            return Err(ConfigError::InvalidTopology(
                "node_prefix cannot be empty".to_string(),
            ));
        }

        match (&topology.gml, &topology.edges) {
            (Some(_), Some(_)) => Err(ConfigError::InvalidTopology(
                "Specify either 'gml' or 'edges', not both".to_string(),
            )),
            (Some(path), None) => {
                if path.is_empty() {
                    return Err(ConfigError::InvalidTopology(
                        "GML path cannot be empty".to_string(),
                    ));
                }
                Ok(())
            }
            (None, Some(_)) => {
                let nodes = topology.nodes.ok_or_else(|| {
                    ConfigError::InvalidTopology("'nodes' is required with 'edges'".to_string())
                })?;
                validate_node_count(nodes).map_err(ConfigError::InvalidTopology)?;
                validate_edge_set(nodes, &topology.edge_specs()).map_err(ConfigError::InvalidTopology)
            }
            (None, None) => Err(ConfigError::InvalidTopology(
                "Either 'gml' or 'edges' must be provided".to_string(),
            )),
        }
    }
}

/// Shared general configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Seed for random link weights
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
    /// Compute per-source tables on the rayon pool
    #[serde(default)]
    pub parallel: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            log_level: None,
            parallel: false,
        }
    }
}

/// Topology section: an inline edge list or a GML file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopologyConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nodes: Option<usize>,
    #[serde(default = "default_node_prefix")]
    pub node_prefix: String,
    #[serde(default)]
    pub weights: WeightRange,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edges: Option<Vec<EdgeEntry>>,
    /// Path to a GML file, relative to the config file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gml: Option<String>,
}

impl TopologyConfig {
    /// Inline edges as factory specs, in file order
    pub fn edge_specs(&self) -> Vec<EdgeSpec> {
        self.edges
            .iter()
            .flatten()
            .map(EdgeEntry::to_spec)
            .collect()
    }
}

/// Inclusive range for randomly drawn link weights
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightRange {
    pub min: Weight,
    pub max: Weight,
}

impl Default for WeightRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_WEIGHT,
            max: DEFAULT_MAX_WEIGHT,
        }
    }
}

/// An edge as written in YAML: `[0, 1]` or `{ a: 0, b: 1, weight: 4 }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EdgeEntry {
    Pair(NodeIndex, NodeIndex),
    Weighted {
        a: NodeIndex,
        b: NodeIndex,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        weight: Option<Weight>,
    },
}

impl EdgeEntry {
    pub fn to_spec(&self) -> EdgeSpec {
        match *self {
            EdgeEntry::Pair(a, b) => EdgeSpec::from((a, b)),
            EdgeEntry::Weighted { a, b, weight } => EdgeSpec { a, b, weight },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid general configuration: {0}")]
    InvalidGeneral(String),
    #[error("Invalid topology configuration: {0}")]
    InvalidTopology(String),
    #[error("Invalid weight configuration: {0}")]
    InvalidWeights(String),
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

fn default_node_prefix() -> String {
    DEFAULT_NODE_PREFIX.to_string()
}
