use crate::config::{Config, ConfigError};
use crate::topology::Weight;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use log::info;
use std::fs::File;
use std::path::Path;

/// Load and parse configuration from a YAML file
pub fn load_config(config_path: &Path) -> Result<Config> {
    info!("Loading configuration from: {:?}", config_path);

    let file = File::open(config_path)
        .wrap_err_with(|| format!("Failed to open config file {:?}", config_path))?;
    let config: Config = serde_yaml::from_reader(file)
        .wrap_err_with(|| format!("Failed to parse config file {:?}", config_path))?;

    config.validate()?;

    Ok(config)
}

/// CLI arguments that override YAML settings
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub seed: Option<u64>,
    pub min_weight: Option<Weight>,
    pub max_weight: Option<Weight>,
    pub parallel: bool,
}

/// Apply CLI overrides to a configuration
pub fn apply_overrides(config: &mut Config, overrides: &CliOverrides) -> Result<(), ConfigError> {
    if let Some(seed) = overrides.seed {
        info!("Overriding seed: {} -> {}", config.general.seed, seed);
        config.general.seed = seed;
    }
    if let Some(min) = overrides.min_weight {
        info!("Overriding minimum weight: {}", min);
        config.topology.weights.min = min;
    }
    if let Some(max) = overrides.max_weight {
        info!("Overriding maximum weight: {}", max);
        config.topology.weights.max = max;
    }
    if overrides.parallel {
        config.general.parallel = true;
    }

    // Re-validate after applying overrides
    config.validate()
}
