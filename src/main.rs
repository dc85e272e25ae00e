use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::{info, LevelFilter};
use std::path::{Path, PathBuf};

use torus_routes::config_loader::{self, CliOverrides};
use torus_routes::orchestrator;

/// Shortest-path routing tables for emulated torus networks
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the topology configuration YAML file
    #[arg(short, long, required_unless_present = "topology")]
    config: Option<PathBuf>,

    /// Recompute routes for a previously written topology.json
    #[arg(short, long, conflicts_with = "config")]
    topology: Option<PathBuf>,

    /// Output directory for routes and emulator documents
    #[arg(short, long, default_value = "routing_output")]
    output: PathBuf,

    /// Seed for random link weights
    #[arg(long, conflicts_with = "topology")]
    seed: Option<u64>,

    /// Smallest random link weight in milliseconds
    #[arg(long, conflicts_with = "topology")]
    min_weight: Option<u32>,

    /// Largest random link weight in milliseconds
    #[arg(long, conflicts_with = "topology")]
    max_weight: Option<u32>,

    /// Compute per-source tables in parallel
    #[arg(long)]
    parallel: bool,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            seed: self.seed,
            min_weight: self.min_weight,
            max_weight: self.max_weight,
            parallel: self.parallel,
        }
    }
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // RUST_LOG wins over the configured level
    let env_filter = std::env::var_os("RUST_LOG").is_some();
    env_logger::Builder::from_env(Env::default().default_filter_or("trace")).init();
    if !env_filter {
        log::set_max_level(LevelFilter::Info);
    }

    let config = match &args.config {
        Some(path) => {
            let mut config = config_loader::load_config(path)?;
            config_loader::apply_overrides(&mut config, &args.overrides())?;
            Some(config)
        }
        None => None,
    };

    if !env_filter {
        let level = config.as_ref().and_then(|c| c.general.log_level.as_deref());
        log::set_max_level(configured_level(level));
    }

    info!("Output directory: {:?}", args.output);

    match (config, &args.config, &args.topology) {
        (Some(config), Some(path), _) => {
            info!("Configuration file: {:?}", path);
            let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
            orchestrator::run(&config, base_dir, &args.output)?;
        }
        (_, _, Some(snapshot)) => {
            let topology = orchestrator::load_topology_snapshot(snapshot)?;
            let generated = orchestrator::generate_routes(topology, args.parallel)?;
            orchestrator::write_outputs(&generated, &args.output)?;
            println!("Regenerated {} routes in {:?}", generated.plan.route_count(), args.output);
        }
        _ => return Err(color_eyre::eyre::eyre!("Either --config or --topology is required")),
    }

    info!("Route generation completed successfully");
    Ok(())
}

/// Level from the config's `log_level`, `info` when unset or unparsable
fn configured_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|l| l.parse().ok())
        .unwrap_or(LevelFilter::Info)
}
