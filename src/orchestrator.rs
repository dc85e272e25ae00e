//! Route generation orchestrator.
//!
//! This module coordinates the overall process, from a validated
//! configuration through topology construction and route computation to the
//! documents handed to the emulator and the visualization collaborators.

use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{eyre, Result, WrapErr};
use log::{info, warn};

use crate::config::Config;
use crate::emulator::{build_manifest, link_records, node_interfaces, render_commands};
use crate::gml_parser::{parse_gml_file, to_edge_set};
use crate::ip::{AddressingScheme, InterfaceRegistry};
use crate::routing::RoutingPlan;
use crate::topology::{node_names, Topology, TopologyFactory};
use crate::utils::validation::{validate_coverage, validate_edge_set, validate_node_count};
use crate::viz::{addressed_dot, topology_dot, tree_dot};

/// A topology together with its addressing and computed routes
#[derive(Debug, Clone)]
pub struct GeneratedRoutes {
    pub topology: Topology,
    pub registry: InterfaceRegistry,
    pub plan: RoutingPlan,
}

/// Build the weighted topology a configuration describes.
///
/// A `gml` path is resolved against `base_dir`, normally the directory
/// holding the config file.
pub fn build_topology(config: &Config, base_dir: &Path) -> Result<Topology> {
    let topo_config = &config.topology;
    let factory = TopologyFactory::new(topo_config.weights.min, topo_config.weights.max)?;

    let (names, edges) = match &topo_config.gml {
        Some(gml) => {
            let gml_path = base_dir.join(gml);
            info!("Loading edge set from GML file {:?}", gml_path);
            let graph = parse_gml_file(&gml_path)?;
            let loaded = to_edge_set(&graph, &topo_config.node_prefix)
                .wrap_err_with(|| format!("Unusable GML topology {:?}", gml_path))?;
            validate_node_count(loaded.names.len()).map_err(|e| eyre!("{:?}: {}", gml_path, e))?;
            validate_edge_set(loaded.names.len(), &loaded.edges)
                .map_err(|e| eyre!("{:?}: {}", gml_path, e))?;
            (loaded.names, loaded.edges)
        }
        None => {
            let nodes = topo_config
                .nodes
                .ok_or_else(|| eyre!("'nodes' is required with inline edges"))?;
            (node_names(&topo_config.node_prefix, nodes), topo_config.edge_specs())
        }
    };

    let topology = factory
        .build_seeded(names, &edges, config.general.seed)
        .wrap_err("Failed to build topology")?;
    Ok(topology)
}

/// Address every link and compute all routing tables
pub fn generate_routes(topology: Topology, parallel: bool) -> Result<GeneratedRoutes> {
    let registry = InterfaceRegistry::build(&topology, AddressingScheme::default())
        .wrap_err("Failed to assign interface addresses")?;
    info!("Assigned {} interfaces", registry.len());

    let plan = RoutingPlan::compute_with(&topology, &registry, parallel)
        .wrap_err("Failed to compute routing tables")?;

    if let Some(summary) = coverage_summary(&plan) {
        warn!("Topology is not connected: {}", summary);
    }

    Ok(GeneratedRoutes { topology, registry, plan })
}

/// One-line description of the plan's coverage gaps, `None` when complete
pub fn coverage_summary(plan: &RoutingPlan) -> Option<String> {
    validate_coverage(plan).err()
}

/// Write every output document into `output_dir`, returning the paths written
pub fn write_outputs(generated: &GeneratedRoutes, output_dir: &Path) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir)
        .wrap_err_with(|| format!("Failed to create output directory {:?}", output_dir))?;

    let GeneratedRoutes { topology, registry, plan } = generated;
    let manifest = build_manifest(topology, registry, plan)?;
    let mut written = Vec::new();

    let mut write = |name: &str, contents: String| -> Result<()> {
        let path = output_dir.join(name);
        fs::write(&path, contents).wrap_err_with(|| format!("Failed to write {:?}", path))?;
        written.push(path);
        Ok(())
    };

    write("topology.json", serde_json::to_string_pretty(topology)?)?;
    write("links.json", serde_json::to_string_pretty(&link_records(topology, registry)?)?)?;
    write("interfaces.json", serde_json::to_string_pretty(&node_interfaces(topology, registry))?)?;
    write("routes.json", serde_json::to_string_pretty(&manifest.routes)?)?;
    write("routes.txt", render_commands(&manifest.routes))?;
    write("topology.dot", topology_dot(topology))?;
    write("map.dot", addressed_dot(topology, registry)?)?;
    for source in plan.sources() {
        let name = topology.node(source.tree.source())?.name.clone();
        write(&format!("spt_{}.dot", name), tree_dot(topology, &source.tree)?)?;
    }

    info!("Wrote {} files to {:?}", written.len(), output_dir);
    Ok(written)
}

/// Load a `topology.json` snapshot and re-check it
pub fn load_topology_snapshot(path: &Path) -> Result<Topology> {
    info!("Loading topology snapshot from: {:?}", path);
    let content = fs::read_to_string(path)
        .wrap_err_with(|| format!("Failed to read topology snapshot {:?}", path))?;
    let topology: Topology = serde_json::from_str(&content)
        .wrap_err_with(|| format!("Failed to parse topology snapshot {:?}", path))?;
    topology
        .validate()
        .wrap_err_with(|| format!("Invalid topology snapshot {:?}", path))?;
    Ok(topology)
}

/// Full pipeline for a loaded configuration
pub fn run(config: &Config, base_dir: &Path, output_dir: &Path) -> Result<GeneratedRoutes> {
    let topology = build_topology(config, base_dir)?;
    let generated = generate_routes(topology, config.general.parallel)?;
    write_outputs(&generated, output_dir)?;

    println!("Generated routing tables in {:?}", output_dir);
    println!("  - Nodes: {}", generated.topology.len());
    println!("  - Links: {}", generated.topology.edge_count());
    println!("  - Routes: {}", generated.plan.route_count());
    Ok(generated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config(yaml: &str) -> Config {
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        config.validate().unwrap();
        config
    }

    #[test]
    fn test_build_topology_inline() {
        let config = config(
            r#"
topology:
  nodes: 3
  node_prefix: s
  edges:
    - { a: 0, b: 1, weight: 2 }
    - [1, 2]
"#,
        );
        let topo = build_topology(&config, Path::new(".")).unwrap();
        assert_eq!(topo.name(0), Some("s1"));
        assert_eq!(topo.weight(0, 1).unwrap(), 2);
        let drawn = topo.weight(1, 2).unwrap();
        assert!((1..=20).contains(&drawn));
    }

    #[test]
    fn test_build_topology_from_gml() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("net.gml"),
            r#"graph [
                node [ id 0 label "a" ]
                node [ id 1 label "b" ]
                edge [ source 0 target 1 latency "3ms" ]
            ]"#,
        )
        .unwrap();

        let config = config("topology: { gml: net.gml }");
        let topo = build_topology(&config, dir.path()).unwrap();
        assert_eq!(topo.len(), 2);
        assert_eq!(topo.name(1), Some("b"));
        assert_eq!(topo.weight(1, 0).unwrap(), 3);

        assert!(build_topology(&config, Path::new("/nonexistent")).is_err());
    }

    #[test]
    fn test_write_outputs_and_reload() {
        let dir = TempDir::new().unwrap();
        let config = config("topology: { nodes: 3, edges: [[0, 1], [1, 2]] }");
        let generated = run(&config, dir.path(), dir.path()).unwrap();

        for name in [
            "topology.json",
            "links.json",
            "interfaces.json",
            "routes.json",
            "routes.txt",
            "topology.dot",
            "map.dot",
            "spt_v1.dot",
            "spt_v3.dot",
        ] {
            assert!(dir.path().join(name).exists(), "missing {}", name);
        }

        let commands = fs::read_to_string(dir.path().join("routes.txt")).unwrap();
        assert_eq!(commands.lines().count(), generated.plan.route_count());
        assert!(commands.starts_with("v1 ip route add 10.0.0.2 via 10.0.0.2\n"));

        let reloaded = load_topology_snapshot(&dir.path().join("topology.json")).unwrap();
        assert_eq!(reloaded, generated.topology);
    }

    #[test]
    fn test_coverage_summary_lists_each_gap_once() {
        let split = config("topology: { nodes: 3, edges: [[0, 1]] }");
        let generated = generate_routes(build_topology(&split, Path::new(".")).unwrap(), false).unwrap();

        let summary = coverage_summary(&generated.plan).unwrap();
        assert!(summary.starts_with("4 source/destination pairs have no path"));
        assert_eq!(summary.matches("0 -> [2]").count(), 1);
        assert_eq!(summary.matches("2 -> [0, 1]").count(), 1);

        let connected = config("topology: { nodes: 2, edges: [[0, 1]] }");
        let generated = generate_routes(build_topology(&connected, Path::new(".")).unwrap(), false).unwrap();
        assert_eq!(coverage_summary(&generated.plan), None);
    }

    #[test]
    fn test_disconnected_topology_still_generates() {
        let config = config("topology: { nodes: 4, edges: [[0, 1], [2, 3]] }");
        let topo = build_topology(&config, Path::new(".")).unwrap();
        let generated = generate_routes(topo, true).unwrap();
        assert!(!generated.plan.coverage().is_complete());
        assert_eq!(generated.plan.route_count(), 4);
    }
}
