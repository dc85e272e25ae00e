#[cfg(test)]
mod pipeline_tests {
    use std::fs;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    use torus_routes::config_loader::{apply_overrides, load_config, CliOverrides};
    use torus_routes::orchestrator::{build_topology, generate_routes, load_topology_snapshot, run, write_outputs};

    const RING_YAML: &str = r#"
general:
  seed: 21
topology:
  nodes: 6
  node_prefix: r
  weights: { min: 2, max: 9 }
  edges:
    - [0, 1]
    - [1, 2]
    - [2, 3]
    - [3, 4]
    - [4, 5]
    - { a: 5, b: 0, weight: 30 }
"#;

    fn write_config(dir: &TempDir, yaml: &str) -> std::path::PathBuf {
        let path = dir.path().join("config.yaml");
        fs::write(&path, yaml).unwrap();
        path
    }

    #[test]
    fn test_yaml_pipeline_writes_every_document() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, RING_YAML);
        let out = dir.path().join("out");

        let config = load_config(&config_path).unwrap();
        let generated = run(&config, dir.path(), &out).unwrap();

        assert_eq!(generated.topology.len(), 6);
        assert_eq!(generated.topology.weight(0, 5).unwrap(), 30);
        for edge in &generated.topology.edges()[..5] {
            assert!((2..=9).contains(&edge.weight));
        }

        // 6 nodes of degree 2: each source routes 5 nodes x 2 interfaces
        assert_eq!(generated.plan.route_count(), 60);
        let commands = fs::read_to_string(out.join("routes.txt")).unwrap();
        assert_eq!(commands.lines().count(), 60);
        assert!(commands.lines().all(|l| l.contains(" ip route add 10.0.")));

        let routes: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("routes.json")).unwrap()).unwrap();
        assert_eq!(routes.as_array().unwrap().len(), 60);
        assert_eq!(routes[0]["node"], "r1");

        let interfaces: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(out.join("interfaces.json")).unwrap()).unwrap();
        assert_eq!(interfaces[0]["interfaces"][0], "10.0.0.1/24");

        for i in 1..=6 {
            assert!(out.join(format!("spt_r{}.dot", i)).exists());
        }
    }

    #[test]
    fn test_same_seed_same_routes() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, RING_YAML);
        let config = load_config(&config_path).unwrap();

        let first = generate_routes(build_topology(&config, dir.path()).unwrap(), false).unwrap();
        let second = generate_routes(build_topology(&config, dir.path()).unwrap(), true).unwrap();
        assert_eq!(first.topology, second.topology);
        assert_eq!(first.plan, second.plan);
    }

    #[test]
    fn test_overrides_change_weights() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, RING_YAML);
        let mut config = load_config(&config_path).unwrap();

        let overrides = CliOverrides {
            min_weight: Some(3),
            max_weight: Some(3),
            ..Default::default()
        };
        apply_overrides(&mut config, &overrides).unwrap();
        let topo = build_topology(&config, dir.path()).unwrap();
        let weights: Vec<u32> = topo.edges().iter().map(|e| e.weight).collect();
        assert_eq!(weights, vec![3, 3, 3, 3, 3, 30]);
    }

    #[test]
    fn test_gml_pipeline() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("square.gml"),
            r#"
graph [
  node [ id 100 label "north" ]
  node [ id 200 label "east" ]
  node [ id 300 label "south" ]
  node [ id 400 label "west" ]
  edge [ source 100 target 200 latency "1ms" ]
  edge [ source 200 target 300 weight 1 ]
  edge [ source 300 target 400 latency "1ms" ]
  edge [ source 400 target 100 latency "10ms" ]
]
"#,
        )
        .unwrap();
        let config_path = write_config(&dir, "topology:\n  gml: square.gml\n");

        let config = load_config(&config_path).unwrap();
        let generated = run(&config, dir.path(), &dir.path().join("out")).unwrap();

        let topo = &generated.topology;
        assert_eq!(topo.name(0), Some("north"));
        assert_eq!(topo.weight(3, 0).unwrap(), 10);

        // north reaches west the long way round
        let tree = generated.plan.tree(0).unwrap();
        assert_eq!(tree.cost(3), Some(3));
        assert_eq!(tree.first_hop(3), Some(1));
        assert!(generated.plan.coverage().is_complete());
    }

    #[test]
    fn test_gml_over_node_cap_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut gml = String::from("graph [\n");
        for i in 0..24 {
            gml.push_str(&format!("  node [ id {} ]\n", i));
        }
        gml.push_str("]\n");
        fs::write(dir.path().join("big.gml"), gml).unwrap();
        let config_path = write_config(&dir, "topology: { gml: big.gml }");

        let config = load_config(&config_path).unwrap();
        assert!(build_topology(&config, dir.path()).is_err());
    }

    #[test]
    fn test_gml_duplicate_labels_are_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("twins.gml"),
            r#"
graph [
  node [ id 1 label "a" ]
  node [ id 2 label "a" ]
  node [ id 3 label "b" ]
  edge [ source 1 target 2 ]
  edge [ source 2 target 3 ]
]
"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("escape.gml"),
            "graph [\n  node [ id 1 label \"../escaped\" ]\n  node [ id 2 label \"b\" ]\n  edge [ source 1 target 2 ]\n]\n",
        )
        .unwrap();

        for gml in ["twins.gml", "escape.gml"] {
            let config_path = write_config(&dir, &format!("topology: {{ gml: {} }}", gml));
            let config = load_config(&config_path).unwrap();
            assert!(build_topology(&config, dir.path()).is_err());

            let out = dir.path().join("out");
            assert!(run(&config, dir.path(), &out).is_err());
            assert!(!out.join("routes.txt").exists());
        }
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = TempDir::new().unwrap();
        let config_path = write_config(&dir, RING_YAML);
        let config = load_config(&config_path).unwrap();
        let generated = run(&config, dir.path(), dir.path()).unwrap();

        let reloaded = load_topology_snapshot(&dir.path().join("topology.json")).unwrap();
        let regenerated = generate_routes(reloaded, false).unwrap();
        assert_eq!(regenerated.plan, generated.plan);

        let rerun = dir.path().join("rerun");
        write_outputs(&regenerated, &rerun).unwrap();
        assert_eq!(
            fs::read_to_string(rerun.join("routes.txt")).unwrap(),
            fs::read_to_string(dir.path().join("routes.txt")).unwrap()
        );
    }

    #[test]
    fn test_tampered_snapshot_is_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{
  "nodes": [{{"index": 0, "name": "v1"}}, {{"index": 1, "name": "v2"}}],
  "edges": [{{"a": 0, "b": 1, "weight": 4}}],
  "adjacency": [[{{"node": 1, "weight": 4, "edge": 0}}], []]
}}"#
        )
        .unwrap();
        assert!(load_topology_snapshot(temp_file.path()).is_err());
    }
}
