//! Graphviz DOT text for the visualization collaborator.
//!
//! Rendering to images happens outside this crate; these functions only walk
//! the topology (node names, weighted edges) and a tree's links.

use std::fmt::Write;

use crate::error::RoutingResult;
use crate::ip::InterfaceRegistry;
use crate::routing::ShortestPathTree;
use crate::topology::Topology;

const NODE_STYLE: &str = "node [shape=tripleoctagon, color=lightblue2, style=filled];";

/// Undirected graph of the topology, edges labelled with their weight
pub fn topology_dot(topology: &Topology) -> String {
    let mut out = String::from("graph topology {\n");
    let _ = writeln!(out, "  {}", NODE_STYLE);
    for node in topology.nodes() {
        let _ = writeln!(out, "  \"{}\";", node.name);
    }
    for edge in topology.edges() {
        let _ = writeln!(
            out,
            "  \"{}\" -- \"{}\" [label=\"{}\"];",
            name(topology, edge.a),
            name(topology, edge.b),
            edge.weight
        );
    }
    out.push_str("}\n");
    out
}

/// Links of one shortest-path tree; unreachable nodes appear unconnected
pub fn tree_dot(topology: &Topology, tree: &ShortestPathTree) -> RoutingResult<String> {
    let source = topology.node(tree.source())?;
    let mut out = format!("graph \"spt_{}\" {{\n", source.name);
    let _ = writeln!(out, "  {}", NODE_STYLE);
    for node in topology.nodes() {
        if node.index == tree.source() {
            let _ = writeln!(out, "  \"{}\" [color=tomato];", node.name);
        } else {
            let _ = writeln!(out, "  \"{}\";", node.name);
        }
    }
    for link in tree.links(topology)? {
        let _ = writeln!(
            out,
            "  \"{}\" -- \"{}\" [label=\"{}\"];",
            name(topology, link.child),
            name(topology, link.parent),
            link.weight
        );
    }
    out.push_str("}\n");
    Ok(out)
}

/// Topology with interface addresses at each link end and delay in the middle
pub fn addressed_dot(topology: &Topology, registry: &InterfaceRegistry) -> RoutingResult<String> {
    let scheme = registry.scheme();
    let mut out = String::from("graph map {\n");
    for (i, edge) in topology.edges().iter().enumerate() {
        let (first, second) = scheme.assign(i)?;
        let _ = writeln!(
            out,
            "  \"{}\" -- \"{}\" [taillabel=\"{}\", headlabel=\"{}\", label=\"{}ms\", color=tomato];",
            name(topology, edge.a),
            name(topology, edge.b),
            first,
            second,
            edge.weight
        );
    }
    out.push_str("}\n");
    Ok(out)
}

fn name(topology: &Topology, index: usize) -> &str {
    topology.name(index).unwrap_or("?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ip::AddressingScheme;

    fn triangle() -> Topology {
        let mut topo = Topology::with_prefix("v", 3).unwrap();
        topo.add_edge(0, 1, 5).unwrap();
        topo.add_edge(0, 2, 5).unwrap();
        topo.add_edge(1, 2, 1).unwrap();
        topo
    }

    #[test]
    fn test_topology_dot_lists_every_edge() {
        let dot = topology_dot(&triangle());
        assert!(dot.starts_with("graph topology {"));
        assert!(dot.contains("\"v1\" -- \"v2\" [label=\"5\"];"));
        assert!(dot.contains("\"v2\" -- \"v3\" [label=\"1\"];"));
        assert_eq!(dot.matches(" -- ").count(), 3);
    }

    #[test]
    fn test_tree_dot_has_one_link_per_non_source_node() {
        let topo = triangle();
        let tree = ShortestPathTree::compute(&topo, 0).unwrap();
        let dot = tree_dot(&topo, &tree).unwrap();
        assert!(dot.starts_with("graph \"spt_v1\""));
        assert_eq!(dot.matches(" -- ").count(), 2);
        assert!(dot.contains("\"v3\" -- \"v1\" [label=\"5\"];"));
    }

    #[test]
    fn test_tree_dot_declares_unreachable_nodes() {
        let mut topo = Topology::with_prefix("v", 4).unwrap();
        topo.add_edge(0, 1, 2).unwrap();
        topo.add_edge(2, 3, 2).unwrap();
        let tree = ShortestPathTree::compute(&topo, 0).unwrap();
        let dot = tree_dot(&topo, &tree).unwrap();
        assert!(dot.contains("  \"v1\" [color=tomato];"));
        assert!(dot.contains("  \"v3\";"));
        assert!(dot.contains("  \"v4\";"));
        assert_eq!(dot.matches(" -- ").count(), 1);
        assert!(!dot.contains("\"v3\" --"));
    }

    #[test]
    fn test_addressed_dot_labels_link_ends() {
        let topo = triangle();
        let registry = InterfaceRegistry::build(&topo, AddressingScheme::default()).unwrap();
        let dot = addressed_dot(&topo, &registry).unwrap();
        assert!(dot.contains("taillabel=\"10.0.2.1\", headlabel=\"10.0.2.2\", label=\"1ms\""));
    }
}
