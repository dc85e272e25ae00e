//! Configuration validation utilities.
//!
//! This module provides validation functions for configuration
//! parameters and a reachability check over computed routes.

use std::collections::HashSet;

use crate::routing::RoutingPlan;
use crate::topology::{EdgeSpec, Weight, MAX_NODES};

/// Validate the node count of a topology
///
/// # Arguments
/// * `nodes` - Number of nodes requested
///
/// # Returns
/// * `Ok(())` if `1 <= nodes <= MAX_NODES`
/// * `Err(String)` with an error message otherwise
///
/// # Examples
/// ```
/// use torus_routes::utils::validation::validate_node_count;
///
/// assert!(validate_node_count(9).is_ok());
/// assert!(validate_node_count(0).is_err());
/// assert!(validate_node_count(24).is_err());
/// ```
pub fn validate_node_count(nodes: usize) -> Result<(), String> {
    if nodes == 0 {
        return Err("Topology needs at least one node".to_string());
    }
    if nodes > MAX_NODES {
        return Err(format!(
            "Topology of {} nodes exceeds the supported maximum of {}",
            nodes, MAX_NODES
        ));
    }
    Ok(())
}

/// Validate an inclusive weight range
///
/// # Examples
/// ```
/// use torus_routes::utils::validation::validate_weight_range;
///
/// assert!(validate_weight_range(1, 20).is_ok());
/// assert!(validate_weight_range(0, 20).is_err()); // weights must be positive
/// assert!(validate_weight_range(9, 3).is_err());
/// ```
pub fn validate_weight_range(min: Weight, max: Weight) -> Result<(), String> {
    if min < 1 {
        return Err(format!("Minimum weight must be at least 1, got {}", min));
    }
    if min > max {
        return Err(format!("Minimum weight {} exceeds maximum weight {}", min, max));
    }
    Ok(())
}

/// Validate an edge set against a node count
///
/// Checks for:
/// - Endpoints inside `0..nodes`
/// - Self-loops
/// - Duplicate undirected edges
/// - Zero fixed weights
pub fn validate_edge_set(nodes: usize, edges: &[EdgeSpec]) -> Result<(), String> {
    let mut seen = HashSet::new();
    for (i, edge) in edges.iter().enumerate() {
        if edge.a >= nodes || edge.b >= nodes {
            return Err(format!(
                "Edge {} ({}-{}) references a node outside 0..{}",
                i, edge.a, edge.b, nodes
            ));
        }
        if edge.a == edge.b {
            return Err(format!("Edge {} is a self-loop on node {}", i, edge.a));
        }
        if !seen.insert((edge.a.min(edge.b), edge.a.max(edge.b))) {
            return Err(format!("Edge {} ({}-{}) is a duplicate", i, edge.a, edge.b));
        }
        if edge.weight == Some(0) {
            return Err(format!("Edge {} ({}-{}) has a zero weight", i, edge.a, edge.b));
        }
    }
    Ok(())
}

/// Check that every source reaches every node
///
/// A disconnected topology is valid and yields partial tables; callers that
/// need full reachability use this check.
///
/// # Returns
/// * `Ok(())` if coverage is complete
/// * `Err(String)` listing the first sources with unreachable nodes
pub fn validate_coverage(plan: &RoutingPlan) -> Result<(), String> {
    let coverage = plan.coverage();
    if coverage.is_complete() {
        return Ok(());
    }

    let details: Vec<String> = coverage
        .gaps()
        .iter()
        .take(5)
        .map(|gap| format!("{} -> {:?}", gap.source, gap.unreachable))
        .collect();
    Err(format!(
        "{} source/destination pairs have no path ({}{})",
        coverage.unreachable_pairs(),
        details.join(", "),
        if coverage.gaps().len() > 5 { ", ..." } else { "" }
    ))
}
