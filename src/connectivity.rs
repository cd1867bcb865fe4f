//! Read-only connectivity diagnostics: component structure, degree
//! statistics, and the cost diameter of the largest component.
//!
//! The diameter runs a full Dijkstra from every node of the largest
//! component, so the whole analysis is O(V·(V+E) log V) in the worst case.
//! This is a diagnostic, not a hot-path operation.

use std::collections::VecDeque;

use ahash::AHashSet;
use serde::Serialize;

use crate::dijkstra::distance_map;
use crate::graph::Graph;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConnectivityReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub average_degree: f64,
    /// Nodes with no connections at all, sorted.
    pub isolated_nodes: Vec<String>,
    /// Number of weakly connected components (edge direction ignored).
    pub connected_components: usize,
    pub largest_component_size: usize,
    /// Longest finite shortest-path cost between any ordered pair inside the
    /// largest component. `None` when no component has two nodes.
    pub diameter: Option<f64>,
}

pub fn analyze_connectivity(graph: &Graph) -> ConnectivityReport {
    let ids = graph.node_ids();
    let node_count = ids.len();
    let edge_count = graph.edge_count();

    let mut isolated_nodes = Vec::new();
    let mut degree_total = 0usize;
    for id in &ids {
        let degree = graph.degree(id);
        degree_total += degree;
        if degree == 0 {
            isolated_nodes.push(id.clone());
        }
    }
    let average_degree = if node_count == 0 {
        0.0
    } else {
        degree_total as f64 / node_count as f64
    };

    let components = components(graph, &ids);
    let largest = components.iter().max_by_key(|c| c.len());
    let largest_component_size = largest.map(Vec::len).unwrap_or(0);
    let diameter = largest.and_then(|component| component_diameter(graph, component));

    ConnectivityReport {
        node_count,
        edge_count,
        average_degree,
        isolated_nodes,
        connected_components: components.len(),
        largest_component_size,
        diameter,
    }
}

/// Weakly connected components by repeated BFS over forward and reverse
/// adjacency, each sorted, ordered by first member.
fn components(graph: &Graph, ids: &[String]) -> Vec<Vec<String>> {
    let mut components = Vec::new();
    let mut visited: AHashSet<String> = AHashSet::new();
    for id in ids {
        if !visited.insert(id.clone()) {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::new();
        queue.push_back(id.clone());
        while let Some(node) = queue.pop_front() {
            component.push(node.clone());
            for (next, _) in graph.neighbors(&node) {
                if visited.insert(next.clone()) {
                    queue.push_back(next);
                }
            }
            for (prev, _) in graph.incoming(&node) {
                if visited.insert(prev.clone()) {
                    queue.push_back(prev);
                }
            }
        }
        component.sort_unstable();
        components.push(component);
    }
    components.sort_by(|a, b| a[0].cmp(&b[0]));
    components
}

fn component_diameter(graph: &Graph, component: &[String]) -> Option<f64> {
    if component.len() < 2 {
        return None;
    }
    let members: AHashSet<&String> = component.iter().collect();
    let mut diameter: Option<f64> = None;
    for source in component {
        for (target, cost) in distance_map(graph, source) {
            if source == &target || !members.contains(&target) {
                continue;
            }
            if diameter.map(|d| cost > d).unwrap_or(true) {
                diameter = Some(cost);
            }
        }
    }
    diameter
}
