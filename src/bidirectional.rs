//! Bidirectional Dijkstra: simultaneous forward search from the start and
//! backward search from the goal over the reverse adjacency map. The two
//! frontiers merge at the cheapest meeting node; the result is cost-equal to
//! plain Dijkstra while settling roughly half the nodes on symmetric graphs.

use std::collections::BinaryHeap;

use ahash::{AHashMap, AHashSet};
use serde_json::json;

use crate::dijkstra::{HeapEntry, unwind_parents};
use crate::graph::Graph;
use crate::path::{AlgorithmKind, Path};

pub fn bidirectional_search(graph: &Graph, start: &str, goal: &str) -> Option<Path> {
    if !graph.contains_node(start) || !graph.contains_node(goal) {
        return None;
    }

    let mut dist_f: AHashMap<String, f64> = AHashMap::new();
    let mut dist_b: AHashMap<String, f64> = AHashMap::new();
    // Forward parents point back toward the start; backward parents point
    // ahead toward the goal.
    let mut parents_f: AHashMap<String, String> = AHashMap::new();
    let mut parents_b: AHashMap<String, String> = AHashMap::new();
    let mut settled_f: AHashSet<String> = AHashSet::new();
    let mut settled_b: AHashSet<String> = AHashSet::new();
    let mut open_f = BinaryHeap::new();
    let mut open_b = BinaryHeap::new();
    let mut best: Option<(f64, String)> = None;
    let mut expanded = 0usize;

    dist_f.insert(start.to_string(), 0.0);
    dist_b.insert(goal.to_string(), 0.0);
    open_f.push(HeapEntry {
        priority: 0.0,
        node: start.to_string(),
    });
    open_b.push(HeapEntry {
        priority: 0.0,
        node: goal.to_string(),
    });

    while !open_f.is_empty() || !open_b.is_empty() {
        let top_f = open_f.peek().map(|e| e.priority).unwrap_or(f64::INFINITY);
        let top_b = open_b.peek().map(|e| e.priority).unwrap_or(f64::INFINITY);
        // Once the cheapest possible unexplored meeting exceeds the best
        // known one, no better route remains.
        if let Some((best_cost, _)) = &best {
            if top_f + top_b >= *best_cost {
                break;
            }
        }
        if top_f <= top_b {
            expand_forward(
                graph, &mut open_f, &mut dist_f, &mut parents_f, &mut settled_f, &dist_b, &mut best,
            );
        } else {
            expand_backward(
                graph, &mut open_b, &mut dist_b, &mut parents_b, &mut settled_b, &dist_f, &mut best,
            );
        }
        expanded += 1;
    }

    let (_, meeting) = best?;
    let mut nodes = unwind_parents(&parents_f, start, &meeting)?;
    let mut current = meeting.clone();
    while current != goal {
        current = parents_b.get(&current)?.clone();
        nodes.push(current.clone());
    }
    let mut path = Path::reconstruct(graph, nodes, AlgorithmKind::Bidirectional)?;
    path.set_metadata("expanded", json!(expanded));
    path.set_metadata("meeting", json!(meeting));
    Some(path)
}

fn expand_forward(
    graph: &Graph,
    open: &mut BinaryHeap<HeapEntry>,
    dist: &mut AHashMap<String, f64>,
    parents: &mut AHashMap<String, String>,
    settled: &mut AHashSet<String>,
    other_dist: &AHashMap<String, f64>,
    best: &mut Option<(f64, String)>,
) {
    let Some(HeapEntry { node, priority }) = open.pop() else {
        return;
    };
    let Some(node_dist) = dist.get(&node).copied() else {
        return;
    };
    if priority > node_dist || !settled.insert(node.clone()) {
        return;
    }
    for (neighbor, _) in graph.neighbors(&node) {
        let Some(step) = graph.step_cost(&node, &neighbor) else {
            continue;
        };
        relax(
            neighbor, node_dist + step, &node, open, dist, parents, other_dist, best,
        );
    }
}

fn expand_backward(
    graph: &Graph,
    open: &mut BinaryHeap<HeapEntry>,
    dist: &mut AHashMap<String, f64>,
    parents: &mut AHashMap<String, String>,
    settled: &mut AHashSet<String>,
    other_dist: &AHashMap<String, f64>,
    best: &mut Option<(f64, String)>,
) {
    let Some(HeapEntry { node, priority }) = open.pop() else {
        return;
    };
    let Some(node_dist) = dist.get(&node).copied() else {
        return;
    };
    if priority > node_dist || !settled.insert(node.clone()) {
        return;
    }
    for (pred, _) in graph.incoming(&node) {
        let Some(step) = graph.step_cost(&pred, &node) else {
            continue;
        };
        relax(
            pred, node_dist + step, &node, open, dist, parents, other_dist, best,
        );
    }
}

#[allow(clippy::too_many_arguments)]
fn relax(
    target: String,
    tentative: f64,
    via: &str,
    open: &mut BinaryHeap<HeapEntry>,
    dist: &mut AHashMap<String, f64>,
    parents: &mut AHashMap<String, String>,
    other_dist: &AHashMap<String, f64>,
    best: &mut Option<(f64, String)>,
) {
    let improved = dist
        .get(&target)
        .map(|existing| tentative < *existing)
        .unwrap_or(true);
    if !improved {
        return;
    }
    dist.insert(target.clone(), tentative);
    parents.insert(target.clone(), via.to_string());
    if let Some(other) = other_dist.get(&target) {
        let total = tentative + other;
        let better = best
            .as_ref()
            .map(|(cost, _)| total < *cost)
            .unwrap_or(true);
        if better {
            *best = Some((total, target.clone()));
        }
    }
    open.push(HeapEntry {
        priority: tentative,
        node: target,
    });
}
