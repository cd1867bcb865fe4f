//! Cost-optimal shortest path: Dijkstra and its heuristic-guided A*
//! variant. Both run a binary heap over accumulated traversal cost with
//! stale-entry skipping and reconstruct through a parent map.
//!
//! Edge weights must be non-negative; negative weights silently break the
//! optimality argument and are not validated here.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use ahash::AHashMap;
use serde_json::json;

use crate::cache::HeuristicCache;
use crate::graph::Graph;
use crate::heuristic::{Heuristic, cached_estimate};
use crate::path::{AlgorithmKind, Path};

/// Min-heap entry ordered by priority, ties broken lexicographically by
/// node id so expansion order is deterministic.
#[derive(Debug)]
pub(crate) struct HeapEntry {
    pub priority: f64,
    pub node: String,
}

impl PartialEq for HeapEntry {
    fn eq(&self, other: &Self) -> bool {
        self.priority.total_cmp(&other.priority) == Ordering::Equal && self.node == other.node
    }
}

impl Eq for HeapEntry {}

impl PartialOrd for HeapEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap, we want the cheapest first.
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.node.cmp(&self.node))
    }
}

/// Classic Dijkstra. Returns the minimum-cost route or `None` when the goal
/// is unreachable.
pub fn shortest_path(graph: &Graph, start: &str, goal: &str) -> Option<Path> {
    search(graph, start, goal, &Heuristic::Zero, None, AlgorithmKind::Dijkstra)
}

/// A*: Dijkstra ordered by `cost + estimate`. Optimal whenever the estimate
/// never overestimates the true remaining cost.
pub fn astar_path(
    graph: &Graph,
    start: &str,
    goal: &str,
    heuristic: &Heuristic,
    cache: Option<&HeuristicCache>,
) -> Option<Path> {
    search(graph, start, goal, heuristic, cache, AlgorithmKind::AStar)
}

fn search(
    graph: &Graph,
    start: &str,
    goal: &str,
    heuristic: &Heuristic,
    cache: Option<&HeuristicCache>,
    kind: AlgorithmKind,
) -> Option<Path> {
    if !graph.contains_node(start) || !graph.contains_node(goal) {
        return None;
    }
    let mut dist: AHashMap<String, f64> = AHashMap::new();
    let mut parents: AHashMap<String, String> = AHashMap::new();
    let mut open = BinaryHeap::new();
    let mut expanded = 0usize;

    dist.insert(start.to_string(), 0.0);
    open.push(HeapEntry {
        priority: cached_estimate(cache, heuristic, graph, start, goal),
        node: start.to_string(),
    });

    let mut found = false;
    while let Some(HeapEntry { node, priority }) = open.pop() {
        let node_dist = match dist.get(&node) {
            Some(d) => *d,
            None => continue,
        };
        // Stale heap entry: a cheaper route to this node was already settled.
        let node_estimate = cached_estimate(cache, heuristic, graph, &node, goal);
        if priority > node_dist + node_estimate {
            continue;
        }
        if node == goal {
            found = true;
            break;
        }
        expanded += 1;
        for (neighbor, _) in graph.neighbors(&node) {
            let Some(step) = graph.step_cost(&node, &neighbor) else {
                continue;
            };
            let tentative = node_dist + step;
            let improved = dist
                .get(&neighbor)
                .map(|existing| tentative < *existing)
                .unwrap_or(true);
            if improved {
                dist.insert(neighbor.clone(), tentative);
                parents.insert(neighbor.clone(), node.clone());
                let estimate = cached_estimate(cache, heuristic, graph, &neighbor, goal);
                open.push(HeapEntry {
                    priority: tentative + estimate,
                    node: neighbor,
                });
            }
        }
    }

    if !found {
        return None;
    }
    let nodes = unwind_parents(&parents, start, goal)?;
    let mut path = Path::reconstruct(graph, nodes, kind)?;
    path.set_metadata("expanded", json!(expanded));
    Some(path)
}

/// Walks a parent map backwards from `goal` to `start`.
pub(crate) fn unwind_parents(
    parents: &AHashMap<String, String>,
    start: &str,
    goal: &str,
) -> Option<Vec<String>> {
    let mut nodes = vec![goal.to_string()];
    let mut current = goal;
    while current != start {
        current = parents.get(current)?.as_str();
        nodes.push(current.to_string());
    }
    nodes.reverse();
    Some(nodes)
}

/// Dijkstra distance map from `source` to every reachable node. Used by the
/// connectivity diagnostics; not part of the search API.
pub(crate) fn distance_map(graph: &Graph, source: &str) -> AHashMap<String, f64> {
    let mut dist: AHashMap<String, f64> = AHashMap::new();
    let mut open = BinaryHeap::new();
    dist.insert(source.to_string(), 0.0);
    open.push(HeapEntry {
        priority: 0.0,
        node: source.to_string(),
    });
    while let Some(HeapEntry { node, priority }) = open.pop() {
        let node_dist = match dist.get(&node) {
            Some(d) => *d,
            None => continue,
        };
        if priority > node_dist {
            continue;
        }
        for (neighbor, _) in graph.neighbors(&node) {
            let Some(step) = graph.step_cost(&node, &neighbor) else {
                continue;
            };
            let tentative = node_dist + step;
            let improved = dist
                .get(&neighbor)
                .map(|existing| tentative < *existing)
                .unwrap_or(true);
            if improved {
                dist.insert(neighbor.clone(), tentative);
                open.push(HeapEntry {
                    priority: tentative,
                    node: neighbor,
                });
            }
        }
    }
    dist
}
