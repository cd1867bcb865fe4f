//! Bounded enumeration of simple paths. Depth-first with backtracking on an
//! explicit frame stack, so cyclic or deep graphs cannot overflow the call
//! stack; the caller supplies result and length caps to bound the work.

use std::time::Instant;

use serde_json::json;

use crate::graph::Graph;
use crate::path::{AlgorithmKind, Path};

/// Collects up to `max_paths` simple paths from `start` to `goal`, optionally
/// capped at `max_length` hops, sorted ascending by total cost (ties broken
/// by node sequence). Collection stops early when `deadline` expires; the
/// paths gathered so far are still returned, sorted.
pub fn all_simple_paths(
    graph: &Graph,
    start: &str,
    goal: &str,
    max_paths: usize,
    max_length: Option<usize>,
    deadline: Option<Instant>,
) -> Vec<Path> {
    if max_paths == 0 || !graph.contains_node(start) || !graph.contains_node(goal) {
        return Vec::new();
    }
    let hop_cap = max_length.unwrap_or(usize::MAX);
    let mut collected: Vec<Vec<String>> = Vec::new();
    let mut stack = vec![(start.to_string(), vec![start.to_string()])];
    let mut truncated = false;

    while let Some((node, trail)) = stack.pop() {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            log::debug!(
                "path enumeration deadline expired with {} paths collected",
                collected.len()
            );
            truncated = true;
            break;
        }
        if trail.len() > hop_cap {
            continue;
        }
        // Reverse push order so the lexicographically first branch is
        // explored first; together with the result sort this keeps the
        // output deterministic.
        for (neighbor, _) in graph.neighbors(&node).into_iter().rev() {
            if neighbor == goal {
                let mut complete = trail.clone();
                complete.push(neighbor);
                collected.push(complete);
                if collected.len() >= max_paths {
                    stack.clear();
                    break;
                }
                continue;
            }
            if trail.contains(&neighbor) {
                continue;
            }
            let mut extended = trail.clone();
            extended.push(neighbor.clone());
            stack.push((neighbor, extended));
        }
    }

    let mut paths: Vec<Path> = collected
        .into_iter()
        .filter_map(|nodes| Path::reconstruct(graph, nodes, AlgorithmKind::Depth))
        .collect();
    paths.sort_by(|a, b| {
        a.total_cost
            .total_cmp(&b.total_cost)
            .then_with(|| a.nodes.cmp(&b.nodes))
    });
    if truncated {
        for path in &mut paths {
            path.set_metadata("truncated", json!(true));
        }
    }
    paths
}
