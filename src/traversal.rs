//! Uninformed traversals: hop-minimal breadth-first search and first-found
//! depth-first search. Both ignore edge weights for ranking but still report
//! the traversal cost of the route they return.

use std::collections::VecDeque;

use ahash::{AHashMap, AHashSet};
use serde_json::json;

use crate::dijkstra::unwind_parents;
use crate::graph::Graph;
use crate::path::{AlgorithmKind, Path};

/// Minimum-hop path. Guarantees the fewest edges, not the lowest cost;
/// `total_cost` is still reported for diagnostics.
pub fn breadth_first(graph: &Graph, start: &str, goal: &str) -> Option<Path> {
    if !graph.contains_node(start) || !graph.contains_node(goal) {
        return None;
    }
    let mut parents: AHashMap<String, String> = AHashMap::new();
    let mut seen = AHashSet::new();
    let mut queue = VecDeque::new();
    let mut expanded = 0usize;
    queue.push_back(start.to_string());
    seen.insert(start.to_string());

    let mut found = false;
    'outer: while let Some(node) = queue.pop_front() {
        expanded += 1;
        for (neighbor, _) in graph.neighbors(&node) {
            if seen.insert(neighbor.clone()) {
                parents.insert(neighbor.clone(), node.clone());
                if neighbor == goal {
                    found = true;
                    break 'outer;
                }
                queue.push_back(neighbor);
            }
        }
    }

    if !found {
        return None;
    }
    let nodes = unwind_parents(&parents, start, goal)?;
    let mut path = Path::reconstruct(graph, nodes, AlgorithmKind::Breadth)?;
    path.set_metadata("expanded", json!(expanded));
    Some(path)
}

/// First path found by depth-first exploration on an explicit stack.
/// No optimality guarantee of any kind; useful when "any path, fast" is
/// acceptable. Deterministic: neighbors are explored in lexicographic order.
pub fn depth_first(graph: &Graph, start: &str, goal: &str) -> Option<Path> {
    if !graph.contains_node(start) || !graph.contains_node(goal) {
        return None;
    }
    let mut visited = AHashSet::new();
    let mut stack = vec![(start.to_string(), vec![start.to_string()])];
    let mut expanded = 0usize;

    while let Some((node, trail)) = stack.pop() {
        if !visited.insert(node.clone()) {
            continue;
        }
        if node == goal {
            let mut path = Path::reconstruct(graph, trail, AlgorithmKind::Depth)?;
            path.set_metadata("expanded", json!(expanded));
            return Some(path);
        }
        expanded += 1;
        // Reverse push order so the lexicographically first neighbor pops
        // first.
        for (neighbor, _) in graph.neighbors(&node).into_iter().rev() {
            if !visited.contains(&neighbor) {
                let mut next_trail = trail.clone();
                next_trail.push(neighbor.clone());
                stack.push((neighbor, next_trail));
            }
        }
    }
    None
}
