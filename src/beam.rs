//! Width-limited best-first search. Each round expands every surviving
//! candidate, ranks the next frontier by `cost + estimate`, and keeps only
//! the `width` best. Trades completeness for bounded memory: a viable route
//! pruned from the frontier is gone for good, so "no path" here does not
//! mean no path exists.

use std::time::Instant;

use ahash::AHashSet;
use serde_json::json;

use crate::cache::HeuristicCache;
use crate::graph::Graph;
use crate::heuristic::{Heuristic, cached_estimate};
use crate::path::{AlgorithmKind, Path};

struct Candidate {
    trail: Vec<String>,
    visited: AHashSet<String>,
    cost: f64,
    score: f64,
}

/// Beam search with frontier width `width` (>= 1, validated by the caller
/// dispatch). An expired `deadline` resolves to "no path found".
pub fn beam_search(
    graph: &Graph,
    start: &str,
    goal: &str,
    width: usize,
    heuristic: &Heuristic,
    cache: Option<&HeuristicCache>,
    deadline: Option<Instant>,
) -> Option<Path> {
    if width == 0 || !graph.contains_node(start) || !graph.contains_node(goal) {
        return None;
    }
    let mut frontier = vec![Candidate {
        trail: vec![start.to_string()],
        visited: AHashSet::from_iter([start.to_string()]),
        cost: 0.0,
        score: cached_estimate(cache, heuristic, graph, start, goal),
    }];
    let mut rounds = 0usize;

    // Simple paths cannot exceed node_count - 1 hops, so the round counter
    // bounds the search even on cyclic graphs.
    for _ in 1..graph.node_count() {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            log::debug!("beam search deadline expired after {rounds} rounds");
            return None;
        }
        rounds += 1;
        let mut next: Vec<Candidate> = Vec::new();
        let mut arrivals: Vec<Candidate> = Vec::new();
        for candidate in &frontier {
            for (neighbor, _) in graph.neighbors(candidate.trail.last()?) {
                if candidate.visited.contains(&neighbor) {
                    continue;
                }
                let Some(step) = graph.step_cost(candidate.trail.last()?, &neighbor) else {
                    continue;
                };
                let cost = candidate.cost + step;
                let mut trail = candidate.trail.clone();
                trail.push(neighbor.clone());
                let mut visited = candidate.visited.clone();
                visited.insert(neighbor.clone());
                let estimate = cached_estimate(cache, heuristic, graph, &neighbor, goal);
                let extended = Candidate {
                    trail,
                    visited,
                    cost,
                    score: cost + estimate,
                };
                if neighbor == goal {
                    arrivals.push(extended);
                } else {
                    next.push(extended);
                }
            }
        }
        if let Some(best) = arrivals
            .into_iter()
            .min_by(|a, b| a.cost.total_cmp(&b.cost).then_with(|| a.trail.cmp(&b.trail)))
        {
            let mut path = Path::reconstruct(graph, best.trail, AlgorithmKind::Beam)?;
            path.set_metadata("rounds", json!(rounds));
            path.set_metadata("width", json!(width));
            return Some(path);
        }
        if next.is_empty() {
            return None;
        }
        next.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.trail.cmp(&b.trail))
        });
        next.truncate(width);
        frontier = next;
    }
    None
}
