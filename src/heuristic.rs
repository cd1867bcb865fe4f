//! Remaining-cost estimates for the informed searches.
//!
//! The default estimate is straight-line distance between node positions,
//! which is admissible whenever edge weights are at least the spatial
//! distance they span. Nodes without a position estimate 0.0, degrading
//! A* gracefully into Dijkstra.

use std::fmt;
use std::sync::Arc;

use crate::cache::HeuristicCache;
use crate::graph::{Graph, Node};

pub type HeuristicFn = dyn Fn(&Node, &Node) -> f64 + Send + Sync;

#[derive(Clone, Default)]
pub enum Heuristic {
    /// Euclidean distance between `position` fields; 0.0 when either side
    /// has no position set.
    #[default]
    Euclidean,
    /// Always 0.0; turns A* into Dijkstra and beam ranking into plain cost.
    Zero,
    /// Caller-supplied estimate. Must never overestimate the true remaining
    /// cost for A* to stay optimal.
    Custom(Arc<HeuristicFn>),
}

impl fmt::Debug for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Euclidean => f.write_str("Euclidean"),
            Heuristic::Zero => f.write_str("Zero"),
            Heuristic::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Heuristic {
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&Node, &Node) -> f64 + Send + Sync + 'static,
    {
        Heuristic::Custom(Arc::new(f))
    }

    pub fn estimate(&self, from: &Node, to: &Node) -> f64 {
        match self {
            Heuristic::Euclidean => euclidean(from, to),
            Heuristic::Zero => 0.0,
            Heuristic::Custom(f) => f(from, to),
        }
    }

    /// Only the default estimate is memoized in the shared cache: the cache
    /// key carries no heuristic identity, so per-call closures must not
    /// write to it, and the zero estimate is cheaper than the lookup.
    pub(crate) fn shares_cache(&self) -> bool {
        matches!(self, Heuristic::Euclidean)
    }
}

pub fn euclidean(from: &Node, to: &Node) -> f64 {
    if !from.has_position() || !to.has_position() {
        return 0.0;
    }
    let dx = from.position[0] - to.position[0];
    let dy = from.position[1] - to.position[1];
    let dz = from.position[2] - to.position[2];
    (dx * dx + dy * dy + dz * dz).sqrt()
}

/// Estimate with memoization. Unknown node ids estimate 0.0, which keeps
/// the estimate admissible and lets searches discover absence through the
/// adjacency maps instead.
pub(crate) fn cached_estimate(
    cache: Option<&HeuristicCache>,
    heuristic: &Heuristic,
    graph: &Graph,
    node: &str,
    goal: &str,
) -> f64 {
    let cache = cache.filter(|_| heuristic.shares_cache());
    if let Some(cache) = cache {
        if let Some(value) = cache.get(node, goal) {
            return value;
        }
    }
    let value = match (graph.node(node), graph.node(goal)) {
        (Some(from), Some(to)) => heuristic.estimate(from, to),
        _ => 0.0,
    };
    if let Some(cache) = cache {
        cache.insert(node, goal, value);
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_euclidean_distance() {
        let a = Node::new("a").with_position(1.0, 0.0, 0.0);
        let b = Node::new("b").with_position(4.0, 4.0, 0.0);
        assert_eq!(euclidean(&b, &a), 5.0);
    }

    #[test]
    fn test_unset_positions_estimate_zero() {
        let a = Node::new("a");
        let b = Node::new("b").with_position(3.0, 4.0, 0.0);
        assert_eq!(euclidean(&a, &b), 0.0);
    }
}
