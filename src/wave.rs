//! Probabilistic wave search: an amplitude-guided random walk.
//!
//! Every node carries an amplitude inversely proportional to its estimated
//! distance from the goal. Each step samples one unvisited neighbor with
//! probability proportional to `amplitude / (1 + traversal cost)`; the
//! sample is accepted with probability `coherence`, otherwise redrawn a
//! bounded number of times. Dead ends backtrack one step.
//!
//! This strategy is **not deterministic**: repeated calls with identical
//! inputs may return different routes or different costs, or fail where a
//! previous call succeeded. Fix [`WaveConfig::seed`] for reproducible runs
//! (tests do); leave it unset for entropy-seeded production behavior. Never
//! assert exact path equality across unseeded runs.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::json;

use crate::cache::HeuristicCache;
use crate::errors::RouteGraphError;
use crate::graph::Graph;
use crate::heuristic::{Heuristic, cached_estimate};
use crate::path::{AlgorithmKind, Path};

/// Resampling attempts per step before the last draw is taken anyway.
const MAX_RESAMPLES: usize = 4;

#[derive(Clone, Debug, PartialEq)]
pub struct WaveConfig {
    /// Upper bound on walk steps; the walk stops when it is exhausted.
    pub iterations: usize,
    /// Acceptance probability in `[0, 1]` for a sampled transition. Higher
    /// values converge faster but explore less.
    pub coherence: f64,
    /// Fixed RNG seed for reproducible walks; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            coherence: 0.85,
            seed: None,
        }
    }
}

impl WaveConfig {
    pub fn validate(&self) -> Result<(), RouteGraphError> {
        if self.iterations == 0 {
            return Err(RouteGraphError::invalid_input(
                "wave iterations must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.coherence) {
            return Err(RouteGraphError::invalid_input(
                "wave coherence must be within 0.0..=1.0",
            ));
        }
        Ok(())
    }
}

pub fn wave_search(
    graph: &Graph,
    start: &str,
    goal: &str,
    config: &WaveConfig,
    heuristic: &Heuristic,
    cache: Option<&HeuristicCache>,
    deadline: Option<Instant>,
) -> Option<Path> {
    if !graph.contains_node(start) || !graph.contains_node(goal) {
        return None;
    }
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut trail = vec![start.to_string()];
    let mut visited = ahash::AHashSet::from_iter([start.to_string()]);
    let mut backtracks = 0usize;
    let mut steps = 0usize;

    for _ in 0..config.iterations {
        let current = trail.last()?.clone();
        if current == goal {
            break;
        }
        if deadline.is_some_and(|d| Instant::now() >= d) {
            log::debug!("wave search deadline expired after {steps} steps");
            return None;
        }
        steps += 1;

        let candidates: Vec<(String, f64)> = graph
            .neighbors(&current)
            .into_iter()
            .filter(|(n, _)| !visited.contains(n))
            .filter_map(|(n, _)| {
                let step = graph.step_cost(&current, &n)?;
                let amplitude =
                    1.0 / (1.0 + cached_estimate(cache, heuristic, graph, &n, goal));
                Some((n, amplitude / (1.0 + step)))
            })
            .collect();

        if candidates.is_empty() {
            // Dead end: step back once and keep the node marked visited so
            // the walk cannot oscillate into it again.
            trail.pop();
            backtracks += 1;
            if trail.is_empty() {
                return None;
            }
            continue;
        }

        let next = sample_transition(&candidates, config.coherence, &mut rng);
        visited.insert(next.clone());
        trail.push(next);
    }

    if trail.last().map(String::as_str) != Some(goal) || trail.len() < 2 {
        return None;
    }
    let mut path = Path::reconstruct(graph, trail, AlgorithmKind::Wave)?;
    path.set_metadata("steps", json!(steps));
    path.set_metadata("backtracks", json!(backtracks));
    path.set_metadata("coherence", json!(config.coherence));
    Some(path)
}

/// Draws from the normalized transition distribution, re-drawing on
/// rejection up to [`MAX_RESAMPLES`] times.
fn sample_transition(candidates: &[(String, f64)], coherence: f64, rng: &mut StdRng) -> String {
    let total: f64 = candidates.iter().map(|(_, score)| score).sum();
    let mut choice = &candidates[0].0;
    for _ in 0..=MAX_RESAMPLES {
        let mut draw = rng.gen_range(0.0..total.max(f64::MIN_POSITIVE));
        for (node, score) in candidates {
            if draw < *score {
                choice = node;
                break;
            }
            draw -= score;
        }
        if rng.gen_range(0.0..1.0) < coherence {
            break;
        }
    }
    choice.clone()
}
