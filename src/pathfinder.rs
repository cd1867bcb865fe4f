//! The engine facade: owns the graph and both caches, validates tunables,
//! applies per-call constraint views, and dispatches to the search
//! algorithms through a closed enum so every strategy is handled
//! exhaustively at compile time.

use std::path::Path as FilePath;
use std::time::Instant;

use serde_json::json;

use crate::beam::beam_search;
use crate::bidirectional::bidirectional_search;
use crate::cache::{CacheStats, HeuristicCache, PathCache};
use crate::connectivity::{ConnectivityReport, analyze_connectivity};
use crate::constraints::Constraints;
use crate::dijkstra::{astar_path, shortest_path};
use crate::enumerate::all_simple_paths;
use crate::errors::RouteGraphError;
use crate::graph::{Edge, Graph, Node};
use crate::heuristic::Heuristic;
use crate::integrity::{IntegrityReport, audit_graph};
use crate::io::{ImportMode, load_graph_from_path, save_graph_to_path};
use crate::path::{AlgorithmKind, Path};
use crate::traversal::{breadth_first, depth_first};
use crate::wave::{WaveConfig, wave_search};

/// Search strategy selector. Parameterized strategies carry their tunables;
/// validation happens before any search work begins.
#[derive(Clone, Debug, PartialEq)]
pub enum Algorithm {
    /// Cost-optimal for non-negative weights.
    Dijkstra,
    /// Cost-optimal with an admissible heuristic; defaults to Euclidean
    /// distance over node positions, degrading to Dijkstra when positions
    /// are unset.
    AStar,
    /// Minimum hop count, not minimum cost.
    Breadth,
    /// First path found; no optimality guarantee.
    Depth,
    /// Width-limited frontier; may miss the optimal path, or any path.
    Beam { width: usize },
    /// Dijkstra from both ends at once; cost-equal to Dijkstra.
    Bidirectional,
    /// Probabilistic walk; non-deterministic unless seeded.
    Wave(WaveConfig),
}

impl Algorithm {
    pub fn kind(&self) -> AlgorithmKind {
        match self {
            Algorithm::Dijkstra => AlgorithmKind::Dijkstra,
            Algorithm::AStar => AlgorithmKind::AStar,
            Algorithm::Breadth => AlgorithmKind::Breadth,
            Algorithm::Depth => AlgorithmKind::Depth,
            Algorithm::Beam { .. } => AlgorithmKind::Beam,
            Algorithm::Bidirectional => AlgorithmKind::Bidirectional,
            Algorithm::Wave(_) => AlgorithmKind::Wave,
        }
    }

    /// Only deterministic strategies without call-specific tunables may use
    /// the shared route cache: beam results depend on the width and wave
    /// results on the dice, neither of which is part of the cache key.
    fn cacheable(&self) -> bool {
        matches!(
            self,
            Algorithm::Dijkstra
                | Algorithm::AStar
                | Algorithm::Breadth
                | Algorithm::Depth
                | Algorithm::Bidirectional
        )
    }

    fn validate(&self) -> Result<(), RouteGraphError> {
        match self {
            Algorithm::Beam { width } if *width < 1 => Err(RouteGraphError::invalid_input(
                "beam width must be at least 1",
            )),
            Algorithm::Wave(config) => config.validate(),
            _ => Ok(()),
        }
    }
}

/// Per-call search options. Supplying constraints disables the route cache
/// for that call; supplying a custom heuristic bypasses the shared heuristic
/// cache.
#[derive(Clone, Debug, Default)]
pub struct SearchOptions {
    pub constraints: Option<Constraints>,
    pub heuristic: Option<Heuristic>,
    /// Checked once per outer iteration by the long-running strategies
    /// (beam, wave, all-paths); expiry resolves to "no path found".
    pub deadline: Option<Instant>,
}

impl SearchOptions {
    pub fn with_constraints(constraints: Constraints) -> Self {
        Self {
            constraints: Some(constraints),
            ..Self::default()
        }
    }
}

/// Multi-algorithm pathfinding engine over an owned [`Graph`].
///
/// Mutation and search must be serialized by the caller (the caches are
/// internally locked, so `&Pathfinder` is shareable across threads for
/// concurrent searches; mutations take `&mut self` and therefore exclusive
/// access).
pub struct Pathfinder {
    graph: Graph,
    path_cache: PathCache,
    heuristic_cache: HeuristicCache,
}

impl Pathfinder {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph,
            path_cache: PathCache::new(),
            heuristic_cache: HeuristicCache::new(),
        }
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn into_graph(self) -> Graph {
        self.graph
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), RouteGraphError> {
        self.graph.add_node(node)?;
        self.invalidate_caches();
        Ok(())
    }

    pub fn add_edge(&mut self, edge: Edge) -> Result<(), RouteGraphError> {
        self.graph.add_edge(edge)?;
        self.invalidate_caches();
        Ok(())
    }

    pub fn connect<S: Into<String>, T: Into<String>>(
        &mut self,
        source: S,
        target: T,
        weight: f64,
    ) -> Result<(), RouteGraphError> {
        self.graph.connect(source, target, weight)?;
        self.invalidate_caches();
        Ok(())
    }

    pub fn remove_node(&mut self, id: &str) -> Result<Node, RouteGraphError> {
        let node = self.graph.remove_node(id)?;
        self.invalidate_caches();
        Ok(node)
    }

    pub fn remove_edge(&mut self, source: &str, target: &str) -> Result<Edge, RouteGraphError> {
        let edge = self.graph.remove_edge(source, target)?;
        self.invalidate_caches();
        Ok(edge)
    }

    /// Finds a route with default options.
    pub fn find_path(
        &self,
        start: &str,
        goal: &str,
        algorithm: Algorithm,
    ) -> Result<Option<Path>, RouteGraphError> {
        self.find_path_with(start, goal, algorithm, &SearchOptions::default())
    }

    /// Finds a route. Unknown start/goal nodes and exhausted searches are
    /// both ordinary "no path" outcomes; errors are reserved for malformed
    /// tunables and constraints.
    pub fn find_path_with(
        &self,
        start: &str,
        goal: &str,
        algorithm: Algorithm,
        options: &SearchOptions,
    ) -> Result<Option<Path>, RouteGraphError> {
        algorithm.validate()?;
        if let Some(constraints) = &options.constraints {
            constraints.validate()?;
        }
        if start == goal {
            // A route needs at least one edge; self-loops are not supported.
            return Ok(None);
        }
        if !self.graph.contains_node(start) || !self.graph.contains_node(goal) {
            return Ok(None);
        }

        let use_cache =
            options.constraints.is_none() && options.heuristic.is_none() && algorithm.cacheable();
        if use_cache {
            if let Some(mut path) = self.path_cache.get(start, goal, algorithm.kind()) {
                path.set_metadata("cache", json!("hit"));
                return Ok(Some(path));
            }
        }

        let filtered = options
            .constraints
            .as_ref()
            .filter(|c| !c.is_empty())
            .map(|c| c.apply(&self.graph));
        let view = filtered.as_ref().unwrap_or(&self.graph);

        let started = Instant::now();
        let result = self.dispatch(view, start, goal, &algorithm, options);
        let elapsed_us = started.elapsed().as_micros() as u64;

        let Some(mut path) = result else {
            return Ok(None);
        };
        path.set_metadata("elapsed_us", json!(elapsed_us));
        if use_cache {
            self.path_cache.insert(&path);
        }
        Ok(Some(path))
    }

    fn dispatch(
        &self,
        view: &Graph,
        start: &str,
        goal: &str,
        algorithm: &Algorithm,
        options: &SearchOptions,
    ) -> Option<Path> {
        let heuristic = options.heuristic.clone().unwrap_or_default();
        let heuristic_cache = Some(&self.heuristic_cache);
        match algorithm {
            Algorithm::Dijkstra => shortest_path(view, start, goal),
            Algorithm::AStar => astar_path(view, start, goal, &heuristic, heuristic_cache),
            Algorithm::Breadth => breadth_first(view, start, goal),
            Algorithm::Depth => depth_first(view, start, goal),
            Algorithm::Beam { width } => beam_search(
                view,
                start,
                goal,
                *width,
                &heuristic,
                heuristic_cache,
                options.deadline,
            ),
            Algorithm::Bidirectional => bidirectional_search(view, start, goal),
            Algorithm::Wave(config) => wave_search(
                view,
                start,
                goal,
                config,
                &heuristic,
                heuristic_cache,
                options.deadline,
            ),
        }
    }

    /// Convenience wrapper: Dijkstra, default options.
    pub fn find_shortest_path(
        &self,
        start: &str,
        goal: &str,
    ) -> Result<Option<Path>, RouteGraphError> {
        self.find_path(start, goal, Algorithm::Dijkstra)
    }

    /// Enumerates up to `max_paths` simple routes, cheapest first.
    pub fn find_all_paths(
        &self,
        start: &str,
        goal: &str,
        max_paths: usize,
        max_length: Option<usize>,
    ) -> Result<Vec<Path>, RouteGraphError> {
        self.find_all_paths_with(start, goal, max_paths, max_length, &SearchOptions::default())
    }

    pub fn find_all_paths_with(
        &self,
        start: &str,
        goal: &str,
        max_paths: usize,
        max_length: Option<usize>,
        options: &SearchOptions,
    ) -> Result<Vec<Path>, RouteGraphError> {
        if max_paths < 1 {
            return Err(RouteGraphError::invalid_input(
                "max_paths must be at least 1",
            ));
        }
        if let Some(constraints) = &options.constraints {
            constraints.validate()?;
        }
        if start == goal || !self.graph.contains_node(start) || !self.graph.contains_node(goal) {
            return Ok(Vec::new());
        }
        let filtered = options
            .constraints
            .as_ref()
            .filter(|c| !c.is_empty())
            .map(|c| c.apply(&self.graph));
        let view = filtered.as_ref().unwrap_or(&self.graph);
        Ok(all_simple_paths(
            view,
            start,
            goal,
            max_paths,
            max_length,
            options.deadline,
        ))
    }

    /// Chains pairwise searches through every waypoint in order and splices
    /// the legs into one route. Any unreachable leg makes the whole route
    /// `None`.
    pub fn find_path_through_nodes(
        &self,
        waypoints: &[&str],
        algorithm: Algorithm,
    ) -> Result<Option<Path>, RouteGraphError> {
        if waypoints.len() < 2 {
            return Err(RouteGraphError::invalid_input(
                "at least two waypoints are required",
            ));
        }
        if waypoints.windows(2).any(|pair| pair[0] == pair[1]) {
            return Err(RouteGraphError::invalid_input(
                "consecutive waypoints must be distinct",
            ));
        }
        let mut route: Option<Path> = None;
        for pair in waypoints.windows(2) {
            let Some(leg) = self.find_path(pair[0], pair[1], algorithm.clone())? else {
                return Ok(None);
            };
            route = Some(match route {
                Some(assembled) => assembled.splice(leg)?,
                None => leg,
            });
        }
        let Some(mut route) = route else {
            return Ok(None);
        };
        route.set_metadata("legs", json!(waypoints.len() - 1));
        Ok(Some(route))
    }

    /// Connectivity diagnostics over the live graph. O(V·(V+E) log V) worst
    /// case; not a hot-path operation.
    pub fn analyze_connectivity(&self) -> ConnectivityReport {
        analyze_connectivity(&self.graph)
    }

    /// Audits the adjacency maps. A dirty report indicates a bug in the
    /// mutation paths and surfaces as the fatal invariant error.
    pub fn verify_integrity(&self) -> Result<IntegrityReport, RouteGraphError> {
        let report = audit_graph(&self.graph);
        if report.has_issues() {
            log::warn!("adjacency audit failed: {:?}", report.messages);
            return Err(RouteGraphError::invariant(report.messages.join("; ")));
        }
        Ok(report)
    }

    pub fn path_cache_stats(&self) -> CacheStats {
        self.path_cache.stats()
    }

    pub fn heuristic_cache_stats(&self) -> CacheStats {
        self.heuristic_cache.stats()
    }

    /// Exports the live graph to a JSON file.
    pub fn save_to_path<P: AsRef<FilePath>>(&self, path: P) -> Result<(), RouteGraphError> {
        save_graph_to_path(&self.graph, path)
    }

    /// Builds an engine from a previously exported JSON file.
    pub fn load_from_path<P: AsRef<FilePath>>(
        path: P,
        mode: ImportMode,
    ) -> Result<Self, RouteGraphError> {
        Ok(Self::new(load_graph_from_path(path, mode)?))
    }

    fn invalidate_caches(&self) {
        log::debug!("graph mutated; clearing route and heuristic caches");
        self.path_cache.clear();
        self.heuristic_cache.clear();
    }
}
