//! Search results. A [`Path`] is produced once by an algorithm and never
//! mutated afterwards; every algorithm reconstructs through
//! [`Path::from_nodes`] so costs and edge clones are reported identically.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::RouteGraphError;
use crate::graph::{Edge, Graph};

/// Tag identifying which strategy produced a path. Also the cache-key
/// component for route caching.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AlgorithmKind {
    Dijkstra,
    AStar,
    Breadth,
    Depth,
    Beam,
    Bidirectional,
    Wave,
}

impl AlgorithmKind {
    pub fn label(self) -> &'static str {
        match self {
            AlgorithmKind::Dijkstra => "dijkstra",
            AlgorithmKind::AStar => "astar",
            AlgorithmKind::Breadth => "breadth",
            AlgorithmKind::Depth => "depth",
            AlgorithmKind::Beam => "beam",
            AlgorithmKind::Bidirectional => "bidirectional",
            AlgorithmKind::Wave => "wave",
        }
    }
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Path {
    /// Visited node ids in order; always at least two entries.
    pub nodes: Vec<String>,
    /// Traversed edges, one per hop (`edges.len() == nodes.len() - 1`).
    pub edges: Vec<Edge>,
    /// Sum of traversal costs along the route.
    pub total_cost: f64,
    pub algorithm: AlgorithmKind,
    /// Open diagnostics map: expansion counts, iterations, timings.
    pub metadata: Map<String, Value>,
}

impl Path {
    /// Builds a path from a node sequence, cloning each traversed edge and
    /// accumulating traversal costs. Fails when the sequence is too short or
    /// a consecutive pair has no connecting edge, which indicates a bug in
    /// the producing algorithm rather than a caller error.
    pub(crate) fn from_nodes(
        graph: &Graph,
        nodes: Vec<String>,
        algorithm: AlgorithmKind,
    ) -> Result<Self, RouteGraphError> {
        if nodes.len() < 2 {
            return Err(RouteGraphError::invalid_input(
                "a path requires at least two nodes",
            ));
        }
        let mut edges = Vec::with_capacity(nodes.len() - 1);
        let mut total_cost = 0.0;
        for pair in nodes.windows(2) {
            let edge = graph.edge(&pair[0], &pair[1]).ok_or_else(|| {
                RouteGraphError::invariant(format!("no edge between {} and {}", pair[0], pair[1]))
            })?;
            let cost = graph.step_cost(&pair[0], &pair[1]).ok_or_else(|| {
                RouteGraphError::invariant(format!(
                    "no traversal cost for {} -> {}",
                    pair[0], pair[1]
                ))
            })?;
            edges.push(edge.clone());
            total_cost += cost;
        }
        Ok(Self {
            nodes,
            edges,
            total_cost,
            algorithm,
            metadata: Map::new(),
        })
    }

    /// Reconstruction used by the algorithms: a failure here means the
    /// search produced an inconsistent route, so fail closed and report
    /// "no path" instead of surfacing a partial result.
    pub(crate) fn reconstruct(
        graph: &Graph,
        nodes: Vec<String>,
        algorithm: AlgorithmKind,
    ) -> Option<Self> {
        match Self::from_nodes(graph, nodes, algorithm) {
            Ok(path) => Some(path),
            Err(err) => {
                log::warn!("discarding inconsistent {algorithm} path: {err}");
                None
            }
        }
    }

    /// Number of traversed edges.
    pub fn hop_count(&self) -> usize {
        self.edges.len()
    }

    pub fn start(&self) -> &str {
        &self.nodes[0]
    }

    pub fn goal(&self) -> &str {
        self.nodes.last().map(String::as_str).unwrap_or_default()
    }

    pub(crate) fn set_metadata<T: Into<String>>(&mut self, key: T, value: Value) {
        self.metadata.insert(key.into(), value);
    }

    /// Appends `other` onto this path. The first node of `other` must equal
    /// the last node of this path; the junction node is kept once.
    pub(crate) fn splice(mut self, other: Path) -> Result<Self, RouteGraphError> {
        if self.goal() != other.start() {
            return Err(RouteGraphError::invalid_input(format!(
                "cannot splice: {} does not continue from {}",
                other.start(),
                self.goal()
            )));
        }
        self.nodes.extend(other.nodes.into_iter().skip(1));
        self.edges.extend(other.edges);
        self.total_cost += other.total_cost;
        Ok(self)
    }
}
