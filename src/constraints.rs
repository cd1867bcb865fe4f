//! Call-scoped graph filtering. A constraint set produces a fresh filtered
//! [`Graph`] for a single search; filtered views are never cached because
//! constraints are call-specific.

use ahash::AHashSet;

use crate::errors::RouteGraphError;
use crate::graph::{Edge, Graph};

#[derive(Clone, Debug, Default)]
pub struct Constraints {
    /// Node ids excluded outright.
    pub avoid_nodes: AHashSet<String>,
    /// Directed pairs excluded; a bidirectional edge is excluded when either
    /// orientation is listed.
    pub avoid_edges: AHashSet<(String, String)>,
    /// When non-empty, nodes and edges must carry at least one of these tags.
    pub required_tags: AHashSet<String>,
    /// Edges heavier than this are excluded.
    pub max_edge_weight: Option<f64>,
}

impl Constraints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn avoid_node<T: Into<String>>(mut self, id: T) -> Self {
        self.avoid_nodes.insert(id.into());
        self
    }

    pub fn avoid_edge<S: Into<String>, T: Into<String>>(mut self, source: S, target: T) -> Self {
        self.avoid_edges.insert((source.into(), target.into()));
        self
    }

    pub fn require_tag<T: Into<String>>(mut self, tag: T) -> Self {
        self.required_tags.insert(tag.into());
        self
    }

    pub fn max_edge_weight(mut self, weight: f64) -> Self {
        self.max_edge_weight = Some(weight);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.avoid_nodes.is_empty()
            && self.avoid_edges.is_empty()
            && self.required_tags.is_empty()
            && self.max_edge_weight.is_none()
    }

    /// Rejects malformed constraint sets before any search work begins.
    pub fn validate(&self) -> Result<(), RouteGraphError> {
        if let Some(limit) = self.max_edge_weight {
            if !limit.is_finite() || limit < 0.0 {
                return Err(RouteGraphError::invalid_input(
                    "max_edge_weight must be a non-negative finite number",
                ));
            }
        }
        Ok(())
    }

    /// Builds a filtered copy of `graph` containing only the nodes and edges
    /// passing every supplied filter. Unsupplied filters are no-ops.
    pub fn apply(&self, graph: &Graph) -> Graph {
        let mut filtered = Graph::new();
        for id in graph.node_ids() {
            let Some(node) = graph.node(&id) else {
                continue;
            };
            if self.avoid_nodes.contains(&id) {
                continue;
            }
            if !self.required_tags.is_empty()
                && !node.tags.iter().any(|t| self.required_tags.contains(t))
            {
                continue;
            }
            if filtered.add_node(node.clone()).is_err() {
                continue;
            }
        }
        for edge in graph.edges() {
            if !self.admits_edge(edge, &filtered) {
                continue;
            }
            if let Err(err) = filtered.add_edge(edge.clone()) {
                debug_assert!(false, "filtered edge insert failed: {err}");
                log::warn!("skipping edge {} -> {}: {err}", edge.source, edge.target);
            }
        }
        filtered
    }

    fn admits_edge(&self, edge: &Edge, filtered: &Graph) -> bool {
        if !filtered.contains_node(&edge.source) || !filtered.contains_node(&edge.target) {
            return false;
        }
        let forward = (edge.source.clone(), edge.target.clone());
        let reversed = (edge.target.clone(), edge.source.clone());
        if self.avoid_edges.contains(&forward) {
            return false;
        }
        if edge.bidirectional && self.avoid_edges.contains(&reversed) {
            return false;
        }
        if let Some(limit) = self.max_edge_weight {
            if edge.weight > limit {
                return false;
            }
        }
        if !self.required_tags.is_empty()
            && !edge.tags.iter().any(|t| self.required_tags.contains(t))
        {
            return false;
        }
        true
    }
}
