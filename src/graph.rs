//! Owning graph structure: nodes, weighted edges, and the paired
//! forward/reverse adjacency maps every search algorithm runs against.
//!
//! Neighbor iteration is lexicographic by node id so that traversal results
//! are deterministic for a given graph, regardless of insertion order.

use std::collections::{BTreeMap, BTreeSet};

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RouteGraphError;

fn default_node_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Node {
    pub id: String,
    #[serde(default)]
    pub position: [f64; 3],
    #[serde(default)]
    pub data: Value,
    #[serde(default = "default_node_weight")]
    pub weight: f64,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Node {
    pub fn new<T: Into<String>>(id: T) -> Self {
        Self {
            id: id.into(),
            position: [0.0; 3],
            data: Value::Null,
            weight: 1.0,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_position(mut self, x: f64, y: f64, z: f64) -> Self {
        self.position = [x, y, z];
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_tag<T: Into<String>>(mut self, tag: T) -> Self {
        self.tags.insert(tag.into());
        self
    }

    /// True when the position was never set; the distance heuristic treats
    /// such nodes as having no usable location.
    pub fn has_position(&self) -> bool {
        self.position != [0.0; 3]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Edge {
    pub source: String,
    pub target: String,
    pub weight: f64,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub bidirectional: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Edge {
    pub fn new<S: Into<String>, T: Into<String>>(source: S, target: T, weight: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight,
            data: Value::Null,
            bidirectional: false,
            tags: BTreeSet::new(),
        }
    }

    pub fn bidirectional(mut self) -> Self {
        self.bidirectional = true;
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = data;
        self
    }

    pub fn with_tag<T: Into<String>>(mut self, tag: T) -> Self {
        self.tags.insert(tag.into());
        self
    }
}

/// In-memory weighted graph.
///
/// Invariant: `forward[u][v] == w` exactly when `reverse[v][u] == w`. Every
/// mutation updates both maps together; a bidirectional edge materializes
/// both directed entries in both maps.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    nodes: AHashMap<String, Node>,
    edges: AHashMap<(String, String), Edge>,
    forward: AHashMap<String, BTreeMap<String, f64>>,
    reverse: AHashMap<String, BTreeMap<String, f64>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, replacing any node with the same id. Existing edges
    /// keep their adjacency entries when a node is replaced.
    pub fn add_node(&mut self, node: Node) -> Result<(), RouteGraphError> {
        if node.id.trim().is_empty() {
            return Err(RouteGraphError::invalid_input("node id must be set"));
        }
        self.nodes.insert(node.id.clone(), node);
        Ok(())
    }

    /// Inserts an edge. Both endpoints must already exist; unknown endpoints
    /// are an input error, not a silent node creation (use [`Graph::connect`]
    /// when implicit endpoint creation is wanted).
    ///
    /// Edge weights are expected to be non-negative for the cost-optimal
    /// algorithms; that precondition is documented, not validated. Non-finite
    /// weights are rejected because they poison cost ordering.
    pub fn add_edge(&mut self, edge: Edge) -> Result<(), RouteGraphError> {
        if edge.source.trim().is_empty() || edge.target.trim().is_empty() {
            return Err(RouteGraphError::invalid_input("edge endpoints must be set"));
        }
        if edge.source == edge.target {
            return Err(RouteGraphError::invalid_input(
                "self loops are not supported",
            ));
        }
        if !edge.weight.is_finite() {
            return Err(RouteGraphError::invalid_input("edge weight must be finite"));
        }
        if !self.nodes.contains_key(&edge.source) || !self.nodes.contains_key(&edge.target) {
            return Err(RouteGraphError::invalid_input(format!(
                "edge endpoints must reference existing nodes: {} -> {}",
                edge.source, edge.target
            )));
        }
        let key = (edge.source.clone(), edge.target.clone());
        if let Some(previous) = self.edges.remove(&key) {
            self.unlink_edge(&previous)?;
        }
        self.link(&edge.source, &edge.target, edge.weight);
        if edge.bidirectional {
            self.link(&edge.target, &edge.source, edge.weight);
        }
        self.edges.insert(key, edge);
        Ok(())
    }

    /// Convenience for building route networks: creates missing endpoint
    /// nodes with default attributes, then inserts a bidirectional edge.
    pub fn connect<S: Into<String>, T: Into<String>>(
        &mut self,
        source: S,
        target: T,
        weight: f64,
    ) -> Result<(), RouteGraphError> {
        let source = source.into();
        let target = target.into();
        if !self.nodes.contains_key(&source) {
            self.add_node(Node::new(source.clone()))?;
        }
        if !self.nodes.contains_key(&target) {
            self.add_node(Node::new(target.clone()))?;
        }
        self.add_edge(Edge::new(source, target, weight).bidirectional())
    }

    /// Removes a node and every edge touching it. O(degree).
    pub fn remove_node(&mut self, id: &str) -> Result<Node, RouteGraphError> {
        if !self.nodes.contains_key(id) {
            return Err(RouteGraphError::not_found(format!("node {id}")));
        }
        let outgoing: Vec<String> = self
            .forward
            .get(id)
            .map(|adj| adj.keys().cloned().collect())
            .unwrap_or_default();
        let incoming: Vec<String> = self
            .reverse
            .get(id)
            .map(|adj| adj.keys().cloned().collect())
            .unwrap_or_default();
        for neighbor in outgoing {
            if self.directed_edge_exists(id, &neighbor) {
                self.remove_edge(id, &neighbor)?;
            }
        }
        for neighbor in incoming {
            if self.directed_edge_exists(&neighbor, id) {
                self.remove_edge(&neighbor, id)?;
            }
        }
        self.forward.remove(id);
        self.reverse.remove(id);
        self.nodes
            .remove(id)
            .ok_or_else(|| RouteGraphError::not_found(format!("node {id}")))
    }

    /// Removes the edge between `source` and `target`. A reversed lookup is
    /// honored when the stored edge is bidirectional; removing such an edge
    /// drops both directed entries.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> Result<Edge, RouteGraphError> {
        let key = (source.to_string(), target.to_string());
        let edge = if let Some(edge) = self.edges.remove(&key) {
            edge
        } else {
            let reversed = (target.to_string(), source.to_string());
            let reversed_is_bidirectional = self
                .edges
                .get(&reversed)
                .map(|edge| edge.bidirectional)
                .unwrap_or(false);
            if !reversed_is_bidirectional {
                return Err(RouteGraphError::not_found(format!(
                    "edge {source} -> {target}"
                )));
            }
            match self.edges.remove(&reversed) {
                Some(edge) => edge,
                None => {
                    return Err(RouteGraphError::not_found(format!(
                        "edge {source} -> {target}"
                    )));
                }
            }
        };
        self.unlink_edge(&edge)?;
        Ok(edge)
    }

    /// Outgoing neighbors with raw edge weights, lexicographically ordered.
    pub fn neighbors(&self, id: &str) -> Vec<(String, f64)> {
        self.forward
            .get(id)
            .map(|adj| adj.iter().map(|(n, w)| (n.clone(), *w)).collect())
            .unwrap_or_default()
    }

    /// Incoming neighbors with raw edge weights, lexicographically ordered.
    pub fn incoming(&self, id: &str) -> Vec<(String, f64)> {
        self.reverse
            .get(id)
            .map(|adj| adj.iter().map(|(n, w)| (n.clone(), *w)).collect())
            .unwrap_or_default()
    }

    /// Looks up the edge covering the `source -> target` step, following the
    /// bidirectional flag for reversed storage.
    pub fn edge(&self, source: &str, target: &str) -> Option<&Edge> {
        let key = (source.to_string(), target.to_string());
        if let Some(edge) = self.edges.get(&key) {
            return Some(edge);
        }
        let reversed = (target.to_string(), source.to_string());
        self.edges.get(&reversed).filter(|edge| edge.bidirectional)
    }

    /// Cost of traversing `source -> target`: the directed edge weight scaled
    /// by the target node's weight modifier.
    pub fn step_cost(&self, source: &str, target: &str) -> Option<f64> {
        let weight = *self.forward.get(source)?.get(target)?;
        let modifier = self.nodes.get(target).map(|n| n.weight).unwrap_or(1.0);
        Some(weight * modifier)
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All node ids, sorted.
    pub fn node_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.nodes.keys().cloned().collect();
        ids.sort_unstable();
        ids
    }

    /// All edges, sorted by (source, target) for stable output.
    pub fn edges(&self) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self.edges.values().collect();
        edges.sort_unstable_by(|a, b| {
            a.source
                .cmp(&b.source)
                .then_with(|| a.target.cmp(&b.target))
        });
        edges
    }

    /// Total degree (in + out) of a node.
    pub fn degree(&self, id: &str) -> usize {
        let out = self.forward.get(id).map(BTreeMap::len).unwrap_or(0);
        let inc = self.reverse.get(id).map(BTreeMap::len).unwrap_or(0);
        out + inc
    }

    fn directed_edge_exists(&self, source: &str, target: &str) -> bool {
        self.edge(source, target).is_some()
    }

    fn link(&mut self, source: &str, target: &str, weight: f64) {
        self.forward
            .entry(source.to_string())
            .or_default()
            .insert(target.to_string(), weight);
        self.reverse
            .entry(target.to_string())
            .or_default()
            .insert(source.to_string(), weight);
    }

    /// Drops the directed adjacency entries belonging to `edge`. A missing
    /// entry on either side means the two maps desynchronized, which is a
    /// bug: fail closed with the fatal error instead of limping on.
    fn unlink_edge(&mut self, edge: &Edge) -> Result<(), RouteGraphError> {
        self.unlink(&edge.source, &edge.target)?;
        if edge.bidirectional {
            self.unlink(&edge.target, &edge.source)?;
        }
        Ok(())
    }

    fn unlink(&mut self, source: &str, target: &str) -> Result<(), RouteGraphError> {
        let fwd = self
            .forward
            .get_mut(source)
            .and_then(|adj| adj.remove(target));
        let rev = self
            .reverse
            .get_mut(target)
            .and_then(|adj| adj.remove(source));
        if fwd.is_none() || rev.is_none() {
            debug_assert!(false, "adjacency maps out of sync at {source} -> {target}");
            log::warn!("adjacency maps out of sync at {source} -> {target}");
            return Err(RouteGraphError::invariant(format!(
                "missing adjacency entry for {source} -> {target}"
            )));
        }
        Ok(())
    }

    pub(crate) fn forward_map(&self) -> &AHashMap<String, BTreeMap<String, f64>> {
        &self.forward
    }

    pub(crate) fn reverse_map(&self) -> &AHashMap<String, BTreeMap<String, f64>> {
        &self.reverse
    }
}
