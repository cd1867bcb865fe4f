//! Adjacency consistency audit. A desynchronized forward/reverse pair
//! indicates a bug in the mutation paths, never a runtime condition to
//! retry, so a dirty report is treated as fatal by the engine facade.

use serde::Serialize;

use crate::graph::Graph;

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct IntegrityReport {
    pub forward_entries: usize,
    pub reverse_entries: usize,
    /// Forward entries with no matching reverse entry.
    pub dangling_forward: usize,
    /// Reverse entries with no matching forward entry.
    pub dangling_reverse: usize,
    /// Paired entries whose weights disagree.
    pub mismatched_weights: usize,
    /// Adjacency rows owned by ids missing from the node set.
    pub orphan_adjacency: usize,
    pub messages: Vec<String>,
}

impl IntegrityReport {
    pub fn has_issues(&self) -> bool {
        self.dangling_forward > 0
            || self.dangling_reverse > 0
            || self.mismatched_weights > 0
            || self.orphan_adjacency > 0
    }
}

/// Cross-checks every adjacency entry in both directions.
pub fn audit_graph(graph: &Graph) -> IntegrityReport {
    let mut report = IntegrityReport::default();
    let forward = graph.forward_map();
    let reverse = graph.reverse_map();

    for (source, adjacency) in forward {
        if !graph.contains_node(source) && !adjacency.is_empty() {
            report.orphan_adjacency += 1;
            report
                .messages
                .push(format!("forward adjacency for unknown node {source}"));
        }
        for (target, weight) in adjacency {
            report.forward_entries += 1;
            match reverse.get(target).and_then(|adj| adj.get(source)) {
                None => {
                    report.dangling_forward += 1;
                    report
                        .messages
                        .push(format!("{source} -> {target} has no reverse entry"));
                }
                Some(mirrored) if mirrored != weight => {
                    report.mismatched_weights += 1;
                    report.messages.push(format!(
                        "{source} -> {target} weight {weight} != reverse {mirrored}"
                    ));
                }
                Some(_) => {}
            }
        }
    }

    for (target, adjacency) in reverse {
        if !graph.contains_node(target) && !adjacency.is_empty() {
            report.orphan_adjacency += 1;
            report
                .messages
                .push(format!("reverse adjacency for unknown node {target}"));
        }
        for (source, _) in adjacency {
            report.reverse_entries += 1;
            if forward.get(source).and_then(|adj| adj.get(target)).is_none() {
                report.dangling_reverse += 1;
                report
                    .messages
                    .push(format!("{source} -> {target} has no forward entry"));
            }
        }
    }

    report
}
