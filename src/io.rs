//! Plain JSON import/export of a graph.
//!
//! The document layout is stable:
//!
//! ```json
//! { "nodes": [{"id": "...", "position": [0,0,0], "data": null,
//!              "weight": 1.0, "tags": []}],
//!   "edges": [{"source": "...", "target": "...", "weight": 1.0,
//!              "data": null, "bidirectional": true, "tags": []}] }
//! ```
//!
//! Import rebuilds both adjacency maps from scratch. By default, edges
//! referencing unknown node ids create stub nodes (the format's historical
//! lenient behavior); [`ImportMode::Strict`] rejects them instead, and a
//! failed strict load yields no graph at all rather than a partial one.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::RouteGraphError;
use crate::graph::{Edge, Graph, Node};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImportMode {
    /// Unknown edge endpoints become stub nodes with default attributes.
    #[default]
    CreateMissing,
    /// Unknown edge endpoints fail the whole load.
    Strict,
}

#[derive(Serialize, Deserialize)]
struct GraphDocument {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

pub fn save_graph_to_path<P: AsRef<Path>>(
    graph: &Graph,
    path: P,
) -> Result<(), RouteGraphError> {
    let file = File::create(path.as_ref()).map_err(|e| RouteGraphError::io(e.to_string()))?;
    save_graph_to_writer(graph, BufWriter::new(file))
}

pub fn save_graph_to_writer<W: Write>(graph: &Graph, mut writer: W) -> Result<(), RouteGraphError> {
    let document = GraphDocument {
        nodes: graph
            .node_ids()
            .into_iter()
            .filter_map(|id| graph.node(&id).cloned())
            .collect(),
        edges: graph.edges().into_iter().cloned().collect(),
    };
    log::debug!(
        "exporting {} nodes, {} edges",
        document.nodes.len(),
        document.edges.len()
    );
    serde_json::to_writer(&mut writer, &document)
        .map_err(|e| RouteGraphError::serialization(e.to_string()))?;
    writer
        .write_all(b"\n")
        .map_err(|e| RouteGraphError::io(e.to_string()))
}

pub fn load_graph_from_path<P: AsRef<Path>>(
    path: P,
    mode: ImportMode,
) -> Result<Graph, RouteGraphError> {
    let file = File::open(path.as_ref()).map_err(|e| RouteGraphError::io(e.to_string()))?;
    load_graph_from_reader(BufReader::new(file), mode)
}

pub fn load_graph_from_reader<R: Read>(
    reader: R,
    mode: ImportMode,
) -> Result<Graph, RouteGraphError> {
    let document: GraphDocument =
        serde_json::from_reader(reader).map_err(|e| RouteGraphError::serialization(e.to_string()))?;
    let mut graph = Graph::new();
    for node in document.nodes {
        graph.add_node(node)?;
    }
    let mut stubs = 0usize;
    for edge in document.edges {
        for endpoint in [&edge.source, &edge.target] {
            if graph.contains_node(endpoint) {
                continue;
            }
            match mode {
                ImportMode::Strict => {
                    return Err(RouteGraphError::not_found(format!(
                        "edge references unknown node {endpoint}"
                    )));
                }
                ImportMode::CreateMissing => {
                    graph.add_node(Node::new(endpoint.clone()))?;
                    stubs += 1;
                }
            }
        }
        graph.add_edge(edge)?;
    }
    if stubs > 0 {
        log::debug!("import created {stubs} stub nodes for unknown endpoints");
    }
    log::debug!(
        "imported {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}
