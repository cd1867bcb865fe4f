//! Seeded synthetic graph generation for benchmarks and tests.
//!
//! Output is deterministic for a given shape, node count, and seed. Line and
//! grid shapes assign positions matching their edge weights so the distance
//! heuristic stays admissible; the other shapes leave positions unset and
//! let the informed searches degrade to plain cost ordering.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Graph, Node};

#[derive(Clone, Debug)]
pub enum GraphShape {
    Line,
    Star,
    Grid2D { width: usize, height: usize },
    RandomErdosRenyi { edges: usize },
}

pub fn generate_graph(shape: GraphShape, node_count: usize, seed: u64) -> Graph {
    assert!(node_count > 1, "node_count must exceed 1");
    let mut graph = Graph::new();
    match shape {
        GraphShape::Line => generate_line(&mut graph, node_count),
        GraphShape::Star => generate_star(&mut graph, node_count),
        GraphShape::Grid2D { width, height } => {
            assert_eq!(
                width * height,
                node_count,
                "grid dimensions must match node count"
            );
            generate_grid(&mut graph, width, height);
        }
        GraphShape::RandomErdosRenyi { edges } => {
            generate_random(&mut graph, node_count, edges, seed)
        }
    }
    graph
}

pub fn node_id(idx: usize) -> String {
    format!("n{idx:05}")
}

fn generate_line(graph: &mut Graph, count: usize) {
    for idx in 0..count {
        let node = Node::new(node_id(idx)).with_position(1.0 + idx as f64, 1.0, 0.0);
        graph.add_node(node).expect("node insert");
    }
    for idx in 0..count - 1 {
        graph
            .connect(node_id(idx), node_id(idx + 1), 1.0)
            .expect("edge insert");
    }
}

fn generate_star(graph: &mut Graph, count: usize) {
    for leaf in 1..count {
        graph
            .connect(node_id(0), node_id(leaf), 1.0)
            .expect("edge insert");
    }
}

fn generate_grid(graph: &mut Graph, width: usize, height: usize) {
    for y in 0..height {
        for x in 0..width {
            let node =
                Node::new(node_id(grid_index(x, y, width))).with_position(
                    1.0 + x as f64,
                    1.0 + y as f64,
                    0.0,
                );
            graph.add_node(node).expect("node insert");
        }
    }
    for y in 0..height {
        for x in 0..width {
            let base = grid_index(x, y, width);
            if x + 1 < width {
                graph
                    .connect(node_id(base), node_id(grid_index(x + 1, y, width)), 1.0)
                    .expect("edge insert");
            }
            if y + 1 < height {
                graph
                    .connect(node_id(base), node_id(grid_index(x, y + 1, width)), 1.0)
                    .expect("edge insert");
            }
        }
    }
}

fn generate_random(graph: &mut Graph, node_count: usize, edge_count: usize, seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    for idx in 0..node_count {
        graph.add_node(Node::new(node_id(idx))).expect("node insert");
    }
    let mut inserted = 0usize;
    let mut attempts = 0usize;
    // Directed edges with randomized weights; bounded attempts so dense
    // requests on tiny graphs still terminate.
    let max_attempts = edge_count.saturating_mul(20).max(1000);
    let mut seen = ahash::AHashSet::new();
    while inserted < edge_count && attempts < max_attempts {
        attempts += 1;
        let from = rng.gen_range(0..node_count);
        let to = rng.gen_range(0..node_count);
        if from == to || !seen.insert((from, to)) {
            continue;
        }
        let weight = rng.gen_range(0.5..2.0);
        graph
            .add_edge(crate::graph::Edge::new(node_id(from), node_id(to), weight))
            .expect("edge insert");
        inserted += 1;
    }
}

fn grid_index(x: usize, y: usize, width: usize) -> usize {
    y * width + x
}
