//! Multi-algorithm weighted-graph pathfinding engine.
//!
//! Build a [`Graph`] of nodes and weighted edges, hand it to a
//! [`Pathfinder`], and ask for routes under the strategy fitting your
//! cost/latency tradeoff: Dijkstra and A* for optimal routes, BFS for
//! fewest hops, DFS for any route fast, beam search for bounded memory,
//! bidirectional search for long symmetric routes, and a probabilistic
//! wave walk for approximate answers. Constraint views filter the graph per
//! call, completed routes and heuristic values are memoized, and
//! connectivity/integrity diagnostics plus JSON import/export round out the
//! engine.
//!
//! Run Criterion benchmarks with `cargo bench` to inspect reports under
//! `target/criterion`.

pub mod beam;
pub mod bidirectional;
pub mod cache;
pub mod connectivity;
pub mod constraints;
pub mod dataset;
pub mod dijkstra;
pub mod enumerate;
pub mod errors;
pub mod graph;
pub mod heuristic;
pub mod integrity;
pub mod io;
pub mod path;
pub mod pathfinder;
pub mod traversal;
pub mod wave;

pub use crate::cache::CacheStats;
pub use crate::connectivity::{ConnectivityReport, analyze_connectivity};
pub use crate::constraints::Constraints;
pub use crate::errors::RouteGraphError;
pub use crate::graph::{Edge, Graph, Node};
pub use crate::heuristic::Heuristic;
pub use crate::integrity::{IntegrityReport, audit_graph};
pub use crate::io::{ImportMode, load_graph_from_path, save_graph_to_path};
pub use crate::path::{AlgorithmKind, Path};
pub use crate::pathfinder::{Algorithm, Pathfinder, SearchOptions};
pub use crate::wave::WaveConfig;
