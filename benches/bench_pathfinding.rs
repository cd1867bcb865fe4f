use std::time::Duration;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use routegraph::dataset::{GraphShape, generate_graph, node_id};
use routegraph::{Algorithm, Pathfinder, WaveConfig};

const GRID_SEED: u64 = 0xA11C;
const ER_SEED: u64 = 0xB22D;
const SAMPLE_SIZE: usize = 20;
const WARM_UP: Duration = Duration::from_millis(300);
const MEASURE: Duration = Duration::from_millis(500);

fn grid_side() -> usize {
    #[cfg(feature = "bench-ci")]
    {
        20
    }
    #[cfg(not(feature = "bench-ci"))]
    {
        60
    }
}

struct PreparedGraph {
    finder: Pathfinder,
    start: String,
    goal: String,
    label: &'static str,
}

fn prepared_graphs() -> Vec<PreparedGraph> {
    let side = grid_side();
    let nodes = side * side;
    let grid = generate_graph(
        GraphShape::Grid2D {
            width: side,
            height: side,
        },
        nodes,
        GRID_SEED,
    );
    let random = generate_graph(
        GraphShape::RandomErdosRenyi {
            edges: nodes.saturating_mul(4),
        },
        nodes,
        ER_SEED,
    );
    vec![
        PreparedGraph {
            finder: Pathfinder::new(grid),
            start: node_id(0),
            goal: node_id(nodes - 1),
            label: "grid",
        },
        PreparedGraph {
            finder: Pathfinder::new(random),
            start: node_id(0),
            goal: node_id(nodes - 1),
            label: "er",
        },
    ]
}

fn bench_optimal_searches(c: &mut Criterion) {
    let graphs = prepared_graphs();
    let mut group = c.benchmark_group("optimal_search");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for prepared in &graphs {
        for (name, algorithm) in [
            ("dijkstra", Algorithm::Dijkstra),
            ("astar", Algorithm::AStar),
            ("bidirectional", Algorithm::Bidirectional),
        ] {
            group.bench_function(BenchmarkId::from_parameter(format!("{}_{name}", prepared.label)), |b| {
                b.iter(|| {
                    prepared
                        .finder
                        .find_path(&prepared.start, &prepared.goal, algorithm.clone())
                        .expect("search")
                })
            });
        }
    }
    group.finish();
}

fn bench_fast_searches(c: &mut Criterion) {
    let graphs = prepared_graphs();
    let mut group = c.benchmark_group("fast_search");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for prepared in &graphs {
        for (name, algorithm) in [
            ("breadth", Algorithm::Breadth),
            ("depth", Algorithm::Depth),
            ("beam_16", Algorithm::Beam { width: 16 }),
            (
                "wave",
                Algorithm::Wave(WaveConfig {
                    iterations: 10_000,
                    coherence: 0.85,
                    seed: Some(42),
                }),
            ),
        ] {
            group.bench_function(BenchmarkId::from_parameter(format!("{}_{name}", prepared.label)), |b| {
                b.iter(|| {
                    prepared
                        .finder
                        .find_path(&prepared.start, &prepared.goal, algorithm.clone())
                        .expect("search")
                })
            });
        }
    }
    group.finish();
}

fn bench_cached_repeat(c: &mut Criterion) {
    let graphs = prepared_graphs();
    let mut group = c.benchmark_group("cached_repeat");
    group.sample_size(SAMPLE_SIZE);
    group.warm_up_time(WARM_UP);
    group.measurement_time(MEASURE);
    for prepared in &graphs {
        prepared
            .finder
            .find_path(&prepared.start, &prepared.goal, Algorithm::Dijkstra)
            .expect("warm search");
        group.bench_function(BenchmarkId::from_parameter(format!("{}_dijkstra", prepared.label)), |b| {
            b.iter(|| {
                prepared
                    .finder
                    .find_path(&prepared.start, &prepared.goal, Algorithm::Dijkstra)
                    .expect("cached search")
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_optimal_searches,
    bench_fast_searches,
    bench_cached_repeat
);
criterion_main!(benches);
