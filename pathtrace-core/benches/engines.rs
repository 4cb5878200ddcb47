//! Benchmarks for recorded engine runs.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pathtrace_core::{BellmanFord, Dijkstra, Engine, Graph};

/// `side x side` grid with right and down edges.
fn grid(side: u32) -> Graph {
    let mut builder = Graph::builder();
    for id in 0..side * side {
        builder = builder.node(id, format!("n{}", id));
    }
    for row in 0..side {
        for col in 0..side {
            let id = row * side + col;
            if col + 1 < side {
                builder = builder.edge(id, id + 1, ((id % 7) + 1) as f64);
            }
            if row + 1 < side {
                builder = builder.edge(id, id + side, ((id % 5) + 1) as f64);
            }
        }
    }
    builder.build().expect("grid graph is valid")
}

fn bench_dijkstra(c: &mut Criterion) {
    let mut group = c.benchmark_group("dijkstra");
    for side in [4u32, 8, 16] {
        let graph = grid(side);
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &graph, |b, g| {
            b.iter(|| black_box(Dijkstra::new().run(g, 0).map(|t| t.len())))
        });
    }
    group.finish();
}

fn bench_bellman_ford(c: &mut Criterion) {
    let mut group = c.benchmark_group("bellman_ford");
    for side in [4u32, 8] {
        let graph = grid(side);
        group.bench_with_input(BenchmarkId::new("full", side * side), &graph, |b, g| {
            b.iter(|| black_box(BellmanFord::new().run(g, 0).map(|t| t.len())))
        });
        group.bench_with_input(BenchmarkId::new("early_stop", side * side), &graph, |b, g| {
            b.iter(|| {
                black_box(
                    BellmanFord::new()
                        .with_early_stop(true)
                        .run(g, 0)
                        .map(|t| t.len()),
                )
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_dijkstra, bench_bellman_ford);
criterion_main!(benches);
