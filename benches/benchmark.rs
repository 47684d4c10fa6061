use coppice::exact::CleanAndGlue;
use coppice::graph::{HashMapGraph, MutableGraph};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn graph_from(n: usize, edges: &[(usize, usize)]) -> HashMapGraph {
    let mut graph = HashMapGraph::with_capacity(n);
    (0..n).for_each(|v| graph.add_vertex(v));
    for &(u, v) in edges {
        graph.add_edge(u, v);
    }
    graph
}

fn petersen() -> HashMapGraph {
    graph_from(
        10,
        &[
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 4),
            (4, 0),
            (0, 5),
            (1, 6),
            (2, 7),
            (3, 8),
            (4, 9),
            (5, 7),
            (7, 9),
            (9, 6),
            (6, 8),
            (8, 5),
        ],
    )
}

fn grid(rows: usize, columns: usize) -> HashMapGraph {
    let mut graph = HashMapGraph::with_capacity(rows * columns);
    for r in 0..rows {
        for c in 0..columns {
            let v = r * columns + c;
            graph.add_vertex(v);
            if c > 0 {
                graph.add_edge(v - 1, v);
            }
            if r > 0 {
                graph.add_edge(v - columns, v);
            }
        }
    }
    graph
}

fn exact_petersen(c: &mut Criterion) {
    let graph = petersen();
    c.bench_function("clean_and_glue_petersen", |b| {
        b.iter(|| CleanAndGlue::new(black_box(&graph)).compute().unwrap())
    });
}

fn exact_grid(c: &mut Criterion) {
    let graph = grid(3, 4);
    c.bench_function("clean_and_glue_grid_3x4", |b| {
        b.iter(|| CleanAndGlue::new(black_box(&graph)).compute().unwrap())
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = exact_petersen, exact_grid
}
criterion_main!(benches);
