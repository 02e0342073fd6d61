use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

use planar_flow::graph::{bellman_ford, dijkstra, edmonds_karp, planar_cut};
use planar_flow::{DualGraph, Graph, Point, SolverConfig};

/// Square grid with random capacities and its dual; the outer face is split
/// between the top-left source and the bottom-right sink.
fn grid(side: usize, seed: u64) -> (Graph<f64>, DualGraph<f64>) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    let id = |r: usize, c: usize| r * side + c;
    let cell = |r: usize, c: usize| r * (side - 1) + c;
    let cells = (side - 1) * (side - 1);
    let (s_hat, t_hat) = (cells, cells + 1);

    let positions = (0..side)
        .flat_map(|r| (0..side).map(move |c| Point::new(c as f64, -(r as f64))))
        .collect();
    let mut faces: Vec<Point> = (0..side - 1)
        .flat_map(|r| (0..side - 1).map(move |c| Point::new(c as f64 + 0.5, -(r as f64) - 0.5)))
        .collect();
    faces.push(Point::new(side as f64 + 10.0, 10.0));
    faces.push(Point::new(-10.0, -(side as f64) - 10.0));

    let mut edges = Vec::new();
    let mut dual_edges = Vec::new();
    let mut crossings = Vec::new();
    for r in 0..side {
        for c in 0..side {
            if c + 1 < side {
                let w = rng.gen_range(1.0..10.0);
                let above = if r > 0 { cell(r - 1, c) } else { s_hat };
                let below = if r + 1 < side { cell(r, c) } else { t_hat };
                edges.push((id(r, c), id(r, c + 1), w));
                dual_edges.push((above, below, w));
                crossings.push(((above, below), (id(r, c), id(r, c + 1))));
            }
            if r + 1 < side {
                let w = rng.gen_range(1.0..10.0);
                let left = if c > 0 { cell(r, c - 1) } else { t_hat };
                let right = if c + 1 < side { cell(r, c) } else { s_hat };
                edges.push((id(r, c), id(r + 1, c), w));
                dual_edges.push((left, right, w));
                crossings.push(((left, right), (id(r, c), id(r + 1, c))));
            }
        }
    }

    let primal = Graph::build(positions, edges, false).expect("grid graph");
    let dual = DualGraph::build(faces, dual_edges, crossings, s_hat, t_hat).expect("grid dual");
    (primal, dual)
}

fn bench_shortest_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_paths");

    for side in [8, 16, 24] {
        let (graph, _) = grid(side, 42);
        group.bench_with_input(BenchmarkId::new("dijkstra", side), &graph, |b, g| {
            b.iter(|| dijkstra::shortest_paths(black_box(g), 0))
        });
        group.bench_with_input(BenchmarkId::new("label_correcting", side), &graph, |b, g| {
            b.iter(|| bellman_ford::shortest_paths(black_box(g), 0))
        });
    }

    group.finish();
}

fn bench_min_cut(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_cut");

    for side in [4, 8, 12] {
        let (primal, dual) = grid(side, 7);
        let config = SolverConfig::default();
        group.bench_with_input(BenchmarkId::new("edmonds_karp", side), &primal, |b, g| {
            b.iter(|| edmonds_karp::max_flow(black_box(g), &config))
        });
        group.bench_with_input(
            BenchmarkId::new("planar_dual", side),
            &(primal, dual),
            |b, (p, d)| b.iter(|| planar_cut::solve(black_box(p), black_box(d))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_shortest_paths, bench_min_cut);
criterion_main!(benches);
