use bionet_graph::Graph;
use bionet_layout::{Acceleration, LayoutEngine, LayoutOptions};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn ring_graph(n: usize) -> Graph {
    let mut g = Graph::new(n);
    for v in 0..n {
        g.add_edge(v, (v + 1) % n).expect("ring ids are in range");
    }
    g
}

fn bench_layout(c: &mut Criterion) {
    let graph = ring_graph(128);

    c.bench_function("ring_128_exact_60_steps", |b| {
        b.iter(|| {
            let mut engine = LayoutEngine::new(LayoutOptions {
                seed: Some(7),
                ..Default::default()
            });
            engine.run(black_box(&graph), 60);
            black_box(engine.extents())
        })
    });

    c.bench_function("ring_128_grid_60_steps", |b| {
        b.iter(|| {
            let mut engine = LayoutEngine::new(LayoutOptions {
                seed: Some(7),
                acceleration: Acceleration::Grid,
                ..Default::default()
            });
            engine.run(black_box(&graph), 60);
            black_box(engine.extents())
        })
    });
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
