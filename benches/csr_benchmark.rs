use criterion::{black_box, criterion_group, criterion_main, Criterion};
use indexgraph::{IndexGraph, IndexGraphBuilder};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

fn staged(nodes: usize, degree: usize) -> IndexGraphBuilder {
    let mut builder = IndexGraphBuilder::directed();
    builder.ensure_capacity(nodes, nodes * degree);
    builder.add_vertices(nodes).unwrap();
    for i in 0..nodes {
        for j in 0..degree {
            builder.add_edge(i, (i + j * 7 + 1) % nodes).unwrap();
        }
    }
    builder
}

fn bench_csr_build(c: &mut Criterion) {
    let mut builder = staged(1000, 100);

    c.bench_function("csr_build", |b| b.iter(|| black_box(builder.build())));

    builder.set_fast_lookup(true);
    c.bench_function("csr_build_fast_lookup", |b| b.iter(|| black_box(builder.build())));

    c.bench_function("csr_build_reindexed", |b| {
        b.iter(|| black_box(builder.reindex_and_build(true)));
    });
}

fn bench_csr_queries(c: &mut Criterion) {
    let nodes = 1000;
    let mut builder = staged(nodes, 100);
    let scan = builder.build();
    builder.set_fast_lookup(true);
    let fast = builder.build();

    let mut reference = DiGraph::<(), ()>::with_capacity(nodes, nodes * 100);
    let ids: Vec<NodeIndex> = (0..nodes).map(|_| reference.add_node(())).collect();
    for e in scan.endpoints().as_slice() {
        reference.add_edge(ids[e.source()], ids[e.target()], ());
    }

    c.bench_function("csr_in_degree", |b| {
        b.iter(|| {
            for i in 0..10 {
                black_box(scan.in_edges((i * 100) % nodes).unwrap().len());
            }
        });
    });

    c.bench_function("petgraph_in_degree", |b| {
        b.iter(|| {
            for i in 0..10 {
                let target = ids[(i * 100) % nodes];
                black_box(reference.neighbors_directed(target, Direction::Incoming).count());
            }
        });
    });

    c.bench_function("csr_get_edge_scan", |b| {
        b.iter(|| {
            for i in 0..nodes {
                black_box(scan.get_edge(i, (i + 7 * 99 + 1) % nodes).unwrap());
            }
        });
    });

    c.bench_function("csr_get_edge_fast_lookup", |b| {
        b.iter(|| {
            for i in 0..nodes {
                black_box(fast.get_edge(i, (i + 7 * 99 + 1) % nodes).unwrap());
            }
        });
    });

    c.bench_function("petgraph_find_edge", |b| {
        b.iter(|| {
            for i in 0..nodes {
                black_box(reference.find_edge(ids[i], ids[(i + 7 * 99 + 1) % nodes]));
            }
        });
    });
}

criterion_group!(benches, bench_csr_build, bench_csr_queries);
criterion_main!(benches);
