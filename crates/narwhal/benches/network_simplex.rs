use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use narwhal::geometry::Size;
use narwhal::graphlib::{Graph, GraphOptions};
use narwhal::layout_graph::LayoutGraph;
use narwhal::rank;
use narwhal::transform::transform;
use std::hint::black_box;
use std::time::Duration;

#[derive(Debug, Clone)]
struct GraphSpec {
    node_ids: Vec<String>,
    edges: Vec<(usize, usize)>,
}

impl GraphSpec {
    fn build(&self) -> LayoutGraph {
        let mut g: Graph<(), ()> = Graph::new(GraphOptions { multigraph: true });
        for id in &self.node_ids {
            g.set_node(id.clone(), ());
        }
        for (i, &(from, to)) in self.edges.iter().enumerate() {
            if from >= self.node_ids.len() || to >= self.node_ids.len() || from == to {
                continue;
            }
            g.set_edge_named(
                self.node_ids[from].clone(),
                self.node_ids[to].clone(),
                Some(format!("e{i}")),
                None,
            );
        }
        let ids = g.node_ids();
        transform(&g, &ids, &|_: &str, _: &()| Size::new(40.0, 20.0), None).graph
    }
}

fn build_dag_spec(name: &str, node_count: usize, fanout: usize) -> GraphSpec {
    let node_ids: Vec<String> = (0..node_count).map(|i| format!("{name}_n{i}")).collect();
    let mut edges: Vec<(usize, usize)> = Vec::new();

    // A spine to guarantee connectivity.
    for i in 0..node_count.saturating_sub(1) {
        edges.push((i, i + 1));
    }

    for i in 0..node_count {
        for k in 2..=(fanout + 1) {
            let to = i.saturating_add(k);
            if to >= node_count {
                break;
            }
            edges.push((i, to));
        }

        // Long edges leave slack for the pivots to remove.
        let to = i.saturating_add(10);
        if to < node_count {
            edges.push((i, to));
        }
    }

    GraphSpec { node_ids, edges }
}

fn bench_network_simplex(c: &mut Criterion) {
    let mut group = c.benchmark_group("network_simplex");
    group.measurement_time(Duration::from_secs(10));

    let cases = [
        ("dag_50_f3", 50usize, 3usize),
        ("dag_200_f4", 200usize, 4usize),
        ("dag_400_f4", 400usize, 4usize),
    ];

    for (name, nodes, fanout) in cases {
        let spec = build_dag_spec(name, nodes, fanout);
        group.bench_with_input(
            BenchmarkId::new("rank::network_simplex", name),
            &spec,
            |b, spec| {
                b.iter_batched(
                    || spec.build(),
                    |g| {
                        let ranks = rank::network_simplex(black_box(&g));
                        black_box(ranks.len());
                    },
                    BatchSize::LargeInput,
                )
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_network_simplex);
criterion_main!(benches);
