use narwhal::config::{Layering, LayoutConfig};
use narwhal::geometry::Size;
use narwhal::graphlib::{Graph, GraphOptions};
use narwhal::layout_graph::LayoutGraph;
use narwhal::rank::{self, assign_ranks, coffman_graham, longest_path, network_simplex, top_down};
use narwhal::transform::transform;

const ALL: [Layering; 4] = [
    Layering::LongestPath,
    Layering::TopDown,
    Layering::CoffmanGraham,
    Layering::NetworkSimplex,
];

fn working(nodes: &[&str], edges: &[(&str, &str)]) -> LayoutGraph {
    let mut g: Graph<(), ()> = Graph::default();
    for id in nodes {
        g.set_node(*id, ());
    }
    for (v, w) in edges {
        g.set_edge(*v, *w);
    }
    let ids = g.node_ids();
    transform(&g, &ids, &|_: &str, _: &()| Size::new(10.0, 10.0), None).graph
}

fn config(layering: Layering) -> LayoutConfig {
    LayoutConfig {
        layering,
        ..LayoutConfig::default()
    }
}

fn rank_of(g: &LayoutGraph, id: &str) -> usize {
    g.rank(g.lookup(id).expect("vertex"))
}

fn ranks_of(g: &LayoutGraph, ranks: &[usize], ids: &[&str]) -> Vec<usize> {
    ids.iter()
        .map(|id| ranks[g.lookup(id).expect("vertex").index()])
        .collect()
}

fn total_length(g: &LayoutGraph) -> usize {
    g.edges()
        .map(|(_, e)| g.rank(e.target) - g.rank(e.source))
        .sum()
}

#[test]
fn longest_path_puts_sinks_on_the_bottom_rank() {
    let g = working(&[], &[("a", "b"), ("a", "c"), ("c", "d")]);
    let ranks = longest_path(&g);
    assert_eq!(ranks_of(&g, &ranks, &["a", "b", "c", "d"]), vec![0, 2, 1, 2]);
}

#[test]
fn top_down_puts_each_vertex_below_its_lowest_predecessor() {
    let g = working(&[], &[("a", "b"), ("a", "c"), ("c", "d"), ("b", "d")]);
    let ranks = top_down(&g);
    assert_eq!(ranks_of(&g, &ranks, &["a", "b", "c", "d"]), vec![0, 1, 1, 2]);
}

#[test]
fn coffman_graham_respects_the_layer_width() {
    let g = working(&[], &[("a", "b"), ("a", "c")]);

    let wide = coffman_graham(&g, 2);
    assert_eq!(ranks_of(&g, &wide, &["a", "b", "c"]), vec![0, 1, 1]);

    let narrow = coffman_graham(&g, 1);
    let narrow = ranks_of(&g, &narrow, &["a", "b", "c"]);
    assert_eq!(narrow[0], 0);
    assert_ne!(narrow[1], narrow[2]);
    assert!(narrow[1] > 0 && narrow[2] > 0);
}

#[test]
fn coffman_graham_drops_shortcuts_on_long_chains() {
    let names: Vec<String> = (0..70).map(|i| format!("v{i}")).collect();
    let mut edges: Vec<(&str, &str)> = names
        .windows(2)
        .map(|w| (w[0].as_str(), w[1].as_str()))
        .collect();
    edges.push((names[0].as_str(), names[69].as_str()));
    let g = working(&[], &edges);

    let ranks = coffman_graham(&g, 1);
    let ids: Vec<&str> = names.iter().map(String::as_str).collect();
    assert_eq!(ranks_of(&g, &ranks, &ids), (0..70).collect::<Vec<_>>());
}

#[test]
fn coffman_graham_keeps_every_layer_within_width_after_assignment() {
    let edges = [
        ("r", "a"),
        ("r", "b"),
        ("r", "c"),
        ("r", "d"),
        ("a", "e"),
        ("b", "e"),
        ("c", "f"),
        ("d", "f"),
    ];
    let mut g = working(&[], &edges);
    let cfg = LayoutConfig {
        coffman_graham_width: 2,
        ..config(Layering::CoffmanGraham)
    };
    let count = assign_ranks(&mut g, &cfg).expect("ranked");

    let mut per_rank = vec![0usize; count];
    for v in g.vertex_ids() {
        per_rank[g.rank(v)] += 1;
    }
    assert!(per_rank.iter().all(|n| *n <= 2), "{per_rank:?}");
}

#[test]
fn network_simplex_minimizes_total_edge_length() {
    let edges = [("a", "b"), ("b", "c"), ("c", "d"), ("a", "e")];
    let g = working(&[], &edges);

    let ranks = network_simplex(&g);
    assert_eq!(
        ranks_of(&g, &ranks, &["a", "b", "c", "d", "e"]),
        vec![0, 1, 2, 3, 1]
    );

    let mut by_simplex = working(&[], &edges);
    assign_ranks(&mut by_simplex, &config(Layering::NetworkSimplex)).expect("ranked");
    let mut by_longest_path = working(&[], &edges);
    assign_ranks(&mut by_longest_path, &config(Layering::LongestPath)).expect("ranked");
    assert_eq!(total_length(&by_simplex), 4);
    assert!(total_length(&by_simplex) < total_length(&by_longest_path));
}

#[test]
fn network_simplex_weighs_parallel_edges() {
    // Two parallel edges pull `x` towards `b` harder than the single edge from `a`.
    let mut caller: Graph<(), ()> = Graph::new(GraphOptions { multigraph: true });
    caller.set_path(&["a", "m1", "m2", "b"]);
    caller.set_edge("a", "x");
    caller.set_edge_named("x", "b", Some("1"), None);
    caller.set_edge_named("x", "b", Some("2"), None);
    let ids = caller.node_ids();
    let g = transform(&caller, &ids, &|_: &str, _: &()| Size::ZERO, None).graph;

    let ranks = network_simplex(&g);
    assert_eq!(
        ranks_of(&g, &ranks, &["a", "m1", "m2", "b", "x"]),
        vec![0, 1, 2, 3, 2]
    );
}

#[test]
fn assign_ranks_gives_every_edge_a_downward_direction() {
    let edges = [
        ("a", "b"),
        ("b", "c"),
        ("a", "c"),
        ("c", "d"),
        ("e", "d"),
        ("e", "f"),
        ("a", "f"),
    ];
    for layering in ALL {
        let mut g = working(&[], &edges);
        assign_ranks(&mut g, &config(layering)).expect("ranked");
        for (_, e) in g.edges() {
            assert!(g.rank(e.target) > g.rank(e.source), "{layering:?}");
        }
        rank::check_descending(&g).expect("descending");
    }
}

#[test]
fn assign_ranks_leaves_no_empty_rank() {
    let edges = [("a", "b"), ("b", "c"), ("c", "d"), ("a", "e"), ("x", "e")];
    for layering in ALL {
        let mut g = working(&[], &edges);
        let count = assign_ranks(&mut g, &config(layering)).expect("ranked");
        assert_eq!(count, g.rank_count(), "{layering:?}");
        for r in 0..count {
            assert!(
                g.vertex_ids().any(|v| g.rank(v) == r),
                "{layering:?} rank {r}"
            );
        }
    }
}

#[test]
fn assign_ranks_puts_isolated_vertices_on_rank_zero() {
    for layering in ALL {
        let mut g = working(&["z"], &[("a", "b"), ("b", "c")]);
        assign_ranks(&mut g, &config(layering)).expect("ranked");
        assert_eq!(rank_of(&g, "z"), 0, "{layering:?}");
    }
}

#[test]
fn tighten_leaves_pulls_leaf_sinks_up_to_their_predecessor() {
    let edges = [("a", "b"), ("b", "c"), ("c", "d"), ("a", "e")];

    let mut loose = working(&[], &edges);
    assign_ranks(&mut loose, &config(Layering::LongestPath)).expect("ranked");
    assert_eq!(rank_of(&loose, "e"), 3);

    let mut tight = working(&[], &edges);
    let cfg = LayoutConfig {
        tighten_leaves: true,
        ..config(Layering::LongestPath)
    };
    assign_ranks(&mut tight, &cfg).expect("ranked");
    assert_eq!(rank_of(&tight, "e"), 1);
}

#[test]
fn rank_util_compact_squeezes_out_unused_ranks() {
    let mut ranks = vec![0, 4, 4, 7, 2];
    assert_eq!(rank::util::compact(&mut ranks), 4);
    assert_eq!(ranks, vec![0, 2, 2, 3, 1]);
}

#[test]
fn rank_util_component_ids_groups_weakly_connected_vertices() {
    let g = working(&["z"], &[("a", "b"), ("c", "b")]);
    let (comp, count) = rank::util::component_ids(&g);
    assert_eq!(count, 2);
    let id = |v: &str| comp[g.lookup(v).expect("vertex").index()];
    assert_eq!(id("a"), id("b"));
    assert_eq!(id("a"), id("c"));
    assert_ne!(id("a"), id("z"));
}
