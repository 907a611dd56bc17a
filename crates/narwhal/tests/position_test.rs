use narwhal::config::LayoutConfig;
use narwhal::geometry::Size;
use narwhal::graphlib::Graph;
use narwhal::layers::{Layers, init_order};
use narwhal::layout_graph::LayoutGraph;
use narwhal::position::bk::{
    self, Alignment, Conflicts, DIRECTIONS, UnionFind, find_type1_conflicts, horizontal_compaction,
};
use narwhal::position::{assign_coordinates, center_ranks, rank_centers};
use narwhal::rank::assign_ranks;
use narwhal::synthesize::{SynthesisMode, make_proper};
use narwhal::transform::transform;

const SPACING: f64 = 50.0;

fn prepared(edges: &[(&str, &str)], size: Size) -> (LayoutGraph, Layers) {
    let mut caller: Graph<(), ()> = Graph::default();
    for (v, w) in edges {
        caller.set_edge(*v, *w);
    }
    let ids = caller.node_ids();
    let mut g = transform(&caller, &ids, &|_: &str, _: &()| size, None).graph;
    assign_ranks(&mut g, &LayoutConfig::default()).expect("ranked");
    make_proper(&mut g, SynthesisMode::Materialize);
    let layers = init_order(&g);
    layers.reindex(&mut g);
    (g, layers)
}

fn x_of(g: &LayoutGraph, xs: &[f64], id: &str) -> f64 {
    xs[g.lookup(id).expect("vertex").index()]
}

#[test]
fn union_find_resolves_block_roots() {
    let (g, _) = prepared(&[("a", "b"), ("b", "c")], Size::ZERO);
    let [a, b, c] = [
        g.lookup("a").expect("a"),
        g.lookup("b").expect("b"),
        g.lookup("c").expect("c"),
    ];

    let mut blocks = UnionFind::new(g.vertex_count());
    assert!(blocks.is_root(b));
    blocks.attach(b, a);
    blocks.attach(c, b);
    assert_eq!(blocks.find(c), a);
    assert_eq!(blocks.find(b), a);
    assert!(blocks.is_root(a));
    assert!(!blocks.is_root(c));
}

#[test]
fn find_type1_conflicts_marks_real_edges_crossing_inner_segments() {
    // Long edge a -> d passes through two synthetic vertices; b -> e crosses its inner
    // segment once the ranks are ordered so.
    let edges = [
        ("a", "b"),
        ("b", "c"),
        ("c", "d"),
        ("a", "d"),
        ("x", "b"),
        ("b", "e"),
    ];
    let (mut g, _) = prepared(&edges, Size::new(10.0, 10.0));
    let synthetic: Vec<_> = g.vertex_ids().filter(|v| g.is_synthetic(*v)).collect();
    assert_eq!(synthetic.len(), 2);
    let (s1, s2) = if g.rank(synthetic[0]) < g.rank(synthetic[1]) {
        (synthetic[0], synthetic[1])
    } else {
        (synthetic[1], synthetic[0])
    };
    let [a, b, c, d, e, x] = ["a", "b", "c", "d", "e", "x"].map(|n| g.lookup(n).expect("vertex"));
    let layers = Layers::from_ranks(vec![vec![a, x], vec![s1, b], vec![e, s2, c], vec![d]]);
    layers.reindex(&mut g);

    let conflicts = find_type1_conflicts(&g, &layers);
    assert!(conflicts.contains(b, e));
    assert!(!conflicts.contains(s1, s2));
    assert!(!conflicts.contains(b, c));
}

#[test]
fn horizontal_compaction_keeps_neighbors_apart() {
    let (g, layers) = prepared(&[("a", "b"), ("a", "c"), ("a", "d")], Size::new(20.0, 10.0));
    let layering: Vec<Vec<_>> = layers.iter().map(<[_]>::to_vec).collect();
    let unaligned = Alignment {
        root: g.vertex_ids().collect(),
        align: g.vertex_ids().collect(),
    };

    let xs = horizontal_compaction(&g, &layering, &unaligned, SPACING);
    let row: Vec<f64> = layers.rank(1).iter().map(|v| xs[v.index()]).collect();
    assert_eq!(row, vec![0.0, 70.0, 140.0]);
}

#[test]
fn bk_aligns_a_chain_vertically() {
    let (g, layers) = prepared(&[("a", "b"), ("b", "c")], Size::new(40.0, 20.0));
    let xs = bk::position_x(&g, &layers, SPACING);
    assert_eq!(x_of(&g, &xs, "a"), x_of(&g, &xs, "b"));
    assert_eq!(x_of(&g, &xs, "b"), x_of(&g, &xs, "c"));
}

#[test]
fn bk_separates_siblings_and_centers_their_parent() {
    let (g, layers) = prepared(
        &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        Size::new(40.0, 20.0),
    );
    let xs = bk::position_x(&g, &layers, SPACING);
    let (b, c) = (x_of(&g, &xs, "b"), x_of(&g, &xs, "c"));
    assert!((b - c).abs() >= 90.0, "b={b} c={c}");

    let (a, d) = (x_of(&g, &xs, "a"), x_of(&g, &xs, "d"));
    let (lo, hi) = (b.min(c), b.max(c));
    assert!(lo <= a && a <= hi);
    assert!(lo <= d && d <= hi);
}

#[test]
fn bk_produces_one_candidate_per_direction() {
    let (g, layers) = prepared(&[("a", "b"), ("a", "c")], Size::new(10.0, 10.0));
    let candidates = bk::alignments(&g, &layers, SPACING);
    assert_eq!(candidates.len(), DIRECTIONS.len());
    assert!(candidates.iter().all(|xs| xs.len() == g.vertex_count()));
}

#[test]
fn bk_balance_takes_the_mean_of_the_central_candidates() {
    let candidates = vec![vec![0.0], vec![10.0], vec![20.0], vec![100.0]];
    assert_eq!(bk::balance(&candidates, 1), vec![15.0]);
}

#[test]
fn bk_align_coordinates_matches_the_reference_extent() {
    let mut candidates = vec![
        vec![0.0, 10.0],
        vec![-30.0, -20.0],
        vec![5.0, 15.0],
        vec![40.0, 60.0],
    ];
    bk::align_coordinates(&mut candidates, 0);
    // Left-biased candidates share the reference minimum, right-biased ones its maximum.
    assert_eq!(candidates[1], vec![0.0, 10.0]);
    assert_eq!(candidates[2], vec![0.0, 10.0]);
    assert_eq!(candidates[3], vec![-10.0, 10.0]);
}

#[test]
fn rank_centers_stack_ranks_by_their_tallest_vertex() {
    let (mut g, layers) = prepared(&[("a", "b"), ("a", "c")], Size::new(10.0, 20.0));
    let c = g.lookup("c").expect("c");
    g.vertex_mut(c).size = Size::new(10.0, 60.0);
    assert_eq!(rank_centers(&g, &layers, 50.0), vec![10.0, 100.0]);
}

#[test]
fn center_ranks_centers_narrow_ranks_under_the_widest() {
    let (g, layers) = prepared(&[("a", "b"), ("a", "c")], Size::new(20.0, 10.0));
    let xs = center_ranks(&g, &layers, SPACING);
    assert_eq!(x_of(&g, &xs, "a"), 45.0);
    let mut row = vec![x_of(&g, &xs, "b"), x_of(&g, &xs, "c")];
    row.sort_by(f64::total_cmp);
    assert_eq!(row, vec![10.0, 80.0]);
}

#[test]
fn assign_coordinates_honors_the_margin() {
    let (mut g, layers) = prepared(&[("a", "b")], Size::new(40.0, 20.0));
    let config = LayoutConfig {
        margin: 10.0,
        ..LayoutConfig::default()
    };
    let size = assign_coordinates(&mut g, &layers, &config, None);
    assert_eq!(size, Size::new(60.0, 110.0));
    let a = g.vertex(g.lookup("a").expect("a")).point;
    let b = g.vertex(g.lookup("b").expect("b")).point;
    assert_eq!((a.x, a.y), (30.0, 20.0));
    assert_eq!((b.x, b.y), (30.0, 90.0));
}

#[test]
fn assign_coordinates_centers_ranks_without_straightening() {
    let (mut g, layers) = prepared(&[("a", "b"), ("a", "c")], Size::new(20.0, 10.0));
    let config = LayoutConfig {
        straighten_edges: false,
        ..LayoutConfig::default()
    };
    let size = assign_coordinates(&mut g, &layers, &config, None);
    assert_eq!(size.width, 90.0);
    let a = g.vertex(g.lookup("a").expect("a")).point;
    assert_eq!(a.x, 45.0);
}

#[test]
fn conflicts_start_empty() {
    let conflicts = Conflicts::default();
    assert!(conflicts.is_empty());
    assert_eq!(conflicts.len(), 0);
}
