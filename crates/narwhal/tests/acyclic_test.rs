use narwhal::acyclic::{constructive_fas, greedy_fas, is_acyclic, remove_cycles};
use narwhal::config::CycleRemoval;
use narwhal::geometry::Size;
use narwhal::graphlib::{EdgeKey, Graph};
use narwhal::layout_graph::LayoutGraph;
use narwhal::transform::{EdgeOrderFn, transform};

fn caller(edges: &[(&str, &str)]) -> Graph<(), ()> {
    let mut g: Graph<(), ()> = Graph::default();
    for (v, w) in edges {
        g.set_edge(*v, *w);
    }
    g
}

fn working(edges: &[(&str, &str)]) -> LayoutGraph {
    working_ordered(edges, None)
}

fn working_ordered(edges: &[(&str, &str)], order: Option<&EdgeOrderFn<'_>>) -> LayoutGraph {
    let g = caller(edges);
    let ids = g.node_ids();
    transform(&g, &ids, &|_: &str, _: &()| Size::new(10.0, 10.0), order).graph
}

fn key(v: &str, w: &str) -> EdgeKey {
    EdgeKey {
        v: v.to_string(),
        w: w.to_string(),
        name: None,
    }
}

#[test]
fn greedy_fas_returns_the_empty_set_for_empty_graphs() {
    let g = LayoutGraph::new();
    assert!(greedy_fas(&g).is_empty());
}

#[test]
fn greedy_fas_returns_the_empty_set_for_acyclic_graphs() {
    let g = working(&[("a", "b"), ("b", "c"), ("b", "d"), ("a", "e")]);
    assert!(greedy_fas(&g).is_empty());
    assert!(is_acyclic(&g));
}

#[test]
fn greedy_fas_returns_a_single_edge_for_a_simple_cycle() {
    let g = working(&[("a", "b"), ("b", "c"), ("c", "a")]);
    assert!(!is_acyclic(&g));
    assert_eq!(greedy_fas(&g).len(), 1);
}

#[test]
fn greedy_fas_breaks_two_cycles_with_one_edge() {
    let g = working(&[("a", "b"), ("b", "a")]);
    assert_eq!(greedy_fas(&g).len(), 1);
}

#[test]
fn greedy_fas_stays_within_the_eades_bound() {
    let edges = [
        ("n1", "n2"),
        ("n2", "n3"),
        ("n3", "n4"),
        ("n4", "n1"),
        ("n2", "n5"),
        ("n5", "n6"),
        ("n6", "n2"),
        ("n4", "n6"),
        ("n6", "n3"),
    ];
    let mut g = working(&edges);
    let (n, m) = (g.vertex_count() as i64, g.edge_count() as i64);
    let fas = remove_cycles(&mut g, CycleRemoval::Greedy);
    assert!(is_acyclic(&g));
    assert!(fas.len() as i64 <= m / 2 - n / 6);
}

#[test]
fn remove_cycles_flags_reversed_edges_and_reports_caller_keys() {
    let mut g = working(&[("a", "b"), ("b", "c"), ("c", "a")]);
    let fas = remove_cycles(&mut g, CycleRemoval::Greedy);

    assert!(is_acyclic(&g));
    assert_eq!(fas.len(), 1);
    let reversed: Vec<_> = g.edges().filter(|(_, e)| e.reversed).collect();
    assert_eq!(reversed.len(), 1);
    let (e, edge) = reversed[0];
    assert_eq!(fas.edges, vec![e]);
    assert_eq!(&fas.origins[0], g.origin(edge.origin));

    // A reversed edge runs against its caller key.
    let caller_key = g.origin(edge.origin);
    assert_eq!(g.lookup(&caller_key.v), Some(edge.target));
    assert_eq!(g.lookup(&caller_key.w), Some(edge.source));
}

#[test]
fn constructive_fas_diverts_the_edge_that_closes_the_cycle() {
    let mut g = working(&[("a", "b"), ("b", "c"), ("c", "a")]);
    let fas = remove_cycles(&mut g, CycleRemoval::Constructive);
    assert_eq!(fas.origins, vec![key("c", "a")]);
    assert!(is_acyclic(&g));
}

#[test]
fn constructive_fas_follows_the_edge_order() {
    let rank = |k: &EdgeKey| match (k.v.as_str(), k.w.as_str()) {
        ("c", "a") => 0,
        ("a", "b") => 1,
        _ => 2,
    };
    let order: &EdgeOrderFn<'_> = &move |x: &EdgeKey, y: &EdgeKey| rank(x).cmp(&rank(y));
    let mut g = working_ordered(&[("a", "b"), ("b", "c"), ("c", "a")], Some(order));

    let fas = remove_cycles(&mut g, CycleRemoval::Constructive);
    assert_eq!(fas.origins, vec![key("b", "c")]);
}

#[test]
fn constructive_fas_returns_the_empty_set_for_acyclic_graphs() {
    let g = working(&[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")]);
    assert!(constructive_fas(&g).is_empty());
}

#[test]
fn remove_cycles_leaves_no_cycle_in_dense_graphs() {
    let ids = ["a", "b", "c", "d", "e"];
    let mut edges = Vec::new();
    for (i, v) in ids.iter().enumerate() {
        for (j, w) in ids.iter().enumerate() {
            if i != j && (i + j) % 3 != 0 {
                edges.push((*v, *w));
            }
        }
    }
    for strategy in [CycleRemoval::Greedy, CycleRemoval::Constructive] {
        let mut g = working(&edges);
        let before = g.edge_count();
        remove_cycles(&mut g, strategy);
        assert!(is_acyclic(&g), "{strategy:?}");
        assert_eq!(g.edge_count(), before);
    }
}
