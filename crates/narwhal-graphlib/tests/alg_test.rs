use narwhal_graphlib::{Graph, GraphOptions, alg};

fn new_graph() -> Graph<(), (), ()> {
    Graph::new(GraphOptions { multigraph: true })
}

#[test]
fn alg_components_returns_weakly_connected_groups() {
    let mut g = new_graph();
    g.set_path(&["a", "b"]);
    g.set_edge("c", "b");
    g.set_path(&["d", "e"]);
    g.ensure_node("f");

    assert_eq!(
        alg::components(&g),
        vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["d".to_string(), "e".to_string()],
            vec!["f".to_string()],
        ]
    );
}

#[test]
fn alg_find_cycles_reports_sccs_and_self_loops() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c", "a"]);
    g.set_edge("c", "d");
    g.set_edge("e", "e");

    assert_eq!(
        alg::find_cycles(&g),
        vec![
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec!["e".to_string()],
        ]
    );
}

#[test]
fn alg_find_cycles_is_empty_for_a_dag() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "d"]);
    g.set_path(&["a", "c", "d"]);
    assert!(alg::find_cycles(&g).is_empty());
    assert!(alg::is_acyclic(&g));
}

#[test]
fn alg_topsort_orders_sources_first() {
    let mut g = new_graph();
    g.set_edge("b", "c");
    g.set_edge("a", "b");
    g.set_edge("a", "c");

    assert_eq!(
        alg::topsort(&g).unwrap(),
        vec!["a".to_string(), "b".to_string(), "c".to_string()]
    );
}

#[test]
fn alg_topsort_fails_on_cycles() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "a"]);
    let err = alg::topsort(&g).unwrap_err();
    assert_eq!(err.vertex, "a");
    assert!(!alg::is_acyclic(&g));
}

#[test]
fn alg_preorder_and_postorder_visit_reachable_vertices() {
    let mut g = new_graph();
    g.set_path(&["a", "b", "c"]);
    g.set_edge("a", "d");

    assert_eq!(
        alg::preorder(&g, &["a"]),
        vec!["a", "b", "c", "d"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
    assert_eq!(
        alg::postorder(&g, &["a"]),
        vec!["c", "b", "d", "a"]
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>()
    );
}
