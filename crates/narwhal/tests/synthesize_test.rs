use narwhal::Error;
use narwhal::config::LayoutConfig;
use narwhal::geometry::Size;
use narwhal::graphlib::Graph;
use narwhal::layout_graph::LayoutGraph;
use narwhal::model::{EdgeKind, VertexKind};
use narwhal::rank::assign_ranks;
use narwhal::synthesize::{SynthesisMode, check_proper, expand_segment, make_proper};
use narwhal::transform::transform;

/// `a -> b -> ... -> e` plus the long edge `a -> e`, ranked top-down.
fn ranked_with_long_edge(path: &[&str]) -> LayoutGraph {
    let mut caller: Graph<(), ()> = Graph::default();
    caller.set_path(path);
    caller.set_edge(path[0], path[path.len() - 1]);
    let ids = caller.node_ids();
    let bounds = |_: &str, _: &()| Size::new(10.0, 10.0);
    let mut g = transform(&caller, &ids, &bounds, None).graph;
    assign_ranks(&mut g, &LayoutConfig::default()).expect("ranked");
    g
}

#[test]
fn check_proper_rejects_edges_spanning_several_ranks() {
    let g = ranked_with_long_edge(&["a", "b", "c", "d"]);
    match check_proper(&g) {
        Err(Error::ImproperEdge {
            source_rank,
            target_rank,
            ..
        }) => assert_eq!((source_rank, target_rank), (0, 3)),
        other => panic!("expected an improper edge, got {other:?}"),
    }
}

#[test]
fn make_proper_materializes_one_vertex_per_intermediate_rank() {
    let mut g = ranked_with_long_edge(&["a", "b", "c", "d"]);
    let real = g.vertex_count();
    let stats = make_proper(&mut g, SynthesisMode::Materialize);

    assert_eq!(stats.split_edges, 1);
    assert_eq!(stats.synthetic_vertices, 2);
    assert_eq!(stats.segments, 0);
    assert_eq!(g.vertex_count(), real + 2);
    check_proper(&g).expect("proper");

    let synthetic: Vec<_> = g.vertex_ids().filter(|v| g.is_synthetic(*v)).collect();
    let mut ranks: Vec<usize> = synthetic.iter().map(|v| g.rank(*v)).collect();
    ranks.sort_unstable();
    assert_eq!(ranks, vec![1, 2]);
}

#[test]
fn make_proper_keeps_the_caller_edge_on_every_piece() {
    let mut g = ranked_with_long_edge(&["a", "b", "c", "d"]);
    let long_origin = g
        .edges()
        .find(|(_, e)| g.rank(e.target) - g.rank(e.source) == 3)
        .map(|(_, e)| e.origin)
        .expect("long edge");
    make_proper(&mut g, SynthesisMode::Materialize);

    let pieces: Vec<_> = g
        .edges()
        .filter(|(_, e)| e.origin == long_origin)
        .map(|(_, e)| e.kind)
        .collect();
    assert_eq!(pieces, vec![EdgeKind::Synthetic; 3]);
}

#[test]
fn make_proper_uses_a_single_vertex_for_two_rank_edges_in_segment_mode() {
    let mut g = ranked_with_long_edge(&["a", "b", "c"]);
    let stats = make_proper(&mut g, SynthesisMode::Segments);
    assert_eq!(stats.segments, 0);
    assert_eq!(stats.synthetic_vertices, 1);
    assert!(g.segments().is_empty());
    check_proper(&g).expect("proper");
}

#[test]
fn make_proper_builds_segments_for_longer_edges() {
    let mut g = ranked_with_long_edge(&["a", "b", "c", "d", "e"]);
    let stats = make_proper(&mut g, SynthesisMode::Segments);
    assert_eq!(stats.segments, 1);
    assert_eq!(stats.synthetic_vertices, 2);
    check_proper(&g).expect("segment edges may span several ranks");

    let segment = g.segments()[0];
    assert_eq!(g.rank(segment.p), 1);
    assert_eq!(g.rank(segment.q), 3);
    assert!(matches!(g.vertex(segment.p).kind, VertexKind::PVertex(_)));
    assert!(matches!(g.vertex(segment.q).kind, VertexKind::QVertex(_)));
    assert_eq!(g.segment_of(segment.p), Some(&segment));
    assert_eq!(g.segment_of(segment.q), Some(&segment));
}

#[test]
fn expand_segment_replaces_the_segment_edge_with_a_chain() {
    let mut g = ranked_with_long_edge(&["a", "b", "c", "d", "e"]);
    make_proper(&mut g, SynthesisMode::Segments);
    let segment = g.segments()[0];

    let id = g.vertex(segment.p).kind.segment().expect("segment id");
    let chain = expand_segment(&mut g, id);
    assert_eq!(chain.len(), 1);
    assert_eq!(g.rank(chain[0]), 2);
    assert!(g.edge(segment.edge).is_none());
    assert_eq!(g.successors(segment.p).collect::<Vec<_>>(), chain);
    assert_eq!(g.successors(chain[0]).collect::<Vec<_>>(), vec![segment.q]);
    check_proper(&g).expect("proper");
}
