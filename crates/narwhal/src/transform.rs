//! Wraps caller vertices and edges into a fresh [`LayoutGraph`].

use crate::geometry::Size;
use crate::layout_graph::LayoutGraph;
use crate::model::{EdgeKind, VertexKind};
use narwhal_graphlib::{EdgeKey, Graph};
use std::cmp::Ordering;

pub type BoundsFn<'a, N> = dyn Fn(&str, &N) -> Size + 'a;
pub type EdgeOrderFn<'a> = dyn Fn(&EdgeKey, &EdgeKey) -> Ordering + 'a;

#[derive(Debug, Clone, Default)]
pub struct Transformed {
    pub graph: LayoutGraph,
    /// Origins of caller self-loops; these never enter the working graph.
    pub self_loops: Vec<usize>,
}

/// Builds the working graph for the caller vertices in `ids` and every caller edge between
/// them. The caller graph is only read.
///
/// Edges are taken in insertion order, or stably sorted by `edge_order` when given. Every
/// caller edge, self-loops included, gets an origin index in that order.
pub fn transform<N, E, G>(
    g: &Graph<N, E, G>,
    ids: &[String],
    bounds: &BoundsFn<'_, N>,
    edge_order: Option<&EdgeOrderFn<'_>>,
) -> Transformed
where
    N: Default,
    E: Default,
    G: Default,
{
    let mut graph = LayoutGraph::new();
    for id in ids {
        let Some(label) = g.node(id) else {
            continue;
        };
        if graph.lookup(id).is_some() {
            continue;
        }
        let size = sanitize(bounds(id, label));
        graph.add_vertex(VertexKind::Real(id.clone()), size);
    }

    let mut keys: Vec<&EdgeKey> = g
        .edges()
        .filter(|k| graph.lookup(&k.v).is_some() && graph.lookup(&k.w).is_some())
        .collect();
    if let Some(cmp) = edge_order {
        keys.sort_by(|a, b| cmp(a, b));
    }

    let mut self_loops: Vec<usize> = Vec::new();
    for key in keys {
        let origin = graph.add_origin(key.clone());
        let (Some(v), Some(w)) = (graph.lookup(&key.v), graph.lookup(&key.w)) else {
            continue;
        };
        if v == w {
            self_loops.push(origin);
            continue;
        }
        graph.add_edge(v, w, EdgeKind::Real, origin, false);
    }

    Transformed { graph, self_loops }
}

fn sanitize(size: Size) -> Size {
    let clamp = |x: f64| if x.is_finite() { x.max(0.0) } else { 0.0 };
    Size::new(clamp(size.width), clamp(size.height))
}
