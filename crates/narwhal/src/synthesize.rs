//! Make the layering proper: afterwards every working edge spans exactly one rank, except
//! segment edges, which stand in for a whole run of intermediate ranks until they are
//! expanded.

use crate::layout_graph::LayoutGraph;
use crate::model::{EdgeId, EdgeKind, SegmentId, VertexId};
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    /// One synthetic vertex per intermediate rank.
    Materialize,
    /// Two-rank edges get one synthetic vertex; longer edges get a P/Q segment.
    Segments,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SynthesisStats {
    pub split_edges: usize,
    pub synthetic_vertices: usize,
    pub segments: usize,
}

pub fn make_proper(g: &mut LayoutGraph, mode: SynthesisMode) -> SynthesisStats {
    let mut stats = SynthesisStats::default();
    for e in g.edge_ids() {
        let Some(edge) = g.edge(e).cloned() else {
            continue;
        };
        let (rs, rt) = (g.rank(edge.source), g.rank(edge.target));
        if rt <= rs + 1 {
            continue;
        }
        g.remove_edge(e);
        stats.split_edges += 1;
        let (origin, reversed) = (edge.origin, edge.reversed);

        let span = rt - rs;
        if mode == SynthesisMode::Segments && span > 2 {
            let p = g.add_synthetic(rs + 1);
            let q = g.add_synthetic(rt - 1);
            g.add_edge(edge.source, p, EdgeKind::Synthetic, origin, reversed);
            g.add_segment(p, q, origin, reversed);
            g.add_edge(q, edge.target, EdgeKind::Synthetic, origin, reversed);
            stats.synthetic_vertices += 2;
            stats.segments += 1;
            continue;
        }

        let mut prev = edge.source;
        for r in rs + 1..rt {
            let v = g.add_synthetic(r);
            g.add_edge(prev, v, EdgeKind::Synthetic, origin, reversed);
            prev = v;
            stats.synthetic_vertices += 1;
        }
        g.add_edge(prev, edge.target, EdgeKind::Synthetic, origin, reversed);
    }

    tracing::debug!(
        split = stats.split_edges,
        synthetic = stats.synthetic_vertices,
        segments = stats.segments,
        "made layering proper"
    );
    stats
}

/// Replaces the segment edge of `s` with a chain of synthetic vertices, one per rank strictly
/// between its P and Q vertex. Returns the new vertices, top first.
pub fn expand_segment(g: &mut LayoutGraph, s: SegmentId) -> Vec<VertexId> {
    let segment = *g.segment(s);
    let Some(edge) = g.remove_edge(segment.edge) else {
        return Vec::new();
    };
    let (rp, rq) = (g.rank(segment.p), g.rank(segment.q));
    let (origin, reversed) = (edge.origin, edge.reversed);

    let mut chain = Vec::with_capacity(rq.saturating_sub(rp + 1));
    let mut prev = segment.p;
    for r in rp + 1..rq {
        let v = g.add_synthetic(r);
        g.add_edge(prev, v, EdgeKind::Synthetic, origin, reversed);
        chain.push(v);
        prev = v;
    }
    g.add_edge(prev, segment.q, EdgeKind::Synthetic, origin, reversed);
    chain
}

/// Fails on the first non-segment edge spanning anything other than one rank.
pub fn check_proper(g: &LayoutGraph) -> Result<()> {
    for (e, edge) in g.edges() {
        let (source_rank, target_rank) = (g.rank(edge.source), g.rank(edge.target));
        let proper = match edge.kind {
            EdgeKind::Segment(_) => target_rank > source_rank,
            EdgeKind::Real | EdgeKind::Synthetic => target_rank == source_rank + 1,
        };
        if !proper {
            return Err(improper(e, source_rank, target_rank));
        }
    }
    Ok(())
}

fn improper(edge: EdgeId, source_rank: usize, target_rank: usize) -> Error {
    Error::ImproperEdge {
        edge,
        source_rank,
        target_rank,
    }
}
