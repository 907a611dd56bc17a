//! The per-run working graph.
//!
//! Vertices and segments are append-only; edges may be removed (leaving a tombstone so that
//! `EdgeId`s stay stable) or reversed in place.

use crate::geometry::Size;
use crate::model::{
    EdgeId, EdgeKind, LayoutEdge, LayoutVertex, Segment, SegmentId, VertexId, VertexKind,
};
use narwhal_graphlib::EdgeKey;
use rustc_hash::FxHashMap as HashMap;

#[derive(Debug, Clone, Default)]
pub struct LayoutGraph {
    vertices: Vec<LayoutVertex>,
    edges: Vec<Option<LayoutEdge>>,
    out_adj: Vec<Vec<EdgeId>>,
    in_adj: Vec<Vec<EdgeId>>,
    segments: Vec<Segment>,
    origins: Vec<EdgeKey>,
    lookup: HashMap<String, VertexId>,
}

impl LayoutGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_vertex(&mut self, kind: VertexKind, size: Size) -> VertexId {
        let v = VertexId(self.vertices.len());
        if let VertexKind::Real(id) = &kind {
            self.lookup.insert(id.clone(), v);
        }
        self.vertices.push(LayoutVertex::new(kind, size));
        self.out_adj.push(Vec::new());
        self.in_adj.push(Vec::new());
        v
    }

    /// Adds a synthetic vertex at `rank`.
    pub fn add_synthetic(&mut self, rank: usize) -> VertexId {
        let v = self.add_vertex(VertexKind::Synthetic, Size::ZERO);
        self.vertices[v.0].rank = rank;
        v
    }

    pub fn vertex(&self, v: VertexId) -> &LayoutVertex {
        &self.vertices[v.0]
    }

    pub fn vertex_mut(&mut self, v: VertexId) -> &mut LayoutVertex {
        &mut self.vertices[v.0]
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + use<> {
        (0..self.vertices.len()).map(VertexId)
    }

    pub fn vertices(&self) -> impl Iterator<Item = (VertexId, &LayoutVertex)> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(ix, lv)| (VertexId(ix), lv))
    }

    /// Looks up the vertex wrapping caller vertex `id`.
    pub fn lookup(&self, id: &str) -> Option<VertexId> {
        self.lookup.get(id).copied()
    }

    pub fn rank(&self, v: VertexId) -> usize {
        self.vertices[v.0].rank
    }

    pub fn index(&self, v: VertexId) -> usize {
        self.vertices[v.0].index
    }

    pub fn is_synthetic(&self, v: VertexId) -> bool {
        self.vertices[v.0].kind.is_synthetic()
    }

    pub fn add_origin(&mut self, key: EdgeKey) -> usize {
        self.origins.push(key);
        self.origins.len() - 1
    }

    pub fn origin(&self, origin: usize) -> &EdgeKey {
        &self.origins[origin]
    }

    pub fn origins(&self) -> &[EdgeKey] {
        &self.origins
    }

    pub fn add_edge(
        &mut self,
        source: VertexId,
        target: VertexId,
        kind: EdgeKind,
        origin: usize,
        reversed: bool,
    ) -> EdgeId {
        let e = EdgeId(self.edges.len());
        self.edges.push(Some(LayoutEdge {
            source,
            target,
            kind,
            origin,
            reversed,
        }));
        self.out_adj[source.0].push(e);
        self.in_adj[target.0].push(e);
        e
    }

    pub fn edge(&self, e: EdgeId) -> Option<&LayoutEdge> {
        self.edges.get(e.0).and_then(Option::as_ref)
    }

    /// Live edges in creation order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &LayoutEdge)> {
        self.edges
            .iter()
            .enumerate()
            .filter_map(|(ix, e)| e.as_ref().map(|e| (EdgeId(ix), e)))
    }

    pub fn edge_ids(&self) -> Vec<EdgeId> {
        self.edges().map(|(e, _)| e).collect()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.iter().filter(|e| e.is_some()).count()
    }

    pub fn remove_edge(&mut self, e: EdgeId) -> Option<LayoutEdge> {
        let removed = self.edges.get_mut(e.0)?.take()?;
        self.out_adj[removed.source.0].retain(|x| *x != e);
        self.in_adj[removed.target.0].retain(|x| *x != e);
        Some(removed)
    }

    /// Flips `e` in place and toggles its `reversed` flag.
    pub fn reverse_edge(&mut self, e: EdgeId) {
        let Some(edge) = self.edges.get_mut(e.0).and_then(Option::as_mut) else {
            return;
        };
        let (source, target) = (edge.source, edge.target);
        edge.source = target;
        edge.target = source;
        edge.reversed = !edge.reversed;
        self.out_adj[source.0].retain(|x| *x != e);
        self.in_adj[target.0].retain(|x| *x != e);
        self.out_adj[target.0].push(e);
        self.in_adj[source.0].push(e);
    }

    pub fn out_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.out_adj[v.0]
    }

    pub fn in_edges(&self, v: VertexId) -> &[EdgeId] {
        &self.in_adj[v.0]
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        self.out_adj[v.0].len()
    }

    pub fn in_degree(&self, v: VertexId) -> usize {
        self.in_adj[v.0].len()
    }

    /// Edge targets in adjacency order; parallel edges repeat their target.
    pub fn successors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.out_adj[v.0]
            .iter()
            .filter_map(|e| self.edge(*e).map(|e| e.target))
    }

    /// Edge sources in adjacency order; parallel edges repeat their source.
    pub fn predecessors(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.in_adj[v.0]
            .iter()
            .filter_map(|e| self.edge(*e).map(|e| e.source))
    }

    pub fn add_segment(
        &mut self,
        p: VertexId,
        q: VertexId,
        origin: usize,
        reversed: bool,
    ) -> SegmentId {
        let s = SegmentId(self.segments.len());
        self.vertices[p.0].kind = VertexKind::PVertex(s);
        self.vertices[q.0].kind = VertexKind::QVertex(s);
        let edge = self.add_edge(p, q, EdgeKind::Segment(s), origin, reversed);
        self.segments.push(Segment { p, q, edge });
        s
    }

    pub fn segment(&self, s: SegmentId) -> &Segment {
        &self.segments[s.0]
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The segment edge leaving a P vertex or entering a Q vertex.
    pub fn segment_of(&self, v: VertexId) -> Option<&Segment> {
        self.vertices[v.0].kind.segment().map(|s| &self.segments[s.0])
    }

    /// Number of ranks spanned by the current vertex ranks.
    pub fn rank_count(&self) -> usize {
        self.vertices
            .iter()
            .map(|lv| lv.rank + 1)
            .max()
            .unwrap_or(0)
    }
}
