//! Per-run vertex and edge records.
//!
//! Everything here is addressed by integer handles into the arena owned by
//! [`LayoutGraph`](crate::layout_graph::LayoutGraph); handles are only meaningful within the run
//! that created them.

use crate::geometry::{Point, Size};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexId(pub(crate) usize);

impl VertexId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(pub(crate) usize);

impl SegmentId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VertexKind {
    /// Wraps a caller vertex, by id.
    Real(String),
    /// One bend point of a split multi-rank edge.
    Synthetic,
    /// Upper end of a long-edge segment (rank = source rank + 1).
    PVertex(SegmentId),
    /// Lower end of a long-edge segment (rank = target rank - 1).
    QVertex(SegmentId),
}

impl VertexKind {
    pub fn is_real(&self) -> bool {
        matches!(self, VertexKind::Real(_))
    }

    /// True for every vertex that has no caller counterpart.
    pub fn is_synthetic(&self) -> bool {
        !self.is_real()
    }

    pub fn segment(&self) -> Option<SegmentId> {
        match self {
            VertexKind::PVertex(s) | VertexKind::QVertex(s) => Some(*s),
            VertexKind::Real(_) | VertexKind::Synthetic => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutVertex {
    pub kind: VertexKind,
    pub rank: usize,
    /// Slot within the rank; contiguous `0..len` per rank.
    pub index: usize,
    /// Sweep-time position, which counts container widths and so differs from `index`.
    pub pos: usize,
    /// Sort key during a sweep; `-1.0` means unconstrained.
    pub measure: f64,
    pub point: Point,
    pub size: Size,
}

impl LayoutVertex {
    pub fn new(kind: VertexKind, size: Size) -> Self {
        Self {
            kind,
            rank: 0,
            index: 0,
            pos: 0,
            measure: 0.0,
            point: Point::ORIGIN,
            size,
        }
    }

    pub fn id(&self) -> Option<&str> {
        match &self.kind {
            VertexKind::Real(id) => Some(id.as_str()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    Real,
    /// Piece of a split multi-rank edge.
    Synthetic,
    /// Rigid link between the P and Q vertex of a segment.
    Segment(SegmentId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEdge {
    pub source: VertexId,
    pub target: VertexId,
    pub kind: EdgeKind,
    /// Index of the caller edge this edge stands for.
    pub origin: usize,
    /// Set when the caller edge was reversed for acyclicity.
    pub reversed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub p: VertexId,
    pub q: VertexId,
    pub edge: EdgeId,
}
