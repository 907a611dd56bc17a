//! Snapshots of the per-vertex layout state.

use crate::geometry::Point;
use crate::layout_graph::LayoutGraph;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexMetadata {
    pub rank: usize,
    pub index: usize,
    pub pos: usize,
    pub measure: f64,
    pub point: Point,
}

/// Saved `rank`/`index`/`pos`/`measure`/`point` of every vertex, in vertex order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataSnapshot {
    entries: Vec<VertexMetadata>,
}

impl MetadataSnapshot {
    pub fn capture(g: &LayoutGraph) -> Self {
        let entries = g
            .vertices()
            .map(|(_, lv)| VertexMetadata {
                rank: lv.rank,
                index: lv.index,
                pos: lv.pos,
                measure: lv.measure,
                point: lv.point,
            })
            .collect();
        Self { entries }
    }

    /// Writes the snapshot back. Vertices created after the capture are left as they are.
    pub fn restore(&self, g: &mut LayoutGraph) {
        let ids: Vec<_> = g.vertex_ids().take(self.entries.len()).collect();
        for (v, m) in ids.into_iter().zip(&self.entries) {
            let lv = g.vertex_mut(v);
            lv.rank = m.rank;
            lv.index = m.index;
            lv.pos = m.pos;
            lv.measure = m.measure;
            lv.point = m.point;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
