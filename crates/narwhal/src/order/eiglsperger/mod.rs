//! Crossing minimization over compact layers (Eiglsperger, Siebenhaller & Kaufmann).
//!
//! A rank is a sequence of vertices and containers; a container holds the segments passing
//! through the rank, so a long edge costs one entry per rank instead of one vertex. A sweep
//! step against the fixed rank:
//!
//! 1. opens the P vertices (downwards) or Q vertices (upwards) of the fixed rank into
//!    containers,
//! 2. assigns positions, counting every segment of a container,
//! 3. measures the free vertices by the median position of their fixed-rank neighbors,
//! 4. merges vertices and containers by measure, splitting a container a vertex lands in,
//! 5. pulls the Q (or P) vertices whose segment ends here out of their containers,
//! 6. restores the alternation: every rank reads container, vertex, container, ..., with
//!    empty containers filling the gaps between adjacent vertices.

mod container;

pub use container::Container;

use super::cross_count::count_inversions;
use super::median::{UNCONSTRAINED, median_value};
use crate::layers::Layers;
use crate::layout_graph::LayoutGraph;
use crate::model::{EdgeKind, SegmentId, VertexId, VertexKind};
use crate::synthesize::expand_segment;
use rustc_hash::FxHashMap as HashMap;
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerItem {
    Vertex(VertexId),
    Container(Container),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompactLayers {
    ranks: Vec<Vec<LayerItem>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Slot {
    Vertex(VertexId),
    Segment(SegmentId),
}

impl CompactLayers {
    /// Builds compact layers from a vertex ordering. The segment containers are placed by one
    /// downward sweep, so every rank's own order only seeds the measures of vertices without
    /// upper neighbors.
    pub fn build(g: &mut LayoutGraph, layers: &Layers) -> Self {
        let mut ranks: Vec<Vec<LayerItem>> = Vec::with_capacity(layers.len());
        for rank in layers.iter() {
            for (i, &v) in rank.iter().enumerate() {
                g.vertex_mut(v).pos = i;
            }
            ranks.push(rank.iter().map(|v| LayerItem::Vertex(*v)).collect());
        }
        let (compact, _) = sweep(g, Self { ranks }, true);
        compact
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn rank(&self, r: usize) -> &[LayerItem] {
        self.ranks.get(r).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Vertices of rank `r` in order, containers skipped.
    pub fn vertices(&self, r: usize) -> Vec<VertexId> {
        self.rank(r)
            .iter()
            .filter_map(|item| match item {
                LayerItem::Vertex(v) => Some(*v),
                LayerItem::Container(_) => None,
            })
            .collect()
    }

    pub fn cross_count(&self, g: &LayoutGraph) -> usize {
        let mut cc = 0;
        for r in 1..self.ranks.len() {
            cc += self.two_layer_cross_count(g, r);
        }
        cc
    }

    fn two_layer_cross_count(&self, g: &LayoutGraph, r: usize) -> usize {
        let mut south: HashMap<Slot, usize> = HashMap::default();
        for slot in slots(&self.ranks[r]) {
            let next = south.len();
            south.insert(slot, next);
        }

        // Where a segment entry continues to on rank `r`.
        let continue_to = |s: SegmentId| {
            let q = g.segment(s).q;
            if g.rank(q) == r {
                Slot::Vertex(q)
            } else {
                Slot::Segment(s)
            }
        };

        let mut pairs: Vec<(usize, usize)> = Vec::new();
        for (i, slot) in slots(&self.ranks[r - 1]).into_iter().enumerate() {
            match slot {
                Slot::Vertex(v) => {
                    for &e in g.out_edges(v) {
                        let Some(edge) = g.edge(e) else {
                            continue;
                        };
                        let target = match edge.kind {
                            EdgeKind::Segment(s) => continue_to(s),
                            EdgeKind::Real | EdgeKind::Synthetic => Slot::Vertex(edge.target),
                        };
                        if let Some(&j) = south.get(&target) {
                            pairs.push((i, j));
                        }
                    }
                }
                Slot::Segment(s) => {
                    if let Some(&j) = south.get(&continue_to(s)) {
                        pairs.push((i, j));
                    }
                }
            }
        }
        count_inversions(south.len(), pairs)
    }

    /// Turns every segment into synthetic vertices at the slots its containers occupy and
    /// returns the resulting proper layering.
    pub fn expand(self, g: &mut LayoutGraph) -> Layers {
        let segment_ids: Vec<SegmentId> = (0..g.segments().len()).map(SegmentId).collect();
        let mut chains: HashMap<SegmentId, Vec<VertexId>> = HashMap::default();
        for s in segment_ids {
            chains.insert(s, expand_segment(g, s));
        }

        let mut ranks: Vec<Vec<VertexId>> = Vec::with_capacity(self.ranks.len());
        for (r, items) in self.ranks.into_iter().enumerate() {
            let mut rank: Vec<VertexId> = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    LayerItem::Vertex(v) => rank.push(v),
                    LayerItem::Container(c) => {
                        for &s in c.segments() {
                            let top = g.rank(g.segment(s).p);
                            let slot = chains.get(&s).and_then(|chain| chain.get(r - top - 1));
                            if let Some(&v) = slot {
                                rank.push(v);
                            }
                        }
                    }
                }
            }
            ranks.push(rank);
        }
        Layers::from_ranks(ranks)
    }
}

fn slots(items: &[LayerItem]) -> Vec<Slot> {
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            LayerItem::Vertex(v) => out.push(Slot::Vertex(*v)),
            LayerItem::Container(c) => {
                out.extend(c.segments().iter().map(|s| Slot::Segment(*s)));
            }
        }
    }
    out
}

/// One sweep over all ranks; returns the new layers and their crossing count.
pub fn sweep(g: &mut LayoutGraph, layers: CompactLayers, down: bool) -> (CompactLayers, usize) {
    let mut ranks = layers.ranks;
    let n = ranks.len();
    if down {
        for r in 1..n {
            let fixed = open(g, &ranks[r - 1], true);
            let next = step(g, fixed, &ranks[r], r, true);
            ranks[r] = next;
        }
    } else {
        for r in (0..n.saturating_sub(1)).rev() {
            let fixed = open(g, &ranks[r + 1], false);
            let next = step(g, fixed, &ranks[r], r, false);
            ranks[r] = next;
        }
    }

    let mut ranks: Vec<Vec<LayerItem>> = ranks.into_iter().map(alternate).collect();
    for rank in &mut ranks {
        assign_positions(g, rank);
    }
    let layers = CompactLayers { ranks };
    let crossings = layers.cross_count(g);
    (layers, crossings)
}

/// True for the vertices that start a segment in the sweep direction.
fn opens(kind: &VertexKind, down: bool) -> bool {
    matches!(
        (kind, down),
        (VertexKind::PVertex(_), true) | (VertexKind::QVertex(_), false)
    )
}

/// True for the vertices that end a segment in the sweep direction.
fn closes(kind: &VertexKind, down: bool) -> bool {
    opens(kind, !down)
}

fn push_container(out: &mut Vec<LayerItem>, c: Container) {
    if c.is_empty() {
        return;
    }
    if let Some(LayerItem::Container(last)) = out.last_mut() {
        last.join(c);
    } else {
        out.push(LayerItem::Container(c));
    }
}

/// Pads `items` with empty containers and joins adjacent ones, so the sequence starts and
/// ends with a container and alternates in between.
fn alternate(items: Vec<LayerItem>) -> Vec<LayerItem> {
    let mut out: Vec<LayerItem> = Vec::with_capacity(2 * items.len() + 1);
    for item in items {
        match item {
            LayerItem::Container(c) => match out.last_mut() {
                Some(LayerItem::Container(last)) => last.join(c),
                _ => out.push(LayerItem::Container(c)),
            },
            LayerItem::Vertex(v) => {
                if !matches!(out.last(), Some(LayerItem::Container(_))) {
                    out.push(LayerItem::Container(Container::new()));
                }
                out.push(LayerItem::Vertex(v));
            }
        }
    }
    if !matches!(out.last(), Some(LayerItem::Container(_))) {
        out.push(LayerItem::Container(Container::new()));
    }
    out
}

/// The fixed rank as seen from the rank being ordered: opening vertices are replaced by
/// their segment, appended to the container on their left.
fn open(g: &LayoutGraph, items: &[LayerItem], down: bool) -> Vec<LayerItem> {
    let mut out: Vec<LayerItem> = Vec::with_capacity(items.len());
    for item in items {
        match item {
            LayerItem::Vertex(v) => match g.vertex(*v).kind.segment() {
                Some(s) if opens(&g.vertex(*v).kind, down) => {
                    push_container(&mut out, Container::from_segments(vec![s]));
                }
                _ => out.push(LayerItem::Vertex(*v)),
            },
            LayerItem::Container(c) => push_container(&mut out, c.clone()),
        }
    }
    out
}

fn assign_positions(g: &mut LayoutGraph, items: &mut [LayerItem]) {
    let mut pos = 0;
    for item in items {
        match item {
            LayerItem::Vertex(v) => {
                g.vertex_mut(*v).pos = pos;
                pos += 1;
            }
            LayerItem::Container(c) => {
                c.pos = pos;
                pos += c.len();
            }
        }
    }
}

fn step(
    g: &mut LayoutGraph,
    mut fixed: Vec<LayerItem>,
    previous: &[LayerItem],
    r: usize,
    down: bool,
) -> Vec<LayerItem> {
    assign_positions(g, &mut fixed);

    let mut free: Vec<VertexId> = previous
        .iter()
        .filter_map(|item| match item {
            LayerItem::Vertex(v) if !closes(&g.vertex(*v).kind, down) => Some(*v),
            _ => None,
        })
        .collect();
    for &v in &free {
        let mut positions: Vec<usize> = if down {
            g.predecessors(v).map(|u| g.vertex(u).pos).collect()
        } else {
            g.successors(v).map(|w| g.vertex(w).pos).collect()
        };
        positions.sort_unstable();
        let mut measure = median_value(&positions);
        if measure == UNCONSTRAINED {
            measure = g.vertex(v).pos as f64;
        }
        g.vertex_mut(v).measure = measure;
    }
    free.sort_by(|a, b| g.vertex(*a).measure.total_cmp(&g.vertex(*b).measure));

    // Merge vertices into the container sequence.
    let mut containers: VecDeque<Container> = fixed
        .into_iter()
        .filter_map(|item| match item {
            LayerItem::Container(c) => Some(c),
            LayerItem::Vertex(_) => None,
        })
        .collect();
    let mut merged: Vec<LayerItem> = Vec::new();
    for v in free {
        let m = g.vertex(v).measure;
        while let Some(c) = containers.pop_front() {
            if m <= c.pos as f64 {
                containers.push_front(c);
                break;
            }
            if m >= (c.pos + c.len()) as f64 {
                push_container(&mut merged, c);
                continue;
            }
            let k = (m - c.pos as f64).ceil() as usize;
            let (left, right) = c.split_at(k);
            push_container(&mut merged, left);
            containers.push_front(right);
            break;
        }
        merged.push(LayerItem::Vertex(v));
    }
    for c in containers {
        push_container(&mut merged, c);
    }

    // Segments ending on this rank give their closing vertex back.
    let mut out: Vec<LayerItem> = Vec::with_capacity(merged.len());
    for item in merged {
        match item {
            LayerItem::Vertex(v) => out.push(LayerItem::Vertex(v)),
            LayerItem::Container(c) => {
                let mut run = Container::new();
                for &s in c.segments() {
                    let segment = g.segment(s);
                    let end = if down { segment.q } else { segment.p };
                    if g.rank(end) == r {
                        push_container(&mut out, std::mem::take(&mut run));
                        out.push(LayerItem::Vertex(end));
                    } else {
                        run.push(s);
                    }
                }
                push_container(&mut out, run);
            }
        }
    }

    let mut index = 0;
    for item in &out {
        if let LayerItem::Vertex(v) = item {
            g.vertex_mut(*v).index = index;
            index += 1;
        }
    }
    out
}
