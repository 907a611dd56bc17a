use crate::layers::Layers;
use crate::layout_graph::LayoutGraph;
use crate::model::VertexId;
use rustc_hash::FxHashSet as HashSet;

/// Marked edges, stored as unordered vertex pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conflicts {
    pairs: HashSet<(VertexId, VertexId)>,
}

impl Conflicts {
    pub fn add(&mut self, v: VertexId, w: VertexId) {
        self.pairs.insert(ordered(v, w));
    }

    pub fn contains(&self, v: VertexId, w: VertexId) -> bool {
        self.pairs.contains(&ordered(v, w))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

fn ordered(v: VertexId, w: VertexId) -> (VertexId, VertexId) {
    if v <= w { (v, w) } else { (w, v) }
}

/// Type-1 conflicts: edges that cross an inner segment (an edge between two synthetic
/// vertices) and are not inner segments themselves. Inner segments win the alignment.
pub fn find_type1_conflicts(g: &LayoutGraph, layers: &Layers) -> Conflicts {
    let mut conflicts = Conflicts::default();

    for i in 1..layers.len() {
        let prev_len = layers.rank(i - 1).len();
        let layer = layers.rank(i);

        let mut k0: usize = 0;
        let mut scan_pos: usize = 0;
        for (idx, &v) in layer.iter().enumerate() {
            let w = inner_segment_source(g, v);
            let k1 = w.map(|w| g.index(w)).unwrap_or(prev_len);

            if w.is_some() || idx + 1 == layer.len() {
                for &scan in &layer[scan_pos..=idx] {
                    let scan_synthetic = g.is_synthetic(scan);
                    for u in g.predecessors(scan) {
                        let u_pos = g.index(u);
                        if (u_pos < k0 || k1 < u_pos) && !(scan_synthetic && g.is_synthetic(u)) {
                            conflicts.add(u, scan);
                        }
                    }
                }
                scan_pos = idx + 1;
                k0 = k1;
            }
        }
    }

    conflicts
}

/// The synthetic upper end of the inner segment ending at `v`, if any.
fn inner_segment_source(g: &LayoutGraph, v: VertexId) -> Option<VertexId> {
    if !g.is_synthetic(v) {
        return None;
    }
    g.predecessors(v).find(|u| g.is_synthetic(*u))
}
