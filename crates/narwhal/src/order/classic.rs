//! Median sweep with adjacent-exchange local search over a fully materialized proper graph.

use super::cross_count::{count_inversions, cross_count};
use super::median::{median_value, sort_by_measure};
use crate::layers::Layers;
use crate::layout_graph::LayoutGraph;
use crate::model::VertexId;

const MAX_TRANSPOSE_ROUNDS: usize = 32;

/// One sweep: `down` reorders ranks `1..` against the rank above, otherwise ranks are
/// reordered bottom-up against the rank below. Returns the new layering and its crossings.
pub fn sweep(g: &mut LayoutGraph, layers: Layers, down: bool, transpose: bool) -> (Layers, usize) {
    let mut ranks = layers.into_inner();
    let n = ranks.len();
    if down {
        for rank in ranks.iter_mut().skip(1) {
            reorder(g, rank, true);
        }
    } else {
        for rank in ranks.iter_mut().take(n.saturating_sub(1)).rev() {
            reorder(g, rank, false);
        }
    }

    let mut layers = Layers::from_ranks(ranks);
    if transpose {
        transpose_ranks(g, &mut layers);
    }
    let crossings = cross_count(g, &layers);
    (layers, crossings)
}

fn reorder(g: &mut LayoutGraph, rank: &mut [VertexId], down: bool) {
    for &v in rank.iter() {
        let mut positions: Vec<usize> = if down {
            g.predecessors(v).map(|u| g.index(u)).collect()
        } else {
            g.successors(v).map(|w| g.index(w)).collect()
        };
        positions.sort_unstable();
        g.vertex_mut(v).measure = median_value(&positions);
    }
    sort_by_measure(rank, |v| g.vertex(v).measure);
    for (i, &v) in rank.iter().enumerate() {
        let lv = g.vertex_mut(v);
        lv.index = i;
        lv.pos = i;
    }
}

/// Swaps adjacent vertices while that strictly lowers the crossings between their edges.
pub fn transpose_ranks(g: &mut LayoutGraph, layers: &mut Layers) {
    for _ in 0..MAX_TRANSPOSE_ROUNDS {
        let mut improved = false;
        for r in 0..layers.len() {
            for i in 0..layers.rank(r).len().saturating_sub(1) {
                let (v, w) = (layers.rank(r)[i], layers.rank(r)[i + 1]);
                if pair_crossings(g, v, w) <= pair_crossings(g, w, v) {
                    continue;
                }
                layers.rank_mut(r).swap(i, i + 1);
                for (x, slot) in [(w, i), (v, i + 1)] {
                    let lv = g.vertex_mut(x);
                    lv.index = slot;
                    lv.pos = slot;
                }
                improved = true;
            }
        }
        if !improved {
            break;
        }
    }
}

/// Crossings among the edges of `left` and `right` when `left` sits directly left of
/// `right`, on both sides.
pub fn pair_crossings(g: &LayoutGraph, left: VertexId, right: VertexId) -> usize {
    let up = side_crossings(g, g.predecessors(left), g.predecessors(right));
    let down = side_crossings(g, g.successors(left), g.successors(right));
    up + down
}

fn side_crossings(
    g: &LayoutGraph,
    left: impl Iterator<Item = VertexId>,
    right: impl Iterator<Item = VertexId>,
) -> usize {
    let pairs: Vec<(usize, usize)> = left
        .map(|u| (0, g.index(u)))
        .chain(right.map(|u| (1, g.index(u))))
        .collect();
    let south_len = pairs.iter().map(|(_, j)| j + 1).max().unwrap_or(0);
    count_inversions(south_len, pairs)
}
