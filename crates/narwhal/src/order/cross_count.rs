//! Bilayer crossing counts via an accumulator tree (Barth, Jünger & Mutzel).

use crate::layers::Layers;
use crate::layout_graph::LayoutGraph;
use crate::model::VertexId;
use rustc_hash::FxHashMap as HashMap;

pub fn cross_count(g: &LayoutGraph, layers: &Layers) -> usize {
    let mut cc = 0;
    for r in 1..layers.len() {
        cc += two_layer_cross_count(g, layers.rank(r - 1), layers.rank(r));
    }
    cc
}

/// Crossings among the edges running from `north` to `south`.
pub fn two_layer_cross_count(g: &LayoutGraph, north: &[VertexId], south: &[VertexId]) -> usize {
    if south.is_empty() {
        return 0;
    }
    let south_pos: HashMap<VertexId, usize> =
        south.iter().enumerate().map(|(i, v)| (*v, i)).collect();

    let mut pairs: Vec<(usize, usize)> = Vec::new();
    for (i, &v) in north.iter().enumerate() {
        for w in g.successors(v) {
            if let Some(&j) = south_pos.get(&w) {
                pairs.push((i, j));
            }
        }
    }
    count_inversions(south.len(), pairs)
}

/// Counts crossing pairs among straight edges `(north_pos, south_pos)` between two ordered
/// layers, the south one holding `south_len` slots.
pub fn count_inversions(south_len: usize, mut pairs: Vec<(usize, usize)>) -> usize {
    if south_len == 0 || pairs.len() < 2 {
        return 0;
    }
    pairs.sort_unstable();

    let mut first_index: usize = 1;
    while first_index < south_len {
        first_index <<= 1;
    }
    let tree_size = 2 * first_index - 1;
    first_index -= 1;
    let mut tree: Vec<usize> = vec![0; tree_size];

    let mut cc = 0;
    for (_, pos) in pairs {
        let mut index = pos + first_index;
        tree[index] += 1;
        while index > 0 {
            if index % 2 == 1 {
                cc += tree[index + 1];
            }
            index = (index - 1) >> 1;
            tree[index] += 1;
        }
    }
    cc
}
