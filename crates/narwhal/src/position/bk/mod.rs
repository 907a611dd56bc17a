//! Brandes & Köpf horizontal coordinate assignment.
//!
//! Four alignments ({down, up} x {left, right}) are computed and compacted independently,
//! shifted onto the narrowest one, and balanced by taking the mean of the two central
//! candidates per vertex.

mod alignment;
mod compaction;
mod conflicts;
mod union_find;

pub use alignment::{Alignment, vertical_alignment};
pub use compaction::horizontal_compaction;
pub use conflicts::{Conflicts, find_type1_conflicts};
pub use union_find::UnionFind;

use crate::layers::Layers;
use crate::layout_graph::LayoutGraph;
use crate::model::VertexId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Down,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

pub const DIRECTIONS: [(Vertical, Horizontal); 4] = [
    (Vertical::Up, Horizontal::Left),
    (Vertical::Up, Horizontal::Right),
    (Vertical::Down, Horizontal::Left),
    (Vertical::Down, Horizontal::Right),
];

/// One x candidate per vertex, for each of [`DIRECTIONS`].
pub fn alignments(g: &LayoutGraph, layers: &Layers, spacing: f64) -> Vec<Vec<f64>> {
    let conflicts = find_type1_conflicts(g, layers);
    tracing::trace!(conflicts = conflicts.len(), "marked type-1 conflicts");

    let mut out = Vec::with_capacity(DIRECTIONS.len());
    for (vertical, horizontal) in DIRECTIONS {
        let mut layering: Vec<Vec<VertexId>> = layers.iter().map(<[VertexId]>::to_vec).collect();
        if vertical == Vertical::Up {
            layering.reverse();
        }
        if horizontal == Horizontal::Right {
            for layer in &mut layering {
                layer.reverse();
            }
        }
        let mut pos = vec![0usize; g.vertex_count()];
        for layer in &layering {
            for (i, v) in layer.iter().enumerate() {
                pos[v.index()] = i;
            }
        }

        let alignment =
            vertical_alignment(g, &layering, &pos, &conflicts, vertical == Vertical::Down);
        let mut xs = horizontal_compaction(g, &layering, &alignment, spacing);
        if horizontal == Horizontal::Right {
            for x in &mut xs {
                *x = -*x;
            }
        }
        out.push(xs);
    }
    out
}

/// Index of the candidate set with the smallest overall width.
pub fn smallest_width(g: &LayoutGraph, candidates: &[Vec<f64>]) -> usize {
    let mut best = (f64::INFINITY, 0);
    for (i, xs) in candidates.iter().enumerate() {
        let (min, max) = extent(g, xs);
        let width = max - min;
        if width < best.0 {
            best = (width, i);
        }
    }
    best.1
}

fn extent(g: &LayoutGraph, xs: &[f64]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for (v, lv) in g.vertices() {
        let half = lv.size.width / 2.0;
        min = min.min(xs[v.index()] - half);
        max = max.max(xs[v.index()] + half);
    }
    (min, max)
}

/// Shifts left-biased candidates so their minimum matches the reference's, and right-biased
/// ones so their maximum does.
pub fn align_coordinates(candidates: &mut [Vec<f64>], reference: usize) {
    let min_of = |xs: &[f64]| xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max_of = |xs: &[f64]| xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (ref_min, ref_max) = (min_of(&candidates[reference]), max_of(&candidates[reference]));

    for (i, xs) in candidates.iter_mut().enumerate() {
        if i == reference || xs.is_empty() {
            continue;
        }
        let delta = match DIRECTIONS[i % DIRECTIONS.len()].1 {
            Horizontal::Left => ref_min - min_of(xs),
            Horizontal::Right => ref_max - max_of(xs),
        };
        if delta != 0.0 {
            for x in xs.iter_mut() {
                *x += delta;
            }
        }
    }
}

/// Mean of the two central candidates per vertex.
pub fn balance(candidates: &[Vec<f64>], n: usize) -> Vec<f64> {
    (0..n)
        .map(|v| {
            let mut xs: Vec<f64> = candidates.iter().map(|c| c[v]).collect();
            xs.sort_by(f64::total_cmp);
            match xs.len() {
                0 => 0.0,
                len if len % 2 == 1 => xs[len / 2],
                len => (xs[len / 2 - 1] + xs[len / 2]) / 2.0,
            }
        })
        .collect()
}

/// Final x per vertex, rounded to whole units.
pub fn position_x(g: &LayoutGraph, layers: &Layers, spacing: f64) -> Vec<f64> {
    let _span = tracing::debug_span!("bk").entered();
    let mut candidates = alignments(g, layers, spacing);
    let reference = smallest_width(g, &candidates);
    align_coordinates(&mut candidates, reference);
    balance(&candidates, g.vertex_count())
        .into_iter()
        .map(f64::round)
        .collect()
}
