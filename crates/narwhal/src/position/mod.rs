//! Coordinate assignment.
//!
//! y is stacked per rank: every rank is as tall as its tallest vertex, with
//! `vertical_offset` between ranks. x comes from Brandes–Köpf, or from plain per-rank
//! centering when edge straightening is off.

pub mod bk;

use crate::config::LayoutConfig;
use crate::geometry::{Bounds, Point, Size};
use crate::layers::Layers;
use crate::layout_graph::LayoutGraph;
use crate::model::{EdgeKind, VertexId};
use narwhal_graphlib::EdgeKey;

pub type FavoredFn<'a> = dyn Fn(&EdgeKey) -> bool + 'a;

/// Writes every vertex's center point and returns the drawing's extent, margin included.
pub fn assign_coordinates(
    g: &mut LayoutGraph,
    layers: &Layers,
    config: &LayoutConfig,
    favored: Option<&FavoredFn<'_>>,
) -> Size {
    let straighten = config.straighten_edges;
    let _span = tracing::debug_span!("position", straighten).entered();

    let ys = rank_centers(g, layers, config.vertical_offset);
    let mut xs = if straighten {
        bk::position_x(g, layers, config.horizontal_offset)
    } else {
        center_ranks(g, layers, config.horizontal_offset)
    };
    if let Some(favored) = favored {
        nudge_favored(g, layers, &mut xs, config.horizontal_offset, favored);
    }

    let mut bounds = Bounds::EMPTY;
    for (v, lv) in g.vertices() {
        let p = Point::new(xs[v.index()], ys[lv.rank]);
        bounds.include_box(p, lv.size);
    }
    if bounds.is_empty() {
        return Size::new(2.0 * config.margin, 2.0 * config.margin);
    }

    let (dx, dy) = (config.margin - bounds.min_x, config.margin - bounds.min_y);
    for v in g.vertex_ids().collect::<Vec<_>>() {
        let y = ys[g.rank(v)];
        g.vertex_mut(v).point = Point::new((xs[v.index()] + dx).round(), (y + dy).round());
    }

    let size = Size::new(
        (bounds.width() + 2.0 * config.margin).round(),
        (bounds.height() + 2.0 * config.margin).round(),
    );
    tracing::debug!(
        width = size.width,
        height = size.height,
        "assigned coordinates"
    );
    size
}

/// Center y of each rank, with rank 0 starting at 0.
pub fn rank_centers(g: &LayoutGraph, layers: &Layers, vertical_offset: f64) -> Vec<f64> {
    let mut ys = Vec::with_capacity(layers.len());
    let mut top = 0.0;
    for rank in layers.iter() {
        let height = rank
            .iter()
            .map(|v| g.vertex(*v).size.height)
            .fold(0.0, f64::max);
        ys.push(top + height / 2.0);
        top += height + vertical_offset;
    }
    ys
}

/// Packs each rank left to right and centers it under the widest rank.
pub fn center_ranks(g: &LayoutGraph, layers: &Layers, spacing: f64) -> Vec<f64> {
    let width_of = |rank: &[VertexId]| {
        let widths: f64 = rank.iter().map(|v| g.vertex(*v).size.width).sum();
        widths + spacing * rank.len().saturating_sub(1) as f64
    };
    let widest = layers.iter().map(width_of).fold(0.0, f64::max);

    let mut xs = vec![0.0; g.vertex_count()];
    for rank in layers.iter() {
        let mut left = (widest - width_of(rank)) / 2.0;
        for &v in rank {
            let w = g.vertex(v).size.width;
            xs[v.index()] = (left + w / 2.0).round();
            left += w + spacing;
        }
    }
    xs
}

/// Moves the caller target of each favored single-rank edge directly under (or over) its
/// caller source, unless that would crowd a rank neighbor.
fn nudge_favored(
    g: &LayoutGraph,
    layers: &Layers,
    xs: &mut [f64],
    spacing: f64,
    favored: &FavoredFn<'_>,
) {
    for (_, edge) in g.edges() {
        if edge.kind != EdgeKind::Real || !favored(g.origin(edge.origin)) {
            continue;
        }
        let (anchor, moved) = if edge.reversed {
            (edge.target, edge.source)
        } else {
            (edge.source, edge.target)
        };
        let x = xs[anchor.index()];
        let rank = layers.rank(g.rank(moved));
        let i = g.index(moved);
        let half = g.vertex(moved).size.width / 2.0;

        let fits_left = i == 0 || {
            let left = rank[i - 1];
            xs[left.index()] + g.vertex(left).size.width / 2.0 + spacing <= x - half
        };
        let fits_right = i + 1 >= rank.len() || {
            let right = rank[i + 1];
            x + half + spacing <= xs[right.index()] - g.vertex(right).size.width / 2.0
        };
        if fits_left && fits_right {
            xs[moved.index()] = x;
        }
    }
}
