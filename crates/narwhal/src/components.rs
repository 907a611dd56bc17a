//! Laid-out components and side-by-side packing.

use crate::articulate::ArticulatedEdge;
use crate::geometry::{Point, Size};
use narwhal_graphlib::EdgeKey;

/// The finished layout of one group of caller vertices, with its top-left corner at the
/// origin.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComponentLayout {
    pub vertices: Vec<(String, Point)>,
    pub edges: Vec<ArticulatedEdge>,
    pub size: Size,
    pub crossings: usize,
    pub feedback_edges: Vec<EdgeKey>,
}

impl ComponentLayout {
    pub fn translate(&mut self, dx: f64, dy: f64) {
        for (_, p) in &mut self.vertices {
            *p = p.translate(dx, dy);
        }
        for e in &mut self.edges {
            for p in &mut e.points {
                *p = p.translate(dx, dy);
            }
        }
    }
}

/// Places the parts left to right, top-aligned, `gap` apart, inside a `margin` border.
pub fn pack(parts: Vec<ComponentLayout>, gap: f64, margin: f64) -> ComponentLayout {
    let mut out = ComponentLayout::default();
    let mut x = margin;
    let mut height: f64 = 0.0;
    let count = parts.len();
    for (i, mut part) in parts.into_iter().enumerate() {
        part.translate(x, margin);
        x += part.size.width;
        if i + 1 < count {
            x += gap;
        }
        height = height.max(part.size.height);
        out.vertices.extend(part.vertices);
        out.edges.extend(part.edges);
        out.crossings += part.crossings;
        out.feedback_edges.extend(part.feedback_edges);
    }
    out.size = Size::new(x + margin, height + 2.0 * margin);
    out
}
