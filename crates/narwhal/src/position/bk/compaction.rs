use super::alignment::Alignment;
use crate::layout_graph::LayoutGraph;
use crate::model::VertexId;
use std::collections::VecDeque;

/// Places every block as far left as its left neighbors allow.
///
/// Blocks chained through left neighbors form a class sharing one `sink`; within a class
/// blocks are packed against each other. Between classes only the required gap is recorded,
/// and the class shifts are resolved afterwards from the rightmost classes inwards, so a
/// class sitting left of a shifted class moves along with it.
pub fn horizontal_compaction(
    g: &LayoutGraph,
    layering: &[Vec<VertexId>],
    alignment: &Alignment,
    spacing: f64,
) -> Vec<f64> {
    let n = g.vertex_count();
    let mut left_of: Vec<Option<VertexId>> = vec![None; n];
    for layer in layering {
        for pair in layer.windows(2) {
            left_of[pair[1].index()] = Some(pair[0]);
        }
    }

    let mut state = Compaction {
        g,
        alignment,
        left_of,
        spacing,
        sink: (0..n).map(VertexId).collect(),
        gaps: Vec::new(),
        x: vec![None; n],
    };

    for layer in layering {
        for &v in layer {
            if alignment.root[v.index()] == v {
                state.place_block(v);
            }
        }
    }

    let shift = resolve_shifts(n, &state.gaps);
    let mut xs = vec![0.0; n];
    for layer in layering {
        for &v in layer {
            let root = alignment.root[v.index()];
            let x = state.x[root.index()].unwrap_or(0.0);
            xs[v.index()] = x + shift[state.sink[root.index()].index()];
        }
    }
    xs
}

/// A separation requirement between two classes: `shift[left] <= shift[right] + gap`.
#[derive(Debug, Clone, Copy)]
struct ClassGap {
    left: usize,
    right: usize,
    gap: f64,
}

/// Shift per class sink. Classes with no class to their right stay put; every other class
/// takes the tightest of its requirements once all classes it depends on are final.
fn resolve_shifts(n: usize, gaps: &[ClassGap]) -> Vec<f64> {
    let mut pending = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, gap) in gaps.iter().enumerate() {
        pending[gap.left] += 1;
        dependents[gap.right].push(i);
    }

    let mut shift = vec![f64::INFINITY; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|c| pending[*c] == 0).collect();
    while let Some(c) = queue.pop_front() {
        let settled = if shift[c].is_finite() { shift[c] } else { 0.0 };
        shift[c] = settled;
        for &i in &dependents[c] {
            let ClassGap { left, gap, .. } = gaps[i];
            shift[left] = shift[left].min(settled + gap);
            pending[left] -= 1;
            if pending[left] == 0 {
                queue.push_back(left);
            }
        }
    }

    for s in &mut shift {
        if !s.is_finite() {
            *s = 0.0;
        }
    }
    shift
}

struct Compaction<'a> {
    g: &'a LayoutGraph,
    alignment: &'a Alignment,
    left_of: Vec<Option<VertexId>>,
    spacing: f64,
    sink: Vec<VertexId>,
    gaps: Vec<ClassGap>,
    x: Vec<Option<f64>>,
}

/// A block being placed, positioned at block member `w`.
struct Frame {
    root: VertexId,
    w: VertexId,
    waiting_on: Option<VertexId>,
}

impl Compaction<'_> {
    /// Minimum center distance between horizontally adjacent `left` and `right`.
    fn delta(&self, left: VertexId, right: VertexId) -> f64 {
        (self.g.vertex(left).size.width + self.g.vertex(right).size.width) / 2.0 + self.spacing
    }

    /// Iterative form of the recursive block placement: a frame waits on the block to the
    /// left of its current member until that block has been placed.
    fn place_block(&mut self, v: VertexId) {
        if self.x[v.index()].is_some() {
            return;
        }
        self.x[v.index()] = Some(0.0);
        let mut stack = vec![Frame {
            root: v,
            w: v,
            waiting_on: None,
        }];

        while let Some(frame) = stack.last_mut() {
            let (root, w) = (frame.root, frame.w);
            let ready = match frame.waiting_on.take() {
                Some(u) => Some(u),
                None => match self.left_of[w.index()] {
                    Some(left) => {
                        let u = self.alignment.root[left.index()];
                        if self.x[u.index()].is_none() {
                            self.x[u.index()] = Some(0.0);
                            frame.waiting_on = Some(u);
                            stack.push(Frame {
                                root: u,
                                w: u,
                                waiting_on: None,
                            });
                            continue;
                        }
                        Some(u)
                    }
                    None => None,
                },
            };

            if let (Some(u), Some(left)) = (ready, self.left_of[w.index()]) {
                self.settle(root, u, self.delta(left, w));
            }

            let next = self.alignment.align[w.index()];
            if next == root {
                stack.pop();
            } else if let Some(frame) = stack.last_mut() {
                frame.w = next;
            }
        }
    }

    fn settle(&mut self, v: VertexId, u: VertexId, delta: f64) {
        if self.sink[v.index()] == v {
            self.sink[v.index()] = self.sink[u.index()];
        }
        let xv = self.x[v.index()].unwrap_or(0.0);
        let xu = self.x[u.index()].unwrap_or(0.0);
        let (sv, su) = (self.sink[v.index()], self.sink[u.index()]);
        if sv != su {
            self.gaps.push(ClassGap {
                left: su.index(),
                right: sv.index(),
                gap: xv - xu - delta,
            });
        } else {
            self.x[v.index()] = Some(xv.max(xu + delta));
        }
    }
}
