//! Rebuilds caller edges as polylines from the positioned working graph.

use crate::geometry::Point;
use crate::layers::Layers;
use crate::layout_graph::LayoutGraph;
use crate::model::VertexId;
use narwhal_graphlib::EdgeKey;

/// One caller edge as drawn: its source point, the bend points, and its target point, in the
/// caller's direction.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticulatedEdge {
    pub key: EdgeKey,
    pub points: Vec<Point>,
    /// Whether the edge was reversed to break a cycle; its points still run source to target.
    pub reversed: bool,
}

impl ArticulatedEdge {
    pub fn bends(&self) -> &[Point] {
        match self.points.len() {
            0..=2 => &[],
            len => &self.points[1..len - 1],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArticulateOptions {
    pub post_straighten: bool,
    /// Step used when a straightened run has to dodge another one.
    pub spacing: f64,
}

struct Chain {
    origin: usize,
    reversed: bool,
    vertices: Vec<VertexId>,
    points: Vec<Point>,
}

/// Produces one polyline per caller edge, ordered by caller edge order. `self_loops` are the
/// origins of caller self-loops, drawn as two points on their vertex.
pub fn articulate(
    g: &LayoutGraph,
    layers: &Layers,
    self_loops: &[usize],
    options: ArticulateOptions,
) -> Vec<ArticulatedEdge> {
    let mut chains = collect_chains(g);
    if options.post_straighten {
        straighten(g, layers, &mut chains, options.spacing);
    }

    let mut out: Vec<(usize, ArticulatedEdge)> =
        Vec::with_capacity(chains.len() + self_loops.len());
    for chain in chains {
        let mut points = chain.points;
        if chain.reversed {
            points.reverse();
        }
        out.push((
            chain.origin,
            ArticulatedEdge {
                key: g.origin(chain.origin).clone(),
                points,
                reversed: chain.reversed,
            },
        ));
    }
    for &origin in self_loops {
        let key = g.origin(origin).clone();
        let p = g
            .lookup(&key.v)
            .map(|v| g.vertex(v).point)
            .unwrap_or_default();
        out.push((
            origin,
            ArticulatedEdge {
                key,
                points: vec![p, p],
                reversed: false,
            },
        ));
    }

    out.sort_by_key(|(origin, _)| *origin);
    out.into_iter().map(|(_, e)| e).collect()
}

/// Follows every edge leaving a real vertex through synthetic vertices down to the next real
/// vertex.
fn collect_chains(g: &LayoutGraph) -> Vec<Chain> {
    let mut chains = Vec::new();
    for (_, edge) in g.edges() {
        if g.is_synthetic(edge.source) {
            continue;
        }
        let mut vertices = vec![edge.source, edge.target];
        let mut cur = edge.target;
        while g.is_synthetic(cur) {
            let Some(next) = g.successors(cur).next() else {
                break;
            };
            vertices.push(next);
            cur = next;
        }
        let points = vertices.iter().map(|v| g.vertex(*v).point).collect();
        chains.push(Chain {
            origin: edge.origin,
            reversed: edge.reversed,
            vertices,
            points,
        });
    }
    chains
}

/// A vertical run of straightened bend points.
struct Run {
    x: f64,
    top: f64,
    bottom: f64,
}

/// Snaps the bend points of each chain to their mean x. A run that would land on another
/// run with an overlapping y range is offset in `spacing / 2` steps; a chain whose bends
/// cannot move without leaving the gap between their rank neighbors keeps its points.
fn straighten(g: &LayoutGraph, layers: &Layers, chains: &mut [Chain], spacing: f64) {
    let step = (spacing / 2.0).max(1.0);
    let mut placed: Vec<Run> = Vec::new();
    // Current x of every vertex, straightened bends included.
    let mut xs: Vec<f64> = g.vertices().map(|(_, lv)| lv.point.x).collect();

    for chain in chains.iter_mut() {
        let len = chain.vertices.len();
        if len < 3 {
            continue;
        }
        let interior = &chain.vertices[1..len - 1];
        let bends = &chain.points[1..len - 1];
        let mean = (bends.iter().map(|p| p.x).sum::<f64>() / bends.len() as f64).round();
        let top = bends.iter().map(|p| p.y).fold(f64::INFINITY, f64::min);
        let bottom = bends.iter().map(|p| p.y).fold(f64::NEG_INFINITY, f64::max);

        let candidates = (0..MAX_STRAIGHTEN_TRIES).map(|k| {
            let offset = step * k.div_ceil(2) as f64;
            if k % 2 == 1 {
                mean + offset
            } else {
                mean - offset
            }
        });
        let mut chosen: Option<f64> = None;
        for x in candidates {
            let collides = placed
                .iter()
                .any(|r| r.x == x && r.top <= bottom && top <= r.bottom);
            if !collides && interior.iter().all(|v| fits(g, layers, &xs, *v, x)) {
                chosen = Some(x);
                break;
            }
        }
        let Some(x) = chosen else {
            continue;
        };

        placed.push(Run { x, top, bottom });
        for v in &chain.vertices[1..len - 1] {
            xs[v.index()] = x;
        }
        for p in &mut chain.points[1..len - 1] {
            p.x = x;
        }
    }
}

const MAX_STRAIGHTEN_TRIES: usize = 8;

/// True when `v` can sit at `x` without touching its rank neighbors at their current `xs`.
fn fits(g: &LayoutGraph, layers: &Layers, xs: &[f64], v: VertexId, x: f64) -> bool {
    let rank = layers.rank(g.rank(v));
    let i = g.index(v);
    let half = g.vertex(v).size.width / 2.0;
    let clear_left = i == 0 || {
        let left = rank[i - 1];
        xs[left.index()] + g.vertex(left).size.width / 2.0 < x - half
    };
    let clear_right = i + 1 >= rank.len() || {
        let right = rank[i + 1];
        x + half < xs[right.index()] - g.vertex(right).size.width / 2.0
    };
    clear_left && clear_right
}
