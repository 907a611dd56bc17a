use super::conflicts::Conflicts;
use super::union_find::UnionFind;
use crate::layout_graph::LayoutGraph;
use crate::model::VertexId;

/// Blocks of vertically aligned vertices. `root` maps every vertex to its block root and
/// `align` links each block into a cycle, top to bottom in sweep order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    pub root: Vec<VertexId>,
    pub align: Vec<VertexId>,
}

/// Aligns each vertex with the median of its neighbors in the previous layer of `layering`
/// (predecessors when `down`, successors otherwise). A vertex only joins a neighbor to the
/// right of the last one aligned in its layer, and never across a marked edge.
pub fn vertical_alignment(
    g: &LayoutGraph,
    layering: &[Vec<VertexId>],
    pos: &[usize],
    conflicts: &Conflicts,
    down: bool,
) -> Alignment {
    let n = g.vertex_count();
    let mut blocks = UnionFind::new(n);
    let mut align: Vec<VertexId> = (0..n).map(VertexId).collect();

    for layer in layering {
        let mut last: Option<usize> = None;
        for &v in layer {
            let mut neighbors: Vec<VertexId> = if down {
                g.predecessors(v).collect()
            } else {
                g.successors(v).collect()
            };
            neighbors.sort_by_key(|u| (pos[u.index()], *u));
            neighbors.dedup();
            if neighbors.is_empty() {
                continue;
            }

            let d = neighbors.len();
            for &u in &neighbors[(d - 1) / 2..=d / 2] {
                if align[v.index()] != v {
                    break;
                }
                let u_pos = pos[u.index()];
                if last.is_none_or(|l| l < u_pos) && !conflicts.contains(u, v) {
                    align[u.index()] = v;
                    blocks.attach(v, u);
                    align[v.index()] = blocks.find(v);
                    last = Some(u_pos);
                }
            }
        }
    }

    let root = (0..n).map(|v| blocks.find(VertexId(v))).collect();
    Alignment { root, align }
}
