//! The ordered array of ranks threaded through the pipeline.

use crate::layout_graph::LayoutGraph;
use crate::model::VertexId;
use crate::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layers {
    ranks: Vec<Vec<VertexId>>,
}

impl Layers {
    pub fn from_ranks(ranks: Vec<Vec<VertexId>>) -> Self {
        Self { ranks }
    }

    pub fn len(&self) -> usize {
        self.ranks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranks.is_empty()
    }

    pub fn rank(&self, r: usize) -> &[VertexId] {
        self.ranks.get(r).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn rank_mut(&mut self, r: usize) -> &mut Vec<VertexId> {
        if r >= self.ranks.len() {
            self.ranks.resize_with(r + 1, Vec::new);
        }
        &mut self.ranks[r]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[VertexId]> {
        self.ranks.iter().map(Vec::as_slice)
    }

    pub fn vertex_count(&self) -> usize {
        self.ranks.iter().map(Vec::len).sum()
    }

    pub fn into_inner(self) -> Vec<Vec<VertexId>> {
        self.ranks
    }

    /// Writes each vertex's rank and slot back into the graph.
    pub fn reindex(&self, g: &mut LayoutGraph) {
        for (r, rank) in self.ranks.iter().enumerate() {
            for (i, v) in rank.iter().enumerate() {
                let lv = g.vertex_mut(*v);
                lv.rank = r;
                lv.index = i;
            }
        }
    }

    /// Verifies that every vertex occupies exactly one slot, that recorded rank and index
    /// agree with that slot, and that no rank is empty.
    pub fn check(&self, g: &LayoutGraph) -> Result<()> {
        let mut seen = vec![false; g.vertex_count()];
        for (r, rank) in self.ranks.iter().enumerate() {
            if rank.is_empty() {
                return Err(Error::EmptyRank { rank: r });
            }
            for (i, &v) in rank.iter().enumerate() {
                if std::mem::replace(&mut seen[v.index()], true) {
                    return Err(Error::DuplicateVertex { vertex: v });
                }
                let lv = g.vertex(v);
                if lv.rank != r {
                    return Err(Error::RankMismatch {
                        vertex: v,
                        stored: r,
                        recorded: lv.rank,
                    });
                }
                if lv.index != i {
                    return Err(Error::IndexMismatch {
                        vertex: v,
                        rank: r,
                        recorded: lv.index,
                        actual: i,
                    });
                }
            }
        }
        if let Some(ix) = seen.iter().position(|s| !*s) {
            return Err(Error::MissingVertex {
                vertex: VertexId(ix),
            });
        }
        Ok(())
    }
}

/// Initial ordering: a depth-first walk from vertices sorted by rank, appending each vertex
/// to its rank the first time it is reached. Vertices with shared ancestry end up close
/// together, which gives the sweeps a better starting point than creation order.
pub fn init_order(g: &LayoutGraph) -> Layers {
    let mut ranks: Vec<Vec<VertexId>> = vec![Vec::new(); g.rank_count()];
    let mut visited = vec![false; g.vertex_count()];

    let mut start: Vec<VertexId> = g.vertex_ids().collect();
    start.sort_by_key(|v| (g.rank(*v), *v));

    let mut stack: Vec<VertexId> = Vec::new();
    for root in start {
        stack.push(root);
        while let Some(v) = stack.pop() {
            if std::mem::replace(&mut visited[v.index()], true) {
                continue;
            }
            ranks[g.rank(v)].push(v);
            let succ: Vec<VertexId> = g.successors(v).collect();
            for w in succ.into_iter().rev() {
                if !visited[w.index()] {
                    stack.push(w);
                }
            }
        }
    }

    Layers { ranks }
}
