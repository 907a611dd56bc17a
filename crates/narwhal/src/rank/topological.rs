use super::util::topological_order;
use crate::layout_graph::LayoutGraph;

/// Sources on rank 0; every other vertex one below its lowest predecessor.
pub fn top_down(g: &LayoutGraph) -> Vec<usize> {
    let mut ranks = vec![0usize; g.vertex_count()];
    for v in topological_order(g) {
        ranks[v.index()] = g
            .predecessors(v)
            .map(|u| ranks[u.index()] + 1)
            .max()
            .unwrap_or(0);
    }
    ranks
}
