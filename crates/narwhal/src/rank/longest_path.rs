use super::util::{component_ids, topological_order};
use crate::layout_graph::LayoutGraph;

/// Sinks sit on the bottom rank of their component; every other vertex sits exactly as far
/// above it as its longest path to a sink. Each component is then shifted so its top is 0.
pub fn longest_path(g: &LayoutGraph) -> Vec<usize> {
    let n = g.vertex_count();
    let mut height = vec![0usize; n];
    for v in topological_order(g).into_iter().rev() {
        height[v.index()] = g
            .successors(v)
            .map(|w| height[w.index()] + 1)
            .max()
            .unwrap_or(0);
    }

    let (comp, count) = component_ids(g);
    let mut top = vec![0usize; count];
    for v in 0..n {
        top[comp[v]] = top[comp[v]].max(height[v]);
    }
    (0..n).map(|v| top[comp[v]] - height[v]).collect()
}
