use crate::layout_graph::LayoutGraph;
use crate::model::VertexId;
use std::collections::VecDeque;

/// Weakly connected component id per vertex (numbered in order of lowest vertex id), plus
/// the number of components.
pub fn component_ids(g: &LayoutGraph) -> (Vec<usize>, usize) {
    let n = g.vertex_count();
    let mut comp = vec![usize::MAX; n];
    let mut count = 0;
    let mut queue: VecDeque<VertexId> = VecDeque::new();
    for start in g.vertex_ids() {
        if comp[start.index()] != usize::MAX {
            continue;
        }
        comp[start.index()] = count;
        queue.push_back(start);
        while let Some(v) = queue.pop_front() {
            for w in g.successors(v).chain(g.predecessors(v)) {
                if comp[w.index()] == usize::MAX {
                    comp[w.index()] = count;
                    queue.push_back(w);
                }
            }
        }
        count += 1;
    }
    (comp, count)
}

/// Kahn order over the working graph; ties go to the lowest vertex id.
pub fn topological_order(g: &LayoutGraph) -> Vec<VertexId> {
    let mut indegree: Vec<usize> = g.vertex_ids().map(|v| g.in_degree(v)).collect();
    let mut queue: VecDeque<VertexId> = g
        .vertex_ids()
        .filter(|v| indegree[v.index()] == 0)
        .collect();
    let mut out = Vec::with_capacity(g.vertex_count());
    while let Some(v) = queue.pop_front() {
        out.push(v);
        for w in g.successors(v) {
            indegree[w.index()] -= 1;
            if indegree[w.index()] == 0 {
                queue.push_back(w);
            }
        }
    }
    out
}

/// Renumbers ranks to `0..k` keeping their relative order, and returns `k`.
pub fn compact(ranks: &mut [usize]) -> usize {
    let mut used: Vec<usize> = ranks.to_vec();
    used.sort_unstable();
    used.dedup();
    for r in ranks.iter_mut() {
        *r = used.binary_search(r).unwrap_or(0);
    }
    used.len()
}

/// Moves every vertex with exactly one incident edge next to its neighbor: a leaf source
/// directly above its successor, a leaf sink directly below its predecessor.
pub fn tighten_leaves(g: &LayoutGraph, ranks: &mut [usize]) {
    for v in g.vertex_ids() {
        match (g.in_degree(v), g.out_degree(v)) {
            (0, 1) => {
                if let Some(w) = g.successors(v).next() {
                    ranks[v.index()] = ranks[w.index()].saturating_sub(1);
                }
            }
            (1, 0) => {
                if let Some(u) = g.predecessors(v).next() {
                    ranks[v.index()] = ranks[u.index()] + 1;
                }
            }
            _ => {}
        }
    }
}

/// `rank(target) - rank(source) - 1`.
pub fn slack(ranks: &[i64], source: usize, target: usize) -> i64 {
    ranks[target] - ranks[source] - 1
}
