//! Coffman–Graham layering with a bounded layer width.

use super::util::topological_order;
use crate::layout_graph::LayoutGraph;

/// Packs vertices into layers of at most `width` vertices. Isolated vertices are skipped and
/// left on rank 0.
pub fn coffman_graham(g: &LayoutGraph, width: usize) -> Vec<usize> {
    let n = g.vertex_count();
    let width = width.max(1);
    let active: Vec<bool> = g
        .vertex_ids()
        .map(|v| g.in_degree(v) + g.out_degree(v) > 0)
        .collect();

    let (succ, pred) = transitive_reduction(g);
    let label = lexicographic_labels(&pred, &succ, &active);

    // Bottom-up packing: the vertex with the highest label whose successors all sit in
    // finished layers goes into the current layer.
    let mut layer: Vec<Option<usize>> = vec![None; n];
    let mut remaining = active.iter().filter(|a| **a).count();
    let mut current = 0usize;
    let mut filled = 0usize;
    while remaining > 0 {
        let candidate = (0..n)
            .filter(|&v| active[v] && layer[v].is_none())
            .filter(|&v| {
                succ[v]
                    .iter()
                    .all(|&w| layer[w].is_some_and(|l| l < current))
            })
            .max_by_key(|&v| label[v]);

        match candidate {
            Some(v) if filled < width => {
                layer[v] = Some(current);
                filled += 1;
                remaining -= 1;
            }
            _ if filled == 0 => break,
            _ => {
                current += 1;
                filled = 0;
            }
        }
    }

    let top = current;
    (0..n)
        .map(|v| layer[v].map(|l| top - l).unwrap_or(0))
        .collect()
}

/// Distinct successor and predecessor lists with every edge implied by a longer path dropped.
fn transitive_reduction(g: &LayoutGraph) -> (Vec<Vec<usize>>, Vec<Vec<usize>>) {
    let n = g.vertex_count();
    let mut direct: Vec<Vec<usize>> = vec![Vec::new(); n];
    for v in g.vertex_ids() {
        for w in g.successors(v) {
            if !direct[v.index()].contains(&w.index()) {
                direct[v.index()].push(w.index());
            }
        }
    }

    // Descendant sets as bitsets, computed sinks-first.
    let words = n.div_ceil(64);
    let mut reach: Vec<Vec<u64>> = vec![Vec::new(); n];
    for v in topological_order(g).into_iter().rev() {
        let mut set = vec![0u64; words];
        for &w in &direct[v.index()] {
            set[w / 64] |= 1u64 << (w % 64);
            for (word, bits) in set.iter_mut().zip(&reach[w]) {
                *word |= bits;
            }
        }
        reach[v.index()] = set;
    }
    let reaches = |x: usize, w: usize| {
        reach[x]
            .get(w / 64)
            .is_some_and(|word| word & (1u64 << (w % 64)) != 0)
    };

    let mut succ: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut pred: Vec<Vec<usize>> = vec![Vec::new(); n];
    for v in 0..n {
        for &w in &direct[v] {
            let implied = direct[v].iter().any(|&x| x != w && reaches(x, w));
            if !implied {
                succ[v].push(w);
                pred[w].push(v);
            }
        }
    }
    (succ, pred)
}

/// Labels `1..` in order; each step picks, among vertices whose predecessors are all
/// labelled, the one whose decreasing list of predecessor labels is lexicographically
/// smallest. Ties go to the lowest vertex id.
fn lexicographic_labels(pred: &[Vec<usize>], succ: &[Vec<usize>], active: &[bool]) -> Vec<usize> {
    let n = pred.len();
    // A ready vertex's key never changes: all of its predecessors already carry labels.
    let key_of = |v: usize, label: &[usize]| {
        let mut key: Vec<usize> = pred[v].iter().map(|&u| label[u]).collect();
        key.sort_unstable_by(|a, b| b.cmp(a));
        (key, v)
    };

    let mut label = vec![0usize; n];
    let mut waiting: Vec<usize> = pred.iter().map(Vec::len).collect();
    let mut ready: Vec<(Vec<usize>, usize)> = (0..n)
        .filter(|&v| active[v] && waiting[v] == 0)
        .map(|v| key_of(v, &label))
        .collect();
    let mut next = 1;
    loop {
        let Some((i, _)) = ready.iter().enumerate().min_by(|a, b| a.1.cmp(b.1)) else {
            break;
        };
        let (_, v) = ready.swap_remove(i);
        label[v] = next;
        next += 1;
        for &w in &succ[v] {
            waiting[w] -= 1;
            if waiting[w] == 0 {
                ready.push(key_of(w, &label));
            }
        }
    }
    label
}
