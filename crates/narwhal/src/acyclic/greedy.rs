//! Greedy feedback arc set (Eades, Lin & Smyth).
//!
//! Vertices are kept in buckets keyed by `out - in`. Sinks and sources are stripped first;
//! when neither is left, the vertex with the largest `out - in` is removed and its incoming
//! edges from still-live vertices join the feedback set.

use crate::layout_graph::LayoutGraph;
use crate::model::{EdgeId, VertexId};
use rustc_hash::FxHashMap as HashMap;
use std::collections::VecDeque;

pub fn greedy_fas(g: &LayoutGraph) -> Vec<EdgeId> {
    let n = g.vertex_count();
    if n <= 1 {
        return Vec::new();
    }

    // Aggregate parallel edges into a simple graph with summed weights, keeping the order of
    // first occurrence.
    let mut weight: HashMap<(usize, usize), i64> = HashMap::default();
    let mut pairs: Vec<(usize, usize)> = Vec::new();
    let mut in_w: Vec<i64> = vec![0; n];
    let mut out_w: Vec<i64> = vec![0; n];
    for (_, e) in g.edges() {
        let key = (e.source.index(), e.target.index());
        let w = weight.entry(key).or_insert(0);
        if *w == 0 {
            pairs.push(key);
        }
        *w += 1;
        out_w[key.0] += 1;
        in_w[key.1] += 1;
    }
    let max_out = out_w.iter().copied().max().unwrap_or(0);
    let max_in = in_w.iter().copied().max().unwrap_or(0);

    let mut out_adj: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
    let mut in_adj: Vec<Vec<(usize, i64)>> = vec![Vec::new(); n];
    for &(u, w) in &pairs {
        let wgt = weight.get(&(u, w)).copied().unwrap_or(0);
        out_adj[u].push((w, wgt));
        in_adj[w].push((u, wgt));
    }

    let mut work = Work {
        buckets: vec![VecDeque::new(); (max_out + max_in + 3) as usize],
        bucket_of: vec![usize::MAX; n],
        alive: vec![true; n],
        zero_idx: max_in + 1,
        in_w,
        out_w,
        in_adj: &in_adj,
        out_adj: &out_adj,
    };
    for v in 0..n {
        work.assign_bucket(v);
    }

    let mut remaining = n;
    let mut picked_pairs: Vec<(usize, usize)> = Vec::new();
    let last = work.buckets.len() - 1;
    while remaining > 0 {
        while let Some(v) = work.pop_bucket(0) {
            work.remove(v, None);
            remaining -= 1;
        }
        while let Some(v) = work.pop_bucket(last) {
            work.remove(v, None);
            remaining -= 1;
        }
        if remaining == 0 {
            break;
        }

        let picked = (1..last).rev().find_map(|i| work.pop_bucket(i));
        let Some(v) = picked else {
            break;
        };
        work.remove(v, Some(&mut picked_pairs));
        remaining -= 1;
    }

    let mut out: Vec<EdgeId> = Vec::new();
    for (u, w) in picked_pairs {
        let u = VertexId(u);
        out.extend(
            g.out_edges(u)
                .iter()
                .copied()
                .filter(|e| g.edge(*e).is_some_and(|edge| edge.target.index() == w)),
        );
    }
    out
}

struct Work<'a> {
    buckets: Vec<VecDeque<usize>>,
    bucket_of: Vec<usize>,
    alive: Vec<bool>,
    zero_idx: i64,
    in_w: Vec<i64>,
    out_w: Vec<i64>,
    in_adj: &'a [Vec<(usize, i64)>],
    out_adj: &'a [Vec<(usize, i64)>],
}

impl Work<'_> {
    /// Pops the oldest live entry; stale entries are skipped.
    fn pop_bucket(&mut self, idx: usize) -> Option<usize> {
        while let Some(v) = self.buckets[idx].pop_back() {
            if self.alive[v] && self.bucket_of[v] == idx {
                self.bucket_of[v] = usize::MAX;
                return Some(v);
            }
        }
        None
    }

    fn assign_bucket(&mut self, v: usize) {
        let last = self.buckets.len() - 1;
        let idx = if self.out_w[v] == 0 {
            0
        } else if self.in_w[v] == 0 {
            last
        } else {
            (self.out_w[v] - self.in_w[v] + self.zero_idx).clamp(1, last as i64 - 1) as usize
        };
        self.buckets[idx].push_front(v);
        self.bucket_of[v] = idx;
    }

    fn remove(&mut self, v: usize, mut collect: Option<&mut Vec<(usize, usize)>>) {
        self.alive[v] = false;
        let (in_adj, out_adj) = (self.in_adj, self.out_adj);
        for &(u, wgt) in &in_adj[v] {
            if !self.alive[u] {
                continue;
            }
            if let Some(pairs) = collect.as_deref_mut() {
                pairs.push((u, v));
            }
            self.out_w[u] -= wgt;
            self.assign_bucket(u);
        }
        for &(w, wgt) in &out_adj[v] {
            if !self.alive[w] {
                continue;
            }
            self.in_w[w] -= wgt;
            self.assign_bucket(w);
        }
    }
}
