//! Network simplex ranking (Gansner et al.), minimizing the weighted sum of edge lengths.
//!
//! Each connected component is solved on its own simple graph, where parallel edges are
//! merged into one edge whose weight is their count. The pivot rules follow the classic
//! formulation: a tree edge with negative cut value leaves, and the non-tree edge with least
//! slack that reconnects the two halves enters.

use super::util::{component_ids, slack};
use crate::layout_graph::LayoutGraph;
use rustc_hash::FxHashMap as HashMap;

pub fn network_simplex(g: &LayoutGraph) -> Vec<usize> {
    let n = g.vertex_count();
    let (comp, count) = component_ids(g);
    let mut members: Vec<Vec<usize>> = vec![Vec::new(); count];
    for v in 0..n {
        members[comp[v]].push(v);
    }

    let mut out = vec![0usize; n];
    for (c, vs) in members.iter().enumerate() {
        if vs.len() == 1 {
            continue;
        }
        let local: HashMap<usize, usize> = vs.iter().enumerate().map(|(i, v)| (*v, i)).collect();
        let mut edge_ix: HashMap<(usize, usize), usize> = HashMap::default();
        let mut edges: Vec<SimplexEdge> = Vec::new();
        for (_, e) in g.edges() {
            if comp[e.source.index()] != c {
                continue;
            }
            let (Some(&u), Some(&w)) = (
                local.get(&e.source.index()),
                local.get(&e.target.index()),
            ) else {
                continue;
            };
            match edge_ix.get(&(u, w)) {
                Some(&ix) => edges[ix].weight += 1,
                None => {
                    edge_ix.insert((u, w), edges.len());
                    edges.push(SimplexEdge {
                        source: u,
                        target: w,
                        weight: 1,
                    });
                }
            }
        }

        let ranks = Simplex::new(vs.len(), edges).solve();
        for (i, v) in vs.iter().enumerate() {
            out[*v] = ranks[i];
        }
    }

    tracing::trace!(components = count, "network simplex finished");
    out
}

#[derive(Debug, Clone, Copy)]
struct SimplexEdge {
    source: usize,
    target: usize,
    weight: i64,
}

struct Simplex {
    n: usize,
    edges: Vec<SimplexEdge>,
    /// Incident edge indices per vertex.
    incident: Vec<Vec<usize>>,
    rank: Vec<i64>,
    in_tree: Vec<bool>,
    tree_edge: Vec<bool>,
    /// Tree edge linking a vertex to its parent.
    parent_edge: Vec<Option<usize>>,
    parent: Vec<Option<usize>>,
    low: Vec<usize>,
    lim: Vec<usize>,
    /// Cut value of the tree edge between a vertex and its parent.
    cut: Vec<i64>,
}

impl Simplex {
    fn new(n: usize, edges: Vec<SimplexEdge>) -> Self {
        let mut incident: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (ix, e) in edges.iter().enumerate() {
            incident[e.source].push(ix);
            incident[e.target].push(ix);
        }
        let m = edges.len();
        Self {
            n,
            edges,
            incident,
            rank: vec![0; n],
            in_tree: vec![false; n],
            tree_edge: vec![false; m],
            parent_edge: vec![None; n],
            parent: vec![None; n],
            low: vec![0; n],
            lim: vec![0; n],
            cut: vec![0; n],
        }
    }

    fn solve(mut self) -> Vec<usize> {
        self.init_rank();
        self.feasible_tree();
        self.init_low_lim();
        self.init_cut_values();

        let limit = self.edges.len().saturating_mul(self.n).max(64);
        let mut pivots = 0usize;
        while let Some(leaving) = self.leave_edge() {
            if pivots == limit {
                tracing::debug!(pivots, "network simplex pivot limit reached");
                break;
            }
            let Some(entering) = self.enter_edge(leaving) else {
                break;
            };
            self.exchange(leaving, entering);
            pivots += 1;
        }

        let min = self.rank.iter().copied().min().unwrap_or(0);
        self.rank.iter().map(|r| (r - min) as usize).collect()
    }

    /// Longest-path initialization: sinks at 0, everything else as high as its successors
    /// force it.
    fn init_rank(&mut self) {
        let mut out_left: Vec<usize> = vec![0; self.n];
        for e in &self.edges {
            out_left[e.source] += 1;
        }
        let mut stack: Vec<usize> = (0..self.n).filter(|v| out_left[*v] == 0).collect();
        let mut done = vec![false; self.n];
        while let Some(v) = stack.pop() {
            done[v] = true;
            let mut r: Option<i64> = None;
            for &ix in &self.incident[v] {
                let e = self.edges[ix];
                if e.source == v {
                    let candidate = self.rank[e.target] - 1;
                    r = Some(r.map_or(candidate, |r| r.min(candidate)));
                }
            }
            self.rank[v] = r.unwrap_or(0);
            for &ix in &self.incident[v] {
                let e = self.edges[ix];
                if e.target == v {
                    out_left[e.source] -= 1;
                    if out_left[e.source] == 0 && !done[e.source] {
                        stack.push(e.source);
                    }
                }
            }
        }
    }

    fn edge_slack(&self, ix: usize) -> i64 {
        let e = self.edges[ix];
        slack(&self.rank, e.source, e.target)
    }

    /// Grows a spanning tree of tight edges from vertex 0, shifting the tree's ranks towards
    /// the least-slack boundary edge whenever no tight edge leaves it.
    fn feasible_tree(&mut self) {
        self.in_tree[0] = true;
        let mut size = self.tight_tree();
        while size < self.n {
            let mut best: Option<(i64, usize)> = None;
            for ix in 0..self.edges.len() {
                let e = self.edges[ix];
                if self.in_tree[e.source] == self.in_tree[e.target] {
                    continue;
                }
                let s = self.edge_slack(ix);
                if best.is_none_or(|(b, _)| s < b) {
                    best = Some((s, ix));
                }
            }
            let Some((s, ix)) = best else {
                break;
            };
            let delta = if self.in_tree[self.edges[ix].source] {
                s
            } else {
                -s
            };
            for v in 0..self.n {
                if self.in_tree[v] {
                    self.rank[v] += delta;
                }
            }
            size = self.tight_tree();
        }
    }

    fn tight_tree(&mut self) -> usize {
        let mut stack: Vec<usize> = (0..self.n).filter(|v| self.in_tree[*v]).collect();
        while let Some(v) = stack.pop() {
            for i in 0..self.incident[v].len() {
                let ix = self.incident[v][i];
                let e = self.edges[ix];
                let other = if e.source == v { e.target } else { e.source };
                if !self.in_tree[other] && self.edge_slack(ix) == 0 {
                    self.in_tree[other] = true;
                    self.tree_edge[ix] = true;
                    stack.push(other);
                }
            }
        }
        self.in_tree.iter().filter(|t| **t).count()
    }

    /// Postorder numbering from vertex 0: `lim` is the vertex's own number and `low` the
    /// smallest number in its subtree.
    fn init_low_lim(&mut self) {
        self.parent.fill(None);
        self.parent_edge.fill(None);
        let mut next = 1usize;
        let mut visited = vec![false; self.n];
        // (vertex, next incident slot, low so far)
        let mut stack: Vec<(usize, usize, usize)> = vec![(0, 0, next)];
        visited[0] = true;
        while let Some(frame) = stack.last_mut() {
            let (v, slot, low) = *frame;
            if slot < self.incident[v].len() {
                frame.1 += 1;
                let ix = self.incident[v][slot];
                if !self.tree_edge[ix] {
                    continue;
                }
                let e = self.edges[ix];
                let w = if e.source == v { e.target } else { e.source };
                if visited[w] {
                    continue;
                }
                visited[w] = true;
                self.parent[w] = Some(v);
                self.parent_edge[w] = Some(ix);
                stack.push((w, 0, next));
                continue;
            }
            stack.pop();
            self.low[v] = low;
            self.lim[v] = next;
            next += 1;
        }
    }

    fn postorder(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.n).collect();
        order.sort_by_key(|v| self.lim[*v]);
        order
    }

    fn init_cut_values(&mut self) {
        for v in self.postorder() {
            if self.parent[v].is_some() {
                self.cut[v] = self.calc_cut_value(v);
            }
        }
    }

    fn calc_cut_value(&self, child: usize) -> i64 {
        let (Some(parent), Some(pe)) = (self.parent[child], self.parent_edge[child]) else {
            return 0;
        };
        let child_is_tail = self.edges[pe].source == child;
        let mut cut = self.edges[pe].weight;
        for &ix in &self.incident[child] {
            let e = self.edges[ix];
            let is_out = e.source == child;
            let other = if is_out { e.target } else { e.source };
            if other == parent {
                continue;
            }
            let points_to_head = is_out == child_is_tail;
            cut += if points_to_head { e.weight } else { -e.weight };
            if self.tree_edge[ix] {
                let other_cut = self.cut[other];
                cut += if points_to_head { -other_cut } else { other_cut };
            }
        }
        cut
    }

    /// A tree edge (identified by its child vertex) with negative cut value.
    fn leave_edge(&self) -> Option<usize> {
        (0..self.n).find(|&v| self.parent[v].is_some() && self.cut[v] < 0)
    }

    fn is_descendant(&self, v: usize, root: usize) -> bool {
        self.low[root] <= self.lim[v] && self.lim[v] <= self.lim[root]
    }

    fn enter_edge(&self, child: usize) -> Option<usize> {
        let pe = self.parent_edge[child]?;
        let e = self.edges[pe];
        // The tail component is the subtree hanging below the leaving edge.
        let (tail, flip) = if self.lim[e.source] > self.lim[e.target] {
            (e.target, true)
        } else {
            (e.source, false)
        };
        let mut best: Option<(i64, usize)> = None;
        for ix in 0..self.edges.len() {
            let f = self.edges[ix];
            if flip == self.is_descendant(f.source, tail)
                && flip != self.is_descendant(f.target, tail)
            {
                let s = self.edge_slack(ix);
                if best.is_none_or(|(b, _)| s < b) {
                    best = Some((s, ix));
                }
            }
        }
        best.map(|(_, ix)| ix)
    }

    fn exchange(&mut self, child: usize, entering: usize) {
        if let Some(leaving) = self.parent_edge[child] {
            self.tree_edge[leaving] = false;
        }
        self.tree_edge[entering] = true;
        self.init_low_lim();
        self.init_cut_values();
        self.update_ranks();
    }

    /// Re-derives ranks from the tree, parents first.
    fn update_ranks(&mut self) {
        let mut order: Vec<usize> = (0..self.n).collect();
        order.sort_by_key(|v| std::cmp::Reverse(self.lim[*v]));
        for v in order {
            let (Some(parent), Some(pe)) = (self.parent[v], self.parent_edge[v]) else {
                continue;
            };
            let e = self.edges[pe];
            self.rank[v] = if e.source == v {
                self.rank[parent] - 1
            } else {
                self.rank[parent] + 1
            };
        }
    }
}
