//! Helper algorithms over [`Graph`].

use super::Graph;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("graph contains a cycle through {vertex}")]
pub struct CycleError {
    pub vertex: String,
}

pub fn preorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String>
where
    N: Default,
    E: Default,
    G: Default,
{
    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut out: Vec<String> = Vec::new();
    for &root in roots {
        let mut stack: Vec<&str> = vec![root];
        while let Some(v) = stack.pop() {
            if !g.has_node(v) || !visited.insert(v) {
                continue;
            }
            out.push(v.to_string());
            // Reverse so the first successor is visited first.
            for w in g.successors(v).into_iter().rev() {
                stack.push(w);
            }
        }
    }
    out
}

pub fn postorder<N, E, G>(g: &Graph<N, E, G>, roots: &[&str]) -> Vec<String>
where
    N: Default,
    E: Default,
    G: Default,
{
    fn dfs<'a, N, E, G>(
        g: &'a Graph<N, E, G>,
        v: &'a str,
        visited: &mut FxHashSet<&'a str>,
        out: &mut Vec<String>,
    ) where
        N: Default,
        E: Default,
        G: Default,
    {
        if !visited.insert(v) {
            return;
        }
        for w in g.successors(v) {
            dfs(g, w, visited, out);
        }
        out.push(v.to_string());
    }

    let mut visited: FxHashSet<&str> = FxHashSet::default();
    let mut out: Vec<String> = Vec::new();
    for &root in roots {
        if g.has_node(root) {
            dfs(g, root, &mut visited, &mut out);
        }
    }
    out
}

/// Weakly connected components, each listed in discovery order; components are ordered by
/// their first vertex in insertion order.
pub fn components<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default,
    E: Default,
    G: Default,
{
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    let mut out: Vec<Vec<String>> = Vec::new();

    for start in g.nodes() {
        if !seen.insert(start) {
            continue;
        }
        let mut comp: Vec<String> = Vec::new();
        let mut queue: VecDeque<&str> = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            comp.push(v.to_string());
            for n in g.neighbors(v) {
                if seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        out.push(comp);
    }

    out
}

/// Strongly connected components with more than one vertex, plus single vertices carrying a
/// self-loop. Vertices inside a cycle are listed in insertion order.
pub fn find_cycles<N, E, G>(g: &Graph<N, E, G>) -> Vec<Vec<String>>
where
    N: Default,
    E: Default,
    G: Default,
{
    struct Tarjan<'a> {
        next_index: usize,
        stack: Vec<&'a str>,
        on_stack: FxHashSet<&'a str>,
        index: FxHashMap<&'a str, usize>,
        lowlink: FxHashMap<&'a str, usize>,
        sccs: Vec<Vec<&'a str>>,
    }

    fn strongconnect<'a, N, E, G>(g: &'a Graph<N, E, G>, v: &'a str, st: &mut Tarjan<'a>)
    where
        N: Default,
        E: Default,
        G: Default,
    {
        st.index.insert(v, st.next_index);
        st.lowlink.insert(v, st.next_index);
        st.next_index += 1;
        st.stack.push(v);
        st.on_stack.insert(v);

        for w in g.successors(v) {
            if !st.index.contains_key(w) {
                strongconnect(g, w, st);
                let low = st.lowlink[v].min(st.lowlink[w]);
                st.lowlink.insert(v, low);
            } else if st.on_stack.contains(w) {
                let low = st.lowlink[v].min(st.index[w]);
                st.lowlink.insert(v, low);
            }
        }

        if st.lowlink[v] == st.index[v] {
            let mut scc: Vec<&str> = Vec::new();
            while let Some(w) = st.stack.pop() {
                st.on_stack.remove(w);
                scc.push(w);
                if w == v {
                    break;
                }
            }
            st.sccs.push(scc);
        }
    }

    let mut st = Tarjan {
        next_index: 0,
        stack: Vec::new(),
        on_stack: FxHashSet::default(),
        index: FxHashMap::default(),
        lowlink: FxHashMap::default(),
        sccs: Vec::new(),
    };
    for v in g.nodes() {
        if !st.index.contains_key(v) {
            strongconnect(g, v, &mut st);
        }
    }

    let mut cycles: Vec<Vec<String>> = Vec::new();
    for mut scc in st.sccs {
        if scc.len() > 1 {
            scc.sort_by_key(|v| g.node_ix(v).unwrap_or(usize::MAX));
            cycles.push(scc.into_iter().map(str::to_string).collect());
        } else if let Some(&v) = scc.first() {
            if !g.out_edges(v, Some(v)).is_empty() {
                cycles.push(vec![v.to_string()]);
            }
        }
    }

    cycles.sort_by_key(|c| c.first().and_then(|v| g.node_ix(v)).unwrap_or(usize::MAX));
    cycles
}

pub fn is_acyclic<N, E, G>(g: &Graph<N, E, G>) -> bool
where
    N: Default,
    E: Default,
    G: Default,
{
    topsort(g).is_ok()
}

/// Kahn topological order; ties are broken by insertion order.
pub fn topsort<N, E, G>(g: &Graph<N, E, G>) -> Result<Vec<String>, CycleError>
where
    N: Default,
    E: Default,
    G: Default,
{
    let mut indegree: Vec<usize> = g.nodes().map(|v| g.in_degree(v)).collect();
    let mut queue: VecDeque<usize> = indegree
        .iter()
        .enumerate()
        .filter(|(_, d)| **d == 0)
        .map(|(ix, _)| ix)
        .collect();

    let mut out: Vec<String> = Vec::with_capacity(g.node_count());
    while let Some(ix) = queue.pop_front() {
        let Some(v) = g.node_id_by_ix(ix) else {
            continue;
        };
        out.push(v.to_string());
        for e in g.out_edges(v, None) {
            let Some(w_ix) = g.node_ix(&e.w) else {
                continue;
            };
            indegree[w_ix] -= 1;
            if indegree[w_ix] == 0 {
                queue.push_back(w_ix);
            }
        }
    }

    if out.len() == g.node_count() {
        return Ok(out);
    }
    let vertex = indegree
        .iter()
        .position(|d| *d > 0)
        .and_then(|ix| g.node_id_by_ix(ix))
        .unwrap_or_default()
        .to_string();
    Err(CycleError { vertex })
}
