//! Constructive feedback arc set: edges are inserted one by one, in working-graph order, into
//! an acyclic graph; an edge whose target already reaches its source is diverted instead.

use crate::layout_graph::LayoutGraph;
use crate::model::EdgeId;

pub fn constructive_fas(g: &LayoutGraph) -> Vec<EdgeId> {
    let n = g.vertex_count();
    let mut dag: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut fas: Vec<EdgeId> = Vec::new();

    let mut visited: Vec<u32> = vec![0; n];
    let mut epoch: u32 = 0;
    let mut stack: Vec<usize> = Vec::new();

    for (e, edge) in g.edges() {
        let (u, w) = (edge.source.index(), edge.target.index());
        epoch += 1;
        if reaches(&dag, w, u, &mut visited, epoch, &mut stack) {
            fas.push(e);
        } else {
            dag[u].push(w);
        }
    }
    fas
}

fn reaches(
    dag: &[Vec<usize>],
    from: usize,
    to: usize,
    visited: &mut [u32],
    epoch: u32,
    stack: &mut Vec<usize>,
) -> bool {
    stack.clear();
    stack.push(from);
    while let Some(v) = stack.pop() {
        if v == to {
            return true;
        }
        if visited[v] == epoch {
            continue;
        }
        visited[v] = epoch;
        stack.extend(dag[v].iter().copied().filter(|w| visited[*w] != epoch));
    }
    false
}
