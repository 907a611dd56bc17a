//! Break cycles by reversing a feedback arc set.
//!
//! Reversal happens in place on the working graph: the edge keeps its origin and gets its
//! `reversed` flag set, so the articulation stage can restore the caller's direction.

mod constructive;
mod greedy;

pub use constructive::constructive_fas;
pub use greedy::greedy_fas;

use crate::config::CycleRemoval;
use crate::layout_graph::LayoutGraph;
use crate::model::EdgeId;
use narwhal_graphlib::EdgeKey;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackArcSet {
    /// Working edges that were reversed.
    pub edges: Vec<EdgeId>,
    /// Caller keys of the reversed edges, in the same order.
    pub origins: Vec<EdgeKey>,
}

impl FeedbackArcSet {
    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

pub fn remove_cycles(g: &mut LayoutGraph, strategy: CycleRemoval) -> FeedbackArcSet {
    let edges = match strategy {
        CycleRemoval::Greedy => greedy_fas(g),
        CycleRemoval::Constructive => constructive_fas(g),
    };

    let mut origins = Vec::with_capacity(edges.len());
    for &e in &edges {
        let Some(origin) = g.edge(e).map(|edge| edge.origin) else {
            continue;
        };
        g.reverse_edge(e);
        origins.push(g.origin(origin).clone());
    }

    tracing::debug!(
        strategy = ?strategy,
        reversed = edges.len(),
        "removed cycles"
    );
    FeedbackArcSet { edges, origins }
}

/// True when the working graph has no directed cycle.
pub fn is_acyclic(g: &LayoutGraph) -> bool {
    let mut indegree: Vec<usize> = g.vertex_ids().map(|v| g.in_degree(v)).collect();
    let mut queue: Vec<_> = g
        .vertex_ids()
        .filter(|v| indegree[v.index()] == 0)
        .collect();
    let mut seen = 0usize;
    while let Some(v) = queue.pop() {
        seen += 1;
        for w in g.successors(v) {
            indegree[w.index()] -= 1;
            if indegree[w.index()] == 0 {
                queue.push(w);
            }
        }
    }
    seen == g.vertex_count()
}
