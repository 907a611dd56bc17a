//! Rank (layer) assignment.
//!
//! Every strategy returns one rank per vertex satisfying `rank(target) > rank(source)`.
//! Isolated vertices always land on rank 0, and empty ranks are squeezed out before the
//! result is written back.

mod coffman_graham;
mod longest_path;
mod network_simplex;
mod topological;
pub mod util;

pub use coffman_graham::coffman_graham;
pub use longest_path::longest_path;
pub use network_simplex::network_simplex;
pub use topological::top_down;

use crate::config::{Layering, LayoutConfig};
use crate::layout_graph::LayoutGraph;
use crate::{Error, Result};

/// Ranks the acyclic working graph and returns the number of ranks.
pub fn assign_ranks(g: &mut LayoutGraph, config: &LayoutConfig) -> Result<usize> {
    let strategy = config.layering;
    let _span = tracing::debug_span!("rank", ?strategy).entered();

    let mut ranks = match config.layering {
        Layering::LongestPath => longest_path(g),
        Layering::TopDown => top_down(g),
        Layering::CoffmanGraham => coffman_graham(g, config.coffman_graham_width),
        Layering::NetworkSimplex => network_simplex(g),
    };
    if config.tighten_leaves {
        util::tighten_leaves(g, &mut ranks);
    }
    for v in g.vertex_ids() {
        if g.in_degree(v) == 0 && g.out_degree(v) == 0 {
            ranks[v.index()] = 0;
        }
    }
    let count = util::compact(&mut ranks);

    for v in g.vertex_ids().collect::<Vec<_>>() {
        g.vertex_mut(v).rank = ranks[v.index()];
    }
    check_descending(g)?;

    tracing::debug!(ranks = count, vertices = g.vertex_count(), "assigned ranks");
    Ok(count)
}

/// Fails on the first edge whose target is not strictly below its source.
pub fn check_descending(g: &LayoutGraph) -> Result<()> {
    for (e, edge) in g.edges() {
        let (source_rank, target_rank) = (g.rank(edge.source), g.rank(edge.target));
        if target_rank <= source_rank {
            return Err(Error::UpwardEdge {
                edge: e,
                source_rank,
                target_rank,
            });
        }
    }
    Ok(())
}
