//! Crossing minimization.
//!
//! Iteration `i` sweeps downwards when `i` is even and upwards when it is odd. Each sweep
//! takes the current ordering by value and returns a new one with its crossing count; the
//! run keeps the best ordering seen, replacing it only on a strict improvement.

pub mod classic;
pub mod cross_count;
pub mod eiglsperger;
pub mod median;

pub use cross_count::cross_count;

use crate::Result;
use crate::cancel::CancelToken;
use crate::config::{CrossingMinimizer, LayoutConfig};
use crate::layers::Layers;
use crate::layout_graph::LayoutGraph;
use crate::metadata::MetadataSnapshot;
use crate::synthesize::check_proper;
use eiglsperger::CompactLayers;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Minimized {
    /// Proper layering with every vertex's rank and index written back.
    pub layers: Layers,
    pub crossings: usize,
    /// The best count after each accepted improvement, starting with the initial ordering.
    pub history: Vec<usize>,
    pub iterations: usize,
}

/// Returns `Ok(None)` when `cancel` fires before an iteration.
pub fn minimize(
    g: &mut LayoutGraph,
    layers: Layers,
    config: &LayoutConfig,
    cancel: Option<&CancelToken>,
) -> Result<Option<Minimized>> {
    let minimizer = config.crossing_minimizer;
    let _span = tracing::debug_span!("order", ?minimizer).entered();

    layers.reindex(g);
    for rank in layers.iter() {
        for (i, &v) in rank.iter().enumerate() {
            g.vertex_mut(v).pos = i;
        }
    }

    let minimized = match config.crossing_minimizer {
        CrossingMinimizer::Classic => {
            let initial = cross_count(g, &layers);
            let transpose = config.transpose;
            let run = keep_best(g, layers, initial, config, cancel, |g, l, down| {
                classic::sweep(g, l, down, transpose)
            });
            let Some(run) = run else {
                return Ok(None);
            };
            run.best.snapshot.restore(g);
            Minimized {
                layers: run.best.layers,
                crossings: run.best.crossings,
                history: run.history,
                iterations: run.iterations,
            }
        }
        CrossingMinimizer::Eiglsperger => {
            let compact = CompactLayers::build(g, &layers);
            let initial = compact.cross_count(g);
            let Some(run) = keep_best(g, compact, initial, config, cancel, eiglsperger::sweep)
            else {
                return Ok(None);
            };
            run.best.snapshot.restore(g);
            let layers = run.best.layers.expand(g);
            layers.reindex(g);
            for rank in layers.iter() {
                for (i, &v) in rank.iter().enumerate() {
                    g.vertex_mut(v).pos = i;
                }
            }
            check_proper(g)?;
            let crossings = cross_count(g, &layers);
            Minimized {
                layers,
                crossings,
                history: run.history,
                iterations: run.iterations,
            }
        }
    };

    minimized.layers.check(g)?;
    tracing::debug!(
        crossings = minimized.crossings,
        iterations = minimized.iterations,
        "minimized crossings"
    );
    Ok(Some(minimized))
}

struct Best<L> {
    layers: L,
    crossings: usize,
    snapshot: MetadataSnapshot,
}

struct Run<L> {
    best: Best<L>,
    history: Vec<usize>,
    iterations: usize,
}

fn keep_best<L: Clone>(
    g: &mut LayoutGraph,
    initial: L,
    initial_crossings: usize,
    config: &LayoutConfig,
    cancel: Option<&CancelToken>,
    mut sweep: impl FnMut(&mut LayoutGraph, L, bool) -> (L, usize),
) -> Option<Run<L>> {
    let mut best = Best {
        layers: initial.clone(),
        crossings: initial_crossings,
        snapshot: MetadataSnapshot::capture(g),
    };
    let mut history = vec![initial_crossings];
    let mut current = initial;
    let mut iterations = 0;

    for i in 0..config.max_level_cross {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            tracing::debug!(iteration = i, "crossing minimization cancelled");
            return None;
        }
        if config.stop_at_zero_crossings && best.crossings == 0 {
            break;
        }

        let (next, crossings) = sweep(g, current, i % 2 == 0);
        iterations += 1;
        tracing::trace!(iteration = i, crossings, best = best.crossings, "sweep");

        if crossings < best.crossings {
            best = Best {
                layers: next.clone(),
                crossings,
                snapshot: MetadataSnapshot::capture(g),
            };
            history.push(crossings);
        }
        current = next;
    }

    Some(Run {
        best,
        history,
        iterations,
    })
}
