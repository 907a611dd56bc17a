//! The layered layout entry point.

use crate::Result;
use crate::acyclic::remove_cycles;
use crate::articulate::{ArticulateOptions, ArticulatedEdge, articulate};
use crate::cancel::CancelToken;
use crate::components::{ComponentLayout, pack};
use crate::config::{CrossingMinimizer, LayoutConfig};
use crate::geometry::{Point, Size};
use crate::layers::{Layers, init_order};
use crate::order::minimize;
use crate::position::{FavoredFn, assign_coordinates};
use crate::rank::assign_ranks;
use crate::sink::PositionSink;
use crate::synthesize::{SynthesisMode, check_proper, make_proper};
use crate::transform::{BoundsFn, EdgeOrderFn, transform};
use narwhal_graphlib::{EdgeKey, Graph, alg};
use rustc_hash::FxHashMap as HashMap;
use std::cmp::Ordering;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    /// One entry per caller edge, in caller edge order.
    pub edges: Vec<ArticulatedEdge>,
    /// Recommended canvas size, margin included.
    pub size: Size,
    /// Crossings of the final ordering, summed over components.
    pub crossings: usize,
    /// Caller edges that were reversed to break cycles.
    pub feedback_edges: Vec<EdgeKey>,
}

impl LayoutResult {
    pub fn edge(&self, key: &EdgeKey) -> Option<&ArticulatedEdge> {
        self.edges.iter().find(|e| &e.key == key)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome {
    Completed(LayoutResult),
    /// The run stopped early; the sink was not written.
    Cancelled,
}

impl LayoutOutcome {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, LayoutOutcome::Cancelled)
    }

    pub fn completed(self) -> Option<LayoutResult> {
        match self {
            LayoutOutcome::Completed(result) => Some(result),
            LayoutOutcome::Cancelled => None,
        }
    }
}

/// Sugiyama-style layered layout.
///
/// ```
/// use narwhal::graphlib::{Graph, GraphOptions};
/// use narwhal::{LayeredLayout, LayoutConfig, Point, Size};
/// use std::collections::BTreeMap;
///
/// let mut g: Graph<(), ()> = Graph::new(GraphOptions::default());
/// g.set_path(&["a", "b", "c"]);
///
/// let mut positions: BTreeMap<String, Point> = BTreeMap::new();
/// let outcome = LayeredLayout::new(LayoutConfig::default())
///     .with_bounds(|_, _| Size::new(40.0, 20.0))
///     .run(&g, &mut positions)
///     .unwrap();
/// assert!(!outcome.is_cancelled());
/// assert!(positions["a"].y < positions["b"].y);
/// ```
pub struct LayeredLayout<'a, N> {
    config: LayoutConfig,
    bounds: Option<Box<BoundsFn<'a, N>>>,
    edge_order: Option<Box<EdgeOrderFn<'a>>>,
    favored: Option<Box<FavoredFn<'a>>>,
    cancel: Option<CancelToken>,
}

impl<'a, N> LayeredLayout<'a, N> {
    pub fn new(config: LayoutConfig) -> Self {
        Self {
            config,
            bounds: None,
            edge_order: None,
            favored: None,
            cancel: None,
        }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Vertex sizes; without one every vertex is a point.
    pub fn with_bounds(mut self, bounds: impl Fn(&str, &N) -> Size + 'a) -> Self {
        self.bounds = Some(Box::new(bounds));
        self
    }

    /// Order in which edges enter the working graph. It decides which edges the constructive
    /// cycle remover diverts and breaks ties in the later stages.
    pub fn with_edge_order(mut self, order: impl Fn(&EdgeKey, &EdgeKey) -> Ordering + 'a) -> Self {
        self.edge_order = Some(Box::new(order));
        self
    }

    /// Edges whose target should sit directly under their source where there is room.
    pub fn with_favored_edges(mut self, favored: impl Fn(&EdgeKey) -> bool + 'a) -> Self {
        self.favored = Some(Box::new(favored));
        self
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }

    /// Lays out `g` and writes every vertex center to `sink`.
    ///
    /// The sink is written only once the whole layout has completed, so a cancelled run
    /// leaves it untouched.
    pub fn run<E, G, S>(&self, g: &Graph<N, E, G>, sink: &mut S) -> Result<LayoutOutcome>
    where
        N: Default,
        E: Default,
        G: Default,
        S: PositionSink + ?Sized,
    {
        self.config.validate()?;
        let _span = tracing::debug_span!(
            "layered_layout",
            vertices = g.node_count(),
            edges = g.edge_count()
        )
        .entered();

        let groups: Vec<Vec<String>> = if self.config.multi_component {
            let mut groups = alg::components(g);
            for ids in &mut groups {
                ids.sort_by_key(|id| g.node_ix(id));
            }
            groups
        } else {
            vec![g.node_ids()]
        };

        let mut parts: Vec<ComponentLayout> = Vec::with_capacity(groups.len());
        for ids in groups.iter().filter(|ids| !ids.is_empty()) {
            match self.layout_component(g, ids)? {
                Some(part) => parts.push(part),
                None => return Ok(LayoutOutcome::Cancelled),
            }
        }

        let mut packed = pack(parts, self.config.horizontal_offset, self.config.margin);
        if self.cancelled() {
            tracing::debug!("cancelled before commit");
            return Ok(LayoutOutcome::Cancelled);
        }

        let order: HashMap<&EdgeKey, usize> = g.edges().enumerate().map(|(i, k)| (k, i)).collect();
        packed
            .edges
            .sort_by_key(|e| order.get(&e.key).copied().unwrap_or(usize::MAX));

        for (id, point) in &packed.vertices {
            sink.set_position(id, *point);
        }
        tracing::debug!(
            width = packed.size.width,
            height = packed.size.height,
            crossings = packed.crossings,
            "layout committed"
        );

        Ok(LayoutOutcome::Completed(LayoutResult {
            edges: packed.edges,
            size: packed.size,
            crossings: packed.crossings,
            feedback_edges: packed.feedback_edges,
        }))
    }

    /// Lays out the caller vertices `ids` with their top-left corner at the origin. Returns
    /// `None` when cancelled.
    fn layout_component<E, G>(
        &self,
        g: &Graph<N, E, G>,
        ids: &[String],
    ) -> Result<Option<ComponentLayout>>
    where
        N: Default,
        E: Default,
        G: Default,
    {
        let vertices = ids.len();
        let _span = tracing::debug_span!("component", vertices).entered();
        let point_bounds = |_: &str, _: &N| Size::ZERO;
        let bounds: &BoundsFn<'_, N> = self.bounds.as_deref().unwrap_or(&point_bounds);

        let mut t = transform(g, ids, bounds, self.edge_order.as_deref());
        if self.cancelled() {
            return Ok(None);
        }
        let graph = &mut t.graph;
        let articulate_options = ArticulateOptions {
            post_straighten: self.config.post_straighten,
            spacing: self.config.horizontal_offset,
        };

        if graph.vertex_count() == 1 {
            let Some(v) = graph.vertex_ids().next() else {
                return Ok(Some(ComponentLayout::default()));
            };
            let size = graph.vertex(v).size;
            graph.vertex_mut(v).point = Point::new(size.width / 2.0, size.height / 2.0);
            let edges = articulate(graph, &Layers::default(), &t.self_loops, articulate_options);
            return Ok(Some(ComponentLayout {
                vertices: collect_points(graph),
                edges,
                size,
                crossings: 0,
                feedback_edges: Vec::new(),
            }));
        }

        let fas = remove_cycles(graph, self.config.cycle_removal);
        if self.cancelled() {
            return Ok(None);
        }

        assign_ranks(graph, &self.config)?;
        let mode = match self.config.crossing_minimizer {
            CrossingMinimizer::Classic => SynthesisMode::Materialize,
            CrossingMinimizer::Eiglsperger => SynthesisMode::Segments,
        };
        make_proper(graph, mode);
        check_proper(graph)?;

        let layers = init_order(graph);
        let Some(minimized) = minimize(graph, layers, &self.config, self.cancel.as_ref())? else {
            return Ok(None);
        };
        if self.cancelled() {
            return Ok(None);
        }

        let inner = LayoutConfig {
            margin: 0.0,
            ..self.config.clone()
        };
        let size = assign_coordinates(graph, &minimized.layers, &inner, self.favored.as_deref());
        let edges = articulate(graph, &minimized.layers, &t.self_loops, articulate_options);

        Ok(Some(ComponentLayout {
            vertices: collect_points(graph),
            edges,
            size,
            crossings: minimized.crossings,
            feedback_edges: fas.origins,
        }))
    }
}

fn collect_points(g: &crate::layout_graph::LayoutGraph) -> Vec<(String, Point)> {
    g.vertices()
        .filter_map(|(_, lv)| lv.id().map(|id| (id.to_string(), lv.point)))
        .collect()
}
