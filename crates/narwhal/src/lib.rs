//! Layered (Sugiyama-style) graph layout.
//!
//! A run wraps the caller graph into a working graph and then goes through cycle removal,
//! ranking, synthetic-vertex insertion, crossing minimization, horizontal placement and edge
//! articulation. The caller graph is only read; positions are handed to a [`PositionSink`]
//! once the whole run has succeeded.

pub use narwhal_graphlib as graphlib;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod acyclic;
pub mod articulate;
pub mod cancel;
pub mod components;
pub mod config;
mod error;
pub mod geometry;
pub mod layers;
pub mod layout_graph;
pub mod metadata;
pub mod model;
pub mod order;
pub mod pipeline;
pub mod position;
pub mod rank;
pub mod sink;
pub mod synthesize;
pub mod transform;

pub use articulate::ArticulatedEdge;
pub use cancel::CancelToken;
pub use config::{CrossingMinimizer, CycleRemoval, Layering, LayoutConfig};
pub use error::{Error, Result};
pub use geometry::{Point, Size};
pub use pipeline::{LayeredLayout, LayoutOutcome, LayoutResult};
pub use sink::{FnSink, PositionSink};
