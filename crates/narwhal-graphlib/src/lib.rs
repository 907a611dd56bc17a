//! Graph container APIs used by `narwhal`.
//!
//! The container is a directed multigraph keyed by string vertex ids. Vertices and edges keep
//! their insertion order, which every traversal in this crate (and every layout stage built
//! on top of it) relies on for deterministic output.

mod graph;

pub use graph::{EdgeKey, Graph, GraphOptions, alg};
