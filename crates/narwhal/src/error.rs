use crate::model::{EdgeId, VertexId};

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of a layout run.
///
/// Apart from configuration problems these are internal consistency faults: a run that hits
/// one stops instead of emitting a layout with an undefined crossing count.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid layout configuration: {message}")]
    InvalidConfig { message: String },

    #[error("failed to parse layout configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("vertex {vertex:?} sits at slot {actual} of rank {rank} but records index {recorded}")]
    IndexMismatch {
        vertex: VertexId,
        rank: usize,
        recorded: usize,
        actual: usize,
    },

    #[error("vertex {vertex:?} is stored in rank {stored} but records rank {recorded}")]
    RankMismatch {
        vertex: VertexId,
        stored: usize,
        recorded: usize,
    },

    #[error("vertex {vertex:?} occupies more than one slot")]
    DuplicateVertex { vertex: VertexId },

    #[error("vertex {vertex:?} is missing from the layering")]
    MissingVertex { vertex: VertexId },

    #[error("rank {rank} has no vertices")]
    EmptyRank { rank: usize },

    #[error("edge {edge:?} does not descend (rank {source_rank} -> {target_rank})")]
    UpwardEdge {
        edge: EdgeId,
        source_rank: usize,
        target_rank: usize,
    },

    #[error("edge {edge:?} spans ranks {source_rank} -> {target_rank} in a proper layering")]
    ImproperEdge {
        edge: EdgeId,
        source_rank: usize,
        target_rank: usize,
    },
}
