//! Spatial-subsystem error type.

use thiserror::Error;

use nd_core::GraphNodeId;

/// Errors produced by `nd-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no path from {from} to {to}")]
    NoPath { from: GraphNodeId, to: GraphNodeId },

    #[error("node {0} not found in graph")]
    NodeNotFound(GraphNodeId),

    #[error("navigation graph has no walkable node")]
    EmptyGraph,

    #[error("cost map row {row} has {got} cells, expected {expected}")]
    RaggedMap { row: usize, expected: usize, got: usize },

    #[error("invalid cost code {value:?} at row {row}, column {col}")]
    InvalidCost { row: usize, col: usize, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
