//! Shared error type.
//!
//! Sub-crates define their own error enums and wrap `NdError` as one variant
//! where they need to surface core failures.

use thiserror::Error;

use crate::{AgentId, GraphNodeId};

/// The top-level error type for `nd-core`.
#[derive(Debug, Error)]
pub enum NdError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("graph node {0} not found")]
    GraphNodeNotFound(GraphNodeId),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for `nd-core`.
pub type NdResult<T> = Result<T, NdError>;
