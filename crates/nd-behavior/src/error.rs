use thiserror::Error;

use nd_core::BtNodeId;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("behavior configuration error: {0}")]
    Config(String),

    #[error("unknown {group} node {name:?} at {at}")]
    UnknownNode { group: &'static str, name: String, at: String },

    #[error("node at {at} is missing field {field:?}")]
    MissingField { at: String, field: &'static str },

    #[error("malformed tree at {node}: {reason}")]
    Malformed { node: BtNodeId, reason: String },

    #[error("behavior tree JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
