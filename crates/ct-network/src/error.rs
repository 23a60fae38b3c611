//! Network-subsystem error type.

use thiserror::Error;

use ct_core::NodeId;

/// Errors produced by `ct-network`.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("no node labelled {0:?}")]
    UnknownLabel(String),

    #[error("edge {from} -> {to} has invalid length {length_m} m")]
    InvalidLength { from: NodeId, to: NodeId, length_m: f64 },

    #[error("more than {max} parallel links between {a} and {b}")]
    TooManyParallelLinks { a: NodeId, b: NodeId, max: usize },

    #[error("traffic parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
