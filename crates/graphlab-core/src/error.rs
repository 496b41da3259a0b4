//! Error types for Graphlab Core

use crate::model::{EdgeId, NodeId};
use thiserror::Error;

/// Result type alias using Graphlab Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised for malformed input.
///
/// Algorithmic outcomes such as "no path exists" are never errors; they are
/// reported through the result records.
#[derive(Error, Debug)]
pub enum Error {
    /// Two nodes in a snapshot share the same id
    #[error("Duplicate node id: {0}")]
    DuplicateNode(NodeId),

    /// Two edges in a snapshot share the same id
    #[error("Duplicate edge id: {0}")]
    DuplicateEdge(EdgeId),

    /// Edge weight is negative, NaN or infinite
    #[error("Invalid weight {weight} on edge {edge}")]
    InvalidWeight {
        /// Offending edge
        edge: EdgeId,
        /// Weight as supplied
        weight: f64,
    },

    /// A query referenced a node that is not part of the snapshot
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// Snapshot could not be decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid configuration parameter
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
