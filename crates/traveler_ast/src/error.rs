//! AST loading error types.

use thiserror::Error;

/// Errors that can occur while loading an ESTree tree.
#[derive(Debug, Error)]
pub enum AstError {
    /// A value where a node was required is not an ESTree node.
    #[error("Expected an ESTree node at {path}")]
    NotANode {
        /// JSON path of the offending value.
        path: String,
    },

    /// Position information on a node is malformed.
    #[error("Invalid span at {path}: {message}")]
    InvalidSpan {
        /// JSON path of the node.
        path: String,
        /// Error message.
        message: String,
    },

    /// The input is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl AstError {
    /// Creates a not-a-node error.
    pub fn not_a_node(path: impl Into<String>) -> Self {
        Self::NotANode { path: path.into() }
    }

    /// Creates an invalid span error.
    pub fn invalid_span(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSpan {
            path: path.into(),
            message: message.into(),
        }
    }
}
