//! Traversal error types.

use thiserror::Error;
use traveler_ast::AstError;

/// Errors raised when a child rule is registered.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// The node kind name is empty or contains whitespace.
    #[error("Invalid node kind name: {0:?}")]
    InvalidKind(String),

    /// A field rule lists no fields.
    #[error("Rule for {kind} lists no fields")]
    EmptyRule { kind: String },

    /// A field rule contains an empty or malformed field name.
    #[error("Rule for {kind} has an invalid field name: {field:?}")]
    InvalidField { kind: String, field: String },

    /// A field rule lists the same field twice.
    #[error("Rule for {kind} lists field {field:?} more than once")]
    DuplicateField { kind: String, field: String },
}

/// Errors that can occur while setting up a traversal.
#[derive(Debug, Error)]
pub enum TraversalError {
    /// The tree could not be loaded.
    #[error("AST error: {0}")]
    Ast(#[from] AstError),

    /// A child rule was rejected.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TraversalError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
