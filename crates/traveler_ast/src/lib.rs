//! # traveler_ast
//!
//! ESTree AST definitions for Traveler.
//!
//! This crate provides the node model the traversal engine walks. Nodes keep
//! their ESTree `type` string and named fields, so trees produced by any
//! ESTree-compatible parser can be loaded without a per-parser schema, while
//! the known productions resolve to the closed [`NodeType`] catalogue.
//!
//! ## Architecture
//!
//! - Uses `bumpalo` for Arena allocation
//! - All AST nodes are allocated in a single arena per tree
//! - Nodes are `Copy` and immutable once built; children are `&'a EsNode<'a>`
//! - Memory is freed all at once when the arena is dropped
//!
//! ## Example
//!
//! ```rust
//! use traveler_ast::{AstArena, NodeType};
//!
//! let arena = AstArena::new();
//!
//! let stmt = arena.node(NodeType::EmptyStatement).finish();
//! let program = arena.node(NodeType::Program).list("body", &[stmt]).finish();
//!
//! assert_eq!(program.list("body").len(), 1);
//! ```

mod arena;
mod builder;
mod error;
pub mod json;
mod node;
mod node_type;
mod span;

pub use arena::AstArena;
pub use builder::NodeBuilder;
pub use error::AstError;
pub use node::{EsNode, Field, FieldValue};
pub use node_type::{NodeType, UnknownNodeType};
pub use span::{Location, Position, Span};
