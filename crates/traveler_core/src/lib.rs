//! # traveler_core
//!
//! Pre-order traversal over ESTree trees.
//!
//! This crate provides:
//! - [`ChildRegistry`]: which children each node kind has, and in what order
//! - [`Traversal`]: a lazy, stack-based pre-order iterator
//! - [`Visitor`] and [`walk`]: a callback adapter with early termination
//! - [`RegistryConfig`]: declarative grammar extensions loaded from JSONC
//!
//! ## Example
//!
//! ```rust
//! use traveler_ast::AstArena;
//! use traveler_core::{ChildRegistry, Traversal};
//!
//! let arena = AstArena::new();
//! let tree = serde_json::json!({
//!     "type": "Program",
//!     "body": [{
//!         "type": "ExpressionStatement",
//!         "expression": { "type": "Identifier", "name": "x" }
//!     }]
//! });
//!
//! let types: Vec<&str> = Traversal::from_json(&arena, &tree, ChildRegistry::builtin())
//!     .unwrap()
//!     .map(|node| node.type_name)
//!     .collect();
//! assert_eq!(types, ["Program", "ExpressionStatement", "Identifier"]);
//! ```

pub mod config;
mod error;
pub mod registry;
pub mod rules;
pub mod traversal;
pub mod visitor;

pub use config::RegistryConfig;
pub use error::{RegistryError, TraversalError};
pub use registry::{ChildRegistry, ChildRule};
pub use rules::Slot;
pub use traversal::{Step, Traversal, traverse};
pub use visitor::{VisitResult, Visitor, collect_types, walk};
