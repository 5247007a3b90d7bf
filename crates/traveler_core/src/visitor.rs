//! Visitor adapter over [`Traversal`].
//!
//! Implement [`Visitor`] and hand it to [`walk`] to receive every node in
//! pre-order. Unlike a recursive visitor, the walk never grows the call
//! stack, and `ControlFlow::Break` stops it immediately.
//!
//! # Example
//!
//! ```rust
//! use std::ops::ControlFlow;
//!
//! use traveler_ast::{AstArena, EsNode, NodeType};
//! use traveler_core::visitor::{VisitResult, Visitor, walk};
//! use traveler_core::ChildRegistry;
//!
//! /// Collects identifier names.
//! struct Names<'a> {
//!     names: Vec<&'a str>,
//! }
//!
//! impl<'a> Visitor<'a> for Names<'a> {
//!     fn visit_kind(&mut self, kind: NodeType, node: &'a EsNode<'a>) -> VisitResult {
//!         if kind == NodeType::Identifier {
//!             self.names.extend(node.str_value("name"));
//!         }
//!         ControlFlow::Continue(())
//!     }
//! }
//!
//! let arena = AstArena::new();
//! let left = arena.node(NodeType::Identifier).str("name", "a").finish();
//! let right = arena.node(NodeType::Identifier).str("name", "b").finish();
//! let sum = arena
//!     .node(NodeType::BinaryExpression)
//!     .str("operator", "+")
//!     .child("left", left)
//!     .child("right", right)
//!     .finish();
//!
//! let mut names = Names { names: Vec::new() };
//! let _ = walk(&mut names, sum, ChildRegistry::builtin());
//! assert_eq!(names.names, vec!["a", "b"]);
//! ```

use std::ops::ControlFlow;

use traveler_ast::{EsNode, NodeType};

use crate::{ChildRegistry, Traversal};

/// Result type for visitor methods to control traversal.
///
/// - `ControlFlow::Continue(())` - keep walking
/// - `ControlFlow::Break(())` - stop the walk
pub type VisitResult = ControlFlow<()>;

/// Receives nodes in pre-order from [`walk`].
pub trait Visitor<'a> {
    /// Called for every node. Dispatches on the node's catalogue type by default.
    #[inline]
    fn visit_node(&mut self, node: &'a EsNode<'a>) -> VisitResult {
        match node.kind {
            Some(kind) => self.visit_kind(kind, node),
            None => self.visit_unknown(node),
        }
    }

    /// Called for nodes whose type is in the catalogue.
    #[inline]
    fn visit_kind(&mut self, _kind: NodeType, _node: &'a EsNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }

    /// Called for nodes whose type is outside the catalogue.
    #[inline]
    fn visit_unknown(&mut self, _node: &'a EsNode<'a>) -> VisitResult {
        ControlFlow::Continue(())
    }
}

/// Walks the tree under `root`, calling the visitor for each node in order.
///
/// # Returns
///
/// `ControlFlow::Continue(())` if every node was visited,
/// or `ControlFlow::Break(())` if the visitor stopped early.
pub fn walk<'a, V>(visitor: &mut V, root: &'a EsNode<'a>, registry: &ChildRegistry) -> VisitResult
where
    V: Visitor<'a>,
{
    for node in Traversal::new(root, registry) {
        visitor.visit_node(node)?;
    }
    ControlFlow::Continue(())
}

/// Returns the `type` of every node, in traversal order.
pub fn collect_types<'a>(root: &'a EsNode<'a>, registry: &ChildRegistry) -> Vec<&'a str> {
    Traversal::new(root, registry)
        .map(|node| node.type_name)
        .collect()
}
