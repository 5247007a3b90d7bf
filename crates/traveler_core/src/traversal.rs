//! Pre-order traversal engine.
//!
//! [`Traversal`] walks a tree depth-first, left to right, producing one
//! node per call. It keeps an explicit stack (the fringe) instead of
//! recursing, so tree depth is bounded by memory, not by the call stack.
//!
//! The input must be a tree: a node reachable through two parents is
//! produced once per path, and a cyclic graph never finishes.

use std::iter::FusedIterator;

use serde_json::Value;
use tracing::trace;
use traveler_ast::{AstArena, EsNode, json};

use crate::rules::Slot;
use crate::{ChildRegistry, TraversalError};

/// Lazy pre-order iterator over every node of a tree.
///
/// # Example
///
/// ```rust
/// use traveler_ast::{AstArena, NodeType};
/// use traveler_core::{ChildRegistry, Traversal};
///
/// let arena = AstArena::new();
/// let a = arena.node(NodeType::EmptyStatement).finish();
/// let b = arena.node(NodeType::DebuggerStatement).finish();
/// let program = arena.node(NodeType::Program).list("body", &[a, b]).finish();
///
/// let types: Vec<&str> = Traversal::new(program, ChildRegistry::builtin())
///     .map(|node| node.type_name)
///     .collect();
/// assert_eq!(types, ["Program", "EmptyStatement", "DebuggerStatement"]);
/// ```
pub struct Traversal<'a, 'r> {
    /// Nodes awaiting emission; the next node is on top.
    fringe: Vec<&'a EsNode<'a>>,
    /// Reused buffer for the children of the node being expanded.
    slots: Vec<Slot<'a>>,
    registry: &'r ChildRegistry,
    emitted: usize,
}

/// Result of one [`Traversal::step`] call.
#[derive(Debug, Clone, Copy)]
pub struct Step<'a> {
    /// The produced node; `None` once the traversal is done.
    pub value: Option<&'a EsNode<'a>>,
    /// True once the traversal is done.
    pub done: bool,
}

impl<'a, 'r> Traversal<'a, 'r> {
    /// Starts a traversal at `root`.
    pub fn new(root: &'a EsNode<'a>, registry: &'r ChildRegistry) -> Self {
        trace!(root = root.type_name, "starting traversal");
        Self {
            fringe: vec![root],
            slots: Vec::new(),
            registry,
            emitted: 0,
        }
    }

    /// Loads an ESTree JSON tree into `arena` and starts a traversal at its root.
    ///
    /// Fails if the root is not an ESTree node.
    pub fn from_json(
        arena: &'a AstArena,
        value: &Value,
        registry: &'r ChildRegistry,
    ) -> Result<Self, TraversalError> {
        let root = json::load_value(arena, value)?;
        Ok(Self::new(root, registry))
    }

    /// Returns true once every node has been produced.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.fringe.is_empty()
    }

    /// Returns the number of nodes waiting on the fringe.
    ///
    /// Their descendants are not counted.
    #[inline]
    pub fn pending(&self) -> usize {
        self.fringe.len()
    }

    /// Returns the number of nodes produced so far.
    #[inline]
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Produces the next node as an explicit `(value, done)` pair.
    pub fn step(&mut self) -> Step<'a> {
        let value = self.next();
        Step {
            value,
            done: value.is_none(),
        }
    }
}

impl<'a> Iterator for Traversal<'a, '_> {
    type Item = &'a EsNode<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.fringe.pop()?;

        self.slots.clear();
        self.registry.extract_into(current, &mut self.slots);
        // Reverse so the leftmost child is popped first
        self.fringe
            .extend(self.slots.iter().rev().filter_map(|slot| *slot));

        self.emitted += 1;
        if self.fringe.is_empty() {
            trace!(emitted = self.emitted, "traversal done");
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.fringe.len(), None)
    }
}

impl FusedIterator for Traversal<'_, '_> {}

/// Starts a traversal at `root` using the shared default registry.
pub fn traverse<'a>(root: &'a EsNode<'a>) -> Traversal<'a, 'static> {
    Traversal::new(root, ChildRegistry::builtin())
}
