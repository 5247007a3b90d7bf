//! Arena allocator for AST nodes.
//!
//! Uses `bumpalo` for efficient bump allocation of AST nodes.
//! All nodes of one tree are allocated in the same arena,
//! and freed together when the arena is dropped.

use bumpalo::Bump;

use crate::{NodeBuilder, NodeType};

/// Arena allocator for AST nodes.
///
/// This struct wraps `bumpalo::Bump` to provide arena allocation
/// for ESTree nodes. Using arena allocation:
///
/// - Minimizes allocation overhead
/// - Improves cache locality
/// - Enables batch deallocation
///
/// Because the arena never runs `Drop` for its values, everything stored in
/// it is plain borrowed data (`&'a str`, `&'a [T]`, `&'a EsNode<'a>`).
///
/// # Example
///
/// ```rust
/// use traveler_ast::{AstArena, NodeType};
///
/// let arena = AstArena::new();
///
/// let id = arena.node(NodeType::Identifier).str("name", "x").finish();
/// let stmt = arena.node(NodeType::ExpressionStatement).child("expression", id).finish();
///
/// assert_eq!(stmt.child("expression").map(|n| n.type_name), Some("Identifier"));
/// ```
pub struct AstArena {
    bump: Bump,
}

impl AstArena {
    /// Creates a new arena allocator.
    #[inline]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Creates a new arena with the specified initial capacity.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Allocates a value in the arena and returns a reference to it.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Allocates a string slice in the arena.
    #[inline]
    pub fn alloc_str(&self, s: &str) -> &str {
        self.bump.alloc_str(s)
    }

    /// Allocates a slice in the arena by copying from the input slice.
    #[inline]
    pub fn alloc_slice_copy<T: Copy>(&self, slice: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(slice)
    }

    /// Allocates a slice in the arena from an iterator of known length.
    #[inline]
    pub fn alloc_slice_fill_iter<T, I>(&self, iter: I) -> &[T]
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        self.bump.alloc_slice_fill_iter(iter)
    }

    /// Starts building a node of a catalogue type.
    #[inline]
    pub fn node(&self, node_type: NodeType) -> NodeBuilder<'_> {
        NodeBuilder::new(self, node_type.as_str())
    }

    /// Starts building a node from a raw ESTree `type` string.
    ///
    /// Use this for productions outside the [`NodeType`] catalogue.
    #[inline]
    pub fn node_named(&self, type_name: &str) -> NodeBuilder<'_> {
        NodeBuilder::new(self, self.alloc_str(type_name))
    }

    /// Returns the total bytes allocated in this arena.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }
}

impl Default for AstArena {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_alloc() {
        let arena = AstArena::new();
        let value = arena.alloc(42u32);
        assert_eq!(*value, 42);
    }

    #[test]
    fn test_arena_alloc_str() {
        let arena = AstArena::new();
        let s = arena.alloc_str("hello world");
        assert_eq!(s, "hello world");
    }

    #[test]
    fn test_arena_alloc_slice_fill_iter() {
        let arena = AstArena::new();
        let slice = arena.alloc_slice_fill_iter([1, 2, 3].iter().map(|n| n * 10));
        assert_eq!(slice, &[10, 20, 30]);
    }

    #[test]
    fn test_node_named_resolves_kind() {
        let arena = AstArena::new();
        let known = arena.node_named("Literal").finish();
        let unknown = arena.node_named("JSXElement").finish();

        assert_eq!(known.kind, Some(NodeType::Literal));
        assert_eq!(unknown.kind, None);
        assert_eq!(unknown.type_name, "JSXElement");
        assert!(arena.allocated_bytes() > 0);
    }
}
