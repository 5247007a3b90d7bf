//! Fluent construction of arena nodes.

use crate::{AstArena, EsNode, Field, FieldValue, Location, Span};

/// Builds one [`EsNode`] field by field.
///
/// Created through [`AstArena::node`] or [`AstArena::node_named`]. Fields are
/// stored in the order they are added.
pub struct NodeBuilder<'a> {
    arena: &'a AstArena,
    type_name: &'a str,
    span: Option<Span>,
    loc: Option<Location>,
    fields: Vec<Field<'a>>,
}

impl<'a> NodeBuilder<'a> {
    pub(crate) fn new(arena: &'a AstArena, type_name: &'a str) -> Self {
        Self {
            arena,
            type_name,
            span: None,
            loc: None,
            fields: Vec::new(),
        }
    }

    /// Adds a field with an arbitrary value.
    pub fn field(mut self, name: &str, value: FieldValue<'a>) -> Self {
        let name = self.arena.alloc_str(name);
        self.fields.push(Field { name, value });
        self
    }

    /// Adds a single-child field.
    pub fn child(self, name: &str, node: &'a EsNode<'a>) -> Self {
        self.field(name, FieldValue::Node(node))
    }

    /// Adds an optional single-child field; `None` is stored as `null`.
    pub fn opt(self, name: &str, node: Option<&'a EsNode<'a>>) -> Self {
        match node {
            Some(node) => self.child(name, node),
            None => self.null(name),
        }
    }

    /// Adds an explicit `null` field.
    pub fn null(self, name: &str) -> Self {
        self.field(name, FieldValue::Null)
    }

    /// Adds a list field without holes.
    pub fn list(self, name: &str, nodes: &[&'a EsNode<'a>]) -> Self {
        let items = self
            .arena
            .alloc_slice_fill_iter(nodes.iter().map(|node| Some(*node)));
        self.field(name, FieldValue::List(items))
    }

    /// Adds a list field whose `None` entries are holes.
    pub fn holes(self, name: &str, items: &[Option<&'a EsNode<'a>>]) -> Self {
        let items = self.arena.alloc_slice_copy(items);
        self.field(name, FieldValue::List(items))
    }

    pub fn str(self, name: &str, value: &str) -> Self {
        let value = self.arena.alloc_str(value);
        self.field(name, FieldValue::Str(value))
    }

    pub fn num(self, name: &str, value: f64) -> Self {
        self.field(name, FieldValue::Number(value))
    }

    pub fn bool(self, name: &str, value: bool) -> Self {
        self.field(name, FieldValue::Bool(value))
    }

    /// Sets the byte span.
    pub fn span(mut self, start: u32, end: u32) -> Self {
        self.span = Some(Span::new(start, end));
        self
    }

    /// Sets the line/column location.
    pub fn loc(mut self, loc: Location) -> Self {
        self.loc = Some(loc);
        self
    }

    /// Allocates the node in the arena.
    pub fn finish(self) -> &'a EsNode<'a> {
        let fields = self.arena.alloc_slice_copy(&self.fields);
        let mut node = EsNode::new(self.type_name, fields);
        node.span = self.span;
        node.loc = self.loc;
        self.arena.alloc(node)
    }
}

#[cfg(test)]
mod tests {
    use crate::{AstArena, NodeType, Position};

    #[test]
    fn test_fields_keep_insertion_order() {
        let arena = AstArena::new();
        let node = arena
            .node(NodeType::VariableDeclaration)
            .str("kind", "let")
            .list("declarations", &[])
            .finish();

        let names: Vec<&str> = node.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["kind", "declarations"]);
    }

    #[test]
    fn test_opt_stores_null() {
        let arena = AstArena::new();
        let id = arena.node(NodeType::Identifier).finish();
        let node = arena
            .node(NodeType::VariableDeclarator)
            .child("id", id)
            .opt("init", None)
            .finish();

        assert!(matches!(
            node.field("init"),
            Some(crate::FieldValue::Null)
        ));
        assert!(node.child("id").is_some());
    }

    #[test]
    fn test_span_and_loc() {
        let arena = AstArena::new();
        let loc = crate::Location::new(Position::new(1, 0), Position::new(1, 9));
        let node = arena
            .node(NodeType::DebuggerStatement)
            .span(0, 9)
            .loc(loc)
            .finish();

        assert_eq!(node.span, Some(crate::Span::new(0, 9)));
        assert_eq!(node.loc, Some(loc));
    }
}
