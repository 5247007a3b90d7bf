//! EsNode definition.
//!
//! The core AST node type used throughout Traveler.

use serde::Serialize;
use serde::ser::{SerializeMap, SerializeSeq};
use serde_json::value::RawValue;

use crate::{Location, NodeType, Span};

/// A node in an ESTree AST.
///
/// `EsNode` keeps the raw ESTree `type` string alongside the resolved
/// [`NodeType`], so nodes outside the catalogue survive loading and can
/// still be traversed as leaves or taught to the registry later.
///
/// # Lifetime
///
/// The `'a` lifetime parameter ties this node to its arena allocator,
/// ensuring that all child references remain valid.
///
/// # Example
///
/// ```rust
/// use traveler_ast::{AstArena, NodeType};
///
/// let arena = AstArena::new();
///
/// let test = arena.node(NodeType::Identifier).str("name", "ok").finish();
/// let body = arena.node(NodeType::BlockStatement).list("body", &[]).finish();
/// let stmt = arena
///     .node(NodeType::IfStatement)
///     .child("test", test)
///     .child("consequent", body)
///     .null("alternate")
///     .finish();
///
/// assert!(stmt.child("test").is_some());
/// assert!(stmt.child("alternate").is_none());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EsNode<'a> {
    /// The ESTree `type` string.
    pub type_name: &'a str,

    /// The catalogue type, or `None` when `type_name` is outside the catalogue.
    pub kind: Option<NodeType>,

    /// Byte span in the source text, when the producer recorded one.
    pub span: Option<Span>,

    /// Line/column location, when the producer recorded one.
    pub loc: Option<Location>,

    /// Kind-specific fields, in source order.
    pub fields: &'a [Field<'a>],
}

/// A named field of a node.
#[derive(Debug, Clone, Copy)]
pub struct Field<'a> {
    pub name: &'a str,
    pub value: FieldValue<'a>,
}

/// The value stored in a node field.
///
/// Only `Node` and `List` are structural; the traversal never looks at the
/// scalar variants.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    /// An explicit `null`.
    Null,
    /// A single child node.
    Node(&'a EsNode<'a>),
    /// An ordered list of children; `None` entries are holes.
    List(&'a [Option<&'a EsNode<'a>>]),
    Bool(bool),
    Number(f64),
    Str(&'a str),
    /// Any other payload, kept as serialized JSON text.
    Raw(&'a str),
}

impl<'a> EsNode<'a> {
    /// Creates a node, resolving `type_name` against the catalogue.
    pub fn new(type_name: &'a str, fields: &'a [Field<'a>]) -> Self {
        Self {
            type_name,
            kind: type_name.parse().ok(),
            span: None,
            loc: None,
            fields,
        }
    }

    /// Returns true if this node has the given catalogue type.
    #[inline]
    pub fn is(&self, node_type: NodeType) -> bool {
        self.kind == Some(node_type)
    }

    /// Returns the value of the named field, if the node has it.
    pub fn field(&self, name: &str) -> Option<&'a FieldValue<'a>> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| &field.value)
    }

    /// Returns the child node stored in the named field.
    ///
    /// A missing field, an explicit `null`, and a non-node payload all read
    /// as `None`.
    pub fn child(&self, name: &str) -> Option<&'a EsNode<'a>> {
        match self.field(name) {
            Some(FieldValue::Node(node)) => Some(*node),
            _ => None,
        }
    }

    /// Returns the entries of the named list field.
    ///
    /// Anything other than a list reads as an empty slice.
    pub fn list(&self, name: &str) -> &'a [Option<&'a EsNode<'a>>] {
        match self.field(name) {
            Some(FieldValue::List(items)) => *items,
            _ => &[],
        }
    }

    /// Returns the string payload of the named field.
    pub fn str_value(&self, name: &str) -> Option<&'a str> {
        match self.field(name) {
            Some(FieldValue::Str(s)) => Some(*s),
            _ => None,
        }
    }
}

impl Serialize for EsNode<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut len = 1 + self.fields.len(); // type + fields
        if self.span.is_some() {
            len += 1;
        }
        if self.loc.is_some() {
            len += 1;
        }

        let mut state = serializer.serialize_map(Some(len))?;
        state.serialize_entry("type", self.type_name)?;

        for field in self.fields {
            state.serialize_entry(field.name, &field.value)?;
        }

        if let Some(span) = &self.span {
            state.serialize_entry("range", &[span.start, span.end])?;
        }
        if let Some(loc) = &self.loc {
            state.serialize_entry("loc", loc)?;
        }

        state.end()
    }
}

impl Serialize for FieldValue<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            FieldValue::Null => serializer.serialize_unit(),
            FieldValue::Node(node) => node.serialize(serializer),
            FieldValue::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items.iter() {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            FieldValue::Bool(b) => serializer.serialize_bool(*b),
            FieldValue::Number(n) => {
                // Integral values go back out without a fraction, as they came in.
                // -0.0 and values past 2^53 stay floats.
                let integral = n.fract() == 0.0
                    && n.abs() <= 9_007_199_254_740_992.0
                    && !(*n == 0.0 && n.is_sign_negative());
                if integral {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            FieldValue::Str(s) => serializer.serialize_str(s),
            FieldValue::Raw(raw) => {
                let raw: &RawValue =
                    serde_json::from_str(raw).map_err(serde::ser::Error::custom)?;
                raw.serialize(serializer)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::AstArena;

    #[test]
    fn test_new_resolves_kind() {
        let node = EsNode::new("IfStatement", &[]);
        assert_eq!(node.kind, Some(NodeType::IfStatement));
        assert!(node.is(NodeType::IfStatement));

        let node = EsNode::new("ChainExpression", &[]);
        assert_eq!(node.kind, None);
        assert!(!node.is(NodeType::IfStatement));
    }

    #[test]
    fn test_missing_field_reads_as_absent() {
        let arena = AstArena::new();
        let node = arena.node(NodeType::ReturnStatement).finish();

        assert!(node.field("argument").is_none());
        assert!(node.child("argument").is_none());
        assert!(node.list("argument").is_empty());
    }

    #[test]
    fn test_non_node_payload_is_not_a_child() {
        let arena = AstArena::new();
        let node = arena
            .node(NodeType::Literal)
            .str("raw", "'x'")
            .num("value", 1.0)
            .finish();

        assert!(node.child("raw").is_none());
        assert!(node.list("value").is_empty());
        assert_eq!(node.str_value("raw"), Some("'x'"));
        assert_eq!(node.str_value("value"), None);
    }

    #[test]
    fn test_list_keeps_holes() {
        let arena = AstArena::new();
        let a = arena.node(NodeType::Identifier).finish();
        let node = arena
            .node(NodeType::ArrayExpression)
            .holes("elements", &[Some(a), None, Some(a)])
            .finish();

        let elements = node.list("elements");
        assert_eq!(elements.len(), 3);
        assert!(elements[1].is_none());
    }

    #[test]
    fn test_serialize_node() {
        let arena = AstArena::new();
        let arg = arena.node(NodeType::Identifier).str("name", "x").finish();
        let node = arena
            .node(NodeType::UnaryExpression)
            .str("operator", "!")
            .bool("prefix", true)
            .child("argument", arg)
            .span(0, 2)
            .finish();

        let value = serde_json::to_value(node).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "type": "UnaryExpression",
                "operator": "!",
                "prefix": true,
                "argument": { "type": "Identifier", "name": "x" },
                "range": [0, 2]
            })
        );
    }

    #[test]
    fn test_serialize_numbers_and_holes() {
        let arena = AstArena::new();
        let one = arena.node(NodeType::Literal).num("value", 1.0).finish();
        let half = arena.node(NodeType::Literal).num("value", 0.5).finish();
        let node = arena
            .node(NodeType::ArrayExpression)
            .holes("elements", &[Some(one), None, Some(half)])
            .finish();

        let json = serde_json::to_string(node).unwrap();
        assert_eq!(
            json,
            r#"{"type":"ArrayExpression","elements":[{"type":"Literal","value":1},null,{"type":"Literal","value":0.5}]}"#
        );
    }

    #[test]
    fn test_serialize_negative_zero_and_large_numbers() {
        let arena = AstArena::new();
        let node = arena
            .node(NodeType::Literal)
            .num("zero", -0.0)
            .num("neg", -3.0)
            .num("huge", 1e20)
            .finish();

        let json = serde_json::to_string(node).unwrap();
        assert_eq!(
            json,
            r#"{"type":"Literal","zero":-0.0,"neg":-3,"huge":1e20}"#
        );
    }
}
