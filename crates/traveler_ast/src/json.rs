//! Loading ESTree JSON into arena nodes.
//!
//! Accepts the JSON shape produced by acorn, espree, esprima and friends:
//! every node is an object with a string `type`. Position keys (`start`,
//! `end`, `range`, `loc`) are lifted into [`EsNode::span`] and
//! [`EsNode::loc`]; every other key becomes a [`Field`].
//!
//! Neither parsing nor loading recurses per nesting level, so deeply nested
//! expressions (long `a + b + ...` chains) load like any other tree.

use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::{AstArena, AstError, EsNode, Field, FieldValue, Location, Span};

/// Keys consumed by the loader instead of being stored as fields.
const POSITION_KEYS: &[&str] = &["type", "start", "end", "range", "loc"];

/// Largest integer magnitude an `f64` holds exactly (2^53).
const MAX_SAFE_INTEGER: u64 = 1 << 53;

/// Parses ESTree JSON text and loads it into the arena.
///
/// # Example
///
/// ```rust
/// use traveler_ast::{AstArena, NodeType, json};
///
/// let arena = AstArena::new();
/// let root = json::load_str(&arena, r#"{"type": "Program", "body": []}"#).unwrap();
/// assert!(root.is(NodeType::Program));
/// ```
pub fn load_str<'a>(arena: &'a AstArena, source: &str) -> Result<&'a EsNode<'a>, AstError> {
    let value = parse(source)?;
    let root = load_value(arena, &value);
    dispose(value);
    root
}

/// Loads an ESTree JSON value into the arena.
///
/// The root must itself be a node; anything else is rejected with
/// [`AstError::NotANode`].
pub fn load_value<'a>(arena: &'a AstArena, value: &Value) -> Result<&'a EsNode<'a>, AstError> {
    Loader { arena }.load(value)
}

/// Returns true if the value is an ESTree node object.
pub fn is_node(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|object| object.get("type"))
        .is_some_and(Value::is_string)
}

/// Parses JSON text without serde_json's nesting limit, growing the stack
/// on the heap as needed.
fn parse(source: &str) -> Result<Value, AstError> {
    let mut deserializer = serde_json::Deserializer::from_str(source);
    deserializer.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}

/// Drops a parsed document one level at a time.
fn dispose(value: Value) {
    let mut stack = vec![value];
    while let Some(value) = stack.pop() {
        match value {
            Value::Array(items) => stack.extend(items),
            Value::Object(object) => stack.extend(object.into_iter().map(|(_, value)| value)),
            _ => {}
        }
    }
}

fn is_node_list(items: &[Value]) -> bool {
    items.iter().all(|item| item.is_null() || is_node(item))
}

/// Non-position entries of a node object, in source order.
fn node_fields(object: &Map<String, Value>) -> impl Iterator<Item = (&String, &Value)> {
    object
        .iter()
        .filter(|(key, _)| !POSITION_KEYS.contains(&key.as_str()))
}

enum Task<'v> {
    /// Validate a node and schedule its children.
    Enter { value: &'v Value, path: String },
    /// Build a node once all of its children are built.
    Finish(Pending<'v>),
}

/// A validated node waiting for its children.
struct Pending<'v> {
    object: &'v Map<String, Value>,
    type_name: &'v str,
    span: Option<Span>,
    loc: Option<Location>,
    children: usize,
}

struct Loader<'a> {
    arena: &'a AstArena,
}

impl<'a> Loader<'a> {
    /// Builds the tree bottom-up from an explicit work stack.
    ///
    /// Children are entered left to right, so finished nodes land on `built`
    /// in field order and each parent takes the last `children` of them.
    fn load(&self, root: &Value) -> Result<&'a EsNode<'a>, AstError> {
        let mut tasks = vec![Task::Enter {
            value: root,
            path: "$".to_string(),
        }];
        let mut built: Vec<&'a EsNode<'a>> = Vec::new();

        while let Some(task) = tasks.pop() {
            match task {
                Task::Enter { value, path } => {
                    let (pending, children) = enter(value, &path)?;
                    tasks.push(Task::Finish(pending));
                    tasks.extend(
                        children
                            .into_iter()
                            .rev()
                            .map(|(value, path)| Task::Enter { value, path }),
                    );
                }
                Task::Finish(pending) => {
                    let start = built.len().saturating_sub(pending.children);
                    let node = self.finish(pending, built.drain(start..));
                    built.push(node);
                }
            }
        }

        built.pop().ok_or_else(|| AstError::not_a_node("$"))
    }

    fn finish(
        &self,
        pending: Pending<'_>,
        mut children: impl Iterator<Item = &'a EsNode<'a>>,
    ) -> &'a EsNode<'a> {
        let mut fields = Vec::with_capacity(pending.object.len());
        for (key, value) in node_fields(pending.object) {
            let value = match value {
                Value::Null => FieldValue::Null,
                Value::Bool(b) => FieldValue::Bool(*b),
                Value::String(s) => FieldValue::Str(self.arena.alloc_str(s)),
                Value::Number(n) => self.number(n),
                Value::Object(_) if is_node(value) => {
                    children.next().map_or(FieldValue::Null, FieldValue::Node)
                }
                Value::Array(items) if is_node_list(items) => {
                    let items = self.arena.alloc_slice_fill_iter(
                        items
                            .iter()
                            .map(|item| if item.is_null() { None } else { children.next() }),
                    );
                    FieldValue::List(items)
                }
                Value::Object(_) | Value::Array(_) => self.raw(&value.to_string()),
            };
            fields.push(Field {
                name: self.arena.alloc_str(key),
                value,
            });
        }

        let mut node = EsNode::new(
            self.arena.alloc_str(pending.type_name),
            self.arena.alloc_slice_copy(&fields),
        );
        node.span = pending.span;
        node.loc = pending.loc;
        self.arena.alloc(node)
    }

    /// Integers beyond 2^53 keep their exact text.
    fn number(&self, n: &Number) -> FieldValue<'a> {
        let exact = match (n.as_u64(), n.as_i64()) {
            (Some(u), _) => u <= MAX_SAFE_INTEGER,
            (None, Some(i)) => i.unsigned_abs() <= MAX_SAFE_INTEGER,
            (None, None) => true,
        };
        match n.as_f64() {
            Some(f) if exact => FieldValue::Number(f),
            _ => self.raw(&n.to_string()),
        }
    }

    fn raw(&self, text: &str) -> FieldValue<'a> {
        FieldValue::Raw(self.arena.alloc_str(text))
    }
}

/// Child node values with their JSON paths.
type Children<'v> = Vec<(&'v Value, String)>;

/// Checks a node object and lists its child nodes with their paths, in field order.
fn enter<'v>(value: &'v Value, path: &str) -> Result<(Pending<'v>, Children<'v>), AstError> {
    let object = value
        .as_object()
        .ok_or_else(|| AstError::not_a_node(path))?;
    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| AstError::not_a_node(path))?;
    let span = span(object, path)?;
    let loc = loc(object, path)?;

    let mut children = Vec::new();
    for (key, value) in node_fields(object) {
        match value {
            Value::Object(_) if is_node(value) => children.push((value, format!("{path}.{key}"))),
            Value::Array(items) if is_node_list(items) => {
                for (index, item) in items.iter().enumerate() {
                    if !item.is_null() {
                        children.push((item, format!("{path}.{key}[{index}]")));
                    }
                }
            }
            _ => {}
        }
    }

    let pending = Pending {
        object,
        type_name,
        span,
        loc,
        children: children.len(),
    };
    Ok((pending, children))
}

fn span(object: &Map<String, Value>, path: &str) -> Result<Option<Span>, AstError> {
    let (start, end) = if let Some(range) = object.get("range") {
        let offsets = range
            .as_array()
            .filter(|offsets| offsets.len() == 2)
            .ok_or_else(|| AstError::invalid_span(path, "range must be [start, end]"))?;
        (offset(&offsets[0], path)?, offset(&offsets[1], path)?)
    } else {
        match (object.get("start"), object.get("end")) {
            (Some(start), Some(end)) => (offset(start, path)?, offset(end, path)?),
            (None, None) => return Ok(None),
            _ => {
                return Err(AstError::invalid_span(
                    path,
                    "start and end must be given together",
                ));
            }
        }
    };

    if start > end {
        return Err(AstError::invalid_span(
            path,
            format!("start {start} is after end {end}"),
        ));
    }
    Ok(Some(Span::new(start, end)))
}

fn offset(value: &Value, path: &str) -> Result<u32, AstError> {
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| AstError::invalid_span(path, format!("invalid offset {value}")))
}

fn loc(object: &Map<String, Value>, path: &str) -> Result<Option<Location>, AstError> {
    match object.get("loc") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => Location::deserialize(value)
            .map(Some)
            .map_err(|e| AstError::invalid_span(path, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{NodeType, Position};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_load_program() {
        let arena = AstArena::new();
        let root = load_value(
            &arena,
            &json!({
                "type": "Program",
                "sourceType": "module",
                "body": [
                    { "type": "EmptyStatement", "start": 0, "end": 1 }
                ]
            }),
        )
        .unwrap();

        assert!(root.is(NodeType::Program));
        assert_eq!(root.str_value("sourceType"), Some("module"));
        let body = root.list("body");
        assert_eq!(body.len(), 1);
        let stmt = body[0].unwrap();
        assert!(stmt.is(NodeType::EmptyStatement));
        assert_eq!(stmt.span, Some(Span::new(0, 1)));
        assert!(stmt.fields.is_empty());
    }

    #[test]
    fn test_array_nulls_become_holes() {
        let arena = AstArena::new();
        let root = load_value(
            &arena,
            &json!({
                "type": "ArrayExpression",
                "elements": [
                    { "type": "Identifier", "name": "a" },
                    null,
                    { "type": "Identifier", "name": "b" }
                ]
            }),
        )
        .unwrap();

        let names: Vec<Option<&str>> = root
            .list("elements")
            .iter()
            .map(|item| item.and_then(|node| node.str_value("name")))
            .collect();
        assert_eq!(names, vec![Some("a"), None, Some("b")]);
    }

    #[test]
    fn test_non_node_payloads_are_kept_raw() {
        let arena = AstArena::new();
        let root = load_value(
            &arena,
            &json!({
                "type": "Literal",
                "value": {},
                "raw": "/ab+c/i",
                "regex": { "pattern": "ab+c", "flags": "i" }
            }),
        )
        .unwrap();

        assert!(matches!(root.field("value"), Some(FieldValue::Raw("{}"))));
        assert!(root.child("regex").is_none());
        assert_eq!(
            serde_json::to_value(root).unwrap(),
            json!({
                "type": "Literal",
                "value": {},
                "raw": "/ab+c/i",
                "regex": { "pattern": "ab+c", "flags": "i" }
            })
        );
    }

    #[test]
    fn test_unknown_type_is_loaded() {
        let arena = AstArena::new();
        let root = load_str(
            &arena,
            r#"{"type": "NewExpression", "callee": {"type": "Identifier", "name": "Foo"}, "arguments": []}"#,
        )
        .unwrap();

        assert_eq!(root.kind, None);
        assert_eq!(root.type_name, "NewExpression");
        assert!(root.child("callee").is_some());
    }

    #[test]
    fn test_range_and_loc() {
        let arena = AstArena::new();
        let root = load_value(
            &arena,
            &json!({
                "type": "ThisExpression",
                "range": [4, 8],
                "loc": { "start": { "line": 1, "column": 4 }, "end": { "line": 1, "column": 8 } }
            }),
        )
        .unwrap();

        assert_eq!(root.span, Some(Span::new(4, 8)));
        assert_eq!(
            root.loc,
            Some(Location::new(Position::new(1, 4), Position::new(1, 8)))
        );
    }

    #[test]
    fn test_root_must_be_a_node() {
        let arena = AstArena::new();

        let err = load_value(&arena, &json!([1, 2])).unwrap_err();
        assert!(matches!(err, AstError::NotANode { ref path } if path == "$"));

        let err = load_value(&arena, &json!({ "type": 3 })).unwrap_err();
        assert!(matches!(err, AstError::NotANode { .. }));

        let err = load_value(&arena, &json!({ "body": [] })).unwrap_err();
        assert_eq!(err.to_string(), "Expected an ESTree node at $");
    }

    #[test]
    fn test_invalid_span_reports_path() {
        let arena = AstArena::new();
        let err = load_value(
            &arena,
            &json!({
                "type": "Program",
                "body": [{ "type": "EmptyStatement", "range": [1] }]
            }),
        )
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Invalid span at $.body[0]: range must be [start, end]"
        );
    }

    #[test]
    fn test_invalid_json() {
        let arena = AstArena::new();
        let err = load_str(&arena, "{ not json").unwrap_err();
        assert!(matches!(err, AstError::Json(_)));
    }

    #[test]
    fn test_loaded_tree_serializes_back() {
        let arena = AstArena::new();
        let node = load_str(
            &arena,
            r#"{"type":"ExpressionStatement","start":0,"end":2,
                "expression":{"type":"Identifier","start":0,"end":1,"name":"x"},
                "extra":{"parenthesized":true}}"#,
        )
        .unwrap();

        insta::assert_snapshot!(serde_json::to_string_pretty(node).unwrap(), @r#"
        {
          "type": "ExpressionStatement",
          "expression": {
            "type": "Identifier",
            "name": "x",
            "range": [
              0,
              1
            ]
          },
          "extra": {"parenthesized":true},
          "range": [
            0,
            2
          ]
        }
        "#);
    }

    /// `a + a + ... + a` as acorn nests it: the leftmost operand is deepest.
    fn binary_chain(depth: usize) -> String {
        let mut source = String::new();
        for _ in 0..depth {
            source.push_str(r#"{"type":"BinaryExpression","operator":"+","left":"#);
        }
        source.push_str(r#"{"type":"Identifier","name":"a"}"#);
        for _ in 0..depth {
            source.push_str(r#","right":{"type":"Identifier","name":"a"}}"#);
        }
        source
    }

    #[test]
    fn test_deep_chain_loads() {
        let arena = AstArena::new();
        let root = load_str(&arena, &binary_chain(10_000)).unwrap();

        let mut depth = 0;
        let mut node = root;
        while let Some(left) = node.child("left") {
            assert!(node.child("right").is_some());
            depth += 1;
            node = left;
        }
        assert_eq!(depth, 10_000);
        assert_eq!(node.str_value("name"), Some("a"));
    }

    #[test]
    fn test_children_keep_field_order() {
        let arena = AstArena::new();
        let root = load_value(
            &arena,
            &json!({
                "type": "CallExpression",
                "callee": { "type": "Identifier", "name": "f" },
                "arguments": [
                    { "type": "Identifier", "name": "a" },
                    null,
                    { "type": "Identifier", "name": "b" }
                ],
                "optional": false
            }),
        )
        .unwrap();

        assert_eq!(root.child("callee").and_then(|n| n.str_value("name")), Some("f"));
        let names: Vec<Option<&str>> = root
            .list("arguments")
            .iter()
            .map(|item| item.and_then(|node| node.str_value("name")))
            .collect();
        assert_eq!(names, vec![Some("a"), None, Some("b")]);
        assert!(matches!(root.field("optional"), Some(FieldValue::Bool(false))));
    }

    #[test]
    fn test_reversed_span_is_rejected() {
        let arena = AstArena::new();
        for node in [
            json!({ "type": "EmptyStatement", "range": [5, 2] }),
            json!({ "type": "EmptyStatement", "start": 5, "end": 2 }),
        ] {
            let err = load_value(&arena, &node).unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid span at $: start 5 is after end 2"
            );
        }
    }

    #[test]
    fn test_numbers_keep_their_value() {
        let arena = AstArena::new();
        let source =
            r#"{"type":"Literal","big":9007199254740993,"neg":-0.0,"half":0.5,"int":42}"#;
        let root = load_str(&arena, source).unwrap();

        assert!(matches!(
            root.field("big"),
            Some(FieldValue::Raw("9007199254740993"))
        ));
        assert!(matches!(root.field("int"), Some(FieldValue::Number(n)) if *n == 42.0));
        assert_eq!(serde_json::to_string(root).unwrap(), source);
    }
}
