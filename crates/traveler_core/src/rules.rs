//! Built-in child rules for the ESTree catalogue.
//!
//! Each rule appends the immediate children of a node, in emission order,
//! to a slot buffer. Optional children that are absent and holes in list
//! fields are appended as `None`; the traversal drops them.

use traveler_ast::{EsNode, FieldValue, NodeType};

/// A child position: either empty or one child node.
pub type Slot<'a> = Option<&'a EsNode<'a>>;

/// Appends the children of `node` according to the built-in table for `node_type`.
///
/// Leaf types append nothing.
pub fn builtin_children<'a>(node_type: NodeType, node: &'a EsNode<'a>, out: &mut Vec<Slot<'a>>) {
    let mut slots = Slots { node, out };

    match node_type {
        NodeType::Program | NodeType::BlockStatement | NodeType::ClassBody => {
            slots.each("body");
        }

        NodeType::FunctionDeclaration
        | NodeType::FunctionExpression
        | NodeType::ArrowFunctionExpression => {
            slots.one("id");
            slots.each("params");
            slots.one("body");
        }

        NodeType::ExpressionStatement => slots.one("expression"),

        NodeType::WithStatement => {
            slots.one("object");
            slots.one("body");
        }

        NodeType::ReturnStatement
        | NodeType::ThrowStatement
        | NodeType::UnaryExpression
        | NodeType::UpdateExpression
        | NodeType::SpreadElement
        | NodeType::YieldExpression
        | NodeType::RestElement
        | NodeType::AwaitExpression => slots.one("argument"),

        NodeType::LabeledStatement => {
            slots.one("label");
            slots.one("body");
        }

        NodeType::BreakStatement | NodeType::ContinueStatement => slots.one("label"),

        NodeType::IfStatement | NodeType::ConditionalExpression => {
            slots.one("test");
            slots.one("consequent");
            slots.one("alternate");
        }

        NodeType::SwitchCase => {
            slots.one("test");
            slots.each("consequent");
        }

        NodeType::SwitchStatement => {
            slots.one("discriminant");
            slots.each("cases");
        }

        NodeType::TryStatement => {
            slots.one("block");
            slots.one("handler");
            slots.one("finalizer");
        }

        NodeType::CatchClause => {
            slots.one("param");
            slots.one("body");
        }

        NodeType::WhileStatement => {
            slots.one("test");
            slots.one("body");
        }

        NodeType::DoWhileStatement => {
            slots.one("body");
            slots.one("test");
        }

        NodeType::ForStatement => {
            slots.one("init");
            slots.one("test");
            slots.one("update");
            slots.one("body");
        }

        NodeType::ForInStatement | NodeType::ForOfStatement => {
            slots.one("left");
            slots.one("right");
            slots.one("body");
        }

        NodeType::VariableDeclarator => {
            slots.one("id");
            slots.one("init");
        }

        NodeType::VariableDeclaration => slots.each("declarations"),

        NodeType::ArrayExpression | NodeType::ArrayPattern => slots.each("elements"),

        NodeType::Property | NodeType::AssignmentProperty | NodeType::MethodDefinition => {
            slots.one("key");
            slots.one("value");
        }

        NodeType::ObjectExpression | NodeType::ObjectPattern => slots.each("properties"),

        NodeType::BinaryExpression
        | NodeType::AssignmentExpression
        | NodeType::LogicalExpression
        | NodeType::AssignmentPattern => {
            slots.one("left");
            slots.one("right");
        }

        NodeType::MemberExpression => {
            slots.one("object");
            slots.one("property");
        }

        NodeType::CallExpression => {
            slots.one("callee");
            slots.each("arguments");
        }

        NodeType::SequenceExpression => slots.each("expressions"),

        NodeType::TemplateLiteral => {
            slots.each("quasis");
            slots.each("expressions");
        }

        NodeType::ClassDeclaration | NodeType::ClassExpression => {
            slots.one("id");
            slots.one("superClass");
            slots.one("body");
        }

        NodeType::MetaProperty => {
            slots.one("meta");
            slots.one("property");
        }

        NodeType::ImportSpecifier
        | NodeType::ImportDefaultSpecifier
        | NodeType::ImportNamespaceSpecifier => slots.one("local"),

        NodeType::ImportDeclaration => {
            slots.each("specifiers");
            slots.one("source");
        }

        NodeType::ExportSpecifier => slots.one("exported"),

        NodeType::ExportNamedDeclaration => {
            slots.one("declaration");
            slots.each("specifiers");
            slots.one("source");
        }

        NodeType::ExportDefaultDeclaration => slots.one("declaration"),

        NodeType::ExportAllDeclaration => slots.one("source"),

        NodeType::Identifier
        | NodeType::Literal
        | NodeType::EmptyStatement
        | NodeType::DebuggerStatement
        | NodeType::TemplateElement
        | NodeType::Super
        | NodeType::ThisExpression => {}
    }
}

/// Appends the slots for the named fields, in order.
///
/// A node field yields its node, a list field yields every entry (holes
/// included), and anything else, including a missing field, yields one
/// empty slot.
pub fn field_children<'a, S>(node: &'a EsNode<'a>, fields: &[S], out: &mut Vec<Slot<'a>>)
where
    S: AsRef<str>,
{
    for name in fields {
        match node.field(name.as_ref()) {
            Some(FieldValue::Node(child)) => out.push(Some(*child)),
            Some(FieldValue::List(items)) => out.extend_from_slice(items),
            _ => out.push(None),
        }
    }
}

struct Slots<'a, 'o> {
    node: &'a EsNode<'a>,
    out: &'o mut Vec<Slot<'a>>,
}

impl<'a> Slots<'a, '_> {
    /// A single, possibly absent, child.
    #[inline]
    fn one(&mut self, name: &str) {
        self.out.push(self.node.child(name));
    }

    /// Every entry of a list field.
    #[inline]
    fn each(&mut self, name: &str) {
        self.out.extend_from_slice(self.node.list(name));
    }
}
