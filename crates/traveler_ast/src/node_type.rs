//! Node type definitions for ESTree.
//!
//! The catalogue covers the ESTree productions the traversal knows how to
//! descend into, plus the common leaf productions.
//! See: https://github.com/estree/estree

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! node_types {
    ($($(#[$doc:meta])* $name:ident,)*) => {
        /// Node types for ESTree.
        ///
        /// Nodes whose `type` is outside this catalogue are still representable;
        /// their [`crate::EsNode::kind`] is `None`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "PascalCase")]
        pub enum NodeType {
            $($(#[$doc])* $name,)*
        }

        impl NodeType {
            /// Every node type in the catalogue, in declaration order.
            pub const ALL: &'static [NodeType] = &[$(NodeType::$name,)*];

            /// Returns the ESTree `type` string for this node type.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(NodeType::$name => stringify!($name),)*
                }
            }
        }
    };
}

node_types! {
    // Program and blocks
    /// Root of a script or module.
    Program,
    /// `{ ... }` statement list.
    BlockStatement,
    /// Body of a class.
    ClassBody,

    // Functions
    /// `function f() {}` declaration.
    FunctionDeclaration,
    /// `function () {}` expression.
    FunctionExpression,
    /// `() => {}` expression.
    ArrowFunctionExpression,

    // Statements
    ExpressionStatement,
    WithStatement,
    ReturnStatement,
    ThrowStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,
    IfStatement,
    /// `case` or `default` clause of a switch.
    SwitchCase,
    SwitchStatement,
    TryStatement,
    /// `catch (param) { ... }` clause.
    CatchClause,
    WhileStatement,
    DoWhileStatement,
    ForStatement,
    ForInStatement,
    ForOfStatement,
    VariableDeclarator,
    VariableDeclaration,

    // Expressions
    UnaryExpression,
    UpdateExpression,
    SpreadElement,
    YieldExpression,
    AwaitExpression,
    ConditionalExpression,
    /// `[a, , b]`; elements may contain holes.
    ArrayExpression,
    ObjectExpression,
    Property,
    BinaryExpression,
    AssignmentExpression,
    LogicalExpression,
    MemberExpression,
    CallExpression,
    SequenceExpression,
    TemplateLiteral,
    /// `new.target` or `import.meta`.
    MetaProperty,

    // Patterns
    /// `[a, , b] = ...`; elements may contain holes.
    ArrayPattern,
    ObjectPattern,
    AssignmentProperty,
    RestElement,
    AssignmentPattern,

    // Classes
    ClassDeclaration,
    ClassExpression,
    MethodDefinition,

    // Modules
    ImportDeclaration,
    ImportSpecifier,
    ImportDefaultSpecifier,
    ImportNamespaceSpecifier,
    ExportNamedDeclaration,
    ExportSpecifier,
    ExportDefaultDeclaration,
    ExportAllDeclaration,

    // Leaves
    Identifier,
    Literal,
    EmptyStatement,
    DebuggerStatement,
    TemplateElement,
    Super,
    ThisExpression,
}

impl NodeType {
    /// Returns true if the built-in child table descends into this node type.
    ///
    /// Leaf types always produce zero children.
    #[inline]
    pub const fn has_children(&self) -> bool {
        !matches!(
            self,
            NodeType::Identifier
                | NodeType::Literal
                | NodeType::EmptyStatement
                | NodeType::DebuggerStatement
                | NodeType::TemplateElement
                | NodeType::Super
                | NodeType::ThisExpression
        )
    }

    /// Returns true if this node type is a statement.
    #[inline]
    pub const fn is_statement(&self) -> bool {
        matches!(
            self,
            NodeType::BlockStatement
                | NodeType::ExpressionStatement
                | NodeType::WithStatement
                | NodeType::ReturnStatement
                | NodeType::ThrowStatement
                | NodeType::LabeledStatement
                | NodeType::BreakStatement
                | NodeType::ContinueStatement
                | NodeType::IfStatement
                | NodeType::SwitchStatement
                | NodeType::TryStatement
                | NodeType::WhileStatement
                | NodeType::DoWhileStatement
                | NodeType::ForStatement
                | NodeType::ForInStatement
                | NodeType::ForOfStatement
                | NodeType::EmptyStatement
                | NodeType::DebuggerStatement
        )
    }

    /// Returns true if this node type is an expression.
    #[inline]
    pub const fn is_expression(&self) -> bool {
        matches!(
            self,
            NodeType::FunctionExpression
                | NodeType::ArrowFunctionExpression
                | NodeType::UnaryExpression
                | NodeType::UpdateExpression
                | NodeType::YieldExpression
                | NodeType::AwaitExpression
                | NodeType::ConditionalExpression
                | NodeType::ArrayExpression
                | NodeType::ObjectExpression
                | NodeType::BinaryExpression
                | NodeType::AssignmentExpression
                | NodeType::LogicalExpression
                | NodeType::MemberExpression
                | NodeType::CallExpression
                | NodeType::SequenceExpression
                | NodeType::TemplateLiteral
                | NodeType::MetaProperty
                | NodeType::ClassExpression
                | NodeType::Identifier
                | NodeType::Literal
                | NodeType::ThisExpression
        )
    }
}

impl FromStr for NodeType {
    type Err = UnknownNodeType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .iter()
            .copied()
            .find(|node_type| node_type.as_str() == s)
            .ok_or_else(|| UnknownNodeType(s.to_string()))
    }
}

impl std::fmt::Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A `type` string that is not part of the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown node type: {0}")]
pub struct UnknownNodeType(pub String);
