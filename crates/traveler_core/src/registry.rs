//! Child-extraction registry.
//!
//! Maps a node kind to the rule producing its immediate children. The
//! built-in table covers the [`NodeType`] catalogue; callers can add rules
//! for grammar extensions or override built-in ones.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock};

use tracing::debug;
use traveler_ast::{EsNode, NodeType};

use crate::RegistryError;
use crate::rules::{self, Slot};

/// Signature of a child rule: append the children of a node, in emission order.
pub type ChildRule = dyn for<'a> Fn(&'a EsNode<'a>, &mut Vec<Slot<'a>>) + Send + Sync;

static BUILTIN: OnceLock<ChildRegistry> = OnceLock::new();

#[derive(Clone)]
enum Rule {
    Custom(Arc<ChildRule>),
    Fields(Arc<[String]>),
}

impl Rule {
    #[inline]
    fn apply<'a>(&self, node: &'a EsNode<'a>, out: &mut Vec<Slot<'a>>) {
        match self {
            Rule::Custom(rule) => rule(node, out),
            Rule::Fields(fields) => rules::field_children(node, &fields[..], out),
        }
    }
}

/// Registry of child rules, keyed by ESTree `type` string.
///
/// Lookup order for a node:
/// 1. a rule registered for its `type_name`;
/// 2. the built-in rule for its [`NodeType`] (unless built from [`ChildRegistry::empty`]);
/// 3. otherwise the node is a leaf.
///
/// # Example
///
/// ```rust
/// use traveler_ast::AstArena;
/// use traveler_core::ChildRegistry;
///
/// let mut registry = ChildRegistry::new();
/// registry.register_fields("NewExpression", ["callee", "arguments"]).unwrap();
///
/// let arena = AstArena::new();
/// let callee = arena.node_named("Identifier").str("name", "Foo").finish();
/// let new_expr = arena
///     .node_named("NewExpression")
///     .child("callee", callee)
///     .list("arguments", &[])
///     .finish();
///
/// assert_eq!(registry.children_of(new_expr).len(), 1);
/// ```
#[derive(Clone)]
pub struct ChildRegistry {
    builtins: bool,
    rules: HashMap<String, Rule>,
}

impl ChildRegistry {
    /// Creates a registry pre-populated with the built-in table.
    pub fn new() -> Self {
        Self {
            builtins: true,
            rules: HashMap::new(),
        }
    }

    /// Creates a registry without the built-in table; every kind is a leaf
    /// until a rule is registered for it.
    pub fn empty() -> Self {
        Self {
            builtins: false,
            rules: HashMap::new(),
        }
    }

    /// Returns the shared default registry.
    pub fn builtin() -> &'static ChildRegistry {
        BUILTIN.get_or_init(ChildRegistry::new)
    }

    /// Registers a rule for `kind`, replacing any previous rule for it.
    ///
    /// The rule receives the node and appends its children in emission
    /// order; `None` entries are skipped by the traversal.
    pub fn register<F>(&mut self, kind: impl Into<String>, rule: F) -> Result<(), RegistryError>
    where
        F: for<'a> Fn(&'a EsNode<'a>, &mut Vec<Slot<'a>>) + Send + Sync + 'static,
    {
        let kind = validate_kind(kind.into())?;
        self.insert(kind, Rule::Custom(Arc::new(rule)));
        Ok(())
    }

    /// Registers a declarative rule reading the named fields in order.
    ///
    /// A node field yields its node, a list field yields each entry, and
    /// anything else yields nothing.
    pub fn register_fields<I, S>(
        &mut self,
        kind: impl Into<String>,
        fields: I,
    ) -> Result<(), RegistryError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let kind = validate_kind(kind.into())?;
        let fields: Vec<String> = fields.into_iter().map(Into::into).collect();

        if fields.is_empty() {
            return Err(RegistryError::EmptyRule { kind });
        }

        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.is_empty() || field.chars().any(char::is_whitespace) {
                return Err(RegistryError::InvalidField {
                    kind,
                    field: field.clone(),
                });
            }
            if !seen.insert(field.as_str()) {
                return Err(RegistryError::DuplicateField {
                    kind,
                    field: field.clone(),
                });
            }
        }

        self.insert(kind, Rule::Fields(fields.into()));
        Ok(())
    }

    /// Removes the registered rule for `kind`.
    ///
    /// Built-in behavior (or the leaf fallback) applies again afterwards.
    /// Returns true if a rule was removed.
    pub fn unregister(&mut self, kind: &str) -> bool {
        let removed = self.rules.remove(kind).is_some();
        if removed {
            debug!(kind, "unregistered child rule");
        }
        removed
    }

    /// Returns true if nodes of `kind` can have children under this registry.
    pub fn contains(&self, kind: &str) -> bool {
        self.rules.contains_key(kind) || self.builtin_rule(kind).is_some()
    }

    /// Returns true if a registered rule replaces the built-in one for `kind`.
    pub fn is_overridden(&self, kind: &str) -> bool {
        self.rules.contains_key(kind) && self.builtin_rule(kind).is_some()
    }

    /// Appends the children of `node`, in emission order, to `out`.
    pub fn extract_into<'a>(&self, node: &'a EsNode<'a>, out: &mut Vec<Slot<'a>>) {
        if let Some(rule) = self.rules.get(node.type_name) {
            rule.apply(node, out);
            return;
        }
        if self.builtins {
            if let Some(kind) = node.kind {
                rules::builtin_children(kind, node, out);
            }
        }
    }

    /// Returns the children of `node`, in emission order.
    ///
    /// Absent optional children and holes appear as `None`.
    pub fn children_of<'a>(&self, node: &'a EsNode<'a>) -> Vec<Slot<'a>> {
        let mut out = Vec::new();
        self.extract_into(node, &mut out);
        out
    }

    fn builtin_rule(&self, kind: &str) -> Option<NodeType> {
        if !self.builtins {
            return None;
        }
        kind.parse::<NodeType>()
            .ok()
            .filter(NodeType::has_children)
    }

    fn insert(&mut self, kind: String, rule: Rule) {
        let overrides = self.rules.contains_key(&kind) || self.builtin_rule(&kind).is_some();
        debug!(kind = %kind, overrides, "registered child rule");
        self.rules.insert(kind, rule);
    }
}

impl Default for ChildRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChildRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        f.debug_struct("ChildRegistry")
            .field("builtins", &self.builtins)
            .field("rules", &kinds)
            .finish()
    }
}

fn validate_kind(kind: String) -> Result<String, RegistryError> {
    if kind.is_empty() || kind.chars().any(char::is_whitespace) {
        return Err(RegistryError::InvalidKind(kind));
    }
    Ok(kind)
}
