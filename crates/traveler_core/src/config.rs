//! Registry configuration.
//!
//! Grammar extensions can be described declaratively instead of in code:
//!
//! ```jsonc
//! {
//!   // field-name rules for kinds outside the built-in table
//!   "rules": {
//!     "NewExpression": ["callee", "arguments"]
//!   },
//!   "builtins": true
//! }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use jsonc_parser::ParseOptions;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{ChildRegistry, RegistryError, TraversalError};

/// Declarative description of a [`ChildRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Field-name rules, keyed by node kind.
    #[serde(default)]
    pub rules: BTreeMap<String, Vec<String>>,

    /// Whether the built-in table is enabled.
    #[serde(default = "default_builtins")]
    pub builtins: bool,
}

fn default_builtins() -> bool {
    true
}

impl RegistryConfig {
    /// Creates a configuration with the built-in table and no extra rules.
    pub fn new() -> Self {
        Self {
            rules: BTreeMap::new(),
            builtins: default_builtins(),
        }
    }

    /// Loads configuration from a JSON or JSONC file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraversalError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| TraversalError::config(format!("Failed to read config: {}", e)))?;

        let config = Self::from_json(&content)?;
        info!(
            path = %path.display(),
            rules = config.rules.len(),
            builtins = config.builtins,
            "loaded registry config"
        );
        Ok(config)
    }

    /// Parses configuration from a JSON string. Comments and trailing commas are allowed.
    ///
    /// An empty document yields the default configuration.
    pub fn from_json(json: &str) -> Result<Self, TraversalError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| TraversalError::config(format!("Invalid JSON: {}", e)))?;

        match value {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| TraversalError::config(format!("Invalid config: {}", e))),
            None => Ok(Self::new()),
        }
    }

    /// Adds every configured rule to `registry`, in kind-name order.
    ///
    /// Stops at the first malformed rule; earlier rules stay registered.
    pub fn apply(&self, registry: &mut ChildRegistry) -> Result<(), RegistryError> {
        for (kind, fields) in &self.rules {
            registry.register_fields(kind.as_str(), fields.iter().map(String::as_str))?;
        }
        Ok(())
    }

    /// Loads a configuration file and builds its registry.
    pub fn load(path: impl AsRef<Path>) -> Result<ChildRegistry, TraversalError> {
        let registry = Self::from_file(path)?.build_registry()?;
        Ok(registry)
    }

    /// Builds a fresh registry from this configuration.
    pub fn build_registry(&self) -> Result<ChildRegistry, RegistryError> {
        let mut registry = if self.builtins {
            ChildRegistry::new()
        } else {
            ChildRegistry::empty()
        };
        self.apply(&mut registry)?;
        Ok(registry)
    }
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self::new()
    }
}
