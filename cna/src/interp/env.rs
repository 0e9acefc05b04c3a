//! Environment for variable bindings
//!
//! The language has one flat variable table per run: no nested scopes,
//! first assignment creates a binding and later ones replace it.

use super::error::{InterpResult, RuntimeError};
use super::Value;
use std::collections::HashMap;

/// Environment holding variable bindings
#[derive(Debug, Clone, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Environment {
            bindings: HashMap::new(),
        }
    }

    /// Create or replace a binding
    pub fn define(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), value);
    }

    /// Look up a variable. Containers come back as aliases of the stored value.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.bindings.get(name).cloned()
    }

    /// Like [`Environment::get`], but a missing binding is a runtime error
    pub fn lookup(&self, name: &str) -> InterpResult<Value> {
        self.get(name)
            .ok_or_else(|| RuntimeError::unbound_variable(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Get all bindings (for debugging)
    pub fn bindings(&self) -> &HashMap<String, Value> {
        &self.bindings
    }
}
