//! Name binding across module and function scopes
//!
//! Design: the module namespace is a shared cell so every function scope
//! created from it sees the same bindings. Assigning inside a function
//! creates a local shadow unless the name was declared `global` first, in
//! which case the write goes through to the shared cell.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::core::Value;
use crate::errors::{LessonError, Result};
use crate::logging::trace;

/// Module-level bindings; clones share storage
#[derive(Debug, Clone, Default)]
pub struct Namespace {
    bindings: Rc<RefCell<IndexMap<String, Value>>>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: impl Into<String>, value: impl Into<Value>) {
        self.bindings.borrow_mut().insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Result<Value> {
        self.bindings
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| LessonError::Name(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.borrow().contains_key(name)
    }

    /// Scope for one function activation
    pub fn enter(&self) -> LocalScope {
        LocalScope {
            globals: self.clone(),
            locals: IndexMap::new(),
            declared_global: HashSet::new(),
        }
    }
}

/// Bindings of a single function call
#[derive(Debug)]
pub struct LocalScope {
    globals: Namespace,
    locals: IndexMap<String, Value>,
    declared_global: HashSet<String>,
}

impl LocalScope {
    /// `global name`
    ///
    /// Fails if the name was already bound locally, as the interpreter
    /// rejects `global` after assignment.
    pub fn declare_global(&mut self, name: &str) -> Result<()> {
        if self.locals.contains_key(name) {
            return Err(LessonError::type_error(format!(
                "name '{}' is assigned to before global declaration",
                name
            )));
        }
        self.declared_global.insert(name.to_string());
        Ok(())
    }

    pub fn is_global(&self, name: &str) -> bool {
        self.declared_global.contains(name)
    }

    /// `name = value`
    pub fn assign(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        if self.is_global(name) {
            trace!(name, "write through to module scope");
            self.globals.set(name, value);
        } else {
            self.locals.insert(name.to_string(), value);
        }
    }

    /// Local binding first, then module scope
    pub fn lookup(&self, name: &str) -> Result<Value> {
        if !self.is_global(name) {
            if let Some(value) = self.locals.get(name) {
                return Ok(value.clone());
            }
        }
        self.globals.get(name)
    }

    pub fn locals(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.locals.iter().map(|(k, v)| (k.as_str(), v))
    }
}
