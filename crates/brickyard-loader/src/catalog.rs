//! Named functions that declarative files may refer to

use brickyard_spec::Brick;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Functions available to `fn` entries, by name
pub struct FunctionCatalog<R = Value> {
    functions: IndexMap<String, Brick<R>>,
}

impl<R> FunctionCatalog<R> {
    /// Create empty catalog
    #[must_use]
    pub fn new() -> Self {
        Self {
            functions: IndexMap::new(),
        }
    }

    /// Add a function, builder style
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, function: impl Into<Brick<R>>) -> Self {
        self.insert(name, function);
        self
    }

    /// Add a function, returning the one it replaced
    pub fn insert(&mut self, name: impl Into<String>, function: impl Into<Brick<R>>) -> Option<Brick<R>> {
        self.functions.insert(name.into(), function.into())
    }

    /// Look up a function
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Brick<R>> {
        self.functions.get(name)
    }

    /// Check if `name` is available
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Number of functions
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Check if empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl<R> Default for FunctionCatalog<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> Clone for FunctionCatalog<R> {
    fn clone(&self) -> Self {
        Self {
            functions: self.functions.clone(),
        }
    }
}

impl<R> fmt::Debug for FunctionCatalog<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.functions.keys()).finish()
    }
}
