//! Interceptor registry
//!
//! Provides [`Registry`], the identifier → [`InterceptorSpec`] mapping built
//! during registration.

use crate::error::ConfigurationError;
use brickyard_spec::InterceptorSpec;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// Identifier → override policy mapping
///
/// Identifiers are unique and non-empty. Registration order is preserved.
pub struct Registry<R = Value> {
    entries: IndexMap<String, InterceptorSpec<R>>,
}

impl<R> Registry<R> {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Register a policy under `id`
    ///
    /// # Errors
    /// - [`ConfigurationError::EmptyIdentifier`] if `id` is empty
    /// - [`ConfigurationError::DuplicateIdentifier`] if `id` is taken
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        spec: InterceptorSpec<R>,
    ) -> Result<(), ConfigurationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ConfigurationError::EmptyIdentifier);
        }
        if self.entries.contains_key(&id) {
            return Err(ConfigurationError::duplicate(id));
        }

        self.entries.insert(id, spec);
        Ok(())
    }

    /// Look up the policy for `id`
    #[inline]
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&InterceptorSpec<R>> {
        self.entries.get(id)
    }

    /// Check if `id` is registered
    #[inline]
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Registered identifiers, in registration order
    #[inline]
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        self.entries.keys().map(String::as_str).collect()
    }

    /// Number of registered policies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(id, policy)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InterceptorSpec<R>)> {
        self.entries.iter().map(|(id, spec)| (id.as_str(), spec))
    }
}

impl<R> Default for Registry<R> {
    fn default() -> Self {
        Self::new()
    }
}

// Manual impl: policies share their functions, so `R` needs no `Clone`.
impl<R> Clone for Registry<R> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<R> fmt::Debug for Registry<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entries.iter()).finish()
    }
}
