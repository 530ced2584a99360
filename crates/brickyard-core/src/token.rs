//! Completion tokens
//!
//! A [`CompletionToken`] proves registration was finalized. It is the only
//! way into the enrollment phase besides the empty default.

use crate::registry::Registry;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Sealed, read-only view of one registry
///
/// Obtained from [`RegistrationHandle::complete`](crate::RegistrationHandle::complete)
/// or, bypassing registration, from [`CompletionToken::default`].
pub struct CompletionToken<R = Value> {
    registry: Arc<Registry<R>>,
}

impl<R> CompletionToken<R> {
    pub(crate) fn new(registry: Arc<Registry<R>>) -> Self {
        Self { registry }
    }

    /// Registry this token was completed from
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Registry<R> {
        &self.registry
    }

    /// Number of registered policies
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Check if no policy was registered
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Check whether both tokens view the same registry snapshot
    #[inline]
    #[must_use]
    pub fn same_registry(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.registry, &other.registry)
    }

    pub(crate) fn into_registry(self) -> Arc<Registry<R>> {
        self.registry
    }
}

impl<R> Default for CompletionToken<R> {
    fn default() -> Self {
        Self::new(Arc::new(Registry::new()))
    }
}

impl<R> Clone for CompletionToken<R> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<R> fmt::Debug for CompletionToken<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompletionToken")
            .field("ids", &self.registry.ids())
            .finish()
    }
}
