//! Enrollment configuration

use serde::{Deserialize, Serialize};

/// Brickyard configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrickyardConfig {
    /// Emit the advisory when enrolling against an empty registry
    pub warn_on_empty_registry: bool,
}

impl BrickyardConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With empty-registry advisory enabled or silenced
    #[inline]
    #[must_use]
    pub fn with_empty_registry_warning(mut self, enabled: bool) -> Self {
        self.warn_on_empty_registry = enabled;
        self
    }
}

impl Default for BrickyardConfig {
    fn default() -> Self {
        Self {
            warn_on_empty_registry: true,
        }
    }
}
