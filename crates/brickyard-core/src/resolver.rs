//! Pluggable configuration resolution
//!
//! [`initialize_with`](crate::initialize_with) hands an external specifier
//! (a file path, a profile name, ...) to a [`ConfigResolver`] supplied by the
//! application. Every failure on this path is recoverable.

use crate::error::ConfigLoadError;
use crate::token::CompletionToken;

/// Resolves a specifier to a pre-built completion token
pub trait ConfigResolver<R> {
    /// Resolve `specifier`
    ///
    /// # Returns
    /// - `Ok(Some(token))` when a configuration was found
    /// - `Ok(None)` when nothing is configured behind the specifier
    /// - `Err(_)` when a configuration exists but cannot be used
    fn resolve(&self, specifier: &str) -> Result<Option<CompletionToken<R>>, ConfigLoadError>;
}

impl<R, F> ConfigResolver<R> for F
where
    F: Fn(&str) -> Result<Option<CompletionToken<R>>, ConfigLoadError>,
{
    fn resolve(&self, specifier: &str) -> Result<Option<CompletionToken<R>>, ConfigLoadError> {
        self(specifier)
    }
}

/// Resolver that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConfig;

impl<R> ConfigResolver<R> for NoConfig {
    fn resolve(&self, _specifier: &str) -> Result<Option<CompletionToken<R>>, ConfigLoadError> {
        Ok(None)
    }
}
