//! Error types for Brickyard Core
//!
//! - [`ConfigurationError`]: fatal registration failures
//! - [`ConfigLoadError`]: external configuration failures, always recovered
//!   by [`initialize_with`](crate::initialize_with)
//! - [`LifecycleError`]: illegal phase transitions

use crate::lifecycle::LifecycleState;
use std::path::PathBuf;

/// Registration errors
///
/// Always surfaced to the caller, never recovered internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// Identifier already present in this registry
    #[error("this id ({id}) is already a member of the brickyard")]
    DuplicateIdentifier {
        /// Offending identifier
        id: String,
    },

    /// Identifiers must be non-empty
    #[error("interceptor id must not be empty")]
    EmptyIdentifier,
}

impl ConfigurationError {
    /// Create duplicate identifier error
    #[inline]
    #[must_use]
    pub fn duplicate(id: impl Into<String>) -> Self {
        Self::DuplicateIdentifier { id: id.into() }
    }
}

/// Failures resolving an external configuration specifier
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    /// Nothing exists behind the specifier
    #[error("no configuration found at '{0}'")]
    NotFound(String),

    /// IO error while reading
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Document could not be parsed
    #[error("parse error in {specifier}: {message}")]
    Parse {
        /// Source of the document
        specifier: String,
        /// Parser message
        message: String,
    },

    /// Format not recognized
    #[error("unsupported configuration format: '{0}'")]
    UnsupportedFormat(String),

    /// Document parsed but does not describe interceptors
    #[error("invalid interceptor '{id}': {reason}")]
    InvalidShape {
        /// Offending interceptor id
        id: String,
        /// What is wrong with it
        reason: String,
    },

    /// Declared function missing from the catalog
    #[error("interceptor '{id}' refers to unknown function '{function}'")]
    UnknownFunction {
        /// Interceptor declaring it
        id: String,
        /// Name missing from the catalog
        function: String,
    },

    /// Registration rejected the declarations
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl ConfigLoadError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create parse error for specifier
    pub fn parse(specifier: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            specifier: specifier.into(),
            message: message.into(),
        }
    }

    /// Create invalid shape error
    pub fn invalid_shape(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidShape {
            id: id.into(),
            reason: reason.into(),
        }
    }
}

/// Phase ordering violations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    /// Transition not permitted by the ordering protocol
    #[error("illegal transition: {from} -> {to}")]
    IllegalTransition {
        /// Current state
        from: LifecycleState,
        /// Requested state
        to: LifecycleState,
    },
}
