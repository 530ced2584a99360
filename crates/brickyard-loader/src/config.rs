//! Loader configuration

use crate::format::FileFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable overriding [`LoaderConfig::base_dir`]
pub const BASE_DIR_ENV: &str = "BRICKYARD_BASE_DIR";

/// Settings for reading interceptor files
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory relative specifiers are resolved against (working
    /// directory when unset)
    pub base_dir: Option<PathBuf>,

    /// Format used when the extension is not recognized
    pub default_format: FileFormat,

    /// Skip entries whose `fn` is not in the catalog instead of failing
    pub allow_unknown_functions: bool,
}

impl LoaderConfig {
    /// Create default config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config with `base_dir` taken from `BRICKYARD_BASE_DIR`
    #[must_use]
    pub fn from_env() -> Self {
        let base_dir = std::env::var_os(BASE_DIR_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from);
        Self {
            base_dir,
            ..Self::default()
        }
    }

    /// Set base directory
    #[must_use]
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Set fallback format
    #[must_use]
    pub fn with_default_format(mut self, format: FileFormat) -> Self {
        self.default_format = format;
        self
    }

    /// Allow or forbid unknown function names
    #[must_use]
    pub fn with_unknown_functions(mut self, allow: bool) -> Self {
        self.allow_unknown_functions = allow;
        self
    }

    /// Resolve `specifier` against the base directory
    #[must_use]
    pub fn resolve_path(&self, specifier: impl AsRef<Path>) -> PathBuf {
        let path = specifier.as_ref();
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }

    /// Format for `path`, by extension or the configured fallback
    #[must_use]
    pub fn format_for(&self, path: &Path) -> FileFormat {
        FileFormat::from_path(path).unwrap_or(self.default_format)
    }
}
