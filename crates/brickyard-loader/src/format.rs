//! Supported document formats

use brickyard_core::ConfigLoadError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Format of an interceptor document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    /// JSON (`.json`)
    #[default]
    Json,
    /// YAML (`.yaml`, `.yml`)
    Yaml,
    /// TOML (`.toml`)
    Toml,
}

impl FileFormat {
    /// Supported file extensions (without dot)
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Self::Json => &["json"],
            Self::Yaml => &["yaml", "yml"],
            Self::Toml => &["toml"],
        }
    }

    /// Detect format from a path's extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        [Self::Json, Self::Yaml, Self::Toml]
            .into_iter()
            .find(|format| format.extensions().contains(&ext.as_str()))
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extensions()[0])
    }
}

impl FromStr for FileFormat {
    type Err = ConfigLoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "toml" => Ok(Self::Toml),
            other => Err(ConfigLoadError::UnsupportedFormat(other.to_string())),
        }
    }
}
