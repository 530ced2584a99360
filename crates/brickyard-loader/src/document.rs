//! Interceptor documents
//!
//! The on-disk shape of a registry:
//!
//! ```json
//! {
//!   "interceptors": {
//!     "hi":  { "args": ["from interception!"], "args_strategy": "replace" },
//!     "ok":  { "fn": "always_false" },
//!     "cfg": { "fn": "load_cfg", "args": [{ "debug": true }], "args_strategy": "merge" }
//!   }
//! }
//! ```
//!
//! `fn` names a function from the application's
//! [`FunctionCatalog`](crate::FunctionCatalog); code itself is never loaded.

use crate::catalog::FunctionCatalog;
use crate::format::FileFormat;
use brickyard_core::{ConfigLoadError, InterceptorSpec, PolicyKind};
use brickyard_spec::ArgsStrategy;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

/// One declared interceptor
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterceptorDecl {
    /// Catalog name of the replacement function
    #[serde(default, rename = "fn", skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    /// Registered positional arguments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args: Option<Vec<Value>>,

    /// Strategy for `args`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub args_strategy: Option<ArgsStrategy>,
}

impl InterceptorDecl {
    /// Check the declaration's shape and classify it
    ///
    /// # Errors
    /// [`ConfigLoadError::InvalidShape`] when `args` and `args_strategy` are
    /// not given together, or when neither `fn` nor `args` is given.
    pub fn kind(&self, id: &str) -> Result<PolicyKind, ConfigLoadError> {
        match (&self.args, self.args_strategy) {
            (Some(_), Some(ArgsStrategy::Replace)) => Ok(PolicyKind::ReplaceArgs),
            (Some(_), Some(ArgsStrategy::Merge)) => Ok(PolicyKind::MergeArgs),
            (Some(_), None) => Err(ConfigLoadError::invalid_shape(
                id,
                "`args_strategy` is required when `args` is given",
            )),
            (None, Some(_)) => Err(ConfigLoadError::invalid_shape(
                id,
                "`args_strategy` is only allowed together with `args`",
            )),
            (None, None) if self.function.is_some() => Ok(PolicyKind::Function),
            (None, None) => Err(ConfigLoadError::invalid_shape(
                id,
                "an interceptor needs `fn`, `args`, or both",
            )),
        }
    }

    /// Build the policy, resolving `fn` through `catalog`
    ///
    /// # Errors
    /// - [`ConfigLoadError::InvalidShape`], see [`kind`](Self::kind)
    /// - [`ConfigLoadError::UnknownFunction`] when `fn` is not in `catalog`
    pub fn to_spec<R>(
        &self,
        id: &str,
        catalog: &FunctionCatalog<R>,
    ) -> Result<InterceptorSpec<R>, ConfigLoadError> {
        let kind = self.kind(id)?;
        let function = match &self.function {
            Some(name) => Some(catalog.get(name).cloned().ok_or_else(|| {
                ConfigLoadError::UnknownFunction {
                    id: id.to_string(),
                    function: name.clone(),
                }
            })?),
            None => None,
        };

        let args = self.args.clone().unwrap_or_default();
        let spec = match (kind, function) {
            (PolicyKind::Function, Some(function)) => InterceptorSpec::Function(function),
            (PolicyKind::ReplaceArgs, function) => InterceptorSpec::Arguments {
                function,
                args,
                strategy: ArgsStrategy::Replace,
            },
            (PolicyKind::MergeArgs, function) => InterceptorSpec::Arguments {
                function,
                args,
                strategy: ArgsStrategy::Merge,
            },
            (PolicyKind::Function, None) => {
                return Err(ConfigLoadError::invalid_shape(id, "missing `fn`"));
            }
        };
        Ok(spec)
    }
}

/// Declarations in document order
///
/// Duplicate identifiers are kept so that registration can reject them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Declarations(Vec<(String, InterceptorDecl)>);

impl Declarations {
    /// Create from `(id, declaration)` pairs
    #[must_use]
    pub fn new(entries: Vec<(String, InterceptorDecl)>) -> Self {
        Self(entries)
    }

    /// Iterate in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &InterceptorDecl)> {
        self.0.iter().map(|(id, decl)| (id.as_str(), decl))
    }

    /// Number of declarations
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if nothing is declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Declarations {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, decl) in &self.0 {
            map.serialize_entry(id, decl)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Declarations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DeclarationsVisitor;

        impl<'de> Visitor<'de> for DeclarationsVisitor {
            type Value = Declarations;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of interceptor ids to declarations")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, InterceptorDecl>()? {
                    entries.push(entry);
                }
                Ok(Declarations(entries))
            }
        }

        deserializer.deserialize_map(DeclarationsVisitor)
    }
}

/// Root of an interceptor document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterceptorDocument {
    /// Declared interceptors
    #[serde(default)]
    pub interceptors: Declarations,
}

impl InterceptorDocument {
    /// Validate every declaration's shape
    ///
    /// # Errors
    /// First [`ConfigLoadError::InvalidShape`] found.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        self.interceptors
            .iter()
            .try_for_each(|(id, decl)| decl.kind(id).map(drop))
    }
}

/// Parse `content` as an interceptor document
///
/// `specifier` only names the source in errors.
///
/// # Errors
/// [`ConfigLoadError::Parse`] on malformed input.
pub fn parse_document(
    content: &str,
    format: FileFormat,
    specifier: &str,
) -> Result<InterceptorDocument, ConfigLoadError> {
    let parsed = match format {
        FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
        FileFormat::Yaml => {
            if content.trim().is_empty() {
                return Ok(InterceptorDocument::default());
            }
            serde_yaml::from_str(content).map_err(|e| e.to_string())
        }
        FileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
    };
    parsed.map_err(|message| ConfigLoadError::parse(specifier, message))
}
