//! Turning interceptor files into completion tokens

use crate::catalog::FunctionCatalog;
use crate::config::LoaderConfig;
use crate::document::{parse_document, InterceptorDocument};
use crate::format::FileFormat;
use brickyard_core::{begin_registration, CompletionToken, ConfigLoadError, ConfigResolver};
use std::fmt;
use std::io;
use std::path::Path;
use tracing::{debug, warn};

/// Register every declaration of `document`
///
/// # Errors
/// - [`ConfigLoadError::InvalidShape`] for a malformed declaration
/// - [`ConfigLoadError::UnknownFunction`] unless `allow_unknown_functions`
/// - [`ConfigLoadError::Configuration`] for duplicate or empty ids
pub fn build_token<R>(
    document: &InterceptorDocument,
    catalog: &FunctionCatalog<R>,
    config: &LoaderConfig,
) -> Result<CompletionToken<R>, ConfigLoadError> {
    let mut registration = begin_registration();
    for (id, decl) in document.interceptors.iter() {
        let spec = match decl.to_spec(id, catalog) {
            Ok(spec) => spec,
            Err(ConfigLoadError::UnknownFunction { id, function }) if config.allow_unknown_functions => {
                warn!(id = %id, function = %function, "skipping interceptor with unknown function");
                continue;
            }
            Err(err) => return Err(err),
        };
        registration = registration.intercept(id, spec)?;
    }
    Ok(registration.complete())
}

/// Parse and register an in-memory document
///
/// # Errors
/// Parse errors, plus everything [`build_token`] reports.
pub fn load_str<R>(
    content: &str,
    format: FileFormat,
    catalog: &FunctionCatalog<R>,
    config: &LoaderConfig,
) -> Result<CompletionToken<R>, ConfigLoadError> {
    let document = parse_document(content, format, "<inline>")?;
    build_token(&document, catalog, config)
}

/// Read and parse the file at `path` as `format`
///
/// `path` is used as given; base directory resolution is left to callers.
///
/// # Errors
/// - [`ConfigLoadError::NotFound`] when the file does not exist
/// - [`ConfigLoadError::Io`] for other read failures
/// - [`ConfigLoadError::Parse`] on malformed content
pub fn read_document(path: &Path, format: FileFormat) -> Result<InterceptorDocument, ConfigLoadError> {
    let specifier = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => ConfigLoadError::NotFound(specifier.clone()),
        _ => ConfigLoadError::io_error(path, err),
    })?;
    debug!(path = %specifier, format = %format, "loading interceptor file");

    parse_document(&content, format, &specifier)
}

/// Read, parse and register the file at `path`
///
/// `path` is resolved against [`LoaderConfig::base_dir`]; the format comes
/// from its extension or [`LoaderConfig::default_format`].
///
/// # Errors
/// Everything [`read_document`] and [`build_token`] report.
pub fn load_file<R>(
    path: impl AsRef<Path>,
    catalog: &FunctionCatalog<R>,
    config: &LoaderConfig,
) -> Result<CompletionToken<R>, ConfigLoadError> {
    let path = config.resolve_path(path);
    let document = read_document(&path, config.format_for(&path))?;
    let token = build_token(&document, catalog, config)?;
    debug!(path = %path.display(), interceptors = token.len(), "interceptor file loaded");
    Ok(token)
}

/// [`ConfigResolver`] reading interceptor files
///
/// A missing file means "nothing configured" and resolves to `Ok(None)`.
pub struct FileResolver<R = serde_json::Value> {
    catalog: FunctionCatalog<R>,
    config: LoaderConfig,
}

impl<R> FileResolver<R> {
    /// Create with default loader config
    #[must_use]
    pub fn new(catalog: FunctionCatalog<R>) -> Self {
        Self::with_config(catalog, LoaderConfig::default())
    }

    /// Create with explicit loader config
    #[must_use]
    pub fn with_config(catalog: FunctionCatalog<R>, config: LoaderConfig) -> Self {
        Self { catalog, config }
    }

    /// Function catalog
    #[must_use]
    pub fn catalog(&self) -> &FunctionCatalog<R> {
        &self.catalog
    }

    /// Loader config
    #[must_use]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }
}

impl<R> ConfigResolver<R> for FileResolver<R> {
    fn resolve(&self, specifier: &str) -> Result<Option<CompletionToken<R>>, ConfigLoadError> {
        match load_file(specifier, &self.catalog, &self.config) {
            Ok(token) => Ok(Some(token)),
            Err(ConfigLoadError::NotFound(_)) => Ok(None),
            Err(err) => Err(err),
        }
    }
}

impl<R> fmt::Debug for FileResolver<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileResolver")
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brickyard_core::{ConfigurationError, PolicyKind};
    use brickyard_test_utils::returns;
    use serde_json::json;

    fn catalog() -> FunctionCatalog {
        FunctionCatalog::new().with("always_false", returns(json!(false)))
    }

    #[test]
    fn registers_in_document_order() {
        let token = load_str(
            r#"{ "interceptors": {
                "ok": { "fn": "always_false" },
                "hi": { "args": ["from interception!"], "args_strategy": "replace" }
            } }"#,
            FileFormat::Json,
            &catalog(),
            &LoaderConfig::default(),
        )
        .unwrap();

        let registry = token.registry();
        assert_eq!(registry.ids(), vec!["ok", "hi"]);
        assert_eq!(registry.get("hi").unwrap().kind(), PolicyKind::ReplaceArgs);
    }

    #[test]
    fn duplicate_ids_are_configuration_errors() {
        let err = load_str(
            r#"{ "interceptors": { "a": { "fn": "always_false" }, "a": { "fn": "always_false" } } }"#,
            FileFormat::Json,
            &catalog(),
            &LoaderConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ConfigLoadError::Configuration(ConfigurationError::DuplicateIdentifier { ref id }) if id == "a"
        ));
    }

    #[test]
    fn unknown_function_fails_by_default() {
        let err = load_str(
            r#"{ "interceptors": { "a": { "fn": "missing" } } }"#,
            FileFormat::Json,
            &catalog(),
            &LoaderConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigLoadError::UnknownFunction { .. }));
    }

    #[test]
    fn unknown_function_can_be_skipped() {
        let token = load_str(
            r#"{ "interceptors": { "a": { "fn": "missing" }, "b": { "fn": "always_false" } } }"#,
            FileFormat::Json,
            &catalog(),
            &LoaderConfig::new().with_unknown_functions(true),
        )
        .unwrap();

        assert_eq!(token.registry().ids(), vec!["b"]);
    }

    #[test]
    fn missing_file_resolves_to_none() {
        let resolver = FileResolver::new(catalog());
        let resolved = resolver.resolve("/definitely/not/here/.interceptor.json").unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn read_document_uses_requested_format() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("bricks.json");
        std::fs::write(&path, "[interceptors.ok]\nfn = \"always_false\"\n").unwrap();

        assert!(matches!(
            read_document(&path, FileFormat::Json),
            Err(ConfigLoadError::Parse { .. })
        ));
        let doc = read_document(&path, FileFormat::Toml).unwrap();
        assert_eq!(doc.interceptors.len(), 1);
    }

    #[test]
    fn read_document_reports_missing_file_path() {
        let err = read_document(Path::new("/definitely/not/here.yml"), FileFormat::Yaml).unwrap_err();
        assert!(matches!(err, ConfigLoadError::NotFound(ref path) if path == "/definitely/not/here.yml"));
    }

    #[test]
    fn missing_file_is_not_found_for_load_file() {
        let err = load_file("/definitely/not/here.json", &catalog(), &LoaderConfig::default()).unwrap_err();
        assert!(matches!(err, ConfigLoadError::NotFound(_)));
    }
}
