//! Inspection and checking of interceptor files
//!
//! Function references are reported by name and never resolved: every
//! referenced name is bound to a placeholder so that registration still
//! rejects duplicate or empty ids.

use brickyard_core::{ConfigLoadError, PolicyKind};
use brickyard_loader::{build_token, read_document, FileFormat, FunctionCatalog, InterceptorDocument, LoaderConfig};
use brickyard_spec::Brick;
use serde::Serialize;
use serde_json::Value;
use std::fmt::{self, Write as _};
use std::path::{Path, PathBuf};

/// One declared interceptor, as reported
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterceptorSummary {
    /// Interceptor id
    pub id: String,
    /// Policy kind
    pub policy: PolicyKind,
    /// Referenced function, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    /// Number of registered arguments
    pub args: usize,
}

/// Summary of a whole file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    /// File that was read
    pub path: PathBuf,
    /// Detected format
    pub format: FileFormat,
    /// Declared interceptors in file order
    pub interceptors: Vec<InterceptorSummary>,
}

impl FileReport {
    /// Human-readable table
    #[must_use]
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{} ({}, {} interceptors)", self.path.display(), self.format, self.interceptors.len());
        for entry in &self.interceptors {
            let _ = write!(out, "  {:<24} {:<12}", entry.id, entry.policy.to_string());
            if let Some(function) = &entry.function {
                let _ = write!(out, " fn={function}");
            }
            if entry.args > 0 {
                let _ = write!(out, " args={}", entry.args);
            }
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

fn read(path: &Path, format: Option<FileFormat>) -> Result<(InterceptorDocument, FileFormat), ConfigLoadError> {
    let format = format.unwrap_or_else(|| LoaderConfig::default().format_for(path));
    Ok((read_document(path, format)?, format))
}

/// List the interceptors declared in `path`
///
/// # Errors
/// Read or parse failures, and malformed declarations.
pub fn inspect_file(path: &Path, format: Option<FileFormat>) -> Result<FileReport, ConfigLoadError> {
    let (document, format) = read(path, format)?;
    let interceptors = document
        .interceptors
        .iter()
        .map(|(id, decl)| {
            Ok(InterceptorSummary {
                id: id.to_string(),
                policy: decl.kind(id)?,
                function: decl.function.clone(),
                args: decl.args.as_ref().map_or(0, Vec::len),
            })
        })
        .collect::<Result<_, ConfigLoadError>>()?;

    Ok(FileReport {
        path: path.to_path_buf(),
        format,
        interceptors,
    })
}

/// Validate `path` the way loading it would, without resolving functions
///
/// Returns the number of interceptors that would be registered.
///
/// # Errors
/// Everything loading would report except unknown functions.
pub fn check_file(path: &Path, format: Option<FileFormat>) -> Result<usize, ConfigLoadError> {
    let (document, _) = read(path, format)?;
    let mut placeholders = FunctionCatalog::<Value>::new();
    for (_, decl) in document.interceptors.iter() {
        if let Some(name) = &decl.function {
            placeholders.insert(name.clone(), Brick::new(|_| Value::Null));
        }
    }
    let token = build_token(&document, &placeholders, &LoaderConfig::default())?;
    Ok(token.len())
}
