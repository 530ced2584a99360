//! Brickyard Loader
//!
//! Reads interceptor registries from JSON, YAML or TOML files. Replacement
//! functions are referenced by name and looked up in a [`FunctionCatalog`]
//! supplied by the application.
//!
//! ```rust
//! use brickyard_core::initialize_with;
//! use brickyard_loader::{FileResolver, FunctionCatalog, LoaderConfig};
//! use brickyard_spec::Brick;
//! use serde_json::json;
//!
//! let catalog: FunctionCatalog = FunctionCatalog::new().with("always_false", Brick::new(|_| json!(false)));
//! let resolver = FileResolver::with_config(catalog, LoaderConfig::from_env());
//!
//! // A missing file leaves interceptors disabled.
//! let bricks = initialize_with(&resolver, "./does-not-exist.json")
//!     .enroll([("ok", Brick::new(|_| json!(true)))]);
//! assert_eq!(bricks.call("ok", Vec::new()), Some(json!(true)));
//! ```

#![warn(unreachable_pub)]

mod catalog;
mod config;
mod document;
mod format;
mod resolver;

pub use catalog::FunctionCatalog;
pub use config::{LoaderConfig, BASE_DIR_ENV};
pub use document::{parse_document, Declarations, InterceptorDecl, InterceptorDocument};
pub use format::FileFormat;
pub use resolver::{build_token, load_file, load_str, read_document, FileResolver};
