//! Brickyard Spec
//!
//! Data model shared by every Brickyard crate.
//!
//! # Core Concepts
//!
//! - [`Brick`]: Shared, type-erased callable taking positional [`Args`]
//! - [`InterceptorSpec`]: Override policy stored for one identifier
//! - [`ArgsStrategy`]: How registered arguments combine with call-time ones
//! - [`merge_args`] / [`resolve_args`]: Argument resolution
//!
//! # Example
//!
//! ```rust
//! use brickyard_spec::{Brick, InterceptorSpec, resolve_args, ArgsStrategy};
//! use serde_json::{json, Value};
//!
//! let greet = Brick::new(|args: Vec<Value>| json!(format!("hello {}", args[0])));
//! let spec: InterceptorSpec = InterceptorSpec::replace_args(vec![json!("world")]);
//! assert!(spec.function().is_none());
//!
//! let args = resolve_args(ArgsStrategy::Replace, vec![json!("ignored")], spec.args().unwrap());
//! assert_eq!(greet.call(args), json!("hello \"world\""));
//! ```

#![warn(unreachable_pub)]

mod brick;
mod resolver;
mod spec;

pub use brick::{Args, Brick};
pub use resolver::{is_plain_object, merge_args, resolve_args};
pub use spec::{ArgsStrategy, InterceptorSpec, PolicyKind};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
