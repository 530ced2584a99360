//! Brickyard Core
//!
//! Substitute or reshape functions at composition time, without touching the
//! call sites that use them.
//!
//! Two-phase design:
//! 1. **Registration Phase**: register override policies, seal them into a
//!    [`CompletionToken`]
//! 2. **Enrollment Phase**: wrap candidate functions according to those
//!    policies
//!
//! # Quick Start
//!
//! ```rust
//! use brickyard_core::prelude::*;
//! use serde_json::{json, Value};
//!
//! # fn main() -> Result<(), ConfigurationError> {
//! // Registration phase
//! let token = begin_registration()
//!     .intercept("ok", InterceptorSpec::func(Brick::new(|_| json!(false))))?
//!     .intercept("hi", InterceptorSpec::replace_args(vec![json!("from interception!")]))?
//!     .complete();
//!
//! // Enrollment phase
//! let hi = Brick::new(|args: Vec<Value>| json!(format!("hi {}", args[0].as_str().unwrap_or("?"))));
//! let bricks = initialize(Some(token)).enroll([
//!     ("hi", hi),
//!     ("ok", Brick::new(|_| json!(true))),
//! ]);
//!
//! assert_eq!(bricks.call("hi", vec![json!("bob")]), Some(json!("hi from interception!")));
//! assert_eq!(bricks.call("ok", Vec::new()), Some(json!(false)));
//! # Ok(())
//! # }
//! ```
//!
//! Calling `enroll` on a registration handle, or `intercept` on an
//! enrollment handle, does not compile:
//!
//! ```compile_fail
//! use brickyard_core::prelude::*;
//!
//! let handle: RegistrationHandle = begin_registration();
//! let _ = handle.enroll([("f", Brick::new(|_| serde_json::Value::Null))]);
//! ```

#![warn(unreachable_pub)]

mod brickyard;
mod config;
mod enroll;
mod error;
mod lifecycle;
mod registry;
mod resolver;
mod token;

pub use brickyard::{
    begin_registration, initialize, initialize_with, initialize_with_config, Brickyard,
    EnrollmentHandle, RegistrationHandle,
};
pub use config::BrickyardConfig;
pub use enroll::Enrolled;
pub use error::{ConfigLoadError, ConfigurationError, LifecycleError};
pub use lifecycle::{allowed_transitions, validate_transition, Enrolling, LifecycleState, Phase, Registering};
pub use registry::Registry;
pub use resolver::{ConfigResolver, NoConfig};
pub use token::CompletionToken;

pub use brickyard_spec::{Args, ArgsStrategy, Brick, InterceptorSpec, PolicyKind};

/// Re-export common types for convenience
pub mod prelude {
    pub use crate::{
        begin_registration, initialize, initialize_with, Args, ArgsStrategy, Brick, Brickyard,
        CompletionToken, ConfigLoadError, ConfigResolver, ConfigurationError, Enrolled,
        EnrollmentHandle, InterceptorSpec, RegistrationHandle,
    };
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Check if running with strict debugging enabled
#[must_use]
pub const fn strict_debug() -> bool {
    cfg!(feature = "strict-debug")
}
