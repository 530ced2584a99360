//! Ordering protocol
//!
//! Registration must finish before substitution is applied:
//!
//! ```text
//! Unregistered -> Registering -> Completed -> Enrolling
//!       \______________________/^
//! ```
//!
//! The phase parameter of [`Brickyard`](crate::Brickyard) enforces the
//! protocol at compile time, so handles only ever take legal steps; each step
//! is logged at `debug`. [`validate_transition`] exposes the same table for
//! callers that track a [`LifecycleState`] themselves.

use crate::error::LifecycleError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle states of a brickyard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Nothing registered yet
    Unregistered,
    /// Accepting `intercept` calls
    Registering,
    /// Registration sealed into a completion token
    Completed,
    /// Enrolling candidates
    Enrolling,
}

impl LifecycleState {
    /// Name used in logs and errors
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unregistered => "unregistered",
            Self::Registering => "registering",
            Self::Completed => "completed",
            Self::Enrolling => "enrolling",
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// States reachable from `from` in one step
#[must_use]
pub fn allowed_transitions(from: LifecycleState) -> &'static [LifecycleState] {
    use LifecycleState as S;
    match from {
        S::Unregistered => &[S::Registering, S::Completed],
        S::Registering => &[S::Registering, S::Completed],
        S::Completed => &[S::Enrolling],
        S::Enrolling => &[],
    }
}

/// Validates a state transition.
///
/// Illegal transitions panic when the `strict-debug` feature is enabled.
pub fn validate_transition(from: LifecycleState, to: LifecycleState) -> Result<(), LifecycleError> {
    if allowed_transitions(from).contains(&to) {
        Ok(())
    } else {
        #[cfg(feature = "strict-debug")]
        panic!("Illegal lifecycle transition attempted: {from} -> {to}");

        #[cfg(not(feature = "strict-debug"))]
        Err(LifecycleError::IllegalTransition { from, to })
    }
}

/// Log a step taken by a handle
pub(crate) fn log_transition(from: LifecycleState, to: LifecycleState) {
    debug_assert!(allowed_transitions(from).contains(&to), "{from} -> {to}");
    tracing::debug!(%from, %to, "brickyard phase transition");
}

/// Type-level phase markers
mod private {
    pub trait Sealed {}
}

/// Phase of a [`Brickyard`](crate::Brickyard) handle
///
/// Sealed: only [`Registering`] and [`Enrolling`] exist.
pub trait Phase: private::Sealed + Send + Sync + 'static {
    /// Runtime state matching this phase
    const STATE: LifecycleState;
}

/// Registration phase marker: only `intercept` and `complete` are reachable
#[derive(Debug, Clone, Copy, Default)]
pub struct Registering;

/// Enrollment phase marker: only `enroll` is reachable
#[derive(Debug, Clone, Copy, Default)]
pub struct Enrolling;

impl private::Sealed for Registering {}
impl private::Sealed for Enrolling {}

impl Phase for Registering {
    const STATE: LifecycleState = LifecycleState::Registering;
}

impl Phase for Enrolling {
    const STATE: LifecycleState = LifecycleState::Enrolling;
}
