//! Brickyard handles
//!
//! [`Brickyard`] is parameterized by its [`Phase`]. A
//! [`RegistrationHandle`] can only register; an [`EnrollmentHandle`] can
//! only enroll. The only way from the first to the second is a
//! [`CompletionToken`].
//!
//! Every [`begin_registration`] call creates a fresh, isolated registry.
//! There is no process-wide default instance.

use crate::config::BrickyardConfig;
use crate::error::ConfigurationError;
use crate::lifecycle::{self, Enrolling, LifecycleState, Phase, Registering};
use crate::registry::Registry;
use crate::resolver::ConfigResolver;
use crate::token::CompletionToken;
use brickyard_spec::InterceptorSpec;
use serde_json::Value;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// Registry handle in phase `P`
pub struct Brickyard<R = Value, P: Phase = Registering> {
    registry: Arc<Registry<R>>,
    config: BrickyardConfig,
    _phase: PhantomData<P>,
}

/// Handle of the registration phase
pub type RegistrationHandle<R = Value> = Brickyard<R, Registering>;

/// Handle of the enrollment phase
pub type EnrollmentHandle<R = Value> = Brickyard<R, Enrolling>;

impl<R, P: Phase> Brickyard<R, P> {
    fn from_parts(registry: Arc<Registry<R>>, config: BrickyardConfig) -> Self {
        Self {
            registry,
            config,
            _phase: PhantomData,
        }
    }

    /// Runtime lifecycle state of this handle
    #[inline]
    #[must_use]
    pub fn state(&self) -> LifecycleState {
        P::STATE
    }

    /// Registered policies
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &Registry<R> {
        &self.registry
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &BrickyardConfig {
        &self.config
    }
}

impl<R> Brickyard<R, Registering> {
    /// Start registering interceptors
    ///
    /// Alias of [`begin_registration`].
    #[must_use]
    pub fn pre_init() -> Self {
        begin_registration()
    }

    /// Register `spec` for `id`
    ///
    /// Identifiers never matched by a candidate at enrollment time are
    /// ignored there.
    ///
    /// # Errors
    /// [`ConfigurationError`] if `id` is empty or already registered.
    pub fn intercept(
        mut self,
        id: impl Into<String>,
        spec: InterceptorSpec<R>,
    ) -> Result<Self, ConfigurationError> {
        let id = id.into();
        tracing::debug!(id = %id, kind = %spec.kind(), "registering interceptor");

        // Copy-on-write: tokens already issued keep their snapshot.
        Arc::make_mut(&mut self.registry).insert(id, spec)?;
        lifecycle::log_transition(LifecycleState::Registering, LifecycleState::Registering);
        Ok(self)
    }

    /// Alias of [`intercept`](Self::intercept) for fluent chains
    ///
    /// # Errors
    /// Same as [`intercept`](Self::intercept).
    pub fn and(self, id: impl Into<String>, spec: InterceptorSpec<R>) -> Result<Self, ConfigurationError> {
        self.intercept(id, spec)
    }

    /// Seal the current registrations into a token
    ///
    /// May be called repeatedly; each token is an independent read-only view
    /// of the registry as it was at that moment.
    #[must_use]
    pub fn complete(&self) -> CompletionToken<R> {
        lifecycle::log_transition(LifecycleState::Registering, LifecycleState::Completed);
        CompletionToken::new(Arc::clone(&self.registry))
    }
}

impl<R> Brickyard<R, Enrolling> {
    /// Enter the enrollment phase
    ///
    /// Alias of [`initialize`].
    #[must_use]
    pub fn init(token: Option<CompletionToken<R>>) -> Self {
        initialize(token)
    }
}

impl<R, P: Phase> fmt::Debug for Brickyard<R, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Brickyard")
            .field("state", &P::STATE)
            .field("registry", &self.registry)
            .field("config", &self.config)
            .finish()
    }
}

/// Start registering interceptors into a fresh registry
#[must_use]
pub fn begin_registration<R>() -> RegistrationHandle<R> {
    lifecycle::log_transition(LifecycleState::Unregistered, LifecycleState::Registering);
    Brickyard::from_parts(Arc::new(Registry::new()), BrickyardConfig::default())
}

/// Enter the enrollment phase
///
/// With `None` a new empty registry is used and every candidate enrolls
/// unchanged.
#[must_use]
pub fn initialize<R>(token: Option<CompletionToken<R>>) -> EnrollmentHandle<R> {
    initialize_with_config(token, BrickyardConfig::default())
}

/// Enter the enrollment phase with explicit configuration
#[must_use]
pub fn initialize_with_config<R>(
    token: Option<CompletionToken<R>>,
    config: BrickyardConfig,
) -> EnrollmentHandle<R> {
    let token = token.unwrap_or_else(|| {
        lifecycle::log_transition(LifecycleState::Unregistered, LifecycleState::Completed);
        CompletionToken::default()
    });
    lifecycle::log_transition(LifecycleState::Completed, LifecycleState::Enrolling);
    Brickyard::from_parts(token.into_registry(), config)
}

/// Enter the enrollment phase from an external specifier
///
/// Never fails: if `resolver` finds nothing, or fails, a warning naming
/// `specifier` is logged and the empty default registry is used.
#[must_use]
pub fn initialize_with<R>(
    resolver: &(impl ConfigResolver<R> + ?Sized),
    specifier: &str,
) -> EnrollmentHandle<R> {
    let token = match resolver.resolve(specifier) {
        Ok(Some(token)) => {
            tracing::debug!(specifier, interceptors = token.len(), "configuration resolved");
            Some(token)
        }
        Ok(None) => {
            tracing::warn!(specifier, "no configuration found, interceptors disabled");
            None
        }
        Err(err) => {
            tracing::warn!(specifier, error = %err, "configuration ignored, interceptors disabled");
            None
        }
    };
    initialize(token)
}
