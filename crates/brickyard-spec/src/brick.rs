//! Callable bricks
//!
//! A [`Brick`] is the unit Brickyard enrolls: a shared function taking a
//! positional argument list and returning whatever the application chose.

use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Positional call arguments
pub type Args = Vec<Value>;

/// Shared, type-erased function of variable arity
///
/// Cloning a brick shares the underlying function; [`Brick::ptr_eq`] tells
/// whether two bricks are the very same function.
///
/// `R` is opaque to Brickyard. It may be a plain value, a `Result`, or a
/// future; it is handed back to the caller exactly as produced.
pub struct Brick<R = Value> {
    inner: Arc<dyn Fn(Args) -> R + Send + Sync>,
}

impl<R> Brick<R> {
    /// Wrap a function
    #[inline]
    #[must_use]
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Args) -> R + Send + Sync + 'static,
    {
        Self { inner: Arc::new(f) }
    }

    /// Invoke the function with `args`
    #[inline]
    pub fn call(&self, args: Args) -> R {
        (self.inner)(args)
    }

    /// Check whether both bricks share the same function
    #[inline]
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<R: 'static> Brick<R> {
    /// Brick ignoring its arguments and returning a clone of `value`
    #[must_use]
    pub fn constant(value: R) -> Self
    where
        R: Clone + Send + Sync,
    {
        Self::new(move |_| value.clone())
    }
}

impl<R> Clone for Brick<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R> fmt::Debug for Brick<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Brick")
            .field("fn", &Arc::as_ptr(&self.inner).cast::<()>())
            .finish()
    }
}

impl<R, F> From<F> for Brick<R>
where
    F: Fn(Args) -> R + Send + Sync + 'static,
{
    fn from(f: F) -> Self {
        Self::new(f)
    }
}
