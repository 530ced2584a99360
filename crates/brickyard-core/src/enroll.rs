//! Enrollment engine
//!
//! Turns candidate functions into drop-in replacements according to the
//! registered policies.
//!
//! # Wrapping rules
//! 1. No policy for the id: the candidate itself is returned
//! 2. The policy's function replaces the candidate when present
//! 3. No registered arguments: that function is returned unwrapped
//! 4. `replace`: wrapper calling it with exactly the registered arguments
//! 5. `merge`: wrapper calling it with [`merge_args`] of both lists

use crate::brickyard::EnrollmentHandle;
use brickyard_spec::{merge_args, Args, ArgsStrategy, Brick, InterceptorSpec};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

impl<R: 'static> EnrollmentHandle<R> {
    /// Enroll candidates
    ///
    /// Each name is both the public name of the function and the id looked
    /// up in the registry. The result has the same names in the same order.
    ///
    /// A repeated name keeps the last candidate, at the position of the first.
    pub fn enroll<I, K>(&self, candidates: I) -> Enrolled<R>
    where
        I: IntoIterator<Item = (K, Brick<R>)>,
        K: Into<String>,
    {
        if self.registry().is_empty() && self.config().warn_on_empty_registry {
            tracing::warn!("no interceptors found");
            tracing::info!("be sure to call intercept() before enroll()");
        }

        let mut bricks = IndexMap::new();
        for (id, candidate) in candidates {
            let id: String = id.into();
            let enrolled = self.enroll_one(&id, candidate);
            if bricks.insert(id.clone(), enrolled).is_some() {
                tracing::debug!(name = %id, "candidate name repeated, keeping the last one");
            }
        }

        Enrolled { bricks }
    }

    /// Enroll a single candidate under `id`
    #[must_use]
    pub fn enroll_one(&self, id: &str, candidate: Brick<R>) -> Brick<R> {
        let Some(spec) = self.registry().get(id) else {
            return candidate;
        };
        tracing::trace!(id, kind = %spec.kind(), "intercepting brick");

        match spec {
            InterceptorSpec::Function(function) => function.clone(),
            InterceptorSpec::Arguments {
                function,
                args,
                strategy,
            } => {
                let target = function.clone().unwrap_or(candidate);
                wrap_args(target, args.clone(), *strategy)
            }
        }
    }
}

fn wrap_args<R: 'static>(target: Brick<R>, registered: Args, strategy: ArgsStrategy) -> Brick<R> {
    match strategy {
        ArgsStrategy::Replace => Brick::new(move |_| target.call(registered.clone())),
        ArgsStrategy::Merge => Brick::new(move |call| target.call(merge_args(call, &registered))),
    }
}

/// Enrolled functions, keyed by name in enrollment order
pub struct Enrolled<R = Value> {
    bricks: IndexMap<String, Brick<R>>,
}

impl<R> Enrolled<R> {
    /// Enrolled function for `name`
    #[inline]
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Brick<R>> {
        self.bricks.get(name)
    }

    /// Call the enrolled function `name`
    ///
    /// Returns `None` if no function was enrolled under that name.
    pub fn call(&self, name: &str, args: Args) -> Option<R> {
        self.bricks.get(name).map(|brick| brick.call(args))
    }

    /// Enrolled names, in order
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.bricks.keys().map(String::as_str).collect()
    }

    /// Number of enrolled functions
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bricks.len()
    }

    /// Check if nothing was enrolled
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bricks.is_empty()
    }

    /// Iterate over `(name, function)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Brick<R>)> {
        self.bricks.iter().map(|(name, brick)| (name.as_str(), brick))
    }

    /// Take the underlying map
    #[must_use]
    pub fn into_inner(self) -> IndexMap<String, Brick<R>> {
        self.bricks
    }
}

impl<R> IntoIterator for Enrolled<R> {
    type Item = (String, Brick<R>);
    type IntoIter = indexmap::map::IntoIter<String, Brick<R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.bricks.into_iter()
    }
}

impl<R> Clone for Enrolled<R> {
    fn clone(&self) -> Self {
        Self {
            bricks: self.bricks.clone(),
        }
    }
}

impl<R> fmt::Debug for Enrolled<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.bricks.iter()).finish()
    }
}
