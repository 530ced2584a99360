//! Interceptor policies
//!
//! Provides [`InterceptorSpec`], the override policy registered for one
//! identifier, and [`ArgsStrategy`].

use crate::brick::{Args, Brick};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How registered arguments combine with call-time arguments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgsStrategy {
    /// Combine positionally, registered values winning (objects are patched)
    Merge,

    /// Discard call-time arguments, always use the registered ones
    Replace,
}

impl ArgsStrategy {
    /// Wire name (`"merge"` / `"replace"`)
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Replace => "replace",
        }
    }
}

impl fmt::Display for ArgsStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Override policy for one identifier
///
/// Exactly one of two shapes:
/// - [`InterceptorSpec::Function`]: swap the function, keep the arguments
/// - [`InterceptorSpec::Arguments`]: reshape the arguments, optionally
///   swapping the function as well
///
/// A strategy exists exactly when registered arguments exist.
pub enum InterceptorSpec<R = Value> {
    /// Function-replace: calls go to this function with their own arguments
    Function(Brick<R>),

    /// Argument-driven override
    Arguments {
        /// Replacement function (the candidate itself when `None`)
        function: Option<Brick<R>>,
        /// Registered positional arguments
        args: Args,
        /// How `args` combine with call-time arguments
        strategy: ArgsStrategy,
    },
}

impl<R> InterceptorSpec<R> {
    /// Replace the function outright
    #[inline]
    #[must_use]
    pub fn func(function: impl Into<Brick<R>>) -> Self {
        Self::Function(function.into())
    }

    /// Always call with exactly `args`
    #[inline]
    #[must_use]
    pub fn replace_args(args: Args) -> Self {
        Self::Arguments {
            function: None,
            args,
            strategy: ArgsStrategy::Replace,
        }
    }

    /// Merge `args` into call-time arguments
    #[inline]
    #[must_use]
    pub fn merge_args(args: Args) -> Self {
        Self::Arguments {
            function: None,
            args,
            strategy: ArgsStrategy::Merge,
        }
    }

    /// Argument-driven policy with an explicit strategy
    #[inline]
    #[must_use]
    pub fn with_args(args: Args, strategy: ArgsStrategy) -> Self {
        Self::Arguments {
            function: None,
            args,
            strategy,
        }
    }

    /// Set the replacement function
    ///
    /// On a [`InterceptorSpec::Function`] policy this swaps the function.
    #[must_use]
    pub fn with_function(self, function: impl Into<Brick<R>>) -> Self {
        match self {
            Self::Function(_) => Self::Function(function.into()),
            Self::Arguments { args, strategy, .. } => Self::Arguments {
                function: Some(function.into()),
                args,
                strategy,
            },
        }
    }

    /// Replacement function, if any
    #[must_use]
    pub fn function(&self) -> Option<&Brick<R>> {
        match self {
            Self::Function(function) => Some(function),
            Self::Arguments { function, .. } => function.as_ref(),
        }
    }

    /// Registered arguments, if any
    #[must_use]
    pub fn args(&self) -> Option<&[Value]> {
        match self {
            Self::Function(_) => None,
            Self::Arguments { args, .. } => Some(args),
        }
    }

    /// Argument strategy, if any
    #[must_use]
    pub fn strategy(&self) -> Option<ArgsStrategy> {
        match self {
            Self::Function(_) => None,
            Self::Arguments { strategy, .. } => Some(*strategy),
        }
    }

    /// Coarse classification of this policy
    #[must_use]
    pub fn kind(&self) -> PolicyKind {
        match self.strategy() {
            None => PolicyKind::Function,
            Some(ArgsStrategy::Replace) => PolicyKind::ReplaceArgs,
            Some(ArgsStrategy::Merge) => PolicyKind::MergeArgs,
        }
    }
}

impl<R> Clone for InterceptorSpec<R> {
    fn clone(&self) -> Self {
        match self {
            Self::Function(function) => Self::Function(function.clone()),
            Self::Arguments {
                function,
                args,
                strategy,
            } => Self::Arguments {
                function: function.clone(),
                args: args.clone(),
                strategy: *strategy,
            },
        }
    }
}

impl<R> fmt::Debug for InterceptorSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Function(function) => f.debug_tuple("Function").field(function).finish(),
            Self::Arguments {
                function,
                args,
                strategy,
            } => f
                .debug_struct("Arguments")
                .field("function", function)
                .field("args", args)
                .field("strategy", strategy)
                .finish(),
        }
    }
}

/// Policy classification, used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Function replaced, arguments untouched
    Function,

    /// Registered arguments replace call-time ones
    ReplaceArgs,

    /// Registered arguments merged into call-time ones
    MergeArgs,
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Function => "function",
            Self::ReplaceArgs => "replace-args",
            Self::MergeArgs => "merge-args",
        };
        f.write_str(name)
    }
}
