//! Testing utilities for Brickyard workspace
//!
//! Shared test helpers, fixtures, and assertions.

#![allow(missing_docs)]

use brickyard_spec::{Args, Brick};
use parking_lot::Mutex;
use serde_json::Value;
use std::sync::Arc;

/// Records every argument list its brick is called with
#[derive(Debug, Clone)]
pub struct CallRecorder<R = Value> {
    calls: Arc<Mutex<Vec<Args>>>,
    result: R,
}

impl<R> CallRecorder<R>
where
    R: Clone + Send + Sync + 'static,
{
    pub fn returning(result: R) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            result,
        }
    }

    /// Brick recording into this recorder; every call returns the configured result
    pub fn brick(&self) -> Brick<R> {
        let calls = Arc::clone(&self.calls);
        let result = self.result.clone();
        Brick::new(move |args| {
            calls.lock().push(args);
            result.clone()
        })
    }

    pub fn calls(&self) -> Vec<Args> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn last_call(&self) -> Option<Args> {
        self.calls.lock().last().cloned()
    }
}

impl CallRecorder<Value> {
    pub fn new() -> Self {
        Self::returning(Value::Null)
    }
}

impl Default for CallRecorder<Value> {
    fn default() -> Self {
        Self::new()
    }
}

/// Brick returning its arguments as a JSON array
pub fn echo() -> Brick {
    Brick::new(Value::Array)
}

/// Brick returning `value` regardless of arguments
pub fn returns(value: Value) -> Brick {
    Brick::constant(value)
}

/// Shorthand for building positional arguments
#[macro_export]
macro_rules! args {
    ($($value:tt),* $(,)?) => {
        vec![$(::serde_json::json!($value)),*]
    };
}
