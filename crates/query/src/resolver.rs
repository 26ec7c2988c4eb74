//! Key resolution for selectors and join keys.
//!
//! Operators accept a key specification that is either already callable or a
//! path-expression string. Resolution turns either form into a single
//! accessor shape: callables pass through unmodified, strings are compiled
//! once through the injected `ExpressionCompiler` and reused for every item.
//! Resolution happens at composition time, so malformed specifications fail
//! before any data is touched; the running pass's execution context is
//! supplied to the accessor on every call.

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use velum_core::{Error, ExecutionContext, Result, Value};
use velum_path::ExpressionCompiler;

/// A resolved key accessor: item and execution context in, key value out.
///
/// Same shape as `velum_path::Accessor`; compiled path expressions are used
/// as accessors directly.
pub type KeyAccessor = velum_path::Accessor;

/// Wraps a closure as a callable key specification.
pub fn key_fn<F>(f: F) -> KeySpec
where
    F: Fn(&Value, &ExecutionContext) -> Result<Value> + 'static,
{
    KeySpec::Accessor(Rc::new(f))
}

/// A key specification: a callable accessor or a path-expression string.
#[derive(Clone)]
pub enum KeySpec {
    /// Already-callable accessor, used unmodified.
    Accessor(KeyAccessor),
    /// Path-expression string, compiled through the expression compiler.
    Path(String),
}

impl KeySpec {
    /// Creates a path specification.
    pub fn path(source: impl Into<String>) -> Self {
        KeySpec::Path(source.into())
    }

    /// Builds a specification from a dynamic value, the duck-typed seam of
    /// the original API where specs may arrive as data (e.g. deserialized
    /// query descriptions). Only strings are understood; anything else is a
    /// TypeError-class failure naming the operator.
    pub fn from_value(operator: &str, value: &Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(KeySpec::Path(s.clone())),
            _ => Err(Error::not_callable(operator)),
        }
    }

    /// Resolves the specification into an accessor.
    pub fn resolve(&self, compiler: &dyn ExpressionCompiler) -> Result<KeyAccessor> {
        match self {
            KeySpec::Accessor(f) => Ok(f.clone()),
            KeySpec::Path(source) => compiler.compile(source),
        }
    }
}

impl core::fmt::Debug for KeySpec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            KeySpec::Accessor(_) => f.write_str("KeySpec::Accessor(..)"),
            KeySpec::Path(p) => write!(f, "KeySpec::Path({:?})", p),
        }
    }
}

impl From<&str> for KeySpec {
    fn from(source: &str) -> Self {
        KeySpec::Path(source.to_string())
    }
}

impl From<String> for KeySpec {
    fn from(source: String) -> Self {
        KeySpec::Path(source)
    }
}
