//! Execution context for query pipelines.
//!
//! A context is an arbitrary caller-supplied value forwarded verbatim to
//! every selector, predicate and fold callable during one execution pass, so
//! operator callables can close over external state. It is not persisted
//! between executions.

use crate::value::Value;
use alloc::rc::Rc;

/// Caller-supplied state visible to all callables of one execution pass.
#[derive(Clone, Debug, Default)]
pub struct ExecutionContext {
    externals: Option<Rc<Value>>,
}

impl ExecutionContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self { externals: None }
    }

    /// Creates a context carrying the given value.
    pub fn with_value(value: Value) -> Self {
        Self {
            externals: Some(Rc::new(value)),
        }
    }

    /// Returns the carried value, if any.
    pub fn value(&self) -> Option<&Value> {
        self.externals.as_deref()
    }

    /// Looks up a named external when the carried value is an object.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.value().and_then(|v| v.get(name))
    }

    /// Returns true if no value is carried.
    pub fn is_empty(&self) -> bool {
        self.externals.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ValueObject;

    #[test]
    fn test_empty_context() {
        let ctx = ExecutionContext::new();
        assert!(ctx.is_empty());
        assert_eq!(ctx.value(), None);
        assert_eq!(ctx.get("threshold"), None);
    }

    #[test]
    fn test_context_with_object() {
        let mut externals = ValueObject::new();
        externals.insert("threshold", Value::Number(10.0));
        let ctx = ExecutionContext::with_value(Value::Object(externals));

        assert!(!ctx.is_empty());
        assert_eq!(ctx.get("threshold"), Some(&Value::Number(10.0)));
        assert_eq!(ctx.get("missing"), None);
    }

    #[test]
    fn test_context_clone_shares_value() {
        let ctx = ExecutionContext::with_value(Value::Number(1.0));
        let copy = ctx.clone();
        assert_eq!(copy.value(), ctx.value());
    }
}
