//! Path compilation into value accessors.
//!
//! The query engine never parses expressions itself: it receives key
//! specifications and hands strings to an `ExpressionCompiler`. This module
//! provides that seam and its default implementation, which compiles the
//! dotted-path syntax from the `parser` module.

use crate::parser::{PathExpr, Segment};
use alloc::rc::Rc;
use velum_core::{ExecutionContext, Result, Value};

/// An accessor navigating from an item to the keyed value.
///
/// The execution context of the running pass is supplied on every call, so
/// compiled expressions can reference caller externals, and a data error
/// raised by an accessor propagates to the caller of the pass. The default
/// path compiler needs neither: its accessors ignore the context and are
/// total.
pub type Accessor = Rc<dyn Fn(&Value, &ExecutionContext) -> Result<Value>>;

/// Compiles path-expression strings into accessors.
///
/// Injected into the query pipeline so hosts can substitute a richer
/// expression language; the engine only relies on this contract.
pub trait ExpressionCompiler {
    /// Compiles `source` into an accessor, or fails with a TypeError-class
    /// `PathSyntax` error if the string is not understood.
    fn compile(&self, source: &str) -> Result<Accessor>;
}

/// The default compiler for dotted field paths with array indexing.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathCompiler;

impl PathCompiler {
    /// Creates a new path compiler.
    pub fn new() -> Self {
        Self
    }
}

impl ExpressionCompiler for PathCompiler {
    fn compile(&self, source: &str) -> Result<Accessor> {
        let path = PathExpr::parse(source)?;
        Ok(Rc::new(move |item: &Value, _ctx: &ExecutionContext| {
            Ok(evaluate(&path, item))
        }))
    }
}

/// Walks the path over one item; missing steps yield `Null`.
pub fn evaluate(path: &PathExpr, item: &Value) -> Value {
    let mut current = item;
    for segment in path.segments() {
        let next = match segment {
            Segment::Field(name) => current.get(name),
            Segment::Index(idx) => current.get_index(*idx),
        };
        match next {
            Some(v) => current = v,
            None => return Value::Null,
        }
    }
    current.clone()
}
