//! Velum Path - path-expression compiler for key selectors.
//!
//! Key specifications in the query engine are either callables or path
//! strings. This crate handles the string half:
//!
//! - `parser`: dotted-path syntax (`address.city`, `tags[0]`, optional `it.`
//!   receiver prefix)
//! - `compile`: the injectable `ExpressionCompiler` trait and the default
//!   `PathCompiler` implementation producing reusable accessors
//!
//! # Example
//!
//! ```rust
//! use velum_core::{ExecutionContext, Value, ValueObject};
//! use velum_path::{ExpressionCompiler, PathCompiler};
//!
//! let mut item = ValueObject::new();
//! item.insert("name", Value::from("Alice"));
//! let item = Value::Object(item);
//!
//! let accessor = PathCompiler::new().compile("name").unwrap();
//! let ctx = ExecutionContext::new();
//! assert_eq!(accessor(&item, &ctx).unwrap(), Value::from("Alice"));
//! ```

#![no_std]

extern crate alloc;

mod compile;
mod parser;

pub use compile::{evaluate, Accessor, ExpressionCompiler, PathCompiler};
pub use parser::{PathExpr, Segment};
