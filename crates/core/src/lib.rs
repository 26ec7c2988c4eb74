//! Velum Core - value model, structural equality and errors.
//!
//! This crate provides the foundational types for the Velum client-side
//! data-access layer:
//!
//! - `Value` / `ValueObject`: dynamic values flowing through query pipelines
//! - `equality`: deep structural equality, the sole key-comparison primitive
//! - `sequence`: shared source sequences and bulk generation helpers
//! - `ExecutionContext`: caller state forwarded to every query callable
//! - `Error`: error types for query composition and execution
//!
//! # Example
//!
//! ```rust
//! use velum_core::{Value, ValueObject};
//!
//! let mut user = ValueObject::new();
//! user.insert("id", Value::from(1i64));
//! user.insert("name", Value::from("Alice"));
//! let user = Value::Object(user);
//!
//! assert_eq!(user.get("name"), Some(&Value::from("Alice")));
//! ```

#![no_std]

extern crate alloc;

mod context;
mod equality;
mod error;
pub mod sequence;
mod value;

pub use context::ExecutionContext;
pub use equality::structural_eq;
pub use error::{Error, Result};
pub use sequence::{shared, SharedSequence};
pub use value::{Value, ValueObject, RESERVED_PREFIX};
