//! Sequence sharing and bulk generation helpers.
//!
//! A pipeline never copies its source: the caller keeps ownership and the
//! pipeline holds a read-shared handle, so mutations made between two
//! materializations are visible to the next execution pass.

use crate::error::{Error, Result};
use crate::value::Value;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

/// A source sequence shared between its owner and any number of pipelines.
pub type SharedSequence = Rc<RefCell<Vec<Value>>>;

/// Wraps a sequence for sharing with pipelines.
pub fn shared(items: Vec<Value>) -> SharedSequence {
    Rc::new(RefCell::new(items))
}

/// Generates `count` consecutive numbers starting at `start`.
///
/// Fails with an `InvalidRange` error before producing any output if `count`
/// is negative.
pub fn range(start: i64, count: i64) -> Result<Vec<Value>> {
    if count < 0 {
        return Err(Error::invalid_range(count));
    }
    Ok((0..count).map(|i| Value::from(start + i)).collect())
}

/// Generates `count` copies of `value`.
///
/// Fails with an `InvalidRange` error before producing any output if `count`
/// is negative.
pub fn repeat(value: &Value, count: i64) -> Result<Vec<Value>> {
    if count < 0 {
        return Err(Error::invalid_range(count));
    }
    Ok((0..count).map(|_| value.clone()).collect())
}
