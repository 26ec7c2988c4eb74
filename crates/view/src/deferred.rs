//! Deferred view over a pipeline result.
//!
//! The view publishes a snapshot of the pipeline's output and refreshes it
//! on demand. The count read is the refresh trigger: every call to `count`
//! re-executes the pipeline against the live source and replaces the
//! published items wholesale. `at` and `items` read the last published
//! snapshot without touching the pipeline.

use alloc::vec::Vec;
use core::cell::RefCell;
use velum_core::{Result, Value};
use velum_query::{Execution, ExecutionContext, Pipeline};

/// A pull-based materialization of a pipeline.
///
/// A scalar result (from a terminal operator such as `contains` or
/// `aggregate`) is published as a single-element snapshot, so `count`
/// returns 1 and `at(0)` yields the scalar.
pub struct DeferredView {
    pipeline: Pipeline,
    ctx: ExecutionContext,
    items: RefCell<Vec<Value>>,
}

impl DeferredView {
    /// Creates a view over a pipeline. Nothing executes until `count` is
    /// read.
    pub fn new(pipeline: Pipeline) -> Self {
        Self::with_context(pipeline, ExecutionContext::new())
    }

    /// Creates a view that executes with caller-supplied context state.
    pub fn with_context(pipeline: Pipeline, ctx: ExecutionContext) -> Self {
        Self {
            pipeline,
            ctx,
            items: RefCell::new(Vec::new()),
        }
    }

    /// Re-executes the pipeline, republishes the items and returns their
    /// count.
    ///
    /// On failure the previously published snapshot is retained and the
    /// error propagates to the caller.
    pub fn count(&self) -> Result<usize> {
        let next = match self.pipeline.execute(&self.ctx)? {
            Execution::Sequence(items) => items,
            Execution::Scalar(value) => {
                let mut single = Vec::with_capacity(1);
                single.push(value);
                single
            }
        };
        let count = next.len();
        *self.items.borrow_mut() = next;
        Ok(count)
    }

    /// Returns the item at `index` in the last published snapshot, if any.
    /// Does not re-execute.
    pub fn at(&self, index: usize) -> Option<Value> {
        self.items.borrow().get(index).cloned()
    }

    /// Returns a copy of the last published snapshot. Does not re-execute.
    pub fn items(&self) -> Vec<Value> {
        self.items.borrow().clone()
    }

    /// Returns the pipeline this view materializes.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}
