//! Local query execution over in-memory value sequences.
//!
//! The entry point is [`Pipeline`] (or the [`as_queryable`] helper), a
//! persistent builder of expression nodes over a read-shared source. Each
//! operator method returns a new pipeline; nothing runs until `execute`.
//! Set operators, joins, grouping and pairing all compare values by
//! structural equality as defined in `velum-core`.

#![no_std]

extern crate alloc;

pub mod expr;
mod pipeline;
pub mod resolver;

pub use expr::{
    fold_fn, group_join_selector, group_selector, join_selector, Execution, ExpressionNode,
    FoldFn, GroupJoinSelector, GroupSelector, JoinSelector, Operand,
};
pub use pipeline::{as_queryable, Pipeline};
pub use resolver::{key_fn, KeyAccessor, KeySpec};

// Re-export commonly used types from dependencies
pub use velum_core::ExecutionContext;
