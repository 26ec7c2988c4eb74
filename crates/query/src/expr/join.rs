//! Join family: inner, left, right, full, cross and group joins.
//!
//! Joins are evaluated with nested loops in a fixed left-to-right order, so
//! output ordering is fully determined by input order and operator
//! definition. Key equality is structural. Cost is O(n*m) by design; this
//! engine runs over client-side collections, not server tables.

use velum_core::ExecutionContext;
use crate::expr::{Execution, ExpressionNode, GroupJoinSelector, JoinSelector, Operand};
use crate::resolver::KeyAccessor;
use alloc::vec::Vec;
use velum_core::{Result, Value};

/// Which join variant a `JoinNode` executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    /// Matching pairs only.
    Inner,
    /// All left items; match-less ones pair with nothing.
    Left,
    /// Mirror of left: drives the right-hand operand.
    Right,
    /// Left join plus the unconsumed right items appended at the end.
    Full,
    /// Cartesian product, no keys.
    Cross,
}

impl JoinKind {
    /// Operator tag for error messages.
    pub fn name(self) -> &'static str {
        match self {
            JoinKind::Inner => "join",
            JoinKind::Left => "leftJoin",
            JoinKind::Right => "rightJoin",
            JoinKind::Full => "fullJoin",
            JoinKind::Cross => "crossJoin",
        }
    }
}

/// Key-equality join against a fixed operand sequence.
pub struct JoinNode {
    kind: JoinKind,
    other: Operand,
    left_key: Option<KeyAccessor>,
    right_key: Option<KeyAccessor>,
    selector: JoinSelector,
}

impl JoinNode {
    /// Creates a keyed join node. Key accessors are `None` only for
    /// `JoinKind::Cross`.
    pub fn new(
        kind: JoinKind,
        other: Operand,
        left_key: Option<KeyAccessor>,
        right_key: Option<KeyAccessor>,
        selector: JoinSelector,
    ) -> Self {
        Self {
            kind,
            other,
            left_key,
            right_key,
            selector,
        }
    }

    fn keys_of(
        &self,
        accessor: &Option<KeyAccessor>,
        items: &[Value],
        ctx: &ExecutionContext,
    ) -> Result<Vec<Value>> {
        let accessor = accessor
            .as_ref()
            .ok_or_else(|| velum_core::Error::not_callable(self.kind.name()))?;
        items.iter().map(|item| accessor(item, ctx)).collect()
    }
}

impl ExpressionNode for JoinNode {
    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn execute(&self, input: &[Value], ctx: &ExecutionContext) -> Result<Execution> {
        let right = self.other.items();

        if self.kind == JoinKind::Cross {
            let mut out = Vec::with_capacity(input.len() * right.len());
            for l in input {
                for r in right {
                    out.push((self.selector)(Some(l), Some(r), ctx)?);
                }
            }
            return Ok(Execution::Sequence(out));
        }

        // Resolve every key up front; accessor errors surface before any row
        // is emitted.
        let left_keys = self.keys_of(&self.left_key, input, ctx)?;
        let right_keys = self.keys_of(&self.right_key, right, ctx)?;

        let mut out = Vec::new();
        match self.kind {
            JoinKind::Inner | JoinKind::Left => {
                for (l, lk) in input.iter().zip(&left_keys) {
                    let mut matched = false;
                    for (r, rk) in right.iter().zip(&right_keys) {
                        if lk == rk {
                            out.push((self.selector)(Some(l), Some(r), ctx)?);
                            matched = true;
                        }
                    }
                    if !matched && self.kind == JoinKind::Left {
                        out.push((self.selector)(Some(l), None, ctx)?);
                    }
                }
            }
            JoinKind::Right => {
                for (r, rk) in right.iter().zip(&right_keys) {
                    let mut matched = false;
                    for (l, lk) in input.iter().zip(&left_keys) {
                        if lk == rk {
                            out.push((self.selector)(Some(l), Some(r), ctx)?);
                            matched = true;
                        }
                    }
                    if !matched {
                        out.push((self.selector)(None, Some(r), ctx)?);
                    }
                }
            }
            JoinKind::Full => {
                // Consumption is tracked on a private marker array; the
                // operand sequence itself is never touched.
                let mut consumed = alloc::vec![false; right.len()];
                for (l, lk) in input.iter().zip(&left_keys) {
                    let mut matched = false;
                    for (j, (r, rk)) in right.iter().zip(&right_keys).enumerate() {
                        if lk == rk {
                            out.push((self.selector)(Some(l), Some(r), ctx)?);
                            matched = true;
                            consumed[j] = true;
                        }
                    }
                    if !matched {
                        out.push((self.selector)(Some(l), None, ctx)?);
                    }
                }
                // Unmatched right rows go after all left-originated rows.
                for (j, r) in right.iter().enumerate() {
                    if !consumed[j] {
                        out.push((self.selector)(None, Some(r), ctx)?);
                    }
                }
            }
            JoinKind::Cross => unreachable!(),
        }
        Ok(Execution::Sequence(out))
    }
}

/// One row per left item carrying all of its matches.
pub struct GroupJoinNode {
    other: Operand,
    left_key: KeyAccessor,
    right_key: KeyAccessor,
    selector: GroupJoinSelector,
}

impl GroupJoinNode {
    /// Creates a groupJoin node.
    pub fn new(
        other: Operand,
        left_key: KeyAccessor,
        right_key: KeyAccessor,
        selector: GroupJoinSelector,
    ) -> Self {
        Self {
            other,
            left_key,
            right_key,
            selector,
        }
    }
}

impl ExpressionNode for GroupJoinNode {
    fn name(&self) -> &'static str {
        "groupJoin"
    }

    fn execute(&self, input: &[Value], ctx: &ExecutionContext) -> Result<Execution> {
        let right = self.other.items();
        let right_keys: Vec<Value> = right
            .iter()
            .map(|item| (self.right_key)(item, ctx))
            .collect::<Result<_>>()?;

        let mut out = Vec::with_capacity(input.len());
        for l in input {
            let lk = (self.left_key)(l, ctx)?;
            let matches: Vec<Value> = right
                .iter()
                .zip(&right_keys)
                .filter(|(_, rk)| **rk == lk)
                .map(|(r, _)| r.clone())
                .collect();
            out.push((self.selector)(l, &matches, ctx)?);
        }
        Ok(Execution::Sequence(out))
    }
}
