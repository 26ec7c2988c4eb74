//! Set-algebra and sequence-comparison nodes.
//!
//! All comparisons here use structural equality, never identity or ordering.
//! Distinct-set bookkeeping borrows references into the input and operand
//! sequences, so no element is cloned until it is emitted.

use velum_core::ExecutionContext;
use crate::expr::{Execution, ExpressionNode, Operand};
use alloc::vec::Vec;
use hashbrown::HashSet;
use velum_core::{Result, Value};

/// Input sequence followed by the operand, no dedup.
pub struct ConcatNode {
    other: Operand,
}

impl ConcatNode {
    /// Creates a concat node.
    pub fn new(other: Operand) -> Self {
        Self { other }
    }
}

impl ExpressionNode for ConcatNode {
    fn name(&self) -> &'static str {
        "concat"
    }

    fn execute(&self, input: &[Value], _ctx: &ExecutionContext) -> Result<Execution> {
        let mut out = Vec::with_capacity(input.len() + self.other.len());
        out.extend_from_slice(input);
        out.extend_from_slice(self.other.items());
        Ok(Execution::Sequence(out))
    }
}

/// Terminal membership test against a single probe value.
pub struct ContainsNode {
    item: Value,
}

impl ContainsNode {
    /// Creates a contains node.
    pub fn new(item: Value) -> Self {
        Self { item }
    }
}

impl ExpressionNode for ContainsNode {
    fn name(&self) -> &'static str {
        "contains"
    }

    fn is_executer(&self) -> bool {
        true
    }

    fn execute(&self, input: &[Value], _ctx: &ExecutionContext) -> Result<Execution> {
        let found = input.iter().any(|v| *v == self.item);
        Ok(Execution::Scalar(Value::Bool(found)))
    }
}

/// Elements of the input with no structural match in the operand.
///
/// Source order is preserved and source duplicates are retained when each
/// independently fails to match.
pub struct ExceptNode {
    other: Operand,
}

impl ExceptNode {
    /// Creates an except node.
    pub fn new(other: Operand) -> Self {
        Self { other }
    }
}

impl ExpressionNode for ExceptNode {
    fn name(&self) -> &'static str {
        "except"
    }

    fn execute(&self, input: &[Value], _ctx: &ExecutionContext) -> Result<Execution> {
        let exclude: HashSet<&Value> = self.other.items().iter().collect();
        let out = input
            .iter()
            .filter(|v| !exclude.contains(*v))
            .cloned()
            .collect();
        Ok(Execution::Sequence(out))
    }
}

/// Distinct elements of the input (first occurrence) that also appear in the
/// operand.
pub struct IntersectNode {
    other: Operand,
}

impl IntersectNode {
    /// Creates an intersect node.
    pub fn new(other: Operand) -> Self {
        Self { other }
    }
}

impl ExpressionNode for IntersectNode {
    fn name(&self) -> &'static str {
        "intersect"
    }

    fn execute(&self, input: &[Value], _ctx: &ExecutionContext) -> Result<Execution> {
        let keep: HashSet<&Value> = self.other.items().iter().collect();
        let mut emitted: HashSet<&Value> = HashSet::new();
        let mut out = Vec::new();
        for v in input {
            if keep.contains(v) && emitted.insert(v) {
                out.push(v.clone());
            }
        }
        Ok(Execution::Sequence(out))
    }
}

/// Distinct union: the input's distinct elements first (first-occurrence
/// order), then the operand's elements not already present.
pub struct UnionNode {
    other: Operand,
}

impl UnionNode {
    /// Creates a union node.
    pub fn new(other: Operand) -> Self {
        Self { other }
    }
}

impl ExpressionNode for UnionNode {
    fn name(&self) -> &'static str {
        "union"
    }

    fn execute(&self, input: &[Value], _ctx: &ExecutionContext) -> Result<Execution> {
        let mut seen: HashSet<&Value> = HashSet::new();
        let mut out = Vec::new();
        for v in input.iter().chain(self.other.items()) {
            if seen.insert(v) {
                out.push(v.clone());
            }
        }
        Ok(Execution::Sequence(out))
    }
}

/// Terminal element-wise comparison of two sequences.
pub struct SequenceEqualNode {
    other: Operand,
}

impl SequenceEqualNode {
    /// Creates a sequenceEqual node.
    pub fn new(other: Operand) -> Self {
        Self { other }
    }
}

impl ExpressionNode for SequenceEqualNode {
    fn name(&self) -> &'static str {
        "sequenceEqual"
    }

    fn is_executer(&self) -> bool {
        true
    }

    fn execute(&self, input: &[Value], _ctx: &ExecutionContext) -> Result<Execution> {
        let equal = input.len() == self.other.len()
            && input
                .iter()
                .zip(self.other.items())
                .all(|(a, b)| a == b);
        Ok(Execution::Scalar(Value::Bool(equal)))
    }
}
