//! Pairwise combination node (`zip`).

use velum_core::ExecutionContext;
use crate::expr::{Execution, ExpressionNode, JoinSelector, Operand};
use alloc::vec::Vec;
use velum_core::{Result, Value};

/// Combines the input pairwise with the operand, up to the shorter length.
pub struct ZipNode {
    other: Operand,
    selector: JoinSelector,
}

impl ZipNode {
    /// Creates a zip node.
    pub fn new(other: Operand, selector: JoinSelector) -> Self {
        Self { other, selector }
    }
}

impl ExpressionNode for ZipNode {
    fn name(&self) -> &'static str {
        "zip"
    }

    fn execute(&self, input: &[Value], ctx: &ExecutionContext) -> Result<Execution> {
        let len = input.len().min(self.other.len());
        let mut out = Vec::with_capacity(len);
        for (l, r) in input.iter().zip(self.other.items()).take(len) {
            out.push((self.selector)(Some(l), Some(r), ctx)?);
        }
        Ok(Execution::Sequence(out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{default_join_selector, join_selector};
    use alloc::vec;

    fn numbers(ns: &[f64]) -> Vec<Value> {
        ns.iter().map(|n| Value::Number(*n)).collect()
    }

    fn seq(result: Execution) -> Vec<Value> {
        match result {
            Execution::Sequence(items) => items,
            Execution::Scalar(v) => panic!("expected sequence, got scalar {:?}", v),
        }
    }

    #[test]
    fn test_zip_stops_at_shorter() {
        let node = ZipNode::new(numbers(&[10.0, 20.0]).into(), default_join_selector());
        let out = seq(
            node.execute(&numbers(&[1.0, 2.0, 3.0]), &ExecutionContext::new())
                .unwrap(),
        );

        // Two rows, never three.
        assert_eq!(out.len(), 2);
        assert_eq!(
            out[0],
            Value::Array(vec![Value::Number(1.0), Value::Number(10.0)])
        );
    }

    #[test]
    fn test_zip_custom_selector() {
        let node = ZipNode::new(
            numbers(&[10.0, 20.0, 30.0]).into(),
            join_selector(|l, r, _| {
                Ok(Value::Number(
                    l.and_then(Value::as_f64).unwrap_or(0.0)
                        + r.and_then(Value::as_f64).unwrap_or(0.0),
                ))
            }),
        );
        let out = seq(
            node.execute(&numbers(&[1.0, 2.0]), &ExecutionContext::new())
                .unwrap(),
        );
        assert_eq!(out, numbers(&[11.0, 22.0]));
    }

    #[test]
    fn test_zip_empty_operand() {
        let node = ZipNode::new(Operand::empty(), default_join_selector());
        let out = seq(
            node.execute(&numbers(&[1.0]), &ExecutionContext::new())
                .unwrap(),
        );
        assert!(out.is_empty());
    }
}
