//! Left-fold aggregation node.

use velum_core::ExecutionContext;
use crate::expr::{Execution, ExpressionNode, FoldFn};
use velum_core::{Result, Value};

/// Terminal left fold over the input sequence.
///
/// An empty sequence folds to `Null`. With a seed, folding covers every
/// element; without one, the first element seeds the accumulator and folding
/// starts at the second.
pub struct AggregateNode {
    fold: FoldFn,
    seed: Option<Value>,
}

impl AggregateNode {
    /// Creates an aggregate node.
    pub fn new(fold: FoldFn, seed: Option<Value>) -> Self {
        Self { fold, seed }
    }
}

impl ExpressionNode for AggregateNode {
    fn name(&self) -> &'static str {
        "aggregate"
    }

    fn is_executer(&self) -> bool {
        true
    }

    fn execute(&self, input: &[Value], ctx: &ExecutionContext) -> Result<Execution> {
        if input.is_empty() {
            return Ok(Execution::Scalar(Value::Null));
        }

        let (mut acc, rest) = match &self.seed {
            Some(seed) => (seed.clone(), input),
            None => (input[0].clone(), &input[1..]),
        };
        for item in rest {
            acc = (self.fold)(&acc, item, ctx)?;
        }
        Ok(Execution::Scalar(acc))
    }
}
