//! Immutable query pipeline.
//!
//! A pipeline pairs a read-shared source sequence with an ordered list of
//! expression nodes. Composing an operator never mutates the receiver: it
//! returns a new pipeline sharing the source handle and the existing node
//! references, plus the appended node. Nothing executes until `execute` is
//! called (typically through the materialization view's count read), at
//! which point the nodes fold left-to-right over a snapshot of the source.

use velum_core::ExecutionContext;
use crate::expr::{
    default_group_join_selector, default_join_selector, AggregateNode, ConcatNode, ContainsNode,
    ExceptNode, Execution, ExpressionNode, FoldFn, GroupJoinNode, GroupJoinSelector,
    GroupSelector, IntersectNode, JoinKind, JoinNode, JoinSelector, Operand, SequenceEqualNode,
    ToLookupNode, UnionNode, ZipNode,
};
use crate::resolver::KeySpec;
use alloc::rc::Rc;
use alloc::vec::Vec;
use velum_core::{shared, Error, Result, SharedSequence, Value};
use velum_path::{ExpressionCompiler, PathCompiler};

/// An immutable, composable query over a shared source sequence.
#[derive(Clone)]
pub struct Pipeline {
    source: SharedSequence,
    nodes: Vec<Rc<dyn ExpressionNode>>,
    compiler: Rc<dyn ExpressionCompiler>,
}

/// Wraps a caller-owned sequence as a queryable pipeline.
///
/// The explicit conversion entry point: host collection types are never
/// extended globally.
pub fn as_queryable(source: SharedSequence) -> Pipeline {
    Pipeline::new(source)
}

impl Pipeline {
    /// Creates a pipeline over a shared source with the default path
    /// compiler.
    pub fn new(source: SharedSequence) -> Self {
        Self::with_compiler(source, Rc::new(PathCompiler::new()))
    }

    /// Creates a pipeline with a caller-injected expression compiler.
    pub fn with_compiler(source: SharedSequence, compiler: Rc<dyn ExpressionCompiler>) -> Self {
        Self {
            source,
            nodes: Vec::new(),
            compiler,
        }
    }

    /// Creates a pipeline over an owned sequence.
    pub fn from_values(items: Vec<Value>) -> Self {
        Self::new(shared(items))
    }

    /// Returns the shared source handle.
    pub fn source(&self) -> &SharedSequence {
        &self.source
    }

    /// Returns the number of composed nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns a new pipeline equal to the receiver plus `node` appended.
    /// The receiver is unmodified; prior nodes are shared by reference.
    pub fn add_expression(&self, node: Rc<dyn ExpressionNode>) -> Self {
        let mut nodes = self.nodes.clone();
        nodes.push(node);
        Self {
            source: self.source.clone(),
            nodes,
            compiler: self.compiler.clone(),
        }
    }

    fn resolve(&self, spec: KeySpec) -> Result<crate::resolver::KeyAccessor> {
        spec.resolve(self.compiler.as_ref())
    }

    // ---- operator composition ----------------------------------------

    /// Terminal left fold. See `AggregateNode`.
    pub fn aggregate(&self, fold: FoldFn, seed: Option<Value>) -> Self {
        self.add_expression(Rc::new(AggregateNode::new(fold, seed)))
    }

    /// Appends the operand sequence, no dedup.
    pub fn concat(&self, other: impl Into<Operand>) -> Self {
        self.add_expression(Rc::new(ConcatNode::new(other.into())))
    }

    /// Terminal structural membership test.
    pub fn contains(&self, item: Value) -> Self {
        self.add_expression(Rc::new(ContainsNode::new(item)))
    }

    /// Elements without a structural match in the operand.
    pub fn except(&self, other: impl Into<Operand>) -> Self {
        self.add_expression(Rc::new(ExceptNode::new(other.into())))
    }

    /// Distinct elements also present in the operand.
    pub fn intersect(&self, other: impl Into<Operand>) -> Self {
        self.add_expression(Rc::new(IntersectNode::new(other.into())))
    }

    /// Distinct union with the operand.
    pub fn union(&self, other: impl Into<Operand>) -> Self {
        self.add_expression(Rc::new(UnionNode::new(other.into())))
    }

    /// Inner key-equality join.
    pub fn join(
        &self,
        other: impl Into<Operand>,
        this_key: impl Into<KeySpec>,
        other_key: impl Into<KeySpec>,
        selector: Option<JoinSelector>,
    ) -> Result<Self> {
        self.keyed_join(JoinKind::Inner, other.into(), this_key.into(), other_key.into(), selector)
    }

    /// Left outer join.
    pub fn left_join(
        &self,
        other: impl Into<Operand>,
        this_key: impl Into<KeySpec>,
        other_key: impl Into<KeySpec>,
        selector: Option<JoinSelector>,
    ) -> Result<Self> {
        self.keyed_join(JoinKind::Left, other.into(), this_key.into(), other_key.into(), selector)
    }

    /// Right outer join.
    pub fn right_join(
        &self,
        other: impl Into<Operand>,
        this_key: impl Into<KeySpec>,
        other_key: impl Into<KeySpec>,
        selector: Option<JoinSelector>,
    ) -> Result<Self> {
        self.keyed_join(JoinKind::Right, other.into(), this_key.into(), other_key.into(), selector)
    }

    /// Full outer join; unmatched operand rows are appended last.
    pub fn full_join(
        &self,
        other: impl Into<Operand>,
        this_key: impl Into<KeySpec>,
        other_key: impl Into<KeySpec>,
        selector: Option<JoinSelector>,
    ) -> Result<Self> {
        self.keyed_join(JoinKind::Full, other.into(), this_key.into(), other_key.into(), selector)
    }

    fn keyed_join(
        &self,
        kind: JoinKind,
        other: Operand,
        this_key: KeySpec,
        other_key: KeySpec,
        selector: Option<JoinSelector>,
    ) -> Result<Self> {
        let left_key = self.resolve(this_key)?;
        let right_key = self.resolve(other_key)?;
        Ok(self.add_expression(Rc::new(JoinNode::new(
            kind,
            other,
            Some(left_key),
            Some(right_key),
            selector.unwrap_or_else(default_join_selector),
        ))))
    }

    /// Cartesian product, no keys.
    pub fn cross_join(&self, other: impl Into<Operand>, selector: Option<JoinSelector>) -> Self {
        self.add_expression(Rc::new(JoinNode::new(
            JoinKind::Cross,
            other.into(),
            None,
            None,
            selector.unwrap_or_else(default_join_selector),
        )))
    }

    /// One row per left item carrying all of its matches.
    pub fn group_join(
        &self,
        other: impl Into<Operand>,
        this_key: impl Into<KeySpec>,
        other_key: impl Into<KeySpec>,
        selector: Option<GroupJoinSelector>,
    ) -> Result<Self> {
        let left_key = self.resolve(this_key.into())?;
        let right_key = self.resolve(other_key.into())?;
        Ok(self.add_expression(Rc::new(GroupJoinNode::new(
            other.into(),
            left_key,
            right_key,
            selector.unwrap_or_else(default_group_join_selector),
        ))))
    }

    /// Terminal element-wise comparison with the operand.
    pub fn sequence_equal(&self, other: impl Into<Operand>) -> Self {
        self.add_expression(Rc::new(SequenceEqualNode::new(other.into())))
    }

    /// Groups by resolved key, preserving first-occurrence key order.
    pub fn to_lookup(
        &self,
        key: Option<KeySpec>,
        element: Option<GroupSelector>,
    ) -> Result<Self> {
        let key = match key {
            Some(spec) => Some(self.resolve(spec)?),
            None => None,
        };
        Ok(self.add_expression(Rc::new(ToLookupNode::new(key, element))))
    }

    /// Pairwise combination with the operand, up to the shorter length.
    pub fn zip(&self, other: impl Into<Operand>, selector: Option<JoinSelector>) -> Self {
        self.add_expression(Rc::new(ZipNode::new(
            other.into(),
            selector.unwrap_or_else(default_join_selector),
        )))
    }

    // ---- evaluation ---------------------------------------------------

    /// Runs every node in order over a snapshot of the source.
    ///
    /// An executer node must be the last node: composing past a terminal
    /// scalar is an `InvalidOperation` error. No result is cached; each call
    /// re-reads the source.
    pub fn execute(&self, ctx: &ExecutionContext) -> Result<Execution> {
        let mut current: Vec<Value> = self.source.borrow().clone();
        for (index, node) in self.nodes.iter().enumerate() {
            match node.execute(&current, ctx)? {
                Execution::Sequence(next) => current = next,
                Execution::Scalar(value) => {
                    if index + 1 != self.nodes.len() {
                        return Err(Error::invalid_operation(alloc::format!(
                            "operator {} is terminal but is not the last node",
                            node.name()
                        )));
                    }
                    return Ok(Execution::Scalar(value));
                }
            }
        }
        Ok(Execution::Sequence(current))
    }

    /// Executes and flattens the result into a sequence (scalars become a
    /// single-element sequence).
    pub fn execute_to_values(&self, ctx: &ExecutionContext) -> Result<Vec<Value>> {
        Ok(self.execute(ctx)?.into_values())
    }

    /// Produces a remote-query representation of the composed operators.
    ///
    /// Every operator in this library is array-only, so the first composed
    /// node refuses with a NotImplemented-class error.
    pub fn to_remote(&self) -> Result<Value> {
        let mut parts = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            parts.push(node.to_remote()?);
        }
        Ok(Value::Array(parts))
    }
}
