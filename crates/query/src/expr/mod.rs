//! Expression node library.
//!
//! One immutable node type per operator. Each node knows how to execute
//! itself against an input sequence; nodes never mutate their operands, and a
//! node is owned by the pipeline that appended it for its whole lifetime.
//!
//! Every operator in this library is array-only: it runs against in-memory
//! sequences and refuses to translate itself into a remote-query
//! representation (`to_remote` fails with a NotImplemented-class error).

mod aggregate;
mod join;
mod lookup;
mod set_ops;
mod zip;

pub use aggregate::AggregateNode;
pub use join::{GroupJoinNode, JoinKind, JoinNode};
pub use lookup::ToLookupNode;
pub use set_ops::{
    ConcatNode, ContainsNode, ExceptNode, IntersectNode, SequenceEqualNode, UnionNode,
};
pub use zip::ZipNode;

use velum_core::ExecutionContext;
use alloc::rc::Rc;
use alloc::vec;
use alloc::vec::Vec;
use velum_core::{Error, Result, Value, ValueObject};

/// Result of executing one node: a sequence, or a terminal scalar for
/// executer nodes.
#[derive(Clone, Debug, PartialEq)]
pub enum Execution {
    /// Ordered sequence feeding the next node.
    Sequence(Vec<Value>),
    /// Terminal scalar produced by an executer node.
    Scalar(Value),
}

impl Execution {
    /// Returns true for a terminal scalar result.
    pub fn is_scalar(&self) -> bool {
        matches!(self, Execution::Scalar(_))
    }

    /// Converts into a plain sequence; a scalar becomes a single-element
    /// sequence (the shape the materialization view publishes).
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Execution::Sequence(items) => items,
            Execution::Scalar(value) => vec![value],
        }
    }

    /// Returns the scalar if this is a terminal result.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Execution::Scalar(value) => Some(value),
            Execution::Sequence(_) => None,
        }
    }
}

/// A query operator bound to its operands.
pub trait ExpressionNode {
    /// Operator tag, used in error messages.
    fn name(&self) -> &'static str;

    /// True if this node forces a terminal scalar result rather than
    /// producing a sequence.
    fn is_executer(&self) -> bool {
        false
    }

    /// Executes against the input sequence. Pure with respect to the input
    /// and all operand sequences.
    fn execute(&self, input: &[Value], ctx: &ExecutionContext) -> Result<Execution>;

    /// Produces a remote-query representation of this operator.
    ///
    /// The nodes in this library only ever run locally, so the default
    /// refuses with a NotImplemented-class error naming the operator.
    fn to_remote(&self) -> Result<Value> {
        Err(Error::not_supported(self.name()))
    }
}

/// Fixed right-hand operand of a binary operator.
///
/// Owned by the node, shared cheaply across pipeline clones, and never
/// mutated during execution. An absent or `Null` operand is an empty
/// sequence.
#[derive(Clone, Debug, Default)]
pub struct Operand(Rc<Vec<Value>>);

impl Operand {
    /// Creates an operand from a sequence.
    pub fn new(items: Vec<Value>) -> Self {
        Self(Rc::new(items))
    }

    /// Creates an empty operand.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the operand elements.
    pub fn items(&self) -> &[Value] {
        &self.0
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the operand is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<Value>> for Operand {
    fn from(items: Vec<Value>) -> Self {
        Self::new(items)
    }
}

impl From<Option<Vec<Value>>> for Operand {
    fn from(items: Option<Vec<Value>>) -> Self {
        items.map(Self::new).unwrap_or_default()
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::empty(),
            Value::Array(items) => Self::new(items),
            other => Self::new(vec![other]),
        }
    }
}

/// Folding callable for `aggregate`: accumulator and element in, new
/// accumulator out.
pub type FoldFn = Rc<dyn Fn(&Value, &Value, &ExecutionContext) -> Result<Value>>;

/// Row selector for the join family and `zip`. Either side is `None` for the
/// unmatched rows of outer joins.
pub type JoinSelector = Rc<dyn Fn(Option<&Value>, Option<&Value>, &ExecutionContext) -> Result<Value>>;

/// Row selector for `groupJoin`: left item plus all its matches.
pub type GroupJoinSelector = Rc<dyn Fn(&Value, &[Value], &ExecutionContext) -> Result<Value>>;

/// Group selector for `toLookup`: group items plus their key.
pub type GroupSelector = Rc<dyn Fn(&[Value], &Value, &ExecutionContext) -> Result<Value>>;

/// Wraps a closure as a fold callable.
pub fn fold_fn<F>(f: F) -> FoldFn
where
    F: Fn(&Value, &Value, &ExecutionContext) -> Result<Value> + 'static,
{
    Rc::new(f)
}

/// Wraps a closure as a join/zip row selector.
pub fn join_selector<F>(f: F) -> JoinSelector
where
    F: Fn(Option<&Value>, Option<&Value>, &ExecutionContext) -> Result<Value> + 'static,
{
    Rc::new(f)
}

/// Wraps a closure as a groupJoin row selector.
pub fn group_join_selector<F>(f: F) -> GroupJoinSelector
where
    F: Fn(&Value, &[Value], &ExecutionContext) -> Result<Value> + 'static,
{
    Rc::new(f)
}

/// Wraps a closure as a toLookup group selector.
pub fn group_selector<F>(f: F) -> GroupSelector
where
    F: Fn(&[Value], &Value, &ExecutionContext) -> Result<Value> + 'static,
{
    Rc::new(f)
}

/// The default row selector: shallow merge of both sides.
pub(crate) fn default_join_selector() -> JoinSelector {
    Rc::new(|left, right, _ctx| Ok(shallow_merge(left, right)))
}

/// The default groupJoin selector: the left item extended with its matches
/// under an `items` entry (or paired with them in an array for non-object
/// left items). A pre-existing `items` property is replaced, mirroring the
/// right-wins rule of the default join merge; pass an explicit selector to
/// keep it.
pub(crate) fn default_group_join_selector() -> GroupJoinSelector {
    Rc::new(|left, matches, _ctx| {
        let items = Value::Array(matches.to_vec());
        Ok(match left {
            Value::Object(obj) => {
                let mut merged = obj.clone();
                merged.insert("items", items);
                Value::Object(merged)
            }
            other => Value::Array(vec![other.clone(), items]),
        })
    })
}

/// Shallow merge used by the default join/zip selectors.
///
/// Two objects merge into one (right side wins on key collisions); an object
/// paired with an absent or null partner is cloned; any other pairing yields
/// a two-element array of the raw sides.
pub(crate) fn shallow_merge(left: Option<&Value>, right: Option<&Value>) -> Value {
    let l = left.filter(|v| !v.is_null());
    let r = right.filter(|v| !v.is_null());

    match (l, r) {
        (Some(Value::Object(lo)), Some(Value::Object(ro))) => {
            let mut merged = ValueObject::with_capacity(lo.len() + ro.len());
            for (k, v) in lo.iter() {
                merged.insert(k, v.clone());
            }
            for (k, v) in ro.iter() {
                merged.insert(k, v.clone());
            }
            Value::Object(merged)
        }
        (Some(Value::Object(lo)), None) => Value::Object(lo.clone()),
        (None, Some(Value::Object(ro))) => Value::Object(ro.clone()),
        _ => Value::Array(vec![
            left.cloned().unwrap_or(Value::Null),
            right.cloned().unwrap_or(Value::Null),
        ]),
    }
}
