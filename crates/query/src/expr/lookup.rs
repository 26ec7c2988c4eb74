//! Grouping node (`toLookup`).

use velum_core::ExecutionContext;
use crate::expr::{Execution, ExpressionNode, GroupSelector};
use crate::resolver::KeyAccessor;
use alloc::vec::Vec;
use hashbrown::HashMap;
use velum_core::{Result, Value, ValueObject};

/// Groups elements by resolved key using structural key equality.
///
/// Group order follows the first occurrence of each distinct key in the
/// input; item order within a group follows source order. Without a key
/// accessor every element lands in one group keyed `Null`. With an element
/// selector each group is replaced by `selector(items, key)`; otherwise
/// groups surface as `{key, items}` objects.
pub struct ToLookupNode {
    key: Option<KeyAccessor>,
    element: Option<GroupSelector>,
}

impl ToLookupNode {
    /// Creates a toLookup node.
    pub fn new(key: Option<KeyAccessor>, element: Option<GroupSelector>) -> Self {
        Self { key, element }
    }
}

/// Builds the default `{key, items}` group shape.
fn group_value(key: Value, items: Vec<Value>) -> Value {
    let mut group = ValueObject::with_capacity(2);
    group.insert("key", key);
    group.insert("items", Value::Array(items));
    Value::Object(group)
}

impl ExpressionNode for ToLookupNode {
    fn name(&self) -> &'static str {
        "toLookup"
    }

    fn execute(&self, input: &[Value], ctx: &ExecutionContext) -> Result<Execution> {
        // Key -> slot in the ordered group list.
        let mut slots: HashMap<Value, usize> = HashMap::new();
        let mut groups: Vec<(Value, Vec<Value>)> = Vec::new();

        for item in input {
            let key = match &self.key {
                Some(accessor) => accessor(item, ctx)?,
                None => Value::Null,
            };
            match slots.get(&key) {
                Some(&slot) => groups[slot].1.push(item.clone()),
                None => {
                    slots.insert(key.clone(), groups.len());
                    groups.push((key, alloc::vec![item.clone()]));
                }
            }
        }

        let mut out = Vec::with_capacity(groups.len());
        for (key, items) in groups {
            let row = match &self.element {
                Some(selector) => selector(&items, &key, ctx)?,
                None => group_value(key, items),
            };
            out.push(row);
        }
        Ok(Execution::Sequence(out))
    }
}
