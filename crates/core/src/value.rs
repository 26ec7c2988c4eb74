//! Value type definitions for the Velum data-access layer.
//!
//! This module defines the `Value` enum which represents any value that can
//! flow through a query pipeline, together with `ValueObject`, the dynamic
//! record type used for entity-shaped data.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Prefix marking internal bookkeeping properties on objects.
///
/// Keys starting with this prefix (entity-state slots, tracking metadata) are
/// stored and retrievable like any other entry but are excluded from
/// structural equality and hashing. See the `equality` module.
pub const RESERVED_PREFIX: &str = "__";

/// A dynamic value flowing through a query pipeline.
#[derive(Clone, Debug)]
pub enum Value {
    /// Null / absent value
    Null,
    /// Boolean value
    Bool(bool),
    /// Numeric value (stored as f64)
    Number(f64),
    /// UTF-8 string
    String(String),
    /// Date stored as Unix timestamp in milliseconds
    DateTime(i64),
    /// Ordered sequence of values
    Array(Vec<Value>),
    /// Entity-shaped record with named properties
    Object(ValueObject),
}

/// A dynamic record with keys sorted for efficient lookup.
#[derive(Clone, Debug, Default)]
pub struct ValueObject {
    /// Entries stored sorted by key for binary search
    entries: Vec<(String, Value)>,
}

impl ValueObject {
    /// Creates a new empty object.
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    /// Creates an object with pre-allocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of entries, reserved ones included.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the object has no entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Gets a value by key using binary search. O(log n)
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|idx| &self.entries[idx].1)
    }

    /// Gets a mutable value by key using binary search. O(log n)
    pub fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|idx| &mut self.entries[idx].1)
    }

    /// Inserts a key-value pair, maintaining sorted order.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        let key = key.into();
        match self.entries.binary_search_by(|(k, _)| k.as_str().cmp(&key)) {
            Ok(idx) => {
                self.entries[idx].1 = value;
            }
            Err(idx) => {
                self.entries.insert(idx, (key, value));
            }
        }
    }

    /// Removes a key and returns its value if present.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .ok()
            .map(|idx| self.entries.remove(idx).1)
    }

    /// Returns true if the object contains the given key.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries
            .binary_search_by(|(k, _)| k.as_str().cmp(key))
            .is_ok()
    }

    /// Returns an iterator over the keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Returns an iterator over the values.
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    /// Returns an iterator over key-value pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Returns an iterator over the non-reserved key-value pairs.
    ///
    /// This is the view of the object that structural equality sees.
    pub fn visible(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .filter(|(k, _)| !k.starts_with(RESERVED_PREFIX))
            .map(|(k, v)| (k.as_str(), v))
    }

    /// Returns the number of non-reserved entries.
    pub fn visible_len(&self) -> usize {
        self.visible().count()
    }
}

impl FromIterator<(String, Value)> for ValueObject {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        let mut obj = Self::new();
        for (k, v) in iter {
            obj.insert(k, v);
        }
        obj
    }
}

impl Value {
    /// Returns true if this is a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this is a boolean value.
    #[inline]
    pub fn is_bool(&self) -> bool {
        matches!(self, Value::Bool(_))
    }

    /// Returns true if this is a number value.
    #[inline]
    pub fn is_number(&self) -> bool {
        matches!(self, Value::Number(_))
    }

    /// Returns true if this is a string value.
    #[inline]
    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns true if this is an array value.
    #[inline]
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns true if this is an object value.
    #[inline]
    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns the boolean value if this is a Bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the number value if this is a Number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the number as i64 if this is a Number and it's an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => {
                let i = *n as i64;
                if (i as f64) == *n {
                    Some(i)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Returns a reference to the string if this is a String.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the timestamp if this is a DateTime.
    pub fn as_datetime(&self) -> Option<i64> {
        match self {
            Value::DateTime(ts) => Some(*ts),
            _ => None,
        }
    }

    /// Returns a reference to the array if this is an Array.
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// Returns a reference to the object if this is an Object.
    pub fn as_object(&self) -> Option<&ValueObject> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Returns a mutable reference to the object if this is an Object.
    pub fn as_object_mut(&mut self) -> Option<&mut ValueObject> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Gets a value by key if this is an Object.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Gets a value by index if this is an Array.
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|arr| arr.get(index))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Number(v as f64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<ValueObject> for Value {
    fn from(v: ValueObject) -> Self {
        Value::Object(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_object_insert_and_get() {
        let mut obj = ValueObject::new();
        obj.insert("name", Value::String("Alice".into()));
        obj.insert("age", Value::Number(25.0));

        assert_eq!(obj.get("name"), Some(&Value::String("Alice".into())));
        assert_eq!(obj.get("age"), Some(&Value::Number(25.0)));
        assert_eq!(obj.get("missing"), None);
    }

    #[test]
    fn test_object_sorted_keys() {
        let mut obj = ValueObject::new();
        obj.insert("z", Value::Number(1.0));
        obj.insert("a", Value::Number(2.0));
        obj.insert("m", Value::Number(3.0));

        let keys: Vec<_> = obj.keys().collect();
        assert_eq!(keys, vec!["a", "m", "z"]);
    }

    #[test]
    fn test_object_remove() {
        let mut obj = ValueObject::new();
        obj.insert("key", Value::Number(42.0));

        assert!(obj.contains_key("key"));
        let removed = obj.remove("key");
        assert_eq!(removed, Some(Value::Number(42.0)));
        assert!(!obj.contains_key("key"));
    }

    #[test]
    fn test_object_visible_skips_reserved() {
        let mut obj = ValueObject::new();
        obj.insert("id", Value::Number(1.0));
        obj.insert("__state", Value::String("tracked".into()));

        assert_eq!(obj.len(), 2);
        assert_eq!(obj.visible_len(), 1);
        assert!(obj.contains_key("__state"));

        let visible: Vec<_> = obj.visible().map(|(k, _)| k).collect();
        assert_eq!(visible, vec!["id"]);
    }

    #[test]
    fn test_value_type_checks() {
        assert!(Value::Null.is_null());
        assert!(Value::Bool(true).is_bool());
        assert!(Value::Number(42.0).is_number());
        assert!(Value::String("test".into()).is_string());
        assert!(Value::Array(vec![]).is_array());
        assert!(Value::Object(ValueObject::new()).is_object());
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Bool(true).as_bool(), Some(true));
        assert_eq!(Value::Number(3.5).as_f64(), Some(3.5));
        assert_eq!(Value::Number(42.0).as_i64(), Some(42));
        assert_eq!(Value::Number(3.5).as_i64(), None);
        assert_eq!(Value::String("hello".into()).as_str(), Some("hello"));
        assert_eq!(Value::DateTime(1234567890).as_datetime(), Some(1234567890));
    }

    #[test]
    fn test_value_from_impls() {
        let v: Value = true.into();
        assert_eq!(v.as_bool(), Some(true));

        let v: Value = 42i64.into();
        assert_eq!(v.as_f64(), Some(42.0));

        let v: Value = "hello".into();
        assert_eq!(v.as_str(), Some("hello"));

        let v: Value = None::<i32>.into();
        assert!(v.is_null());
    }

    #[test]
    fn test_nested_access() {
        let mut inner = ValueObject::new();
        inner.insert("city", Value::String("Paris".into()));

        let mut outer = ValueObject::new();
        outer.insert("address", Value::Object(inner));

        let value = Value::Object(outer);
        assert_eq!(
            value.get("address").and_then(|a| a.get("city")),
            Some(&Value::String("Paris".into()))
        );
        assert_eq!(value.get("missing"), None);
    }

    #[test]
    fn test_array_access() {
        let arr = Value::Array(vec![
            Value::Number(1.0),
            Value::Number(2.0),
            Value::Number(3.0),
        ]);

        assert_eq!(arr.get_index(0), Some(&Value::Number(1.0)));
        assert_eq!(arr.get_index(2), Some(&Value::Number(3.0)));
        assert_eq!(arr.get_index(10), None);
    }
}
