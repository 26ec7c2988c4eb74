//! Structural equality over values.
//!
//! This is the single key-comparison primitive used by every set operator,
//! join and grouping in the engine. Two primitives are equal by value, two
//! dates by instant, two arrays element-wise in order, and two objects when
//! every non-reserved property of each is deeply equal to the same-named
//! property of the other. `Null` equals only itself. No total order is
//! defined - only equivalence - so `Value` implements `PartialEq`/`Eq`/`Hash`
//! but not `Ord`.

use crate::value::{Value, ValueObject};
use core::hash::{Hash, Hasher};

/// Deep, order-sensitive structural equality between two values.
///
/// Equivalent to `a == b`; exposed as a named function so call sites that
/// compare keys read as equality-service invocations.
#[inline]
pub fn structural_eq(a: &Value, b: &Value) -> bool {
    a == b
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => {
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Value::String(a), Value::String(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Object(a), Value::Object(b)) => object_eq(a, b),
            _ => false,
        }
    }
}

impl Eq for Value {}

/// Bidirectional property-wise comparison, reserved keys excluded.
///
/// Entries are sorted by key on both sides, so a single merge walk over the
/// visible entries covers both directions: any key present on one side but
/// not the other fails the walk.
fn object_eq(a: &ValueObject, b: &ValueObject) -> bool {
    let mut lhs = a.visible();
    let mut rhs = b.visible();
    loop {
        match (lhs.next(), rhs.next()) {
            (None, None) => return true,
            (Some((ka, va)), Some((kb, vb))) => {
                if ka != kb || va != vb {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => hash_f64(*n, state),
            Value::String(s) => s.hash(state),
            Value::DateTime(ts) => ts.hash(state),
            Value::Array(arr) => {
                arr.len().hash(state);
                for item in arr {
                    item.hash(state);
                }
            }
            Value::Object(obj) => {
                // Visible entries only, in sorted key order, so the hash
                // agrees with object_eq.
                for (k, v) in obj.visible() {
                    k.hash(state);
                    v.hash(state);
                }
            }
        }
    }
}

/// Hashes a float consistently with the NaN-equals-NaN, -0.0 == 0.0 equality.
fn hash_f64<H: Hasher>(n: f64, state: &mut H) {
    let bits = if n.is_nan() {
        f64::NAN.to_bits()
    } else if n == 0.0 {
        0f64.to_bits()
    } else {
        n.to_bits()
    };
    bits.hash(state);
}
