//! Structural equality over JSON-shaped data.
//!
//! Used to skip re-rendering when a freshly fetched record is identical to
//! the one already on screen.

use serde::Serialize;
use serde_json::{Number, Value};

/// Recursively compare two values.
///
/// Arrays are equal when they have the same length and equal elements in
/// order. Objects are equal when they have the same key set and equal values
/// per key, regardless of key order. Numbers compare by numeric value, so `1`
/// equals `1.0`. Everything else compares by value, and mismatched shapes are
/// never equal.
pub fn deep_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Array(left), Value::Array(right)) => {
            left.len() == right.len()
                && left.iter().zip(right).all(|(l, r)| deep_equal(l, r))
        }
        (Value::Object(left), Value::Object(right)) => {
            left.len() == right.len()
                && left.iter().all(|(key, l)| {
                    right.get(key).is_some_and(|r| deep_equal(l, r))
                })
        }
        (Value::Number(left), Value::Number(right)) => numbers_equal(left, right),
        (Value::String(left), Value::String(right)) => left == right,
        (Value::Bool(left), Value::Bool(right)) => left == right,
        (Value::Null, Value::Null) => true,
        _ => false,
    }
}

fn numbers_equal(left: &Number, right: &Number) -> bool {
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        return l == r;
    }
    if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
        return l == r;
    }
    match (left.as_f64(), right.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => false,
    }
}

/// Serialize both sides to JSON and compare them structurally.
pub fn deep_equal_serialized<A, B>(a: &A, b: &B) -> Result<bool, serde_json::Error>
where
    A: Serialize + ?Sized,
    B: Serialize + ?Sized,
{
    let left = serde_json::to_value(a)?;
    let right = serde_json::to_value(b)?;
    Ok(deep_equal(&left, &right))
}

/// Remembers the last value it was offered and reports real changes only.
#[derive(Debug, Clone, Default)]
pub struct ChangeGate {
    last: Option<Value>,
}

impl ChangeGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when `value` differs from the previous offer (or is the
    /// first one). The gate keeps `value` either way.
    pub fn offer(&mut self, value: Value) -> bool {
        let changed = match &self.last {
            Some(previous) => !deep_equal(previous, &value),
            None => true,
        };
        if changed {
            self.last = Some(value);
        }
        changed
    }

    pub fn last(&self) -> Option<&Value> {
        self.last.as_ref()
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}
