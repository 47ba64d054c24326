//! Cell values and group keys.
//!
//! Tabular cells are tagged: a number, a piece of text, or a missing marker.
//! Coercion between them is always explicit.

use ordered_float::OrderedFloat;
use serde::{Serialize, Serializer};
use std::fmt;

/// A single cell of a dataset row.
///
/// `Missing` is distinct from zero and from the empty string.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Number(f64),
    Text(String),
    Missing,
}

impl Value {
    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing)
    }

    /// Coerce to a finite number. Text is parsed after trimming.
    pub fn as_number(&self) -> Option<f64> {
        let n = match self {
            Value::Number(n) => *n,
            Value::Text(s) => s.trim().parse::<f64>().ok()?,
            Value::Missing => return None,
        };
        n.is_finite().then_some(n)
    }

    /// Coerce to text. Integral numbers render without a fractional part.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Text(s) => Some(s.clone()),
            Value::Number(n) => Some(format_number(*n)),
            Value::Missing => None,
        }
    }

    /// The grouping key for this cell, `None` when missing.
    pub fn to_key(&self) -> Option<Key> {
        match self {
            Value::Number(n) if n.is_finite() => Some(Key::Number(OrderedFloat(*n))),
            Value::Number(_) | Value::Missing => None,
            Value::Text(s) => Some(Key::Text(s.clone())),
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

/// Normalized group key.
///
/// Numbers sort before text, numbers numerically and text lexicographically,
/// so sorted year axes come out in calendar order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    Number(OrderedFloat<f64>),
    Text(String),
}

impl Key {
    pub fn number(n: f64) -> Self {
        Key::Number(OrderedFloat(n))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Text(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Text(s)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Number(n) => f.write_str(&format_number(n.0)),
            Key::Text(s) => f.write_str(s),
        }
    }
}

impl Serialize for Key {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Key::Number(n) => match as_integer(n.0) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(n.0),
            },
            Key::Text(s) => serializer.serialize_str(s),
        }
    }
}

fn as_integer(n: f64) -> Option<i64> {
    // Beyond 2^53 f64 no longer holds every integer exactly.
    (n.fract() == 0.0 && n.abs() < 9.0e15).then_some(n as i64)
}

fn format_number(n: f64) -> String {
    match as_integer(n) {
        Some(i) => i.to_string(),
        None => n.to_string(),
    }
}
