//! The scalar value model for wire payloads.
//!
//! A payload is a flat, positionally-indexed `Vec<Value>`: index 0 carries
//! the command id and index `i` carries whichever parameter of that command
//! was assigned ordinal `i`. Host applications exchange loosely-typed
//! scalars (numbers, strings, booleans); `Value` captures exactly that set
//! plus an explicit `Null` so a decoded command always has a deterministic
//! shape even when trailing payload slots are missing.

use serde::{Deserialize, Serialize};

/// A single wire scalar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Explicit absence – a declared parameter with no payload slot.
    Null,
    /// Signed integer. Colors, media ids, ordinals, and bitmasks all travel
    /// as integers.
    Int(i64),
    /// UTF-8 text.
    Str(String),
    /// Boolean flag.
    Bool(bool),
}

impl Value {
    /// Returns `true` for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the integer content, if this value is an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the string content, if this value is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the boolean content, if this value is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Loose truthiness used by flag-like parameters: `Null` and 0 are
    /// false, any other integer is true.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Int(n) => *n != 0,
            Value::Str(s) => !s.is_empty(),
            Value::Bool(b) => *b,
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
