use std::cmp::Ordering;
use std::fmt;

use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// The type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    Int64,
    Float64,
    String,
    Bool,
    ObjectId,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::Int64 => "int64",
            Kind::Float64 => "float64",
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::ObjectId => "object_id",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An owned scalar value — the full type domain a record field can hold.
///
/// Scalars are copied by value; only strings allocate. ObjectId is the
/// 24-hex-char identifier token type used for generated `_id`s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Int64(i64),
    Float64(f64),
    String(String),
    Bool(bool),
    ObjectId(ObjectId),
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Value::Int64(_) => Kind::Int64,
            Value::Float64(_) => Kind::Float64,
            Value::String(_) => Kind::String,
            Value::Bool(_) => Kind::Bool,
            Value::ObjectId(_) => Kind::ObjectId,
        }
    }

    // ── Kind-checked accessors ──────────────────────────────────

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float64(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_object_id(&self) -> Option<ObjectId> {
        match self {
            Value::ObjectId(oid) => Some(*oid),
            _ => None,
        }
    }

    /// Render this value as an identifier token, if its kind can identify a
    /// record: strings as-is, ObjectIds as their 24-char hex form.
    pub fn id_token(&self) -> Option<String> {
        match self {
            Value::String(s) => Some(s.clone()),
            Value::ObjectId(oid) => Some(oid.to_hex()),
            _ => None,
        }
    }

    /// Whether two values can be compared at all: same kind, or the
    /// int64/float64 numeric pair.
    pub fn comparable(&self, other: &Value) -> bool {
        self.kind() == other.kind() || (self.is_numeric() && other.is_numeric())
    }

    fn is_numeric(&self) -> bool {
        matches!(self, Value::Int64(_) | Value::Float64(_))
    }

    /// Total order within a kind, numeric across int64/float64.
    ///
    /// Returns `None` for cross-kind pairs and for comparisons involving
    /// NaN — callers treat both as "not matched".
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::Int64(a), Value::Int64(b)) => Some(a.cmp(b)),
            (Value::Int64(a), Value::Float64(b)) => (*a as f64).partial_cmp(b),
            (Value::Float64(a), Value::Int64(b)) => a.partial_cmp(&(*b as f64)),
            (Value::Float64(a), Value::Float64(b)) => a.partial_cmp(b),
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
            (Value::ObjectId(a), Value::ObjectId(b)) => Some(a.bytes().cmp(&b.bytes())),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int64(i) => write!(f, "{i}"),
            Value::Float64(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "'{s}'"),
            Value::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::ObjectId(oid) => write!(f, "'{}'", oid.to_hex()),
        }
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int64(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float64(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<ObjectId> for Value {
    fn from(oid: ObjectId) -> Self {
        Value::ObjectId(oid)
    }
}
