//! Value representation for runtime values

mod convert;
mod display;

pub use convert::{convert, to_bool};

use serde::{Deserialize, Serialize};

/// Runtime value produced by literals, operators and variable reads.
///
/// Values are immutable; assignment replaces the stored value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// 32-bit signed integer
    Int(i32),

    /// 32-bit floating point
    Float(f32),

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Owned string
    String(String),
}

/// The static type of a variable, fixed at declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredType {
    /// `int`
    Int,
    /// `float`
    Float,
    /// `bool`
    Bool,
    /// `string`
    String,
}

impl DeclaredType {
    /// The value a freshly declared variable of this type holds.
    pub fn default_value(self) -> Value {
        match self {
            DeclaredType::Int => Value::Int(0),
            DeclaredType::Float => Value::Float(0.0),
            DeclaredType::Bool => Value::Bool(false),
            DeclaredType::String => Value::String(String::new()),
        }
    }

    /// Source-level name of the type.
    pub fn name(self) -> &'static str {
        match self {
            DeclaredType::Int => "int",
            DeclaredType::Float => "float",
            DeclaredType::Bool => "bool",
            DeclaredType::String => "string",
        }
    }

    /// Parse a source-level type name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "int" => Some(DeclaredType::Int),
            "float" => Some(DeclaredType::Float),
            "bool" => Some(DeclaredType::Bool),
            "string" => Some(DeclaredType::String),
            _ => None,
        }
    }
}

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(s.into())
    }

    /// The runtime kind of this value.
    pub fn declared_type(&self) -> DeclaredType {
        match self {
            Value::Int(_) => DeclaredType::Int,
            Value::Float(_) => DeclaredType::Float,
            Value::Bool(_) => DeclaredType::Bool,
            Value::String(_) => DeclaredType::String,
        }
    }

    /// Check if value is numeric (integer or float)
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Numeric value widened to `f64`, used for comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(n) => Some(f64::from(*n)),
            Value::Float(n) => Some(f64::from(*n)),
            _ => None,
        }
    }

    /// Extract bool if this is a Bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extract string slice if this is a String
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
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
