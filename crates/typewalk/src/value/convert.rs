//! Implicit conversion between value kinds
//!
//! All implicit conversions go through [`convert`]. The rules are
//! deliberately asymmetric: `int` widens to `float`, but `float` never
//! narrows to `int`.

use super::{DeclaredType, Value};
use crate::error::EvalError;

/// Convert `value` to `target`.
///
/// `variable` names the variable being assigned, if any, and only affects
/// the error message.
///
/// | from \ to | int | float | bool     | string |
/// |-----------|-----|-------|----------|--------|
/// | int       | id  | widen | `!= 0`   | error  |
/// | float     | err | id    | `!= 0.0` | error  |
/// | bool      | err | error | id       | error  |
/// | string    | err | error | error    | id     |
pub fn convert(
    value: Value,
    target: DeclaredType,
    variable: Option<&str>,
) -> Result<Value, EvalError> {
    match (value, target) {
        (v, t) if v.declared_type() == t => Ok(v),

        (Value::Int(n), DeclaredType::Float) => Ok(Value::Float(n as f32)),
        (Value::Int(n), DeclaredType::Bool) => Ok(Value::Bool(n != 0)),
        (Value::Float(n), DeclaredType::Bool) => Ok(Value::Bool(n != 0.0)),

        (v, t) => Err(EvalError::Conversion {
            from: v.declared_type(),
            to: t,
            variable: variable.map(str::to_string),
        }),
    }
}

/// Convert a value to `bool` under the same rules as [`convert`].
///
/// Used for conditions and for the operands of `&&`, `||` and `!`.
pub fn to_bool(value: Value) -> Result<bool, EvalError> {
    match convert(value, DeclaredType::Bool, None)? {
        Value::Bool(b) => Ok(b),
        other => Err(EvalError::Conversion {
            from: other.declared_type(),
            to: DeclaredType::Bool,
            variable: None,
        }),
    }
}
