//! Binary operation evaluation

use std::cmp::Ordering;

use crate::context::DEFAULT_MAX_STRING_LEN;
use crate::syntax::{BinaryOp, Expr, Position};
use crate::value::to_bool;
use crate::{EvalError, Interpreter, Value};

use super::Evaluate;

/// Evaluate a binary node.
///
/// `&&` and `||` evaluate their right operand only when the left one does
/// not decide the result. Every other operator evaluates both operands,
/// left first, then applies [`apply_binary`].
pub(crate) fn eval_binary(
    op: BinaryOp,
    left: &Expr,
    right: &Expr,
    position: Position,
    interp: &mut Interpreter,
) -> Result<Value, EvalError> {
    // Short-circuit evaluation for && and ||
    match op {
        BinaryOp::And => return eval_and(left, right, position, interp),
        BinaryOp::Or => return eval_or(left, right, position, interp),
        _ => {}
    }

    let left_val = left.eval(interp)?;
    let right_val = right.eval(interp)?;

    let fallback = fallback_value(op, &left_val, &right_val);
    let max_string_len = interp.context().max_string_len;
    let result = apply_binary_with_limit(op, left_val, right_val, max_string_len);
    interp.recover(position, result, fallback)
}

/// Apply a binary operator to two evaluated operands.
///
/// This is the pure operator engine. For `&&` and `||` both operands are
/// already evaluated here, so callers that need short-circuiting must not
/// route those operators through this function.
///
/// Strings built by `+`, `*` and `.` are capped at
/// [`DEFAULT_MAX_STRING_LEN`] bytes.
pub fn apply_binary(op: BinaryOp, left: Value, right: Value) -> Result<Value, EvalError> {
    apply_binary_with_limit(op, left, right, DEFAULT_MAX_STRING_LEN)
}

/// [`apply_binary`] with an explicit cap, in bytes, on built strings.
///
/// A result that would exceed `max_string_len` fails with `StringTooLong`
/// before anything is allocated.
pub fn apply_binary_with_limit(
    op: BinaryOp,
    left: Value,
    right: Value,
    max_string_len: usize,
) -> Result<Value, EvalError> {
    match op {
        // Arithmetic
        BinaryOp::Add => eval_add(left, right, max_string_len),
        BinaryOp::Sub => arithmetic("-", left, right, i32::checked_sub, |a, b| a - b),
        BinaryOp::Mul => eval_mul(left, right, max_string_len),
        BinaryOp::Div => eval_div(left, right),
        BinaryOp::Mod => eval_mod(left, right),
        BinaryOp::Concat => eval_concat(left, right, max_string_len),

        // Equality
        BinaryOp::Eq => values_equal("==", &left, &right).map(Value::Bool),
        BinaryOp::Ne => values_equal("!=", &left, &right).map(|eq| Value::Bool(!eq)),

        // Comparison
        BinaryOp::Lt | BinaryOp::Gt | BinaryOp::Le | BinaryOp::Ge => {
            eval_relational(op, &left, &right)
        }

        // Logical, non-short-circuiting form
        BinaryOp::And => Ok(Value::Bool(to_bool(left)? && to_bool(right)?)),
        BinaryOp::Or => Ok(Value::Bool(to_bool(left)? || to_bool(right)?)),
    }
}

/// The well-typed value a failed operator yields so evaluation can go on.
fn fallback_value(op: BinaryOp, left: &Value, right: &Value) -> Value {
    let has_string = matches!(left, Value::String(_)) || matches!(right, Value::String(_));
    let has_float = matches!(left, Value::Float(_)) || matches!(right, Value::Float(_));

    match op {
        BinaryOp::Concat => Value::String(String::new()),
        BinaryOp::Add | BinaryOp::Mul if has_string => Value::String(String::new()),
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div if has_float => {
            Value::Float(0.0)
        }
        BinaryOp::Add | BinaryOp::Sub | BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => {
            Value::Int(0)
        }
        BinaryOp::Eq
        | BinaryOp::Ne
        | BinaryOp::Lt
        | BinaryOp::Gt
        | BinaryOp::Le
        | BinaryOp::Ge
        | BinaryOp::And
        | BinaryOp::Or => Value::Bool(false),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Short-Circuit Logical Operators
// ═══════════════════════════════════════════════════════════════════════

fn eval_and(
    left: &Expr,
    right: &Expr,
    position: Position,
    interp: &mut Interpreter,
) -> Result<Value, EvalError> {
    if !logical_operand(left, position, interp)? {
        return Ok(Value::Bool(false)); // Short-circuit
    }
    logical_operand(right, position, interp).map(Value::Bool)
}

fn eval_or(
    left: &Expr,
    right: &Expr,
    position: Position,
    interp: &mut Interpreter,
) -> Result<Value, EvalError> {
    if logical_operand(left, position, interp)? {
        return Ok(Value::Bool(true)); // Short-circuit
    }
    logical_operand(right, position, interp).map(Value::Bool)
}

/// Evaluate one logical operand; one that does not convert to bool is
/// recorded at the operator and counts as `false`.
fn logical_operand(
    expr: &Expr,
    position: Position,
    interp: &mut Interpreter,
) -> Result<bool, EvalError> {
    let value = expr.eval(interp)?;
    match to_bool(value) {
        Ok(b) => Ok(b),
        Err(e) => {
            interp.report(position, e);
            Ok(false)
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic Operations
// ═══════════════════════════════════════════════════════════════════════

/// Numeric operand widened to `f32`.
fn promote(value: &Value) -> Option<f32> {
    match value {
        Value::Int(n) => Some(*n as f32),
        Value::Float(n) => Some(*n),
        _ => None,
    }
}

/// `int op int` stays integral (checked); any float operand promotes both.
fn arithmetic(
    op: &str,
    left: Value,
    right: Value,
    int_op: fn(i32, i32) -> Option<i32>,
    float_op: fn(f32, f32) -> f32,
) -> Result<Value, EvalError> {
    if let (Value::Int(a), Value::Int(b)) = (&left, &right) {
        return int_op(*a, *b)
            .map(Value::Int)
            .ok_or(EvalError::IntegerOverflow);
    }

    match (promote(&left), promote(&right)) {
        (Some(a), Some(b)) => Ok(Value::Float(float_op(a, b))),
        _ => Err(EvalError::binary(op, &left, &right)),
    }
}

fn eval_add(left: Value, right: Value, max_string_len: usize) -> Result<Value, EvalError> {
    match (left, right) {
        // String concatenation
        (Value::String(a), Value::String(b)) => join(a, &b, max_string_len),

        // Numeric addition
        (left, right) => arithmetic("+", left, right, i32::checked_add, |a, b| a + b),
    }
}

fn eval_mul(left: Value, right: Value, max_string_len: usize) -> Result<Value, EvalError> {
    match (left, right) {
        // String repetition, either order
        (Value::String(s), Value::Int(n)) | (Value::Int(n), Value::String(s)) => {
            repeat(&s, n, max_string_len)
        }

        (left, right) => arithmetic("*", left, right, i32::checked_mul, |a, b| a * b),
    }
}

fn repeat(s: &str, count: i32, max_string_len: usize) -> Result<Value, EvalError> {
    let count = usize::try_from(count).map_err(|_| {
        EvalError::type_error(format!(
            "string repeat count must be non-negative, found {}",
            count
        ))
    })?;
    check_string_len(s.len().checked_mul(count), max_string_len)?;
    Ok(Value::String(s.repeat(count)))
}

fn join(mut a: String, b: &str, max_string_len: usize) -> Result<Value, EvalError> {
    check_string_len(a.len().checked_add(b.len()), max_string_len)?;
    a.push_str(b);
    Ok(Value::String(a))
}

/// `len` is `None` when computing it overflowed `usize`.
fn check_string_len(len: Option<usize>, max_string_len: usize) -> Result<(), EvalError> {
    match len {
        Some(len) if len <= max_string_len => Ok(()),
        _ => Err(EvalError::StringTooLong {
            max: max_string_len,
        }),
    }
}

fn eval_div(left: Value, right: Value) -> Result<Value, EvalError> {
    // Checked before dividing, for int and float alike
    let divisor_is_zero = match &right {
        Value::Int(0) => true,
        Value::Float(n) => *n == 0.0,
        _ => false,
    };
    if divisor_is_zero && left.is_numeric() {
        return Err(EvalError::DivisionByZero);
    }

    arithmetic("/", left, right, i32::checked_div, |a, b| a / b)
}

fn eval_mod(left: Value, right: Value) -> Result<Value, EvalError> {
    match (&left, &right) {
        (Value::Int(_), Value::Int(0)) => Err(EvalError::ModuloByZero),
        (Value::Int(a), Value::Int(b)) => a
            .checked_rem(*b)
            .map(Value::Int)
            .ok_or(EvalError::IntegerOverflow),
        (Value::Float(_), _) | (_, Value::Float(_)) => {
            Err(EvalError::type_error("modulo requires integers"))
        }
        _ => Err(EvalError::binary("%", &left, &right)),
    }
}

fn eval_concat(left: Value, right: Value, max_string_len: usize) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => join(a, &b, max_string_len),
        (left, right) => Err(EvalError::binary(".", &left, &right)),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Equality and Comparison
// ═══════════════════════════════════════════════════════════════════════

/// `==` semantics. Numbers compare in double precision; a bool against a
/// number compares with the number's truthiness.
fn values_equal(op: &str, left: &Value, right: &Value) -> Result<bool, EvalError> {
    match (left, right) {
        (Value::String(a), Value::String(b)) => Ok(a == b),
        (Value::Bool(a), Value::Bool(b)) => Ok(a == b),
        (Value::Bool(b), n) | (n, Value::Bool(b)) if n.is_numeric() => {
            Ok(*b == (n.as_f64() != Some(0.0)))
        }
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => Ok(a == b),
            _ => Err(EvalError::binary(op, left, right)),
        },
    }
}

fn eval_relational(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let ordering = match (left, right) {
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        _ => match (left.as_f64(), right.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => return Err(EvalError::binary(op.symbol(), left, right)),
        },
    };

    // NaN compares false against everything
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };

    let result = match op {
        BinaryOp::Lt => ordering == Ordering::Less,
        BinaryOp::Gt => ordering == Ordering::Greater,
        BinaryOp::Le => ordering != Ordering::Greater,
        BinaryOp::Ge => ordering != Ordering::Less,
        _ => unreachable!("not a relational operator: {}", op),
    };
    Ok(Value::Bool(result))
}
