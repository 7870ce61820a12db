//! Unary operation evaluation

use crate::error::type_name;
use crate::syntax::{Expr, Position, UnaryOp};
use crate::value::to_bool;
use crate::{EvalError, Interpreter, Value};

use super::Evaluate;

pub(crate) fn eval_unary(
    op: UnaryOp,
    operand: &Expr,
    position: Position,
    interp: &mut Interpreter,
) -> Result<Value, EvalError> {
    let value = operand.eval(interp)?;

    let fallback = match (op, &value) {
        (UnaryOp::Neg, Value::Float(_)) => Value::Float(0.0),
        (UnaryOp::Neg, _) => Value::Int(0),
        (UnaryOp::Not, _) => Value::Bool(false),
    };
    interp.recover(position, apply_unary(op, value), fallback)
}

/// Apply a unary operator to an evaluated operand.
pub fn apply_unary(op: UnaryOp, operand: Value) -> Result<Value, EvalError> {
    match op {
        UnaryOp::Neg => eval_neg(operand),
        UnaryOp::Not => to_bool(operand).map(|b| Value::Bool(!b)),
    }
}

/// Evaluate unary negation (`-x`).
fn eval_neg(operand: Value) -> Result<Value, EvalError> {
    match operand {
        Value::Int(n) => n
            .checked_neg()
            .map(Value::Int)
            .ok_or(EvalError::IntegerOverflow),

        // Floats (no overflow for negation)
        Value::Float(n) => Ok(Value::Float(-n)),

        other => Err(EvalError::InvalidUnaryOperand {
            op: "-".to_string(),
            operand_type: type_name(&other).to_string(),
        }),
    }
}
