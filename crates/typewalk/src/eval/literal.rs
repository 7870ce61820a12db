//! Literal evaluation

use crate::syntax::{Literal, Position};
use crate::{EvalError, Interpreter, Value};

/// Evaluate a literal node, recording unparsable text.
pub(crate) fn eval_literal(
    literal: &Literal,
    position: Position,
    interp: &mut Interpreter,
) -> Result<Value, EvalError> {
    let fallback = match literal {
        Literal::Int(_) => Value::Int(0),
        Literal::Float(_) => Value::Float(0.0),
        Literal::Bool(_) => Value::Bool(false),
        Literal::Str(_) => Value::String(String::new()),
    };
    interp.recover(position, parse_literal(literal), fallback)
}

/// Turn literal token text into a value.
pub fn parse_literal(literal: &Literal) -> Result<Value, EvalError> {
    match literal {
        Literal::Int(text) => parse_int(text).map(Value::Int),
        Literal::Float(text) => text
            .trim()
            .parse::<f32>()
            .map(Value::Float)
            .map_err(|_| invalid("float", text)),
        Literal::Bool(text) => parse_bool(text).map(Value::Bool),
        Literal::Str(text) => Ok(Value::String(unquote(text).to_string())),
    }
}

/// Parse decimal, `0x` hexadecimal or leading-zero octal.
///
/// Hexadecimal and octal text may use all 32 bits, so `0xFFFFFFFF` is `-1`.
fn parse_int(text: &str) -> Result<i32, EvalError> {
    let trimmed = text.trim();

    let (digits, radix) = if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        (hex, 16)
    } else if trimmed.len() > 1 && trimmed.starts_with('0') {
        (&trimmed[1..], 8)
    } else {
        (trimmed, 10)
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid("int", text));
    }

    if radix == 10 {
        digits.parse::<i32>().map_err(|_| invalid("int", text))
    } else {
        u32::from_str_radix(digits, radix)
            .map(|n| n as i32)
            .map_err(|_| invalid("int", text))
    }
}

fn parse_bool(text: &str) -> Result<bool, EvalError> {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if trimmed.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(invalid("bool", text))
    }
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text)
}

fn invalid(kind: &'static str, text: &str) -> EvalError {
    EvalError::InvalidLiteral {
        kind,
        text: text.to_string(),
    }
}
