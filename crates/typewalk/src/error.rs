//! Error types for typewalk evaluation

use thiserror::Error;

use crate::syntax::Position;
use crate::value::{DeclaredType, Value};

/// Everything that can go wrong while evaluating a program.
///
/// Most variants are *recoverable*: the interpreter records them as a
/// [`Diagnostic`](crate::Diagnostic) and carries on with a fallback value.
/// The variants for which [`EvalError::is_fatal`] returns `true` abort the
/// run instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// A variable was declared a second time
    #[error("Variable '{name}' is already declared.")]
    DuplicateDeclaration {
        /// The variable name
        name: String,
    },

    /// A variable was read or assigned before being declared
    #[error("Variable '{name}' is not declared.")]
    UndeclaredVariable {
        /// The variable name
        name: String,
    },

    /// Generic type error with a free-form message
    #[error("Type error: {message}")]
    TypeError {
        /// Description of the problem
        message: String,
    },

    /// Binary operator applied to operands it does not support
    #[error("Type error: cannot apply `{op}` to {left_type} and {right_type}")]
    InvalidBinaryOperands {
        /// Operator symbol
        op: String,
        /// Left operand type
        left_type: String,
        /// Right operand type
        right_type: String,
    },

    /// Unary operator applied to an operand it does not support
    #[error("Type error: cannot apply unary `{op}` to {operand_type}")]
    InvalidUnaryOperand {
        /// Operator symbol
        op: String,
        /// Operand type
        operand_type: String,
    },

    /// Disallowed implicit conversion
    #[error("Cannot convert {from} to {to}{}", variable_suffix(.variable))]
    Conversion {
        /// Source type
        from: DeclaredType,
        /// Target type
        to: DeclaredType,
        /// Variable being assigned, if any
        variable: Option<String>,
    },

    /// Division by an exact zero
    #[error("Division by zero")]
    DivisionByZero,

    /// Modulo by zero
    #[error("Modulo by zero")]
    ModuloByZero,

    /// 32-bit integer overflow
    #[error("Integer overflow")]
    IntegerOverflow,

    /// Literal text the evaluator could not turn into a value
    #[error("Invalid {kind} literal: {text}")]
    InvalidLiteral {
        /// Literal kind (`int`, `float`, `bool`)
        kind: &'static str,
        /// Offending text
        text: String,
    },

    /// A string operator would build a string longer than the configured limit
    #[error("String result exceeds the maximum length of {max} bytes")]
    StringTooLong {
        /// Configured maximum, in bytes
        max: usize,
    },

    /// Declaration node without a type; the input tree is malformed
    #[error("Type information is missing in the variable declaration at {position}")]
    MissingDeclarationType {
        /// Position of the declaration
        position: Position,
    },

    /// Nesting limit exceeded
    #[error("Nesting too deep: depth {depth} exceeds maximum {max}")]
    NestingTooDeep {
        /// Depth reached
        depth: usize,
        /// Configured maximum
        max: usize,
    },

    /// Evaluation was interrupted through the context flag
    #[error("Evaluation interrupted")]
    Interrupted,
}

impl EvalError {
    /// Whether this error aborts the run instead of being recorded as a diagnostic.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            EvalError::MissingDeclarationType { .. }
                | EvalError::NestingTooDeep { .. }
                | EvalError::Interrupted
        )
    }

    /// Whether this is a bad-operand-types error.
    pub fn is_type_error(&self) -> bool {
        matches!(
            self,
            EvalError::TypeError { .. }
                | EvalError::InvalidBinaryOperands { .. }
                | EvalError::InvalidUnaryOperand { .. }
        )
    }

    pub(crate) fn binary(op: &str, left: &Value, right: &Value) -> Self {
        EvalError::InvalidBinaryOperands {
            op: op.to_string(),
            left_type: type_name(left).to_string(),
            right_type: type_name(right).to_string(),
        }
    }

    pub(crate) fn type_error(message: impl Into<String>) -> Self {
        EvalError::TypeError {
            message: message.into(),
        }
    }
}

fn variable_suffix(variable: &Option<String>) -> String {
    match variable {
        Some(name) => format!(" for variable '{}'", name),
        None => String::new(),
    }
}

/// Result type alias for typewalk operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Get a human-readable type name for a value.
pub fn type_name(value: &Value) -> &'static str {
    value.declared_type().name()
}
