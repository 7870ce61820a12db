//! # Typewalk
//!
//! A typed tree-walking evaluator for a small scripting language.
//!
//! Typewalk executes an already-parsed syntax tree (declarations,
//! assignments, arithmetic, logical and comparison expressions, `if`,
//! `while` and `do-while`) and type checks it while it runs. Values come in
//! four kinds (`int`, `float`, `bool`, `string`), every variable has a type
//! fixed at declaration, and assignments convert implicitly where the rules
//! allow it.
//!
//! ## Architecture
//!
//! - **Syntax**: the closed node types an external parser hands over
//! - **Values**: the four value kinds and the single conversion function
//! - **Environment**: flat, program-wide variable store
//! - **Eval**: operator engine and statement executor, one module per node kind
//! - **Diagnostics**: type and runtime errors collected while execution continues
//!
//! Type errors do not stop a run. They are recorded with their source
//! position and a well-typed fallback value stands in for the failed
//! operation. Only malformed trees, the nesting limit and interruption
//! abort evaluation.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod diagnostics;
pub mod environment;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod syntax;
pub mod value;

// Re-export main types
pub use context::{EvalContext, DEFAULT_MAX_STRING_LEN};
pub use diagnostics::{Diagnostic, Diagnostics};
pub use environment::{Environment, Variable};
pub use error::{type_name, EvalError, Result};
pub use eval::{
    apply_binary, apply_binary_with_limit, apply_unary, exec_block, parse_literal, Evaluate,
    Execute,
};
pub use interpreter::{Interpreter, RunReport};
pub use syntax::{BinaryOp, Expr, Ident, Literal, Position, Program, Stmt, UnaryOp};
pub use value::{convert, to_bool, DeclaredType, Value};

/// Typewalk version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
