//! Expression evaluation and statement execution

pub mod binary;
pub mod if_stmt;
pub mod literal;
pub mod loops;
pub mod stmt;
pub mod unary;

use crate::syntax::{Expr, Stmt};
use crate::{EvalError, Interpreter, Value};

/// Trait for evaluating expression nodes to values.
///
/// This is the core abstraction for the tree-walking interpreter. An `Err`
/// means evaluation must stop; recoverable problems are recorded on the
/// interpreter and a fallback value is returned instead.
pub trait Evaluate {
    /// Evaluate this node in the given session.
    fn eval(&self, interp: &mut Interpreter) -> Result<Value, EvalError>;
}

/// Trait for executing statement nodes.
///
/// Statements yield `Some(value)` when they produce one (expression
/// statements, successful assignments, blocks and branches ending in one)
/// and `None` otherwise.
pub trait Execute {
    /// Execute this node in the given session.
    fn exec(&self, interp: &mut Interpreter) -> Result<Option<Value>, EvalError>;
}

// ═══════════════════════════════════════════════════════════════════════
// Main Expression Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Expr {
    fn eval(&self, interp: &mut Interpreter) -> Result<Value, EvalError> {
        interp.enter_nested()?;

        let result = match self {
            Expr::Literal { literal, position } => {
                literal::eval_literal(literal, *position, interp)
            }
            Expr::Variable { name, position } => eval_variable(name, *position, interp),
            Expr::Binary {
                op,
                left,
                right,
                position,
            } => binary::eval_binary(*op, left, right, *position, interp),
            Expr::Unary {
                op,
                operand,
                position,
            } => unary::eval_unary(*op, operand, *position, interp),

            // Parenthesized expressions - just unwrap
            Expr::Paren { inner, .. } => inner.eval(interp),
        };

        interp.exit_nested();
        result
    }
}

/// Read a variable. Undeclared names are recorded and read as `0`.
fn eval_variable(
    name: &str,
    position: crate::Position,
    interp: &mut Interpreter,
) -> Result<Value, EvalError> {
    let value = interp.environment().get(name).cloned();
    interp.recover(position, value, Value::Int(0))
}

// ═══════════════════════════════════════════════════════════════════════
// Main Statement Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Execute for Stmt {
    fn exec(&self, interp: &mut Interpreter) -> Result<Option<Value>, EvalError> {
        interp.check_interrupt()?;
        interp.enter_nested()?;

        if interp.context().trace {
            tracing::trace!(kind = stmt_kind_name(self), position = %self.position(), "exec");
        }

        let result = match self {
            Stmt::Expr { expr } => expr.eval(interp).map(Some),
            Stmt::VariableDecl {
                ty,
                names,
                position,
            } => stmt::exec_declaration(*ty, names, *position, interp),
            Stmt::Assign { target, value } => stmt::exec_assign(target, value, interp),
            Stmt::Block { stmts, .. } => if_stmt::exec_block(stmts, interp),
            Stmt::If {
                cond,
                then_branch,
                else_branch,
                ..
            } => if_stmt::exec_if(cond, then_branch, else_branch.as_deref(), interp),
            Stmt::While { cond, body, .. } => loops::exec_while(cond, body, interp),
            Stmt::DoWhile { body, cond, .. } => loops::exec_do_while(body, cond, interp),
            Stmt::Empty { .. } => Ok(None),
        };

        interp.exit_nested();
        result
    }
}

/// Get a human-readable name for a statement kind.
fn stmt_kind_name(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Expr { .. } => "expression",
        Stmt::VariableDecl { .. } => "declaration",
        Stmt::Assign { .. } => "assignment",
        Stmt::Block { .. } => "block",
        Stmt::If { .. } => "if",
        Stmt::While { .. } => "while",
        Stmt::DoWhile { .. } => "do-while",
        Stmt::Empty { .. } => "empty",
    }
}

// Re-export for use by other modules
pub use binary::{apply_binary, apply_binary_with_limit};
pub use if_stmt::exec_block;
pub use literal::parse_literal;
pub use unary::apply_unary;
