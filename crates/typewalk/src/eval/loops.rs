//! Loop statement execution

use super::if_stmt::eval_condition;
use super::Execute;
use crate::syntax::{Expr, Stmt};
use crate::{EvalError, Interpreter, Value};

// ═══════════════════════════════════════════════════════════════════════
// while statement
// ═══════════════════════════════════════════════════════════════════════

pub(crate) fn exec_while(
    cond: &Expr,
    body: &Stmt,
    interp: &mut Interpreter,
) -> Result<Option<Value>, EvalError> {
    let mut iterations: u64 = 0;

    loop {
        // Check for interruption
        interp.check_interrupt()?;

        if !eval_condition(cond, interp)? {
            tracing::debug!(iterations, "while loop finished");
            return Ok(None);
        }

        body.exec(interp)?;
        iterations += 1;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// do-while statement
// ═══════════════════════════════════════════════════════════════════════

/// The body runs once before the condition is first tested.
pub(crate) fn exec_do_while(
    body: &Stmt,
    cond: &Expr,
    interp: &mut Interpreter,
) -> Result<Option<Value>, EvalError> {
    let mut iterations: u64 = 0;

    loop {
        interp.check_interrupt()?;

        body.exec(interp)?;
        iterations += 1;

        if !eval_condition(cond, interp)? {
            tracing::debug!(iterations, "do-while loop finished");
            return Ok(None);
        }
    }
}
