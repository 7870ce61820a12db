//! If statement and block execution

use super::{Evaluate, Execute};
use crate::syntax::{Expr, Stmt};
use crate::value::to_bool;
use crate::{EvalError, Interpreter, Value};

pub(crate) fn exec_if(
    cond: &Expr,
    then_branch: &Stmt,
    else_branch: Option<&Stmt>,
    interp: &mut Interpreter,
) -> Result<Option<Value>, EvalError> {
    if eval_condition(cond, interp)? {
        then_branch.exec(interp)
    } else if let Some(else_branch) = else_branch {
        else_branch.exec(interp)
    } else {
        Ok(None)
    }
}

/// Evaluate a condition to a bool.
///
/// A condition that does not convert to bool is recorded at the condition
/// and treated as `false`, so neither an `if` then-branch nor a loop body
/// runs on a badly typed condition.
pub(crate) fn eval_condition(cond: &Expr, interp: &mut Interpreter) -> Result<bool, EvalError> {
    let value = cond.eval(interp)?;
    match to_bool(value) {
        Ok(b) => Ok(b),
        Err(e) => {
            interp.report(cond.position(), e);
            Ok(false)
        }
    }
}

/// Execute statements in order, yielding the last one's result.
///
/// Blocks do not open a scope: declarations inside a block land in the
/// single program-wide environment.
pub fn exec_block(stmts: &[Stmt], interp: &mut Interpreter) -> Result<Option<Value>, EvalError> {
    let mut last_value = None;

    for stmt in stmts {
        last_value = stmt.exec(interp)?;
    }

    Ok(last_value)
}
