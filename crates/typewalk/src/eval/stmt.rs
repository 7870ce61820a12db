//! Declaration and assignment statements

use crate::syntax::{Expr, Ident, Position};
use crate::{DeclaredType, EvalError, Interpreter, Value};

use super::Evaluate;

/// Declare each name in order.
///
/// A name that is already declared, including one repeated earlier in the
/// same list, is recorded as a duplicate and the existing variable is kept.
///
/// # Errors
///
/// Returns `MissingDeclarationType` if the node has no type; that is a
/// malformed tree, not a program error.
pub(crate) fn exec_declaration(
    ty: Option<DeclaredType>,
    names: &[Ident],
    position: Position,
    interp: &mut Interpreter,
) -> Result<Option<Value>, EvalError> {
    let ty = ty.ok_or(EvalError::MissingDeclarationType { position })?;

    for ident in names {
        match interp.env_mut().declare(ident.name.as_str(), ty) {
            Ok(()) => tracing::debug!(name = %ident.name, %ty, "variable declared"),
            Err(e) => interp.report(ident.position, e),
        }
    }

    Ok(None)
}

/// Evaluate the right-hand side and store it, converted to the declared type.
///
/// Yields the stored value, or `None` when the assignment was rejected.
pub(crate) fn exec_assign(
    target: &Ident,
    value: &Expr,
    interp: &mut Interpreter,
) -> Result<Option<Value>, EvalError> {
    let value = value.eval(interp)?;

    match interp.env_mut().assign(&target.name, value) {
        Ok(stored) => {
            tracing::debug!(name = %target.name, value = %stored, "assigned");
            Ok(Some(stored))
        }
        Err(e) => {
            interp.report(target.position, e);
            Ok(None)
        }
    }
}
