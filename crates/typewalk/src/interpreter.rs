//! Evaluation session
//!
//! An [`Interpreter`] owns everything one program run mutates: the
//! variable environment, the diagnostics list and the nesting counter.

use crate::diagnostics::Diagnostics;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::eval::{Evaluate, Execute};
use crate::syntax::{Expr, Position, Program, Stmt};
use crate::{EvalContext, Value};

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Values of top-level expression statements, in execution order
    pub outputs: Vec<Value>,

    /// Diagnostics recorded during the run
    pub diagnostics: Diagnostics,
}

impl RunReport {
    /// True when no diagnostics were recorded.
    pub fn is_success(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// What a driver prints after the run: the diagnostics, or a success line.
    pub fn summary(&self) -> String {
        if self.is_success() {
            "Program executed successfully.".to_string()
        } else {
            format!("Type errors found:\n{}", self.diagnostics)
        }
    }
}

/// A type-checking evaluator for one program run.
///
/// # Example
///
/// ```
/// use typewalk::{BinaryOp, DeclaredType, Expr, Interpreter, Program, Stmt, Value};
///
/// let program = Program::new(vec![
///     Stmt::declare(DeclaredType::Float, &["x"]),
///     Stmt::assign("x", Expr::int("2")),
///     Stmt::expr(Expr::binary(BinaryOp::Add, Expr::var("x"), Expr::int("1"))),
/// ]);
///
/// let report = Interpreter::new().run(&program).unwrap();
/// assert_eq!(report.outputs, vec![Value::Float(3.0)]);
/// assert!(report.is_success());
/// ```
#[derive(Debug, Default)]
pub struct Interpreter {
    env: Environment,
    diagnostics: Diagnostics,
    ctx: EvalContext,
    depth: usize,
}

impl Interpreter {
    /// Create an interpreter with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an interpreter with the given context.
    pub fn with_context(ctx: EvalContext) -> Self {
        Self {
            ctx,
            ..Default::default()
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Running
    // ═══════════════════════════════════════════════════════════════════

    /// Run a whole program, collecting reported values.
    ///
    /// # Errors
    ///
    /// Only fatal errors are returned; everything else is in the report's
    /// diagnostics.
    pub fn run(&mut self, program: &Program) -> Result<RunReport, EvalError> {
        let mut outputs = Vec::new();
        self.run_with(program, |value| outputs.push(value.clone()))?;

        Ok(RunReport {
            outputs,
            diagnostics: self.diagnostics.clone(),
        })
    }

    /// Run a whole program, handing each reported value to `on_output` as
    /// soon as it is produced.
    ///
    /// Only top-level expression statements are reported.
    pub fn run_with<F>(&mut self, program: &Program, mut on_output: F) -> Result<(), EvalError>
    where
        F: FnMut(&Value),
    {
        tracing::debug!(statements = program.stmts.len(), "run started");

        for stmt in &program.stmts {
            let value = self.exec_stmt(stmt)?;

            if let (Stmt::Expr { .. }, Some(value)) = (stmt, value) {
                on_output(&value);
            }
        }

        tracing::debug!(diagnostics = self.diagnostics.len(), "run finished");
        Ok(())
    }

    /// Evaluate a single expression.
    pub fn eval_expr(&mut self, expr: &Expr) -> Result<Value, EvalError> {
        expr.eval(self)
    }

    /// Execute a single statement.
    pub fn exec_stmt(&mut self, stmt: &Stmt) -> Result<Option<Value>, EvalError> {
        stmt.exec(self)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Accessors
    // ═══════════════════════════════════════════════════════════════════

    /// The variable environment.
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    /// Diagnostics recorded so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Take the diagnostics recorded so far, leaving the list empty.
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }

    /// The evaluation context.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    pub(crate) fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    // ═══════════════════════════════════════════════════════════════════
    // Diagnostics and Recovery
    // ═══════════════════════════════════════════════════════════════════

    pub(crate) fn report(&mut self, position: Position, error: EvalError) {
        self.diagnostics.push(position, error);
    }

    /// Record a recoverable error and substitute `fallback`; fatal errors pass through.
    pub(crate) fn recover(
        &mut self,
        position: Position,
        result: Result<Value, EvalError>,
        fallback: Value,
    ) -> Result<Value, EvalError> {
        match result {
            Ok(value) => Ok(value),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                self.report(position, e);
                Ok(fallback)
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Depth Tracking and Interruption
    // ═══════════════════════════════════════════════════════════════════

    pub(crate) fn enter_nested(&mut self) -> Result<(), EvalError> {
        if self.depth >= self.ctx.max_depth {
            return Err(EvalError::NestingTooDeep {
                depth: self.depth + 1,
                max: self.ctx.max_depth,
            });
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn exit_nested(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    pub(crate) fn check_interrupt(&self) -> Result<(), EvalError> {
        if self.ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }
        Ok(())
    }
}
