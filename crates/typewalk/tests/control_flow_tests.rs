//! Tests for statement execution: declarations, assignment, blocks,
//! conditionals and loops

use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use pretty_assertions::assert_eq;
use typewalk::*;

fn run(stmts: Vec<Stmt>) -> (Interpreter, RunReport) {
    let mut interp = Interpreter::new();
    let report = interp.run(&Program::new(stmts)).expect("fatal error");
    (interp, report)
}

fn var(interp: &Interpreter, name: &str) -> Value {
    interp
        .environment()
        .get(name)
        .cloned()
        .expect("variable not declared")
}

fn bin(op: BinaryOp, l: Expr, r: Expr) -> Expr {
    Expr::binary(op, l, r)
}

fn increment(name: &str) -> Stmt {
    Stmt::assign(name, bin(BinaryOp::Add, Expr::var(name), Expr::int("1")))
}

// ═══════════════════════════════════════════════════════════════════════
// Declarations and Assignment
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_declaration_initializes_defaults() {
    let (interp, report) = run(vec![
        Stmt::declare(DeclaredType::Int, &["i"]),
        Stmt::declare(DeclaredType::Float, &["f"]),
        Stmt::declare(DeclaredType::Bool, &["b"]),
        Stmt::declare(DeclaredType::String, &["s"]),
    ]);

    assert!(report.is_success());
    assert_eq!(var(&interp, "i"), Value::Int(0));
    assert_eq!(var(&interp, "f"), Value::Float(0.0));
    assert_eq!(var(&interp, "b"), Value::Bool(false));
    assert_eq!(var(&interp, "s"), Value::string(""));
}

#[test]
fn test_duplicate_in_one_list_reported_once() {
    let program = Program::new(vec![Stmt::VariableDecl {
        ty: Some(DeclaredType::Int),
        names: vec![Ident::new("a").at(1, 5), Ident::new("a").at(1, 8)],
        position: Position::new(1, 1),
    }]);
    let report = Interpreter::new().run(&program).unwrap();

    assert_eq!(report.diagnostics.len(), 1);
    let diag = report.diagnostics.iter().next().unwrap();
    assert_eq!(diag.position, Position::new(1, 8));
    assert_eq!(diag.to_string(), "1:8 - Variable 'a' is already declared.");
}

#[test]
fn test_redeclaration_keeps_type_and_value() {
    let (interp, report) = run(vec![
        Stmt::declare(DeclaredType::Int, &["x"]),
        Stmt::assign("x", Expr::int("5")),
        Stmt::declare(DeclaredType::String, &["x"]),
    ]);

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(var(&interp, "x"), Value::Int(5));
    assert_eq!(
        interp.environment().declared_type("x"),
        Some(DeclaredType::Int)
    );
}

#[test]
fn test_float_to_int_assignment_rejected() {
    let (interp, report) = run(vec![
        Stmt::declare(DeclaredType::Int, &["n"]),
        Stmt::assign("n", Expr::int("4")),
        Stmt::assign("n", Expr::float("1.5")).at(2, 1),
    ]);

    assert_eq!(var(&interp, "n"), Value::Int(4));
    let diags = report.diagnostics.into_vec();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].position, Position::new(2, 1));
    assert_eq!(
        diags[0].message(),
        "Cannot convert float to int for variable 'n'"
    );
}

#[test]
fn test_int_assigned_to_float_widens() {
    let (interp, report) = run(vec![
        Stmt::declare(DeclaredType::Float, &["x"]),
        Stmt::assign("x", Expr::int("2")),
        Stmt::expr(Expr::var("x")),
    ]);

    assert!(report.is_success());
    assert_eq!(var(&interp, "x"), Value::Float(2.0));
    assert_eq!(report.outputs, vec![Value::Float(2.0)]);
}

#[test]
fn test_number_assigned_to_bool_uses_truthiness() {
    let (interp, _) = run(vec![
        Stmt::declare(DeclaredType::Bool, &["b", "c"]),
        Stmt::assign("b", Expr::int("3")),
        Stmt::assign("c", Expr::float("0.0")),
    ]);

    assert_eq!(var(&interp, "b"), Value::Bool(true));
    assert_eq!(var(&interp, "c"), Value::Bool(false));
}

#[test]
fn test_assignment_to_undeclared_variable() {
    let (interp, report) = run(vec![Stmt::assign("ghost", Expr::int("1")).at(7, 3)]);

    assert!(!interp.environment().contains("ghost"));
    let diags = report.diagnostics.into_vec();
    assert_eq!(diags.len(), 1);
    assert_eq!(
        diags[0].error,
        EvalError::UndeclaredVariable {
            name: "ghost".to_string()
        }
    );
    assert_eq!(diags[0].position, Position::new(7, 3));
}

#[test]
fn test_failed_operator_fallback_is_assigned() {
    let (interp, report) = run(vec![
        Stmt::declare(DeclaredType::String, &["s"]),
        Stmt::assign("s", Expr::string("keep")),
        Stmt::assign("s", bin(BinaryOp::Concat, Expr::string("a"), Expr::int("1"))),
    ]);

    // The failed `.` yields "" which is a valid string to store
    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(var(&interp, "s"), Value::string(""));
}

// ═══════════════════════════════════════════════════════════════════════
// Outputs
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_only_top_level_expressions_are_reported() {
    let (_, report) = run(vec![
        Stmt::expr(Expr::int("1")),
        Stmt::block(vec![Stmt::expr(Expr::int("2"))]),
        Stmt::if_else(
            Expr::boolean("true"),
            Stmt::expr(Expr::int("3")),
            None,
        ),
        Stmt::expr(Expr::string("done")),
    ]);

    assert_eq!(report.outputs, vec![Value::Int(1), Value::string("done")]);
}

#[test]
fn test_run_with_streams_outputs() {
    let program = Program::new(vec![
        Stmt::declare(DeclaredType::Int, &["x"]),
        Stmt::expr(Expr::int("1")),
        Stmt::assign("x", Expr::int("9")),
        Stmt::expr(Expr::var("x")),
    ]);

    let mut seen = Vec::new();
    Interpreter::new()
        .run_with(&program, |value| seen.push(value.to_string()))
        .unwrap();

    assert_eq!(seen, vec!["1".to_string(), "9".to_string()]);
}

#[test]
fn test_exec_stmt_returns_assigned_value() {
    let mut interp = Interpreter::new();
    interp
        .exec_stmt(&Stmt::declare(DeclaredType::Float, &["x"]))
        .unwrap();
    let result = interp.exec_stmt(&Stmt::assign("x", Expr::int("3"))).unwrap();
    assert_eq!(result, Some(Value::Float(3.0)));
}

// ═══════════════════════════════════════════════════════════════════════
// Blocks
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_block_declarations_are_program_wide() {
    let (interp, report) = run(vec![
        Stmt::block(vec![Stmt::declare(DeclaredType::Int, &["inner"])]),
        Stmt::assign("inner", Expr::int("4")),
        Stmt::block(vec![Stmt::declare(DeclaredType::Int, &["inner"])]),
    ]);

    assert_eq!(var(&interp, "inner"), Value::Int(4));
    assert_eq!(report.diagnostics.len(), 1);
}

#[test]
fn test_empty_statement_does_nothing() {
    let (interp, report) = run(vec![Stmt::empty(), Stmt::block(vec![])]);
    assert!(report.is_success());
    assert!(interp.environment().is_empty());
}

// ═══════════════════════════════════════════════════════════════════════
// If
// ═══════════════════════════════════════════════════════════════════════

fn branch_program(cond: Expr) -> Vec<Stmt> {
    vec![
        Stmt::declare(DeclaredType::String, &["taken"]),
        Stmt::if_else(
            cond,
            Stmt::assign("taken", Expr::string("then")),
            Some(Stmt::assign("taken", Expr::string("else"))),
        ),
    ]
}

#[test]
fn test_if_takes_then_branch() {
    let (interp, _) = run(branch_program(bin(
        BinaryOp::Lt,
        Expr::int("1"),
        Expr::int("2"),
    )));
    assert_eq!(var(&interp, "taken"), Value::string("then"));
}

#[test]
fn test_if_takes_else_branch() {
    let (interp, _) = run(branch_program(Expr::int("0")));
    assert_eq!(var(&interp, "taken"), Value::string("else"));
}

#[test]
fn test_if_without_else() {
    let (interp, report) = run(vec![
        Stmt::declare(DeclaredType::Int, &["x"]),
        Stmt::if_else(Expr::boolean("false"), Stmt::assign("x", Expr::int("1")), None),
    ]);
    assert!(report.is_success());
    assert_eq!(var(&interp, "x"), Value::Int(0));
}

#[test]
fn test_ill_typed_condition_takes_no_branch() {
    let cond = bin(BinaryOp::Eq, Expr::int("1"), Expr::string("a")).at(3, 6);
    let (interp, report) = run(vec![
        Stmt::declare(DeclaredType::Int, &["x"]),
        Stmt::if_else(
            cond,
            Stmt::assign("x", Expr::int("1")),
            Some(Stmt::assign("x", Expr::int("2"))),
        ),
    ]);

    // The failed `==` falls back to false, so the else branch runs
    let diags = report.diagnostics.into_vec();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].position, Position::new(3, 6));
    assert!(diags[0].error.is_type_error());
    assert_eq!(var(&interp, "x"), Value::Int(2));
}

#[test]
fn test_string_condition_is_recorded_and_false() {
    let (interp, report) = run(vec![
        Stmt::declare(DeclaredType::Int, &["x"]),
        Stmt::if_else(
            Expr::string("yes").at(2, 4),
            Stmt::assign("x", Expr::int("1")),
            None,
        ),
    ]);

    let diags = report.diagnostics.into_vec();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].position, Position::new(2, 4));
    assert!(matches!(diags[0].error, EvalError::Conversion { .. }));
    assert_eq!(var(&interp, "x"), Value::Int(0));
}

// ═══════════════════════════════════════════════════════════════════════
// Loops
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_while_loop_counts() {
    let (interp, report) = run(vec![
        Stmt::declare(DeclaredType::Int, &["i", "sum"]),
        Stmt::while_loop(
            bin(BinaryOp::Lt, Expr::var("i"), Expr::int("5")),
            Stmt::block(vec![
                Stmt::assign("sum", bin(BinaryOp::Add, Expr::var("sum"), Expr::var("i"))),
                increment("i"),
            ]),
        ),
    ]);

    assert!(report.is_success());
    assert_eq!(var(&interp, "i"), Value::Int(5));
    assert_eq!(var(&interp, "sum"), Value::Int(10));
}

#[test]
fn test_while_false_never_runs_body() {
    let (interp, _) = run(vec![
        Stmt::declare(DeclaredType::Int, &["x"]),
        Stmt::while_loop(Expr::boolean("false"), increment("x")),
    ]);
    assert_eq!(var(&interp, "x"), Value::Int(0));
}

#[test]
fn test_do_while_runs_until_condition_fails() {
    let (interp, report) = run(vec![
        Stmt::declare(DeclaredType::Int, &["x"]),
        Stmt::do_while(
            increment("x"),
            bin(BinaryOp::Lt, Expr::var("x"), Expr::int("3")),
        ),
    ]);

    assert!(report.is_success());
    assert_eq!(var(&interp, "x"), Value::Int(3));
}

#[test]
fn test_do_while_body_runs_once() {
    let (interp, _) = run(vec![
        Stmt::declare(DeclaredType::Int, &["x"]),
        Stmt::do_while(increment("x"), Expr::boolean("false")),
    ]);
    assert_eq!(var(&interp, "x"), Value::Int(1));
}

#[test]
fn test_ill_typed_loop_condition_stops_loop() {
    let (interp, report) = run(vec![
        Stmt::declare(DeclaredType::Int, &["x"]),
        Stmt::while_loop(Expr::string("forever"), increment("x")),
    ]);

    assert_eq!(report.diagnostics.len(), 1);
    assert_eq!(var(&interp, "x"), Value::Int(0));
}

// ═══════════════════════════════════════════════════════════════════════
// Short-Circuit Evaluation
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_and_short_circuits() {
    let div = bin(BinaryOp::Div, Expr::int("1"), Expr::int("0"));
    let rhs = bin(BinaryOp::Eq, div, Expr::int("0"));
    let (_, report) = run(vec![Stmt::expr(bin(
        BinaryOp::And,
        Expr::boolean("false"),
        rhs,
    ))]);

    assert!(report.is_success());
    assert_eq!(report.outputs, vec![Value::Bool(false)]);
}

#[test]
fn test_or_short_circuits() {
    let div = bin(BinaryOp::Div, Expr::int("1"), Expr::int("0"));
    let rhs = bin(BinaryOp::Eq, div, Expr::int("0"));
    let (_, report) = run(vec![Stmt::expr(bin(
        BinaryOp::Or,
        Expr::boolean("true"),
        rhs,
    ))]);

    assert!(report.is_success());
    assert_eq!(report.outputs, vec![Value::Bool(true)]);
}

#[test]
fn test_and_evaluates_right_when_needed() {
    let div = bin(BinaryOp::Div, Expr::int("1"), Expr::int("0"));
    let rhs = bin(BinaryOp::Eq, div, Expr::int("0"));
    let (_, report) = run(vec![Stmt::expr(bin(
        BinaryOp::And,
        Expr::boolean("true"),
        rhs,
    ))]);

    // 1/0 is recorded, falls back to 0, and 0 == 0 holds
    let diags = report.diagnostics.into_vec();
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].error, EvalError::DivisionByZero);
    assert_eq!(report.outputs, vec![Value::Bool(true)]);
}

// ═══════════════════════════════════════════════════════════════════════
// Interruption
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_interrupt_before_run() {
    let ctx = EvalContext::new();
    ctx.interrupt();
    let mut interp = Interpreter::with_context(ctx);

    let result = interp.run(&Program::new(vec![Stmt::expr(Expr::int("1"))]));
    assert_eq!(result, Err(EvalError::Interrupted));
}

#[test]
fn test_interrupt_stops_infinite_loop() {
    let ctx = EvalContext::new();
    let flag = ctx.interrupt.clone();
    let mut interp = Interpreter::with_context(ctx);

    let program = Program::new(vec![
        Stmt::declare(DeclaredType::Int, &["n"]),
        Stmt::while_loop(Expr::boolean("true"), Stmt::assign("n", Expr::int("1"))),
    ]);

    let handle = thread::spawn(move || {
        thread::sleep(Duration::from_millis(20));
        flag.store(true, Ordering::SeqCst);
    });

    let result = interp.run(&program);
    handle.join().unwrap();

    assert_eq!(result, Err(EvalError::Interrupted));
    assert_eq!(interp.environment().get("n"), Ok(&Value::Int(1)));
}
