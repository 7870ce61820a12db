//! Tests for the value model and the variable environment

use pretty_assertions::assert_eq;
use typewalk::*;

// ═══════════════════════════════════════════════════════════════════════
// Conversion
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_conversion_table() {
    use DeclaredType::*;

    let cases: Vec<(Value, DeclaredType, Option<Value>)> = vec![
        (Value::Int(3), Float, Some(Value::Float(3.0))),
        (Value::Int(0), Bool, Some(Value::Bool(false))),
        (Value::Int(-2), Bool, Some(Value::Bool(true))),
        (Value::Float(0.5), Bool, Some(Value::Bool(true))),
        (Value::Float(1.0), Int, None),
        (Value::Bool(true), Int, None),
        (Value::Bool(true), Float, None),
        (Value::string("1"), Int, None),
        (Value::Int(1), String, None),
        (Value::Bool(false), String, None),
    ];

    for (value, target, expected) in cases {
        let result = convert(value.clone(), target, None).ok();
        assert_eq!(result, expected, "converting {:?} to {}", value, target);
    }
}

#[test]
fn test_to_bool() {
    assert_eq!(to_bool(Value::Bool(true)), Ok(true));
    assert_eq!(to_bool(Value::Float(0.0)), Ok(false));
    assert_eq!(
        to_bool(Value::string("true")),
        Err(EvalError::Conversion {
            from: DeclaredType::String,
            to: DeclaredType::Bool,
            variable: None,
        })
    );
}

#[test]
fn test_declared_type_names() {
    for ty in [
        DeclaredType::Int,
        DeclaredType::Float,
        DeclaredType::Bool,
        DeclaredType::String,
    ] {
        assert_eq!(DeclaredType::from_name(ty.name()), Some(ty));
        assert_eq!(ty.default_value().declared_type(), ty);
    }
    assert_eq!(DeclaredType::from_name("double"), None);
}

#[test]
fn test_value_display() {
    assert_eq!(Value::Float(2.0).to_string(), "2.0");
    assert_eq!(Value::Float(0.25).to_string(), "0.25");
    assert_eq!(Value::string("raw").to_string(), "raw");
    assert_eq!(type_name(&Value::Bool(false)), "bool");
}

// ═══════════════════════════════════════════════════════════════════════
// Environment
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_declare_and_read_default() {
    let mut env = Environment::new();
    env.declare("s", DeclaredType::String).unwrap();

    assert!(env.contains("s"));
    assert_eq!(env.get("s"), Ok(&Value::string("")));
    assert_eq!(env.declared_type("s"), Some(DeclaredType::String));
}

#[test]
fn test_duplicate_declaration() {
    let mut env = Environment::new();
    env.declare("x", DeclaredType::Int).unwrap();
    env.assign("x", Value::Int(8)).unwrap();

    assert_eq!(
        env.declare("x", DeclaredType::Float),
        Err(EvalError::DuplicateDeclaration {
            name: "x".to_string()
        })
    );
    let var = env.variable("x").unwrap();
    assert_eq!(var.declared_type, DeclaredType::Int);
    assert_eq!(var.value, Value::Int(8));
}

#[test]
fn test_read_undeclared() {
    let env = Environment::new();
    assert_eq!(
        env.get("nope"),
        Err(EvalError::UndeclaredVariable {
            name: "nope".to_string()
        })
    );
}

#[test]
fn test_assign_returns_converted_value() {
    let mut env = Environment::new();
    env.declare("flag", DeclaredType::Bool).unwrap();

    assert_eq!(env.assign("flag", Value::Float(0.1)), Ok(Value::Bool(true)));
    assert_eq!(env.get("flag"), Ok(&Value::Bool(true)));
}

#[test]
fn test_rejected_assignment_keeps_old_value() {
    let mut env = Environment::new();
    env.declare("name", DeclaredType::String).unwrap();
    env.assign("name", Value::string("ada")).unwrap();

    let err = env.assign("name", Value::Int(1)).unwrap_err();
    assert_eq!(err.to_string(), "Cannot convert int to string for variable 'name'");
    assert_eq!(env.get("name"), Ok(&Value::string("ada")));
}

#[test]
fn test_declaration_order_is_kept() {
    let mut env = Environment::new();
    for name in ["c", "a", "b"] {
        env.declare(name, DeclaredType::Int).unwrap();
    }

    let names: Vec<&str> = env.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(names, vec!["c", "a", "b"]);
    assert_eq!(env.len(), 3);

    env.clear();
    assert!(env.is_empty());
}

#[test]
fn test_interpreter_environment_after_run() {
    let program = Program::new(vec![
        Stmt::declare(DeclaredType::Int, &["a", "b"]),
        Stmt::assign("b", Expr::int("0x1F")),
    ]);
    let mut interp = Interpreter::new();
    interp.run(&program).unwrap();

    let env = interp.environment();
    assert_eq!(env.get("a"), Ok(&Value::Int(0)));
    assert_eq!(env.get("b"), Ok(&Value::Int(31)));
}
