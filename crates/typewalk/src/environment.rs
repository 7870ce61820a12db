//! Runtime environment managing typed variables

use indexmap::IndexMap;

use crate::error::EvalError;
use crate::value::{convert, DeclaredType, Value};

/// A declared variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    /// The variable's name
    pub name: String,

    /// Type fixed at declaration
    pub declared_type: DeclaredType,

    /// Current value; its kind always matches `declared_type`
    pub value: Value,
}

/// The runtime environment: every variable the program has declared.
///
/// The environment is flat. Blocks and loop bodies do not open scopes, so a
/// variable declared inside a block stays visible until the environment is
/// dropped, and declaring the same name again anywhere is a duplicate.
///
/// # Example
///
/// ```
/// use typewalk::{DeclaredType, Environment, Value};
///
/// let mut env = Environment::new();
/// env.declare("x", DeclaredType::Float).unwrap();
///
/// // int widens to float on assignment
/// env.assign("x", Value::Int(2)).unwrap();
/// assert_eq!(env.get("x"), Ok(&Value::Float(2.0)));
///
/// // float never narrows to int
/// env.declare("n", DeclaredType::Int).unwrap();
/// assert!(env.assign("n", Value::Float(1.5)).is_err());
/// assert_eq!(env.get("n"), Ok(&Value::Int(0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Variables in declaration order
    vars: IndexMap<String, Variable>,
}

impl Environment {
    /// Create a new empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    // ═══════════════════════════════════════════════════════════════════
    // Declaration
    // ═══════════════════════════════════════════════════════════════════

    /// Declare a variable holding the default value of its type.
    ///
    /// # Errors
    ///
    /// `DuplicateDeclaration` if the name is already declared; the existing
    /// variable is left untouched.
    pub fn declare(&mut self, name: impl Into<String>, ty: DeclaredType) -> Result<(), EvalError> {
        let name = name.into();
        if self.vars.contains_key(&name) {
            return Err(EvalError::DuplicateDeclaration { name });
        }

        self.vars.insert(
            name.clone(),
            Variable {
                name,
                declared_type: ty,
                value: ty.default_value(),
            },
        );
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Current value of a variable.
    ///
    /// # Errors
    ///
    /// `UndeclaredVariable` if the name was never declared.
    pub fn get(&self, name: &str) -> Result<&Value, EvalError> {
        self.vars
            .get(name)
            .map(|v| &v.value)
            .ok_or_else(|| EvalError::UndeclaredVariable {
                name: name.to_string(),
            })
    }

    /// Look up the full variable record.
    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.vars.get(name)
    }

    /// Declared type of a variable, if declared.
    pub fn declared_type(&self, name: &str) -> Option<DeclaredType> {
        self.vars.get(name).map(|v| v.declared_type)
    }

    /// Check if a variable is declared.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Assignment
    // ═══════════════════════════════════════════════════════════════════

    /// Convert `value` to the variable's declared type and store it.
    ///
    /// Returns the stored (converted) value. Assignment is all-or-nothing:
    /// on error the variable keeps its previous value.
    ///
    /// # Errors
    ///
    /// - `UndeclaredVariable` if the name was never declared
    /// - `Conversion` if the value cannot convert to the declared type
    pub fn assign(&mut self, name: &str, value: Value) -> Result<Value, EvalError> {
        let var = self
            .vars
            .get_mut(name)
            .ok_or_else(|| EvalError::UndeclaredVariable {
                name: name.to_string(),
            })?;

        let converted = convert(value, var.declared_type, Some(name))?;
        var.value = converted.clone();
        Ok(converted)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration and Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Iterate over variables in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.vars.values()
    }

    /// Get the number of variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Remove all variables.
    pub fn clear(&mut self) {
        self.vars.clear();
    }
}
