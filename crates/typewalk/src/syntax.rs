//! The syntax tree consumed by the evaluator
//!
//! Trees are produced by an external lexer/parser. The evaluator never sees
//! source text, only these nodes, each carrying the source position used in
//! diagnostics. Trees can be handed over in JSON through
//! [`Program::from_json`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::DeclaredType;

/// A `line:column` source position.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Position {
    /// 1-based line
    pub line: u32,
    /// 0-based column
    pub column: u32,
}

impl Position {
    /// Create a position.
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A variable name with the position it appears at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ident {
    /// The name
    pub name: String,
    /// Where it appears
    #[serde(default)]
    pub position: Position,
}

impl Ident {
    /// Create an identifier at the default position.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position: Position::default(),
        }
    }

    /// Set the position.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.position = Position::new(line, column);
        self
    }
}

/// Literal token text, tagged with the literal kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "text", rename_all = "lowercase")]
pub enum Literal {
    /// Decimal, `0x` hexadecimal or leading-zero octal integer
    Int(String),
    /// Floating point number
    Float(String),
    /// `true` or `false`
    Bool(String),
    /// String, with or without its surrounding quotes
    Str(String),
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `+`
    #[serde(rename = "+")]
    Add,
    /// `-`
    #[serde(rename = "-")]
    Sub,
    /// `*`
    #[serde(rename = "*")]
    Mul,
    /// `/`
    #[serde(rename = "/")]
    Div,
    /// `%`
    #[serde(rename = "%")]
    Mod,
    /// `.` string concatenation
    #[serde(rename = ".")]
    Concat,
    /// `==`
    #[serde(rename = "==")]
    Eq,
    /// `!=`
    #[serde(rename = "!=")]
    Ne,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
    /// `&&`
    #[serde(rename = "&&")]
    And,
    /// `||`
    #[serde(rename = "||")]
    Or,
}

impl BinaryOp {
    /// The operator's source symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Concat => ".",
            BinaryOp::Eq => "==",
            BinaryOp::Ne => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Gt => ">",
            BinaryOp::Le => "<=",
            BinaryOp::Ge => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `-`
    #[serde(rename = "-")]
    Neg,
    /// `!`
    #[serde(rename = "!")]
    Not,
}

impl UnaryOp {
    /// The operator's source symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

/// Expression nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Expr {
    /// Literal value
    Literal {
        /// The literal token
        literal: Literal,
        /// Source position
        #[serde(default)]
        position: Position,
    },

    /// Variable read
    Variable {
        /// Variable name
        name: String,
        /// Source position
        #[serde(default)]
        position: Position,
    },

    /// Binary operation; the position is the operator's
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
        /// Source position
        #[serde(default)]
        position: Position,
    },

    /// Unary operation
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
        /// Source position
        #[serde(default)]
        position: Position,
    },

    /// Parenthesized expression
    Paren {
        /// Inner expression
        inner: Box<Expr>,
        /// Source position
        #[serde(default)]
        position: Position,
    },
}

/// Statement nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Stmt {
    /// Standalone expression; its value is reported at top level
    Expr {
        /// The expression
        expr: Expr,
    },

    /// `int a, b;`
    VariableDecl {
        /// Declared type; `None` means the tree is malformed
        ty: Option<DeclaredType>,
        /// Declared names, in order
        names: Vec<Ident>,
        /// Source position
        #[serde(default)]
        position: Position,
    },

    /// `name = value;`
    Assign {
        /// Assigned variable
        target: Ident,
        /// Right-hand side
        value: Expr,
    },

    /// `{ ... }`
    Block {
        /// Statements in order
        stmts: Vec<Stmt>,
        /// Source position
        #[serde(default)]
        position: Position,
    },

    /// `if (cond) then else otherwise`
    If {
        /// Condition
        cond: Expr,
        /// Taken when the condition is true
        then_branch: Box<Stmt>,
        /// Taken otherwise, if present
        else_branch: Option<Box<Stmt>>,
        /// Source position
        #[serde(default)]
        position: Position,
    },

    /// `while (cond) body`
    While {
        /// Condition, tested before each iteration
        cond: Expr,
        /// Loop body
        body: Box<Stmt>,
        /// Source position
        #[serde(default)]
        position: Position,
    },

    /// `do body while (cond);`
    DoWhile {
        /// Loop body, executed at least once
        body: Box<Stmt>,
        /// Condition, tested after each iteration
        cond: Expr,
        /// Source position
        #[serde(default)]
        position: Position,
    },

    /// `;`
    Empty {
        /// Source position
        #[serde(default)]
        position: Position,
    },
}

/// A whole program: top-level statements in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Top-level statements
    pub stmts: Vec<Stmt>,
}

impl Program {
    /// Create a program from statements.
    pub fn new(stmts: Vec<Stmt>) -> Self {
        Self { stmts }
    }

    /// Read a program from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Write the program in its JSON form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Construction helpers
// ═══════════════════════════════════════════════════════════════════════

impl Expr {
    fn literal(literal: Literal) -> Self {
        Expr::Literal {
            literal,
            position: Position::default(),
        }
    }

    /// Integer literal from its token text.
    pub fn int(text: impl Into<String>) -> Self {
        Self::literal(Literal::Int(text.into()))
    }

    /// Float literal from its token text.
    pub fn float(text: impl Into<String>) -> Self {
        Self::literal(Literal::Float(text.into()))
    }

    /// Bool literal from its token text.
    pub fn boolean(text: impl Into<String>) -> Self {
        Self::literal(Literal::Bool(text.into()))
    }

    /// String literal from its token text.
    pub fn string(text: impl Into<String>) -> Self {
        Self::literal(Literal::Str(text.into()))
    }

    /// Variable read.
    pub fn var(name: impl Into<String>) -> Self {
        Expr::Variable {
            name: name.into(),
            position: Position::default(),
        }
    }

    /// Binary operation.
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
            position: Position::default(),
        }
    }

    /// Unary operation.
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
            position: Position::default(),
        }
    }

    /// Parenthesized expression.
    pub fn paren(inner: Expr) -> Self {
        Expr::Paren {
            inner: Box::new(inner),
            position: Position::default(),
        }
    }

    /// Set the node's position.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        *self.position_mut() = Position::new(line, column);
        self
    }

    /// The node's position.
    pub fn position(&self) -> Position {
        match self {
            Expr::Literal { position, .. }
            | Expr::Variable { position, .. }
            | Expr::Binary { position, .. }
            | Expr::Unary { position, .. }
            | Expr::Paren { position, .. } => *position,
        }
    }

    fn position_mut(&mut self) -> &mut Position {
        match self {
            Expr::Literal { position, .. }
            | Expr::Variable { position, .. }
            | Expr::Binary { position, .. }
            | Expr::Unary { position, .. }
            | Expr::Paren { position, .. } => position,
        }
    }
}

impl Stmt {
    /// Expression statement.
    pub fn expr(expr: Expr) -> Self {
        Stmt::Expr { expr }
    }

    /// Declaration of one or more variables of the same type.
    pub fn declare(ty: DeclaredType, names: &[&str]) -> Self {
        Stmt::VariableDecl {
            ty: Some(ty),
            names: names.iter().map(|n| Ident::new(*n)).collect(),
            position: Position::default(),
        }
    }

    /// Assignment.
    pub fn assign(name: impl Into<String>, value: Expr) -> Self {
        Stmt::Assign {
            target: Ident::new(name),
            value,
        }
    }

    /// Block of statements.
    pub fn block(stmts: Vec<Stmt>) -> Self {
        Stmt::Block {
            stmts,
            position: Position::default(),
        }
    }

    /// `if` with an optional `else`.
    pub fn if_else(cond: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Self {
        Stmt::If {
            cond,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
            position: Position::default(),
        }
    }

    /// `while` loop.
    pub fn while_loop(cond: Expr, body: Stmt) -> Self {
        Stmt::While {
            cond,
            body: Box::new(body),
            position: Position::default(),
        }
    }

    /// `do ... while` loop.
    pub fn do_while(body: Stmt, cond: Expr) -> Self {
        Stmt::DoWhile {
            body: Box::new(body),
            cond,
            position: Position::default(),
        }
    }

    /// Empty statement.
    pub fn empty() -> Self {
        Stmt::Empty {
            position: Position::default(),
        }
    }

    /// Set the node's position. For an assignment this is the target's position.
    pub fn at(mut self, line: u32, column: u32) -> Self {
        let pos = Position::new(line, column);
        match &mut self {
            Stmt::Expr { expr } => *expr.position_mut() = pos,
            Stmt::Assign { target, .. } => target.position = pos,
            Stmt::VariableDecl { position, .. }
            | Stmt::Block { position, .. }
            | Stmt::If { position, .. }
            | Stmt::While { position, .. }
            | Stmt::DoWhile { position, .. }
            | Stmt::Empty { position } => *position = pos,
        }
        self
    }

    /// The node's position.
    pub fn position(&self) -> Position {
        match self {
            Stmt::Expr { expr } => expr.position(),
            Stmt::Assign { target, .. } => target.position,
            Stmt::VariableDecl { position, .. }
            | Stmt::Block { position, .. }
            | Stmt::If { position, .. }
            | Stmt::While { position, .. }
            | Stmt::DoWhile { position, .. }
            | Stmt::Empty { position } => *position,
        }
    }
}
