//! Expression AST nodes

use serde::{Deserialize, Serialize};

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Numeric literal, as written in the source (`42`, `3.5`)
    Number(String),
    /// Character literal including its delimiters (`'a'`)
    Char(String),
    /// String literal including its delimiters (`"abc"`)
    Str(String),
    /// List literal
    List(ListExpr),

    /// Variable reference
    Var(String),

    /// Element of a list or character of a string: `id[index]`
    Index {
        target: String,
        index: Box<Expr>,
    },

    /// Parenthesized sub-expression
    Paren(Box<Expr>),

    /// Arithmetic operation
    Binary {
        left: Box<Expr>,
        op: ArithOp,
        right: Box<Expr>,
    },

    /// Comparison
    Compare {
        left: Box<Expr>,
        op: CmpOp,
        right: Box<Expr>,
    },

    /// Logical negation: `!expr`
    Not(Box<Expr>),

    /// Logical connective; both sides are always evaluated
    Logic {
        left: Box<Expr>,
        op: LogicOp,
        right: Box<Expr>,
    },

    /// Keyword-triggered builtin
    Builtin(Builtin),
}

/// List literal forms
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ListExpr {
    /// `[a, b, c]`
    Elements(Vec<Expr>),
    /// `begin:end:step`, inclusive of `end`
    Range {
        begin: Box<Expr>,
        end: Box<Expr>,
        step: Box<Expr>,
    },
}

/// Builtin operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Builtin {
    Random,
    Floor(Box<Expr>),
    ReadInt,
    ReadDouble,
    ReadString,
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Random => "random",
            Builtin::Floor(_) => "floor",
            Builtin::ReadInt => "readInt",
            Builtin::ReadDouble => "readDouble",
            Builtin::ReadString => "readString",
        }
    }
}

/// Arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl std::fmt::Display for ArithOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithOp::Add => write!(f, "+"),
            ArithOp::Sub => write!(f, "-"),
            ArithOp::Mul => write!(f, "*"),
            ArithOp::Div => write!(f, "/"),
            ArithOp::Mod => write!(f, "%"),
            ArithOp::Pow => write!(f, "^"),
        }
    }
}

/// Comparison operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl std::fmt::Display for CmpOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CmpOp::Lt => write!(f, "<"),
            CmpOp::Le => write!(f, "<="),
            CmpOp::Gt => write!(f, ">"),
            CmpOp::Ge => write!(f, ">="),
            CmpOp::Eq => write!(f, "=="),
        }
    }
}

/// Logical operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicOp {
    And,
    Or,
}

impl std::fmt::Display for LogicOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogicOp::And => write!(f, "AND"),
            LogicOp::Or => write!(f, "OR"),
        }
    }
}

// Construction helpers for embedders building trees without a parser

impl Expr {
    pub fn int(n: i64) -> Self {
        Expr::Number(n.to_string())
    }

    pub fn float(text: &str) -> Self {
        Expr::Number(text.to_string())
    }

    pub fn char(c: char) -> Self {
        Expr::Char(format!("'{c}'"))
    }

    pub fn string(s: &str) -> Self {
        Expr::Str(format!("\"{s}\""))
    }

    pub fn var(name: &str) -> Self {
        Expr::Var(name.to_string())
    }

    pub fn list(elements: Vec<Expr>) -> Self {
        Expr::List(ListExpr::Elements(elements))
    }

    pub fn range(begin: Expr, end: Expr, step: Expr) -> Self {
        Expr::List(ListExpr::Range {
            begin: Box::new(begin),
            end: Box::new(end),
            step: Box::new(step),
        })
    }

    pub fn index(target: &str, index: Expr) -> Self {
        Expr::Index {
            target: target.to_string(),
            index: Box::new(index),
        }
    }

    pub fn paren(inner: Expr) -> Self {
        Expr::Paren(Box::new(inner))
    }

    pub fn binary(left: Expr, op: ArithOp, right: Expr) -> Self {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn compare(left: Expr, op: CmpOp, right: Expr) -> Self {
        Expr::Compare {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn not(operand: Expr) -> Self {
        Expr::Not(Box::new(operand))
    }

    pub fn logic(left: Expr, op: LogicOp, right: Expr) -> Self {
        Expr::Logic {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn floor(operand: Expr) -> Self {
        Expr::Builtin(Builtin::Floor(Box::new(operand)))
    }

    /// `true` has no literal; `1 == 1` is how programs spell it
    pub fn truth(value: bool) -> Self {
        let rhs = if value { 1 } else { 0 };
        Expr::compare(Expr::int(1), CmpOp::Eq, Expr::int(rhs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_display() {
        assert_eq!(ArithOp::Pow.to_string(), "^");
        assert_eq!(ArithOp::Mod.to_string(), "%");
        assert_eq!(CmpOp::Le.to_string(), "<=");
        assert_eq!(CmpOp::Eq.to_string(), "==");
        assert_eq!(LogicOp::Or.to_string(), "OR");
    }

    #[test]
    fn test_literal_helpers_keep_delimiters() {
        assert_eq!(Expr::char('x'), Expr::Char("'x'".to_string()));
        assert_eq!(Expr::string("hi"), Expr::Str("\"hi\"".to_string()));
        assert_eq!(Expr::int(-3), Expr::Number("-3".to_string()));
    }

    #[test]
    fn test_builtin_names() {
        assert_eq!(Builtin::Random.name(), "random");
        assert_eq!(Builtin::Floor(Box::new(Expr::int(1))).name(), "floor");
        assert_eq!(Builtin::ReadString.name(), "readString");
    }

    #[test]
    fn test_expr_serde_shape() {
        let expr = Expr::binary(Expr::int(1), ArithOp::Add, Expr::var("x"));
        let json = serde_json::to_string(&expr).unwrap();
        let back: Expr = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expr);
        assert!(json.contains("\"Binary\""));
    }
}
