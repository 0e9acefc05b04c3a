//! Abstract Syntax Tree definitions
//!
//! The tree is produced by an external front end and handed to the
//! interpreter as-is; it derives serde so it can cross a process boundary.

mod expr;

pub use expr::*;

use serde::{Deserialize, Serialize};

/// A program is a block of statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub body: Block,
}

impl Program {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Program {
            body: Block::new(statements),
        }
    }
}

/// Statement sequence, as the parser saw it
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Block {
    pub items: Vec<BlockItem>,
}

impl Block {
    pub fn new(statements: Vec<Stmt>) -> Self {
        Block {
            items: statements.into_iter().map(BlockItem::Stmt).collect(),
        }
    }

    /// Statements in source order, separators skipped
    pub fn statements(&self) -> impl Iterator<Item = &Stmt> {
        self.items.iter().filter_map(|item| match item {
            BlockItem::Stmt(stmt) => Some(stmt),
            BlockItem::Newline => None,
        })
    }
}

/// Child of a block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockItem {
    Stmt(Stmt),
    /// Line break token kept by the parser
    Newline,
}

/// Statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Stmt {
    /// `id[index] = value`
    IndexAssign {
        target: String,
        index: Expr,
        value: Expr,
    },
    /// `id = value`
    Assign { target: String, value: Expr },
    /// Output followed by a line terminator
    Print(Expr),
    /// Output without a line terminator
    Write(Expr),
    While { cond: Expr, body: Block },
    If {
        cond: Expr,
        then_body: Block,
        else_body: Option<Block>,
    },
    Block(Block),
}

impl Stmt {
    pub fn assign(target: &str, value: Expr) -> Self {
        Stmt::Assign {
            target: target.to_string(),
            value,
        }
    }

    pub fn index_assign(target: &str, index: Expr, value: Expr) -> Self {
        Stmt::IndexAssign {
            target: target.to_string(),
            index,
            value,
        }
    }

    pub fn print(expr: Expr) -> Self {
        Stmt::Print(expr)
    }

    pub fn write(expr: Expr) -> Self {
        Stmt::Write(expr)
    }

    pub fn while_loop(cond: Expr, body: Vec<Stmt>) -> Self {
        Stmt::While {
            cond,
            body: Block::new(body),
        }
    }

    pub fn if_else(cond: Expr, then_body: Vec<Stmt>, else_body: Option<Vec<Stmt>>) -> Self {
        Stmt::If {
            cond,
            then_body: Block::new(then_body),
            else_body: else_body.map(Block::new),
        }
    }

    /// Short name used in traces
    pub fn kind(&self) -> &'static str {
        match self {
            Stmt::IndexAssign { .. } => "index-assign",
            Stmt::Assign { .. } => "assign",
            Stmt::Print(_) => "print",
            Stmt::Write(_) => "write",
            Stmt::While { .. } => "while",
            Stmt::If { .. } => "if",
            Stmt::Block(_) => "block",
        }
    }
}
