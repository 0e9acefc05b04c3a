//! Operator semantics across value kinds
//!
//! Both entry points are pure. Every operand-kind/operator combination is
//! matched explicitly and either produces a value or an error.

use super::error::{InterpResult, RuntimeError};
use super::value::Value;
use crate::ast::{ArithOp, CmpOp};

/// Tolerance for numeric `==`
pub const EPSILON: f64 = 1e-7;

/// Numeric view of an operand
#[derive(Debug, Clone, Copy)]
enum Num {
    Int(i64),
    Float(f64),
}

impl Num {
    fn of(value: &Value) -> Option<Num> {
        match value {
            Value::Int(n) => Some(Num::Int(*n)),
            Value::Float(f) => Some(Num::Float(*f)),
            Value::Char(_) | Value::Str(_) | Value::List(_) | Value::Bool(_) | Value::Nil => None,
        }
    }

    fn widen(self) -> f64 {
        match self {
            Num::Int(n) => n as f64,
            Num::Float(f) => f,
        }
    }
}

/// Compare two values
pub fn compare(left: &Value, right: &Value, op: CmpOp) -> InterpResult<bool> {
    match (left.as_float(), right.as_float()) {
        (Some(l), Some(r)) => Ok(match op {
            CmpOp::Lt => l < r,
            CmpOp::Le => l <= r,
            CmpOp::Gt => l > r,
            CmpOp::Ge => l >= r,
            CmpOp::Eq => (l - r).abs() < EPSILON,
        }),
        _ => match op {
            CmpOp::Eq => Ok(loose_eq(left, right)),
            CmpOp::Lt | CmpOp::Le | CmpOp::Gt | CmpOp::Ge => {
                Err(RuntimeError::invalid_comparison(left, right, op))
            }
        },
    }
}

/// Equality for operands that are not both numeric
fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => *a.borrow() == *b.borrow(),
        _ => left == right,
    }
}

/// Apply an arithmetic operator
pub fn apply(left: &Value, right: &Value, op: ArithOp) -> InterpResult<Value> {
    match (Num::of(left), Num::of(right)) {
        (Some(Num::Int(a)), Some(Num::Int(b))) => int_arith(a, b, op),
        (Some(a), Some(b)) => Ok(Value::Float(float_arith(a.widen(), b.widen(), op))),
        _ => match op {
            ArithOp::Add => Ok(concat(left, right)),
            ArithOp::Sub | ArithOp::Mul | ArithOp::Div | ArithOp::Mod | ArithOp::Pow => {
                Err(RuntimeError::undefined_expression(left, right, op))
            }
        },
    }
}

fn int_arith(a: i64, b: i64, op: ArithOp) -> InterpResult<Value> {
    match op {
        ArithOp::Add => Ok(Value::Int(a.wrapping_add(b))),
        ArithOp::Sub => Ok(Value::Int(a.wrapping_sub(b))),
        ArithOp::Mul => Ok(Value::Int(a.wrapping_mul(b))),
        ArithOp::Div if b == 0 => Err(RuntimeError::DivisionByZero),
        ArithOp::Div => Ok(Value::Int(a.wrapping_div(b))),
        ArithOp::Mod if b == 0 => Err(RuntimeError::DivisionByZero),
        ArithOp::Mod => Ok(Value::Int(a.wrapping_rem(b))),
        ArithOp::Pow => Ok(Value::Float((a as f64).powf(b as f64))),
    }
}

fn float_arith(a: f64, b: f64, op: ArithOp) -> f64 {
    match op {
        ArithOp::Add => a + b,
        ArithOp::Sub => a - b,
        ArithOp::Mul => a * b,
        ArithOp::Div => a / b,
        ArithOp::Mod => a % b,
        ArithOp::Pow => a.powf(b),
    }
}

/// `+` on non-numeric operands
fn concat(left: &Value, right: &Value) -> Value {
    match (left, right) {
        (Value::List(a), Value::List(b)) => {
            let mut items = a.borrow().clone();
            items.extend(b.borrow().iter().cloned());
            Value::list(items)
        }
        _ => Value::string(&format!("{left}{right}")),
    }
}
