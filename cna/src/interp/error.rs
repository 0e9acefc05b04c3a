//! Runtime errors for the interpreter

use super::Value;
use crate::ast::{ArithOp, CmpOp};
use thiserror::Error;

/// Runtime error during interpretation. Every variant aborts the run.
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    #[error("invalid comparison: {left} {op} {right}")]
    InvalidComparison { left: Value, right: Value, op: CmpOp },

    #[error("undefined expression: operands {left}, {right}, operator {op}")]
    UndefinedExpression { left: Value, right: Value, op: ArithOp },

    #[error("type error in {context}: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: &'static str,
        actual: &'static str,
        context: String,
    },

    #[error("undefined variable: {0}")]
    UnboundVariable(String),

    #[error("index {index} out of range for {container}")]
    IndexOutOfRange { container: Value, index: i64 },

    #[error("division by zero")]
    DivisionByZero,

    #[error("invalid {kind} literal: {text}")]
    InvalidLiteral { kind: &'static str, text: String },

    #[error("range {begin}:{end}:{step} never terminates")]
    InvalidRange { begin: i64, end: i64, step: i64 },

    #[error("input error: {0}")]
    Input(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Kinds of runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidComparison,
    UndefinedExpression,
    TypeMismatch,
    UnboundVariable,
    IndexOutOfRange,
    DivisionByZero,
    InvalidLiteral,
    InvalidRange,
    Input,
    Io,
}

impl RuntimeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RuntimeError::InvalidComparison { .. } => ErrorKind::InvalidComparison,
            RuntimeError::UndefinedExpression { .. } => ErrorKind::UndefinedExpression,
            RuntimeError::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            RuntimeError::UnboundVariable(_) => ErrorKind::UnboundVariable,
            RuntimeError::IndexOutOfRange { .. } => ErrorKind::IndexOutOfRange,
            RuntimeError::DivisionByZero => ErrorKind::DivisionByZero,
            RuntimeError::InvalidLiteral { .. } => ErrorKind::InvalidLiteral,
            RuntimeError::InvalidRange { .. } => ErrorKind::InvalidRange,
            RuntimeError::Input(_) => ErrorKind::Input,
            RuntimeError::Io(_) => ErrorKind::Io,
        }
    }

    pub fn invalid_comparison(left: &Value, right: &Value, op: CmpOp) -> Self {
        RuntimeError::InvalidComparison {
            left: left.clone(),
            right: right.clone(),
            op,
        }
    }

    pub fn undefined_expression(left: &Value, right: &Value, op: ArithOp) -> Self {
        RuntimeError::UndefinedExpression {
            left: left.clone(),
            right: right.clone(),
            op,
        }
    }

    pub fn type_mismatch(expected: &'static str, actual: &Value, context: impl Into<String>) -> Self {
        RuntimeError::TypeMismatch {
            expected,
            actual: actual.type_name(),
            context: context.into(),
        }
    }

    pub fn unbound_variable(name: &str) -> Self {
        RuntimeError::UnboundVariable(name.to_string())
    }

    pub fn index_out_of_range(container: &Value, index: i64) -> Self {
        RuntimeError::IndexOutOfRange {
            container: container.clone(),
            index,
        }
    }

    pub fn invalid_literal(kind: &'static str, text: &str) -> Self {
        RuntimeError::InvalidLiteral {
            kind,
            text: text.to_string(),
        }
    }

    pub fn input(msg: impl Into<String>) -> Self {
        RuntimeError::Input(msg.into())
    }

    pub fn io_error(err: &std::io::Error) -> Self {
        RuntimeError::Io(err.to_string())
    }
}

/// Result type for interpreter operations
pub type InterpResult<T> = Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_comparison_carries_operands() {
        let err = RuntimeError::invalid_comparison(&Value::string("x"), &Value::string("y"), CmpOp::Lt);
        assert_eq!(err.kind(), ErrorKind::InvalidComparison);
        assert_eq!(err.to_string(), "invalid comparison: x < y");
        match err {
            RuntimeError::InvalidComparison { left, right, op } => {
                assert_eq!(left, Value::string("x"));
                assert_eq!(right, Value::string("y"));
                assert_eq!(op, CmpOp::Lt);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_undefined_expression_message() {
        let err = RuntimeError::undefined_expression(&Value::Bool(true), &Value::Int(1), ArithOp::Mul);
        assert_eq!(err.kind(), ErrorKind::UndefinedExpression);
        assert_eq!(err.to_string(), "undefined expression: operands true, 1, operator *");
    }

    #[test]
    fn test_type_mismatch_message() {
        let err = RuntimeError::type_mismatch("boolean", &Value::Int(3), "while condition");
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(err.to_string(), "type error in while condition: expected boolean, got integer");
    }

    #[test]
    fn test_unbound_variable_message() {
        let err = RuntimeError::unbound_variable("my_var");
        assert_eq!(err.kind(), ErrorKind::UnboundVariable);
        assert_eq!(err.to_string(), "undefined variable: my_var");
    }

    #[test]
    fn test_index_out_of_range_message() {
        let list = Value::list(vec![Value::Int(1), Value::Int(2)]);
        let err = RuntimeError::index_out_of_range(&list, 5);
        assert_eq!(err.kind(), ErrorKind::IndexOutOfRange);
        assert_eq!(err.to_string(), "index 5 out of range for [1, 2]");
    }

    #[test]
    fn test_invalid_range_message() {
        let err = RuntimeError::InvalidRange { begin: 1, end: 5, step: 0 };
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert!(err.to_string().contains("1:5:0"));
    }

    #[test]
    fn test_io_and_input_kinds() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        assert_eq!(RuntimeError::io_error(&io).kind(), ErrorKind::Io);
        assert_eq!(RuntimeError::input("end of input").to_string(), "input error: end of input");
    }

    #[test]
    fn test_error_is_std_error() {
        let err = RuntimeError::DivisionByZero;
        let std_err: &dyn std::error::Error = &err;
        assert!(std_err.source().is_none());
    }
}
