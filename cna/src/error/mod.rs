//! Error types for loading and running programs

use crate::interp::RuntimeError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CnaError>;

/// Anything that can stop a run, from reading the file to the last statement
#[derive(Debug, Error)]
pub enum CnaError {
    #[error("IO error: {message}")]
    Io { message: String },

    /// The program tree could not be decoded
    #[error("Decode error at {line}:{column}: {message}")]
    Decode {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

impl CnaError {
    pub fn io_error(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    pub fn decode_error(err: &serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }

    /// Short label for the failing phase
    pub fn phase(&self) -> &'static str {
        match self {
            Self::Io { .. } => "IO",
            Self::Decode { .. } => "Decode",
            Self::Runtime(_) => "Runtime",
        }
    }
}

/// Print an error for the command line user
pub fn report_error(filename: &str, error: &CnaError) {
    eprintln!("Error: {filename}: {error}");
}
