//! Cna execution backend
//!
//! Runs already-parsed programs of the Cna scripting language: a small
//! dynamically-typed language with integers, floats, characters, mutable
//! strings, lists and booleans.

pub mod ast;
pub mod error;
pub mod interp;

pub use error::{CnaError, Result};
pub use interp::{run, Config, Interpreter, RuntimeError, Value};

use std::path::Path;

/// Decode a program tree from its JSON form
pub fn parse_program(json: &str) -> Result<ast::Program> {
    serde_json::from_str(json).map_err(|e| CnaError::decode_error(&e))
}

/// Read and decode a program tree from a file
pub fn load_program(path: &Path) -> Result<ast::Program> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CnaError::io_error(format!("{}: {e}", path.display())))?;
    parse_program(&text)
}
