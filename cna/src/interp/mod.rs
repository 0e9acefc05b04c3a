//! Tree-walking interpreter
//!
//! `value` and `ops` define what values are and how operators combine them;
//! `eval` walks the program tree and owns all program state.

mod config;
mod env;
mod error;
mod eval;
mod input;
pub mod ops;
mod value;

pub use config::Config;
pub use env::Environment;
pub use error::{ErrorKind, InterpResult, RuntimeError};
pub use eval::Interpreter;
pub use input::InputReader;
pub use value::{format_float, ListRef, StrRef, Value};

use crate::ast::Program;

/// Run a program once on the process's standard streams
pub fn run(program: &Program) -> InterpResult<()> {
    run_with_config(program, Config::default())
}

pub fn run_with_config(program: &Program, config: Config) -> InterpResult<()> {
    Interpreter::new(config).execute(program).map(|_| ())
}
