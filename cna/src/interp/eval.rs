//! Program evaluator
//!
//! A plain recursive walk over the statement and expression enums. All
//! operator semantics live in [`super::ops`]; this module owns the variable
//! table, the input reader and the output stream.

use super::config::Config;
use super::env::Environment;
use super::error::{InterpResult, RuntimeError};
use super::input::InputReader;
use super::ops;
use super::value::Value;
use crate::ast::{Block, Builtin, Expr, ListExpr, LogicOp, Program, Stmt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::{self, BufRead, StdinLock, Stdout, Write};

/// Stack growth parameters for deeply nested trees
const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // Grow by 4MB each time

/// The interpreter
pub struct Interpreter<R, W> {
    /// Variable table of the current run
    env: Environment,
    input: InputReader<R>,
    output: W,
    rng: StdRng,
    config: Config,
}

impl Interpreter<StdinLock<'static>, Stdout> {
    /// Interpreter wired to the process's standard streams
    pub fn new(config: Config) -> Self {
        Self::with_io(config, io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Interpreter<R, W> {
    pub fn with_io(config: Config, input: R, output: W) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Interpreter {
            env: Environment::new(),
            input: InputReader::new(input),
            output,
            rng,
            config,
        }
    }

    /// Run a program against a fresh environment.
    ///
    /// Returns the value of the last top-level statement, if it produced one.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn execute(&mut self, program: &Program) -> InterpResult<Option<Value>> {
        self.env = Environment::new();
        let result = self.exec_block(&program.body);
        tracing::debug!(bindings = self.env.len(), ok = result.is_ok(), "program finished");
        result
    }

    /// Variable table as left by the last run
    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn exec_block(&mut self, block: &Block) -> InterpResult<Option<Value>> {
        let mut last = None;
        for stmt in block.statements() {
            last = self.exec(stmt)?;
        }
        Ok(last)
    }

    fn exec(&mut self, stmt: &Stmt) -> InterpResult<Option<Value>> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.exec_inner(stmt))
    }

    fn exec_inner(&mut self, stmt: &Stmt) -> InterpResult<Option<Value>> {
        tracing::trace!(kind = stmt.kind(), "exec");
        match stmt {
            Stmt::IndexAssign { target, index, value } => {
                let index = self.eval_int(index, "index")?;
                let container = self.env.lookup(target)?;
                if !container.is_container() {
                    return Err(RuntimeError::type_mismatch(
                        "list or string",
                        &container,
                        format!("indexed assignment to {target}"),
                    ));
                }
                let value = self.eval(value)?;
                store_at(&container, index, &value)?;
                Ok(Some(value))
            }

            Stmt::Assign { target, value } => {
                let value = self.eval(value)?;
                self.env.define(target, value.clone());
                Ok(Some(value))
            }

            Stmt::Print(expr) => {
                let value = self.eval(expr)?;
                writeln!(self.output, "{value}").map_err(|e| RuntimeError::io_error(&e))?;
                self.maybe_flush()?;
                Ok(None)
            }

            Stmt::Write(expr) => {
                let value = self.eval(expr)?;
                write!(self.output, "{value}").map_err(|e| RuntimeError::io_error(&e))?;
                self.maybe_flush()?;
                Ok(None)
            }

            Stmt::While { cond, body } => {
                while self.eval_condition(cond, "while condition")? {
                    self.exec_block(body)?;
                }
                Ok(None)
            }

            Stmt::If { cond, then_body, else_body } => {
                if self.eval_condition(cond, "if condition")? {
                    self.exec_block(then_body)?;
                } else if let Some(else_body) = else_body {
                    self.exec_block(else_body)?;
                }
                Ok(None)
            }

            Stmt::Block(block) => {
                self.exec_block(block)?;
                Ok(None)
            }
        }
    }

    /// Evaluate an expression with automatic stack growth
    fn eval(&mut self, expr: &Expr) -> InterpResult<Value> {
        stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || self.eval_inner(expr))
    }

    fn eval_inner(&mut self, expr: &Expr) -> InterpResult<Value> {
        match expr {
            Expr::Number(text) => parse_number(text),
            Expr::Char(text) => parse_char(text).map(Value::Char),
            Expr::Str(text) => strip_quotes(text).map(Value::string),

            Expr::List(ListExpr::Elements(elements)) => {
                let mut items = Vec::with_capacity(elements.len());
                for element in elements {
                    items.push(self.eval(element)?);
                }
                Ok(Value::list(items))
            }
            Expr::List(ListExpr::Range { begin, end, step }) => {
                let begin = self.eval_int(begin, "range begin")?;
                let end = self.eval_int(end, "range end")?;
                let step = self.eval_int(step, "range step")?;
                range(begin, end, step)
            }

            Expr::Var(name) => self.env.lookup(name),

            Expr::Index { target, index } => {
                let index = self.eval_int(index, "index")?;
                let container = self.env.lookup(target)?;
                load_at(&container, index, target)
            }

            Expr::Paren(inner) => self.eval(inner),

            Expr::Binary { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                ops::apply(&left, &right, *op)
            }

            Expr::Compare { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                ops::compare(&left, &right, *op).map(Value::Bool)
            }

            Expr::Not(operand) => {
                let b = self.eval_condition(operand, "negation")?;
                Ok(Value::Bool(!b))
            }

            // No short-circuit: both sides always run
            Expr::Logic { left, op, right } => {
                let l = self.eval_condition(left, "logical operand")?;
                let r = self.eval_condition(right, "logical operand")?;
                Ok(Value::Bool(match op {
                    LogicOp::And => l && r,
                    LogicOp::Or => l || r,
                }))
            }

            Expr::Builtin(builtin) => self.eval_builtin(builtin),
        }
    }

    fn eval_builtin(&mut self, builtin: &Builtin) -> InterpResult<Value> {
        match builtin {
            Builtin::Random => Ok(Value::Float(self.rng.gen_range(0.0..1.0))),
            Builtin::Floor(operand) => {
                let value = self.eval(operand)?;
                match value.as_float() {
                    Some(f) => Ok(Value::Int(f.floor() as i64)),
                    None => Err(RuntimeError::type_mismatch("number", &value, builtin.name())),
                }
            }
            Builtin::ReadInt => {
                self.flush_before_read()?;
                self.input.read_int().map(Value::Int)
            }
            Builtin::ReadDouble => {
                self.flush_before_read()?;
                self.input.read_double().map(Value::Float)
            }
            Builtin::ReadString => {
                self.flush_before_read()?;
                self.input.read_line().map(|line| Value::string(&line))
            }
        }
    }

    fn eval_condition(&mut self, expr: &Expr, context: &str) -> InterpResult<bool> {
        let value = self.eval(expr)?;
        value
            .as_bool()
            .ok_or_else(|| RuntimeError::type_mismatch("boolean", &value, context))
    }

    fn eval_int(&mut self, expr: &Expr, context: &str) -> InterpResult<i64> {
        let value = self.eval(expr)?;
        value
            .as_int()
            .ok_or_else(|| RuntimeError::type_mismatch("integer", &value, context))
    }

    fn maybe_flush(&mut self) -> InterpResult<()> {
        if self.config.flush {
            self.output.flush().map_err(|e| RuntimeError::io_error(&e))?;
        }
        Ok(())
    }

    /// Prompts written with `write` must be visible before blocking on stdin
    fn flush_before_read(&mut self) -> InterpResult<()> {
        self.output.flush().map_err(|e| RuntimeError::io_error(&e))
    }
}

/// Float if the literal has a decimal point, integer otherwise
fn parse_number(text: &str) -> InterpResult<Value> {
    if text.contains('.') {
        text.parse::<f64>()
            .map(Value::Float)
            .map_err(|_| RuntimeError::invalid_literal("number", text))
    } else {
        text.parse::<i64>()
            .map(Value::Int)
            .map_err(|_| RuntimeError::invalid_literal("number", text))
    }
}

/// `'c'` -> `c`
fn parse_char(text: &str) -> InterpResult<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next(), chars.next(), chars.next()) {
        (Some('\''), Some(c), Some('\''), None) => Ok(c),
        _ => Err(RuntimeError::invalid_literal("character", text)),
    }
}

/// Drop the first and last character (the delimiters)
fn strip_quotes(text: &str) -> InterpResult<&str> {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(_), Some(_)) => Ok(chars.as_str()),
        _ => Err(RuntimeError::invalid_literal("string", text)),
    }
}

/// `begin, begin+step, ...` up to and including `end`
fn range(begin: i64, end: i64, step: i64) -> InterpResult<Value> {
    if step <= 0 && begin <= end {
        return Err(RuntimeError::InvalidRange { begin, end, step });
    }
    let mut items = Vec::new();
    let mut i = begin;
    while i <= end {
        items.push(Value::Int(i));
        match i.checked_add(step) {
            Some(next) => i = next,
            None => break,
        }
    }
    Ok(Value::list(items))
}

/// 1-based source index to storage slot
fn slot(container: &Value, index: i64) -> InterpResult<usize> {
    index
        .checked_sub(1)
        .and_then(|i| usize::try_from(i).ok())
        .ok_or_else(|| RuntimeError::index_out_of_range(container, index))
}

fn load_at(container: &Value, index: i64, target: &str) -> InterpResult<Value> {
    let slot = slot(container, index)?;
    let found = match container {
        Value::List(items) => items.borrow().get(slot).cloned(),
        Value::Str(chars) => chars.borrow().get(slot).copied().map(Value::Char),
        _ => {
            return Err(RuntimeError::type_mismatch(
                "list or string",
                container,
                format!("indexing {target}"),
            ));
        }
    };
    found.ok_or_else(|| RuntimeError::index_out_of_range(container, index))
}

/// Write into a container, padding it out to `index` first
fn store_at(container: &Value, index: i64, value: &Value) -> InterpResult<()> {
    let slot = slot(container, index)?;
    match container {
        Value::List(items) => {
            let mut items = items.borrow_mut();
            if slot >= items.len() {
                let extra = slot + 1 - items.len();
                items
                    .try_reserve(extra)
                    .map_err(|_| RuntimeError::index_out_of_range(container, index))?;
                items.resize(slot + 1, Value::Nil);
            }
            items[slot] = value.clone();
            Ok(())
        }
        Value::Str(chars) => {
            let Value::Char(c) = value else {
                return Err(RuntimeError::type_mismatch("char", value, "string element assignment"));
            };
            let mut chars = chars.borrow_mut();
            if slot >= chars.len() {
                let extra = slot + 1 - chars.len();
                chars
                    .try_reserve(extra)
                    .map_err(|_| RuntimeError::index_out_of_range(container, index))?;
                chars.resize(slot + 1, '\0');
            }
            chars[slot] = *c;
            Ok(())
        }
        _ => Err(RuntimeError::type_mismatch("list or string", container, "indexed assignment")),
    }
}

impl Default for Interpreter<StdinLock<'static>, Stdout> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
