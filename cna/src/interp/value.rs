//! Runtime values for the interpreter

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Shared, mutable list storage
pub type ListRef = Rc<RefCell<Vec<Value>>>;

/// Shared, mutable character buffer
pub type StrRef = Rc<RefCell<Vec<char>>>;

/// Runtime value
///
/// Containers are handles: cloning a `List` or `Str` value aliases the same
/// storage, so a mutation through one binding is seen by every other binding
/// holding the handle.
#[derive(Debug, Clone)]
pub enum Value {
    /// 64-bit integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// Single character
    Char(char),
    /// Growable character buffer, indexable in place
    Str(StrRef),
    /// Heterogeneous list
    List(ListRef),
    /// Boolean
    Bool(bool),
    /// Placeholder written into list slots created by auto-extension
    Nil,
}

impl Value {
    /// Fresh string buffer holding `s`
    pub fn string(s: &str) -> Self {
        Value::Str(Rc::new(RefCell::new(s.chars().collect())))
    }

    /// Fresh list holding `items`
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Rc::new(RefCell::new(items)))
    }

    /// Get type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Bool(_) => "boolean",
            Value::Nil => "null",
        }
    }

    /// Try to convert to i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Numeric view; integers always widen
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(n) => Some(*n as f64),
            _ => None,
        }
    }

    /// Try to convert to bool
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Value::List(_) | Value::Str(_))
    }

    /// Number of elements or characters; `None` for scalars
    pub fn len(&self) -> Option<usize> {
        match self {
            Value::List(items) => Some(items.borrow().len()),
            Value::Str(chars) => Some(chars.borrow().len()),
            _ => None,
        }
    }

    /// Whether two values are the same container instance
    pub fn same_container(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::List(a), Value::List(b)) => Rc::ptr_eq(a, b),
            (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Copy a string buffer's characters out
    pub fn materialize_string(&self) -> Option<String> {
        match self {
            Value::Str(chars) => Some(chars.borrow().iter().collect()),
            _ => None,
        }
    }
}

/// Whole numbers keep a fractional digit so floats stay recognisable in output
pub fn format_float(x: f64) -> String {
    if x.is_nan() {
        "NaN".to_string()
    } else if x.is_infinite() {
        let text = if x > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        format!("{x:.1}")
    } else {
        format!("{x}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(self, f, &mut Vec::new())
    }
}

type ListPtr = *const RefCell<Vec<Value>>;

/// Lists currently being printed, outermost first
type Path = Vec<ListPtr>;

/// A list already on `path` prints as `(this Collection)` instead of recursing
fn write_value(value: &Value, f: &mut fmt::Formatter<'_>, path: &mut Path) -> fmt::Result {
    match value {
        Value::Int(n) => write!(f, "{n}"),
        Value::Float(x) => write!(f, "{}", format_float(*x)),
        Value::Char(c) => write!(f, "{c}"),
        Value::Str(chars) => {
            for c in chars.borrow().iter() {
                write!(f, "{c}")?;
            }
            Ok(())
        }
        Value::List(items) => {
            path.push(Rc::as_ptr(items));
            write!(f, "[")?;
            for (i, v) in items.borrow().iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                match v {
                    Value::List(inner) if path.contains(&Rc::as_ptr(inner)) => {
                        write!(f, "(this Collection)")?;
                    }
                    _ => stacker::maybe_grow(64 * 1024, 1024 * 1024, || write_value(v, f, path))?,
                }
            }
            path.pop();
            write!(f, "]")
        }
        Value::Bool(b) => write!(f, "{b}"),
        Value::Nil => write!(f, "null"),
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        values_eq(self, other, &mut Vec::new())
    }
}

/// Structural equality; a pair of lists already under comparison is assumed
/// equal so cyclic structures terminate
fn values_eq(a: &Value, b: &Value, seen: &mut Vec<(ListPtr, ListPtr)>) -> bool {
    match (a, b) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (Value::Float(a), Value::Float(b)) => a == b,
        (Value::Char(a), Value::Char(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => Rc::ptr_eq(a, b) || *a.borrow() == *b.borrow(),
        (Value::List(a), Value::List(b)) => {
            if Rc::ptr_eq(a, b) {
                return true;
            }
            let pair = (Rc::as_ptr(a), Rc::as_ptr(b));
            if seen.contains(&pair) {
                return true;
            }
            let (left, right) = (a.borrow(), b.borrow());
            if left.len() != right.len() {
                return false;
            }
            seen.push(pair);
            let equal = left.iter().zip(right.iter()).all(|(x, y)| {
                stacker::maybe_grow(64 * 1024, 1024 * 1024, || values_eq(x, y, seen))
            });
            seen.pop();
            equal
        }
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Nil, Value::Nil) => true,
        _ => false,
    }
}
