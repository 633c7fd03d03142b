use std::fmt;

use crate::diagnostics::EvalError;

/// Result of evaluating one syntactic unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    Text(String),
    Empty,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "Integer",
            Value::Text(_) => "Text",
            Value::Empty => "Empty",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn expect_int(&self, operation: &str, line: usize) -> Result<i64, EvalError> {
        self.as_int().ok_or_else(|| EvalError::TypeMismatch {
            operation: operation.to_string(),
            expected: "Integer",
            found: self.type_name(),
            line,
        })
    }

    /// Text written by `log`; `Empty` has nothing to show.
    pub fn render(&self) -> Option<String> {
        match self {
            Value::Empty => None,
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
            Value::Empty => Ok(()),
        }
    }
}
