use std::io;

use thiserror::Error;

/// Failure raised while turning characters into tokens.
#[derive(Debug, Error)]
pub enum LexError {
    #[error("unterminated string literal")]
    UnterminatedString,
    #[error("invalid character `{}`", .0.escape_debug())]
    InvalidCharacter(char),
    #[error("unexpected end of input after `{after}`")]
    UnexpectedEndOfInput { after: char },
    #[error("failed to read source: {0}")]
    Read(#[from] io::Error),
}

/// A lexing error together with the number of lines consumed before it hit.
#[derive(Debug, Error)]
#[error("line {}: {error}", .lines + 1)]
pub struct LexFailure {
    pub lines: usize,
    #[source]
    pub error: LexError,
}

impl LexFailure {
    pub fn new(lines: usize, error: LexError) -> Self {
        Self { lines, error }
    }

    /// 1-based line on which lexing stopped.
    pub fn line_number(&self) -> usize {
        self.lines + 1
    }
}

/// Failure raised while evaluating a token sequence.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("ran out of code")]
    RanOutOfCode,
    #[error("reference `{name}` not recognized (line {line})")]
    UnrecognizedReference { name: String, line: usize },
    #[error("`{operation}` expected {expected} but found {found} (line {line})")]
    TypeMismatch {
        operation: String,
        expected: &'static str,
        found: &'static str,
        line: usize,
    },
    #[error("nesting too deep (line {line})")]
    NestingTooDeep { line: usize },
    #[error("division by zero (line {line})")]
    DivisionByZero { line: usize },
    #[error("bad number literal `{text}` (line {line})")]
    BadLiteral { text: String, line: usize },
    #[error("integer overflow in `{operation}` (line {line})")]
    Overflow { operation: String, line: usize },
}

/// Unified error type for the vislang toolchain.
#[derive(Debug, Error)]
pub enum VislangError {
    #[error("Error on {0}")]
    Lex(#[from] LexFailure),
    #[error("Runtime error: {0}")]
    Runtime(#[from] EvalError),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, VislangError>;
