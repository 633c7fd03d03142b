//! Core library for the vislang scripting language: a character-stream lexer
//! and an evaluator that executes the token stream directly.

pub mod diagnostics;
pub mod lexer;
pub mod repl;
pub mod runtime;
pub mod sink;
pub mod stdlib;
pub mod value;

pub use diagnostics::{EvalError, LexError, LexFailure, VislangError};
pub use lexer::{Lexed, Token, TokenKind, lex};
pub use repl::Repl;
pub use runtime::{Interpreter, RunConfig, Step, evaluate, run};
pub use sink::Sink;
pub use value::Value;
