//! Direct token-stream evaluation. Each syntactic form recognises its tokens
//! and computes its value in the same recursive call, with no tree in between.

use std::io::Read;

use crate::{
    diagnostics::{EvalError, LexFailure, Result},
    lexer::{self, Lexed, Token, TokenKind},
    sink::{Discard, Sink, Stderr},
    stdlib,
    value::Value,
};

/// A value together with the index of the first unconsumed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub value: Value,
    pub next: usize,
}

impl Step {
    pub fn new(value: Value, next: usize) -> Self {
        Self { value, next }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
}

impl BinaryOp {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        let op = match symbol {
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Subtract,
            "*" => BinaryOp::Multiply,
            "/" => BinaryOp::Divide,
            "%" => BinaryOp::Remainder,
            "**" => BinaryOp::Power,
            _ => return None,
        };
        Some(op)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Remainder => "%",
            BinaryOp::Power => "**",
        }
    }

    /// Integer semantics; `**` goes through `f64` and truncates back. Any
    /// result outside `i64` is an `Overflow`.
    pub fn apply(self, lhs: i64, rhs: i64, line: usize) -> std::result::Result<i64, EvalError> {
        let overflow = || EvalError::Overflow {
            operation: self.symbol().to_string(),
            line,
        };
        match self {
            BinaryOp::Add => lhs.checked_add(rhs).ok_or_else(overflow),
            BinaryOp::Subtract => lhs.checked_sub(rhs).ok_or_else(overflow),
            BinaryOp::Multiply => lhs.checked_mul(rhs).ok_or_else(overflow),
            BinaryOp::Divide | BinaryOp::Remainder if rhs == 0 => {
                Err(EvalError::DivisionByZero { line })
            }
            BinaryOp::Divide => lhs.checked_div(rhs).ok_or_else(overflow),
            BinaryOp::Remainder => lhs.checked_rem(rhs).ok_or_else(overflow),
            BinaryOp::Power => {
                let result = (lhs as f64).powf(rhs as f64);
                if (-I64_BOUND..I64_BOUND).contains(&result) {
                    Ok(result as i64)
                } else {
                    Err(overflow())
                }
            }
        }
    }
}

/// 2^63, the first magnitude past `i64::MAX`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Deepest chain of nested units `evaluate` will follow.
pub const MAX_NESTING: usize = 256;

fn token_at(tokens: &[Token], index: usize) -> std::result::Result<&Token, EvalError> {
    tokens.get(index).ok_or(EvalError::RanOutOfCode)
}

/// Evaluates exactly one unit starting at `index`.
pub fn evaluate(
    tokens: &[Token],
    index: usize,
    sink: &mut dyn Sink,
) -> std::result::Result<Step, EvalError> {
    evaluate_nested(tokens, index, sink, 0)
}

fn evaluate_nested(
    tokens: &[Token],
    index: usize,
    sink: &mut dyn Sink,
    depth: usize,
) -> std::result::Result<Step, EvalError> {
    let token = token_at(tokens, index)?;
    if depth >= MAX_NESTING {
        return Err(EvalError::NestingTooDeep { line: token.line });
    }
    match token.kind {
        TokenKind::Reference => call_reference(tokens, index, sink, depth),
        TokenKind::ArithmeticOperator => match BinaryOp::from_symbol(&token.text) {
            Some(op) => binary_operation(tokens, index, op, sink, depth),
            None => Ok(Step::new(Value::Empty, index + 1)),
        },
        TokenKind::BlockStart => block(tokens, index, sink, depth),
        TokenKind::StringLit => Ok(Step::new(Value::Text(token.text.clone()), index + 1)),
        TokenKind::NumberLit => Ok(Step::new(number_literal(token)?, index + 1)),
        _ => Ok(Step::new(Value::Empty, index + 1)),
    }
}

fn number_literal(token: &Token) -> std::result::Result<Value, EvalError> {
    token
        .text
        .parse::<i64>()
        .map(Value::Integer)
        .map_err(|_| EvalError::BadLiteral {
            text: token.text.clone(),
            line: token.line,
        })
}

/// `name operand`: calls a built-in with the unit that follows it.
fn call_reference(
    tokens: &[Token],
    index: usize,
    sink: &mut dyn Sink,
    depth: usize,
) -> std::result::Result<Step, EvalError> {
    let token = &tokens[index];
    let function =
        stdlib::lookup(&token.text).ok_or_else(|| EvalError::UnrecognizedReference {
            name: token.text.clone(),
            line: token.line,
        })?;
    let argument = evaluate_nested(tokens, index + 1, sink, depth + 1)?;
    Ok(Step::new(function.call(argument.value, sink), argument.next))
}

/// Prefix form `op lhs rhs`.
fn binary_operation(
    tokens: &[Token],
    index: usize,
    op: BinaryOp,
    sink: &mut dyn Sink,
    depth: usize,
) -> std::result::Result<Step, EvalError> {
    let line = tokens[index].line;
    let lhs = evaluate_nested(tokens, index + 1, sink, depth + 1)?;
    let left = lhs.value.expect_int(op.symbol(), line)?;
    let rhs = evaluate_nested(tokens, lhs.next, sink, depth + 1)?;
    let right = rhs.value.expect_int(op.symbol(), line)?;
    Ok(Step::new(
        Value::Integer(op.apply(left, right, line)?),
        rhs.next,
    ))
}

/// `( first op operand op operand ... )` folded strictly left to right.
fn block(
    tokens: &[Token],
    index: usize,
    sink: &mut dyn Sink,
    depth: usize,
) -> std::result::Result<Step, EvalError> {
    let first = evaluate_nested(tokens, index + 1, sink, depth + 1)?;
    let mut accumulator = first.value.expect_int("(", tokens[index].line)?;
    let mut next = first.next;
    loop {
        let token = token_at(tokens, next)?;
        match (token.kind, BinaryOp::from_symbol(&token.text)) {
            (TokenKind::BlockEnd, _) => {
                return Ok(Step::new(Value::Integer(accumulator), next + 1));
            }
            (TokenKind::ArithmeticOperator, Some(op)) => {
                let operand = evaluate_nested(tokens, next + 1, sink, depth + 1)?;
                let right = operand.value.expect_int(op.symbol(), token.line)?;
                accumulator = op.apply(accumulator, right, token.line)?;
                next = operand.next;
            }
            _ => return Err(EvalError::RanOutOfCode),
        }
    }
}

/// Evaluates units from index 0 until the tokens run out or one fails.
/// Returns the last non-empty value produced, or `Empty`.
pub fn run(tokens: &[Token], sink: &mut dyn Sink) -> std::result::Result<Value, EvalError> {
    let mut last = Value::Empty;
    let mut index = 0;
    while index < tokens.len() {
        let step = evaluate(tokens, index, sink)?;
        if !step.value.is_empty() {
            last = step.value;
        }
        index = step.next;
    }
    Ok(last)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    /// Report every token to the sink while lexing.
    pub trace_tokens: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self { trace_tokens: true }
    }
}

pub struct Interpreter<S: Sink = Stderr> {
    sink: S,
    config: RunConfig,
}

impl Interpreter<Stderr> {
    pub fn new() -> Self {
        Self::with_config(Stderr, RunConfig::default())
    }
}

impl Default for Interpreter<Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Sink> Interpreter<S> {
    pub fn with_sink(sink: S) -> Self {
        Self::with_config(sink, RunConfig::default())
    }

    pub fn with_config(sink: S, config: RunConfig) -> Self {
        Self { sink, config }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    pub fn tokenize<R: Read>(&mut self, reader: R) -> std::result::Result<Lexed, LexFailure> {
        if self.config.trace_tokens {
            lexer::lex(reader, &mut self.sink)
        } else {
            lexer::lex(reader, &mut Discard)
        }
    }

    pub fn eval_reader<R: Read>(&mut self, reader: R) -> Result<Value> {
        let lexed = self.tokenize(reader)?;
        Ok(run(&lexed.tokens, &mut self.sink)?)
    }

    pub fn eval_source(&mut self, source: &str) -> Result<Value> {
        self.eval_reader(source.as_bytes())
    }
}
