use std::{fmt, io::Read, str::Chars};

use crate::{
    diagnostics::{LexError, LexFailure},
    sink::Sink,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    StringLit,
    NumberLit,
    Comparator,
    AssignmentOperator,
    LogicalOperator,
    BitwiseOperator,
    ArithmeticOperator,
    Reference,
    InstructionEnd,
    BlockStart,
    BlockEnd,
}

impl TokenKind {
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::StringLit => "StringLit",
            TokenKind::NumberLit => "NumberLit",
            TokenKind::Comparator => "Comparator",
            TokenKind::AssignmentOperator => "AssignmentOperator",
            TokenKind::LogicalOperator => "LogicalOperator",
            TokenKind::BitwiseOperator => "BitwiseOperator",
            TokenKind::ArithmeticOperator => "ArithmeticOperator",
            TokenKind::Reference => "Reference",
            TokenKind::InstructionEnd => "InstructionEnd",
            TokenKind::BlockStart => "BlockStart",
            TokenKind::BlockEnd => "BlockEnd",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// Literal payload without delimiters, or the operator spelling.
    pub text: String,
    /// 1-based line the token starts on.
    pub line: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
        }
    }
}

/// Trace format: `<kind>: <text>` with newlines escaped.
impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.text.replace('\n', "\\n"))
    }
}

/// Output of a successful lex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lexed {
    pub tokens: Vec<Token>,
    pub lines: usize,
}

/// Reads all of `reader`, then lexes it, reporting each token to `sink` as it
/// is produced.
pub fn lex<R: Read>(mut reader: R, sink: &mut dyn Sink) -> Result<Lexed, LexFailure> {
    let mut source = String::new();
    reader
        .read_to_string(&mut source)
        .map_err(|err| LexFailure::new(0, LexError::from(err)))?;
    Lexer::new(&source).tokenize(sink)
}

/// Character scanner with a single slot of pushback.
pub struct Lexer<'a> {
    chars: Chars<'a>,
    pushed_back: Option<char>,
    lines: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars(),
            pushed_back: None,
            lines: 0,
        }
    }

    fn bump(&mut self) -> Option<char> {
        self.pushed_back.take().or_else(|| self.chars.next())
    }

    fn push_back(&mut self, ch: char) {
        debug_assert!(self.pushed_back.is_none(), "pushback slot already full");
        self.pushed_back = Some(ch);
    }

    /// Reads the character after an operator. Running out here is an error.
    fn lookahead(&mut self, first: char) -> Result<char, LexError> {
        self.bump()
            .ok_or(LexError::UnexpectedEndOfInput { after: first })
    }

    fn match_next<F>(&mut self, first: char, accept: F) -> Result<Option<char>, LexError>
    where
        F: Fn(char) -> bool,
    {
        let next = self.lookahead(first)?;
        if accept(next) {
            Ok(Some(next))
        } else {
            self.push_back(next);
            Ok(None)
        }
    }

    fn one_or_two<F>(
        &mut self,
        first: char,
        accept: F,
        paired: TokenKind,
        single: TokenKind,
        line: usize,
    ) -> Result<Token, LexError>
    where
        F: Fn(char) -> bool,
    {
        Ok(match self.match_next(first, accept)? {
            Some(second) => Token::new(paired, String::from_iter([first, second]), line),
            None => Token::new(single, first.to_string(), line),
        })
    }

    fn collect_while<F>(&mut self, first: char, predicate: F) -> String
    where
        F: Fn(char) -> bool,
    {
        let mut text = String::from(first);
        while let Some(ch) = self.bump() {
            if predicate(ch) {
                text.push(ch);
            } else {
                self.push_back(ch);
                break;
            }
        }
        text
    }

    fn string_literal(&mut self, quote: char, line: usize) -> Result<Token, LexError> {
        let mut value = String::new();
        while let Some(ch) = self.bump() {
            if ch == quote {
                return Ok(Token::new(TokenKind::StringLit, value, line));
            }
            if ch == '\n' {
                self.lines += 1;
            }
            value.push(ch);
        }
        Err(LexError::UnterminatedString)
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.bump() {
            if ch == '\n' {
                self.lines += 1;
                break;
            }
        }
    }

    /// Scans one token, or returns `None` once the input is exhausted.
    pub fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        use TokenKind as K;
        loop {
            let Some(ch) = self.bump() else {
                return Ok(None);
            };
            let line = self.lines + 1;
            let token = match ch {
                '\'' | '"' => self.string_literal(ch, line)?,
                '<' | '>' => self.one_or_two(ch, |c| c == '=', K::Comparator, K::Comparator, line)?,
                '=' => self.one_or_two(
                    ch,
                    |c| c == '=',
                    K::Comparator,
                    K::AssignmentOperator,
                    line,
                )?,
                '!' => {
                    self.one_or_two(ch, |c| c == '=', K::Comparator, K::LogicalOperator, line)?
                }
                '&' | '|' | '^' => self.one_or_two(
                    ch,
                    |c| c == ch,
                    K::LogicalOperator,
                    K::BitwiseOperator,
                    line,
                )?,
                '+' | '-' => self.one_or_two(
                    ch,
                    |c| c == ch || c == '=',
                    K::AssignmentOperator,
                    K::ArithmeticOperator,
                    line,
                )?,
                '*' => match self.match_next(ch, |c| c == '*' || c == '=')? {
                    Some('*') => Token::new(K::ArithmeticOperator, "**", line),
                    Some(_) => Token::new(K::AssignmentOperator, "*=", line),
                    None => Token::new(K::ArithmeticOperator, "*", line),
                },
                '%' | '/' => self.one_or_two(
                    ch,
                    |c| c == '=',
                    K::AssignmentOperator,
                    K::ArithmeticOperator,
                    line,
                )?,
                '\n' => {
                    self.lines += 1;
                    Token::new(K::InstructionEnd, "\n", line)
                }
                ';' => Token::new(K::InstructionEnd, ";", line),
                '(' => Token::new(K::BlockStart, "(", line),
                ')' => Token::new(K::BlockEnd, ")", line),
                '#' => {
                    self.skip_comment();
                    continue;
                }
                ' ' | '\t' | '\r' => continue,
                c if c.is_ascii_digit() => {
                    Token::new(K::NumberLit, self.collect_while(c, |c| c.is_ascii_digit()), line)
                }
                c if c.is_alphabetic() => {
                    Token::new(K::Reference, self.collect_while(c, char::is_alphabetic), line)
                }
                other => return Err(LexError::InvalidCharacter(other)),
            };
            return Ok(Some(token));
        }
    }

    /// Drains the input into a token sequence. Nothing is returned on failure.
    pub fn tokenize(mut self, sink: &mut dyn Sink) -> Result<Lexed, LexFailure> {
        let mut tokens = Vec::new();
        loop {
            match self.next_token() {
                Ok(Some(token)) => {
                    sink.emit(&token.to_string());
                    tokens.push(token);
                }
                Ok(None) => break,
                Err(error) => return Err(LexFailure::new(self.lines, error)),
            }
        }
        Ok(Lexed {
            tokens,
            lines: self.lines,
        })
    }
}
