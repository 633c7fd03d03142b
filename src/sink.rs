//! Line-oriented diagnostic output shared by the lexer and the evaluator.

/// Write-only destination for token traces and `log` output.
pub trait Sink {
    fn emit(&mut self, line: &str);
}

/// Writes every line to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stderr;

impl Sink for Stderr {
    fn emit(&mut self, line: &str) {
        eprintln!("{line}");
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl Sink for Discard {
    fn emit(&mut self, _line: &str) {}
}

impl Sink for Vec<String> {
    fn emit(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

impl<S: Sink + ?Sized> Sink for &mut S {
    fn emit(&mut self, line: &str) {
        (**self).emit(line);
    }
}
