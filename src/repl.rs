use rustyline::{DefaultEditor, error::ReadlineError};

use crate::{
    diagnostics::{Result, VislangError},
    runtime::{Interpreter, RunConfig},
    sink::Stderr,
    stdlib,
};

pub struct Repl {
    interpreter: Interpreter<Stderr>,
}

impl Repl {
    pub fn new() -> Self {
        Self::with_config(RunConfig::default())
    }

    pub fn with_config(config: RunConfig) -> Self {
        Self {
            interpreter: Interpreter::with_config(Stderr, config),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let mut editor = DefaultEditor::new().map_err(readline_error)?;
        loop {
            match editor.readline(">> ") {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed == ":quit" || trimmed == ":exit" {
                        break;
                    }
                    if trimmed.is_empty() {
                        continue;
                    }
                    editor.add_history_entry(trimmed).ok();
                    if trimmed == ":builtins" {
                        for name in stdlib::names() {
                            println!("{name}");
                        }
                        continue;
                    }
                    match self.interpreter.eval_source(trimmed) {
                        Ok(value) => {
                            if !value.is_empty() {
                                println!("{value}");
                            }
                        }
                        Err(err) => eprintln!("{err}"),
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(readline_error(err)),
            }
        }
        Ok(())
    }
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

fn readline_error(err: ReadlineError) -> VislangError {
    VislangError::from(std::io::Error::other(err))
}
