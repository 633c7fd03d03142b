use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};

use vislang::{
    Interpreter, Repl, RunConfig, VislangError,
    sink::{Discard, Stderr},
};

#[derive(Parser)]
#[command(author, version, about = "vislang language interpreter")]
struct Args {
    /// Do not trace each token to stderr while lexing
    #[arg(long, global = true)]
    no_trace: bool,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run a script file, or standard input when omitted or `-`
    Run { script: Option<PathBuf> },
    /// Evaluate a snippet of vislang code
    Eval { source: String },
    /// Print the tokens of a script without evaluating it
    Tokens { script: Option<PathBuf> },
    /// Start an interactive REPL session
    Repl,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let config = RunConfig {
        trace_tokens: !args.no_trace,
    };
    let command = args.command.unwrap_or(Command::Run { script: None });
    match execute(command, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command, config: RunConfig) -> Result<(), VislangError> {
    match command {
        Command::Run { script } => {
            let input = open(script.as_deref())?;
            Interpreter::with_config(Stderr, config).eval_reader(input)?;
        }
        Command::Eval { source } => {
            Interpreter::with_config(Stderr, config).eval_source(&source)?;
        }
        Command::Tokens { script } => {
            let input = open(script.as_deref())?;
            let lexed = vislang::lex(input, &mut Discard)?;
            for token in &lexed.tokens {
                println!("{token}");
            }
        }
        Command::Repl => Repl::with_config(config).run()?,
    }
    Ok(())
}

fn open(script: Option<&Path>) -> io::Result<Box<dyn Read>> {
    match script {
        None => Ok(Box::new(io::stdin().lock())),
        Some(path) if path == Path::new("-") => Ok(Box::new(io::stdin().lock())),
        Some(path) => {
            let file = File::open(path).map_err(|err| {
                io::Error::new(err.kind(), format!("{}: {err}", path.display()))
            })?;
            Ok(Box::new(file))
        }
    }
}
