//! yaylex - prints the token stream of a source file.
//!
//! Scans the file given on the command line until end of input and writes
//! each token either as its canonical source text or as a debug record.

use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use yaylex::{
    errors::errors::Error,
    lexer::{lexer::Lexer, tokens::TokenKind},
    render_error, Position,
};

#[derive(Parser, Debug)]
#[command(name = "yaylex")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Print the token stream of a source file", long_about = None)]
struct Cli {
    /// Source file to scan
    file: PathBuf,

    /// How each token is printed
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Report every invalid token and exit with a failure status if any were found
    #[arg(long)]
    strict: bool,

    /// Enable verbose output
    #[arg(short, long, env = "YAYLEX_VERBOSE")]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Canonical source text of each token, concatenated
    Text,
    /// One `{ Kind, line, column, "text" }` record per token
    Debug,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose)?;

    let mut lexer = Lexer::open(&cli.file)?;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut invalid = 0usize;

    loop {
        let token = lexer.get_token()?;

        if token.kind == TokenKind::EOF {
            if cli.format == Format::Debug {
                writeln!(out, "{}", token.debug_string())?;
            }
            break;
        }

        match cli.format {
            Format::Text => write!(out, "{}", token)?,
            Format::Debug => writeln!(out, "{}", token.debug_string())?,
        }

        if token.kind == TokenKind::Invalid {
            invalid += 1;
            if cli.strict {
                let position = Position {
                    line: token.line,
                    column: token.column,
                    ..lexer.current_position()
                };
                let error = Error::unrecognised(&token, position);
                eprint!("{}", render_error(&error, &lexer.line_text()));
            }
        }
    }

    if cli.format == Format::Text {
        writeln!(out)?;
    }
    out.flush()?;

    debug!(file = %lexer.file_name(), invalid, "finished scanning");

    if cli.strict && invalid > 0 {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr so they never interleave with the token stream.
fn init_logging(verbose: bool) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    let subscriber = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .try_init()
        .context("failed to initialize logging")?;

    Ok(())
}
