//! # Monkey
//!
//! This binary is the interactive read-eval-print loop for Monkey.
mod cli;
mod error;

use cli::Cli;
use error::{MonkeyCliError, Result};

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use std::io;

fn main() -> Result<()> {
    let args = Cli::init();

    init_logging(args.debug)?;

    info!("starting monkey repl (debug trace: {})", args.debug);

    let stdin = io::stdin();
    let stdout = io::stdout();
    monkey_lang::repl::start(stdin.lock(), stdout.lock(), args.debug)?;
    Ok(())
}

fn init_logging(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .map_err(|e| MonkeyCliError::Logging(e.to_string()))?;

    Ok(())
}
