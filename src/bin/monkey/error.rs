//! Error type for the Monkey CLI binary.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MonkeyCliError {
    #[error("failed to initialize logging: {0}")]
    Logging(String),

    #[error("repl error: {0}")]
    Repl(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MonkeyCliError>;
