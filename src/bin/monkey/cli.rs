//! CLI argument parsing for the Monkey REPL binary.

use clap::Parser as ClapParser;

/// Struct containing the CLI configuration for the Monkey REPL.
#[derive(ClapParser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Enable the parser's enter/exit trace (depth-indented, diagnostic
    /// only — not part of observable language semantics).
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    pub fn init() -> Self {
        Cli::parse()
    }
}
