//! mdlint CLI
//!
//! Lints Markdown files and directories and exits non-zero when issues are
//! found.

mod cli;
mod commands;

use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::error;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use commands::lint::run_lint;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.paths.is_empty() {
        println!("{}", Cli::command().render_help());
        return ExitCode::SUCCESS;
    }

    match run_lint(&cli) {
        Ok(outcome) => {
            print!("{}", outcome.output);
            ExitCode::from(outcome.exit_code)
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(1)
        }
    }
}
