//! Lint command implementation

use std::sync::Arc;

use miette::{IntoDiagnostic, Result};
use mdlint_core::{BuiltinEngine, Linter, RunOutcome};
use tracing::debug;

use crate::cli::Cli;

/// Runs the lint pipeline for `cli` on a fresh runtime.
///
/// Returns the report and exit code without printing anything.
pub fn run_lint(cli: &Cli) -> Result<RunOutcome> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()?;

    runtime.block_on(async {
        let linter =
            Linter::from_files(Arc::new(BuiltinEngine::new()), &cli.config, &cli.ignore).await;
        debug!("Linting {} path argument(s)", cli.paths.len());
        linter.run(&cli.paths, cli.verbose).await.into_diagnostic()
    })
}
