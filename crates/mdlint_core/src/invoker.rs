//! Dispatch of the expanded file list to a lint engine.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::config::LintConfig;
use crate::diagnostic::ResultSet;
use crate::error::LinterError;

/// A linting engine: turns files plus configuration into diagnostics.
///
/// Implementations may lint files in any order or in parallel; the result is
/// keyed by path.
pub trait LintEngine: Send + Sync {
    fn lint(&self, files: &[PathBuf], config: &LintConfig) -> Result<ResultSet, LinterError>;
}

/// Runs `engine` over `files` on the blocking thread pool.
///
/// Engine errors are returned unchanged.
pub async fn lint(
    engine: Arc<dyn LintEngine>,
    files: Vec<PathBuf>,
    config: LintConfig,
) -> Result<ResultSet, LinterError> {
    if files.is_empty() {
        debug!("No files to lint");
        return Ok(ResultSet::new());
    }

    debug!("Linting {} files", files.len());
    tokio::task::spawn_blocking(move || engine.lint(&files, &config))
        .await
        .map_err(|e| LinterError::Internal(format!("Lint engine task failed: {}", e)))?
}
