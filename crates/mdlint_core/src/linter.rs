//! The lint pipeline: configuration, expansion, linting, aggregation and
//! reporting.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::aggregate::{Aggregate, aggregate};
use crate::config::{LintConfig, resolve_config, resolve_ignore};
use crate::diagnostic::ResultSet;
use crate::error::LinterError;
use crate::expander::PathExpander;
use crate::invoker::{self, LintEngine};
use crate::reporter::render;

/// Report text and exit code of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub output: String,
    pub exit_code: u8,
}

/// Runs a lint engine over path arguments.
pub struct Linter {
    engine: Arc<dyn LintEngine>,
    config: LintConfig,
    expander: PathExpander,
    base_dir: Option<PathBuf>,
}

impl Linter {
    /// Creates a linter with an already loaded configuration.
    pub fn new(engine: Arc<dyn LintEngine>, config: LintConfig, ignore: &[String]) -> Self {
        Self {
            engine,
            config,
            expander: PathExpander::new(ignore),
            base_dir: None,
        }
    }

    /// Creates a linter from a config file and an ignore file.
    ///
    /// Missing or broken files fall back to defaults.
    pub async fn from_files(
        engine: Arc<dyn LintEngine>,
        config_path: impl AsRef<Path>,
        ignore_path: impl AsRef<Path>,
    ) -> Self {
        let (config, ignore) = tokio::join!(
            resolve_config(config_path.as_ref()),
            resolve_ignore(ignore_path.as_ref())
        );
        debug!("Loaded {} ignore patterns", ignore.len());
        Self::new(engine, config, &ignore)
    }

    /// Resolves relative path arguments against `dir` instead of the
    /// current directory.
    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    fn base_dir(&self) -> Result<PathBuf, LinterError> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().map_err(|e| LinterError::path_resolution(".", e)),
        }
    }

    /// Expands `paths` and lints the resulting files.
    pub async fn lint_paths(&self, paths: &[String]) -> Result<ResultSet, LinterError> {
        let base_dir = self.base_dir()?;
        let files = self.expander.expand(paths, &base_dir).await?;
        invoker::lint(Arc::clone(&self.engine), files, self.config.clone()).await
    }

    /// Runs the whole pipeline and renders the report.
    ///
    /// Nothing is printed here; on error no report is produced at all.
    pub async fn run(&self, paths: &[String], verbose: bool) -> Result<RunOutcome, LinterError> {
        let results = self.lint_paths(paths).await?;
        let Aggregate {
            plan,
            summary,
            exit_code,
        } = aggregate(&results);

        debug!(
            "{} issues in {} of {} files",
            summary.total_issues,
            summary.files_with_issues,
            results.len()
        );

        Ok(RunOutcome {
            output: render(&plan, &summary, verbose),
            exit_code,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BuiltinEngine;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    /// Built-in engine that remembers which files it was asked to lint.
    #[derive(Default)]
    struct RecordingEngine {
        inner: BuiltinEngine,
        seen: Mutex<Vec<PathBuf>>,
    }

    impl LintEngine for RecordingEngine {
        fn lint(&self, files: &[PathBuf], config: &LintConfig) -> Result<ResultSet, LinterError> {
            self.seen.lock().unwrap().extend_from_slice(files);
            self.inner.lint(files, config)
        }
    }

    fn linter(engine: Arc<dyn LintEngine>, base: &Path) -> Linter {
        Linter::new(engine, LintConfig::default(), &[]).with_base_dir(base)
    }

    #[tokio::test]
    async fn test_run_without_paths() {
        let temp_dir = tempdir().unwrap();
        let linter = linter(Arc::new(BuiltinEngine::new()), temp_dir.path());

        assert!(linter.lint_paths(&[]).await.unwrap().is_empty());

        let outcome = linter.run(&[], false).await.unwrap();
        assert_eq!(outcome.exit_code, 0);
        assert!(outcome.output.contains("0 issue(s) in 0 file(s)"));
    }

    #[tokio::test]
    async fn test_run_clean_readme() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join("README.md"), "# Readme\n\nAll good.\n").unwrap();
        let linter = linter(Arc::new(BuiltinEngine::new()), temp_dir.path());

        let results = linter.lint_paths(&["README.md".to_string()]).await.unwrap();
        assert_eq!(results.len(), 1);

        let outcome = linter.run(&["README.md".to_string()], false).await.unwrap();
        assert_eq!(outcome.exit_code, 0);
        assert!(!outcome.output.contains("README.md"));
    }

    #[tokio::test]
    async fn test_run_directory_with_mixed_files() {
        let temp_dir = tempdir().unwrap();
        fs::write(
            temp_dir.path().join("a.md"),
            "# Title\n\ntrailing   \ntab\there\n",
        )
        .unwrap();
        fs::write(temp_dir.path().join("b.txt"), "tab\there   \n").unwrap();

        let engine = Arc::new(RecordingEngine::default());
        let linter = linter(engine.clone(), temp_dir.path());

        let outcome = linter.run(&[".".to_string()], false).await.unwrap();

        assert_eq!(
            *engine.seen.lock().unwrap(),
            vec![temp_dir.path().join("a.md")]
        );
        assert_eq!(outcome.exit_code, 1);
        assert!(outcome.output.contains("2 issue(s) in 1 file(s)"));
        assert_eq!(outcome.output.matches("a.md").count(), 1);
    }

    #[tokio::test]
    async fn test_run_missing_path_fails() {
        let temp_dir = tempdir().unwrap();
        let linter = linter(Arc::new(BuiltinEngine::new()), temp_dir.path());

        let result = linter.run(&["nope.md".to_string()], false).await;
        assert!(matches!(result, Err(LinterError::PathResolution { .. })));
    }

    #[tokio::test]
    async fn test_from_files_uses_config_and_ignore() {
        let temp_dir = tempdir().unwrap();
        let root = temp_dir.path();
        fs::write(root.join(".mdlintrc"), r#"{ "no-trailing-spaces": false }"#).unwrap();
        fs::write(root.join(".mdlintignore"), "drafts\n").unwrap();
        fs::write(root.join("a.md"), "# Title\n\ntrailing   \n").unwrap();
        fs::create_dir(root.join("drafts")).unwrap();
        fs::write(root.join("drafts/wip.md"), "#broken\n").unwrap();

        let linter = Linter::from_files(
            Arc::new(BuiltinEngine::new()),
            root.join(".mdlintrc"),
            root.join(".mdlintignore"),
        )
        .await
        .with_base_dir(root);

        let outcome = linter.run(&[".".to_string()], false).await.unwrap();
        assert_eq!(outcome.exit_code, 0);
    }
}
