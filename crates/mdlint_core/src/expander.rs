//! Expansion of path arguments into the list of files to lint.

use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use walkdir::{DirEntry, WalkDir};

use crate::error::LinterError;

/// File extensions treated as Markdown. Matched case-sensitively.
pub const KNOWN_EXTENSIONS: &[&str] = &["markdown", "mdown", "mkdn", "mkd", "md"];

/// Returns true if the final path segment carries a known Markdown extension.
pub fn has_known_extension(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| KNOWN_EXTENSIONS.contains(&ext))
}

/// Turns file and directory arguments into a flat, deduplicated file list.
#[derive(Debug, Clone, Default)]
pub struct PathExpander {
    ignore: Option<Arc<GlobSet>>,
}

impl PathExpander {
    /// Creates an expander pruning directories that match `ignore_patterns`.
    ///
    /// Patterns are relative to each directory argument. Invalid patterns are
    /// skipped with a warning.
    pub fn new(ignore_patterns: &[String]) -> Self {
        Self {
            ignore: Self::build_ignore_set(ignore_patterns).map(Arc::new),
        }
    }

    fn build_ignore_set(patterns: &[String]) -> Option<GlobSet> {
        let mut builder = GlobSetBuilder::new();
        let mut added = 0;

        for pattern in patterns {
            let pattern = pattern.trim_start_matches("./").trim_matches('/');
            if pattern.is_empty() {
                continue;
            }

            // `dir` prunes the directory itself, `dir/**` everything below it.
            match (Self::glob(pattern), Self::glob(&format!("{}/**", pattern))) {
                (Ok(itself), Ok(beneath)) => {
                    builder.add(itself);
                    builder.add(beneath);
                    added += 1;
                }
                (Err(e), _) | (_, Err(e)) => {
                    warn!("Skipping invalid ignore pattern '{}': {}", pattern, e);
                }
            }
        }

        if added == 0 {
            return None;
        }

        match builder.build() {
            Ok(set) => Some(set),
            Err(e) => {
                warn!("Failed to build ignore set, ignoring nothing: {}", e);
                None
            }
        }
    }

    fn glob(pattern: &str) -> Result<Glob, globset::Error> {
        GlobBuilder::new(pattern).literal_separator(true).build()
    }

    /// Expands `paths` (resolved against `base_dir`) into Markdown files.
    ///
    /// Arguments are inspected concurrently but the result keeps argument
    /// order. If any argument cannot be resolved the whole expansion fails,
    /// reporting the earliest such argument.
    pub async fn expand(
        &self,
        paths: &[String],
        base_dir: &Path,
    ) -> Result<Vec<PathBuf>, LinterError> {
        let mut tasks = JoinSet::new();
        for (index, arg) in paths.iter().enumerate() {
            let arg = arg.clone();
            let resolved = normalize(&base_dir.join(&arg));
            let ignore = self.ignore.clone();
            tasks.spawn(async move { (index, candidates(&arg, resolved, ignore).await) });
        }

        let mut per_argument: Vec<Option<Result<Vec<PathBuf>, LinterError>>> =
            (0..paths.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            let (index, found) = joined
                .map_err(|e| LinterError::Internal(format!("Path expansion task failed: {}", e)))?;
            per_argument[index] = Some(found);
        }

        let mut found_paths = Vec::new();
        for found in per_argument.into_iter().flatten() {
            found_paths.extend(found?);
        }

        let mut seen = HashSet::new();
        let files: Vec<PathBuf> = found_paths
            .into_iter()
            .filter(|path| has_known_extension(path))
            .filter(|path| seen.insert(path.clone()))
            .collect();

        info!("Discovered {} files to lint", files.len());
        Ok(files)
    }
}

/// Lexically resolves `.` and `..` so every spelling of a path expands to
/// the same entries. `..` at the root stays at the root.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

async fn candidates(
    arg: &str,
    path: PathBuf,
    ignore: Option<Arc<GlobSet>>,
) -> Result<Vec<PathBuf>, LinterError> {
    let metadata = tokio::fs::metadata(&path)
        .await
        .map_err(|e| LinterError::path_resolution(arg, e))?;

    if !metadata.is_dir() {
        return Ok(vec![path]);
    }

    let arg = arg.to_string();
    tokio::task::spawn_blocking(move || walk_directory(&arg, &path, ignore.as_deref()))
        .await
        .map_err(|e| LinterError::Internal(format!("Directory walk task failed: {}", e)))?
}

fn walk_directory(
    arg: &str,
    root: &Path,
    ignore: Option<&GlobSet>,
) -> Result<Vec<PathBuf>, LinterError> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| !is_pruned(entry, root, ignore));

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|source| LinterError::Walk {
            path: arg.to_string(),
            source,
        })?;

        if is_file_like(&entry) {
            files.push(entry.into_path());
        }
    }

    debug!("{}: {} candidate files", root.display(), files.len());
    Ok(files)
}

fn is_pruned(entry: &DirEntry, root: &Path, ignore: Option<&GlobSet>) -> bool {
    if entry.depth() == 0 {
        return false;
    }

    // Hidden entries are never expanded from a directory.
    if entry.file_name().to_string_lossy().starts_with('.') {
        return true;
    }

    ignore.is_some_and(|set| {
        entry
            .path()
            .strip_prefix(root)
            .is_ok_and(|relative| set.is_match(relative))
    })
}

/// Directories never become candidates, even when named like `notes.md`.
fn is_file_like(entry: &DirEntry) -> bool {
    let file_type = entry.file_type();
    file_type.is_file() || (file_type.is_symlink() && entry.path().is_file())
}
