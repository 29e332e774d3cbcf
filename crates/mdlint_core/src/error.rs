//! Linter error types.

use thiserror::Error;

/// Errors that abort a lint run.
///
/// Configuration and ignore-file problems never show up here: they are
/// recovered where they happen and fall back to defaults.
#[derive(Debug, Error)]
pub enum LinterError {
    /// A path argument could not be resolved on the filesystem.
    #[error("Cannot resolve path '{path}': {source}")]
    PathResolution {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Directory enumeration failed.
    #[error("Failed to walk '{path}': {source}")]
    Walk {
        path: String,
        #[source]
        source: walkdir::Error,
    },

    /// File I/O error.
    #[error("File error: {0}")]
    File(String),

    /// The lint engine failed.
    #[error("Lint engine error: {0}")]
    Engine(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LinterError {
    /// Creates a path resolution error for the given argument.
    pub fn path_resolution(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::PathResolution {
            path: path.into(),
            source,
        }
    }

    /// Creates a file error.
    pub fn file(message: impl Into<String>) -> Self {
        Self::File(message.into())
    }

    /// Creates a lint engine error.
    pub fn engine(message: impl Into<String>) -> Self {
        Self::Engine(message.into())
    }
}
