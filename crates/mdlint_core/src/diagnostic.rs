//! Diagnostic types for lint results.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Diagnostics per file, keyed by absolute path.
///
/// Keying by path collapses duplicate file entries and gives a canonical
/// iteration order independent of the order the engine finished files in.
pub type ResultSet = BTreeMap<PathBuf, Vec<Diagnostic>>;

/// Column range of a diagnostic within its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorRange {
    /// 1-based start column (inclusive).
    pub column: usize,
    /// Number of columns covered.
    pub length: usize,
}

impl ErrorRange {
    pub fn new(column: usize, length: usize) -> Self {
        Self { column, length }
    }
}

/// One issue reported by the lint engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// 1-based line number.
    pub line_number: usize,

    /// Canonical rule name, e.g. `MD009`.
    pub rule_name: String,

    /// Human-friendly rule alias, e.g. `no-trailing-spaces`.
    pub rule_alias: String,

    /// What the rule checks.
    pub rule_description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_detail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_context: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_range: Option<ErrorRange>,
}

impl Diagnostic {
    /// Creates a new diagnostic.
    pub fn new(
        line_number: usize,
        rule_name: impl Into<String>,
        rule_alias: impl Into<String>,
        rule_description: impl Into<String>,
    ) -> Self {
        Self {
            line_number,
            rule_name: rule_name.into(),
            rule_alias: rule_alias.into(),
            rule_description: rule_description.into(),
            error_detail: None,
            error_context: None,
            error_range: None,
        }
    }

    /// Sets the error detail.
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.error_detail = Some(detail.into());
        self
    }

    /// Sets the context snippet.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.error_context = Some(context.into());
        self
    }

    /// Sets the column range.
    pub fn with_range(mut self, range: ErrorRange) -> Self {
        self.error_range = Some(range);
        self
    }
}
