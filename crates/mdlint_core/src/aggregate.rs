//! Sorting and summary statistics over lint results.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::diagnostic::{Diagnostic, ResultSet};

/// Diagnostics of one file, ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    /// Sorted by line; equal lines keep engine order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Files with at least one diagnostic, in result-set order.
pub type RenderPlan = Vec<FileReport>;

/// Aggregate counts over a result set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub total_issues: usize,
    pub files_with_issues: usize,
    /// Issue count per rule alias.
    pub per_rule_counts: BTreeMap<String, usize>,
}

impl Summary {
    fn record(mut self, diagnostics: &[Diagnostic]) -> Self {
        if diagnostics.is_empty() {
            return self;
        }

        self.files_with_issues += 1;
        for diag in diagnostics {
            self.total_issues += 1;
            *self
                .per_rule_counts
                .entry(diag.rule_alias.clone())
                .or_default() += 1;
        }
        self
    }
}

/// Output of [`aggregate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregate {
    pub plan: RenderPlan,
    pub summary: Summary,
    /// `1` when any issue was found, `0` otherwise.
    pub exit_code: u8,
}

/// Builds the render plan, summary and exit code for `results`.
///
/// `results` is left untouched; sorting happens on copies.
pub fn aggregate(results: &ResultSet) -> Aggregate {
    let plan: RenderPlan = results
        .iter()
        .filter(|(_, diagnostics)| !diagnostics.is_empty())
        .map(|(path, diagnostics)| {
            let mut diagnostics = diagnostics.clone();
            diagnostics.sort_by_key(|diag| diag.line_number);
            FileReport {
                path: path.clone(),
                diagnostics,
            }
        })
        .collect();

    let summary = plan
        .iter()
        .fold(Summary::default(), |summary, file| {
            summary.record(&file.diagnostics)
        });

    let exit_code = u8::from(summary.total_issues > 0);

    Aggregate {
        plan,
        summary,
        exit_code,
    }
}
