//! Plain-text report rendering.

use crate::aggregate::{RenderPlan, Summary};
use crate::diagnostic::Diagnostic;

const RULES_URL: &str = "https://github.com/DavidAnson/markdownlint/blob/main/doc/Rules.md";

/// Renders the report: one section per file, then the summary.
///
/// With `verbose`, each diagnostic links to its rule documentation.
pub fn render(plan: &RenderPlan, summary: &Summary, verbose: bool) -> String {
    let mut lines = Vec::new();

    for file in plan {
        lines.push(file.path.display().to_string());
        for diag in &file.diagnostics {
            lines.push(format_diagnostic(diag, verbose));
        }
    }

    lines.push(String::new());
    lines.push("Summary:".to_string());
    lines.push(format!(
        "  {} issue(s) in {} file(s)",
        summary.total_issues, summary.files_with_issues
    ));
    for (alias, count) in &summary.per_rule_counts {
        lines.push(format!("  {}: {}", alias, count));
    }

    let mut output = lines.join("\n");
    output.push('\n');
    output
}

fn format_diagnostic(diag: &Diagnostic, verbose: bool) -> String {
    let mut line = format!("  {}", diag.line_number);

    if let Some(range) = diag.error_range {
        line.push_str(&format!(":{}", range.column));
    }

    line.push_str(&format!(
        " {}/{} {}",
        diag.rule_name, diag.rule_alias, diag.rule_description
    ));

    if let Some(detail) = &diag.error_detail {
        line.push_str(&format!(" [{}]", detail));
    }
    if let Some(context) = &diag.error_context {
        line.push_str(&format!(" \"{}\"", context));
    }
    if verbose {
        line.push_str(&format!(" {}#{}", RULES_URL, diag.rule_name.to_lowercase()));
    }

    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use crate::diagnostic::{ErrorRange, ResultSet};
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    fn sample_results() -> ResultSet {
        let mut results = ResultSet::new();
        results.insert(
            PathBuf::from("/repo/a.md"),
            vec![
                Diagnostic::new(3, "MD009", "no-trailing-spaces", "Trailing spaces")
                    .with_detail("Expected: 0 or 2; Actual: 3")
                    .with_range(ErrorRange::new(9, 3)),
                Diagnostic::new(1, "MD018", "no-missing-space-atx", "No space after hash")
                    .with_context("#Title")
                    .with_range(ErrorRange::new(1, 2)),
            ],
        );
        results.insert(PathBuf::from("/repo/b.md"), Vec::new());
        results
    }

    #[test]
    fn test_render_report() {
        let aggregate = aggregate(&sample_results());
        let output = render(&aggregate.plan, &aggregate.summary, false);

        assert_eq!(
            output,
            "/repo/a.md\n\
             \x20 1:1 MD018/no-missing-space-atx No space after hash \"#Title\"\n\
             \x20 3:9 MD009/no-trailing-spaces Trailing spaces [Expected: 0 or 2; Actual: 3]\n\
             \n\
             Summary:\n\
             \x20 2 issue(s) in 1 file(s)\n\
             \x20 no-missing-space-atx: 1\n\
             \x20 no-trailing-spaces: 1\n"
        );
    }

    #[test]
    fn test_render_verbose_adds_rule_url() {
        let aggregate = aggregate(&sample_results());
        let output = render(&aggregate.plan, &aggregate.summary, true);

        assert!(output.contains(
            "Trailing spaces [Expected: 0 or 2; Actual: 3] \
             https://github.com/DavidAnson/markdownlint/blob/main/doc/Rules.md#md009"
        ));
    }

    #[test]
    fn test_render_without_range() {
        let diag = Diagnostic::new(7, "MD025", "single-h1", "Multiple top-level headings");
        assert_eq!(
            format_diagnostic(&diag, false),
            "  7 MD025/single-h1 Multiple top-level headings"
        );
    }

    #[test]
    fn test_render_empty_plan() {
        let output = render(&RenderPlan::new(), &Summary::default(), false);
        assert_eq!(output, "\nSummary:\n  0 issue(s) in 0 file(s)\n");
    }
}
