//! Built-in rules, named after their markdownlint counterparts.

use serde_json::Value;

use super::document::Document;
use crate::diagnostic::{Diagnostic, ErrorRange};

/// Options for one enabled rule, taken from its config entry.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RuleOptions<'a>(Option<&'a Value>);

impl<'a> RuleOptions<'a> {
    pub fn new(value: Option<&'a Value>) -> Self {
        Self(value)
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.0.and_then(|v| v.get(key))
    }

    pub fn usize(&self, key: &str, default: usize) -> usize {
        self.get(key)
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(default)
    }

    pub fn bool(&self, key: &str, default: bool) -> bool {
        self.get(key).and_then(Value::as_bool).unwrap_or(default)
    }
}

pub(crate) trait Rule: Send + Sync {
    /// Canonical name, e.g. `MD009`.
    fn name(&self) -> &'static str;

    fn alias(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn check(&self, doc: &Document, options: RuleOptions) -> Vec<Diagnostic>;

    fn diagnostic(&self, line: usize) -> Diagnostic {
        Diagnostic::new(line, self.name(), self.alias(), self.description())
    }
}

/// Every built-in rule, in report order.
pub(crate) fn all() -> Vec<Box<dyn Rule>> {
    vec![
        Box::new(HeadingIncrement),
        Box::new(NoTrailingSpaces),
        Box::new(NoHardTabs),
        Box::new(NoMultipleBlanks),
        Box::new(LineLength),
        Box::new(NoMissingSpaceAtx),
        Box::new(SingleH1),
        Box::new(SingleTrailingNewline),
    ]
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

pub(crate) struct HeadingIncrement;

impl Rule for HeadingIncrement {
    fn name(&self) -> &'static str {
        "MD001"
    }

    fn alias(&self) -> &'static str {
        "heading-increment"
    }

    fn description(&self) -> &'static str {
        "Heading levels should only increment by one level at a time"
    }

    fn check(&self, doc: &Document, _options: RuleOptions) -> Vec<Diagnostic> {
        let mut found = Vec::new();
        let mut previous: Option<u8> = None;

        for heading in &doc.headings {
            if let Some(prev) = previous
                && heading.depth > prev + 1
            {
                found.push(self.diagnostic(heading.line).with_detail(format!(
                    "Expected: h{}; Actual: h{}",
                    prev + 1,
                    heading.depth
                )));
            }
            previous = Some(heading.depth);
        }

        found
    }
}

pub(crate) struct NoTrailingSpaces;

impl Rule for NoTrailingSpaces {
    fn name(&self) -> &'static str {
        "MD009"
    }

    fn alias(&self) -> &'static str {
        "no-trailing-spaces"
    }

    fn description(&self) -> &'static str {
        "Trailing spaces"
    }

    fn check(&self, doc: &Document, options: RuleOptions) -> Vec<Diagnostic> {
        let br_spaces = options.usize("br_spaces", 2);
        let expected = if br_spaces >= 2 {
            format!("0 or {}", br_spaces)
        } else {
            "0".to_string()
        };

        doc.numbered_lines()
            .filter_map(|(number, line)| {
                let content = line.trim_end_matches(' ');
                let trailing = line.len() - content.len();
                if trailing == 0 {
                    return None;
                }

                // Exactly `br_spaces` after text is a hard line break.
                let is_line_break =
                    br_spaces >= 2 && trailing == br_spaces && !content.trim().is_empty();
                if is_line_break {
                    return None;
                }

                Some(
                    self.diagnostic(number)
                        .with_detail(format!("Expected: {}; Actual: {}", expected, trailing))
                        .with_range(ErrorRange::new(char_len(content) + 1, trailing)),
                )
            })
            .collect()
    }
}

pub(crate) struct NoHardTabs;

impl Rule for NoHardTabs {
    fn name(&self) -> &'static str {
        "MD010"
    }

    fn alias(&self) -> &'static str {
        "no-hard-tabs"
    }

    fn description(&self) -> &'static str {
        "Hard tabs"
    }

    fn check(&self, doc: &Document, options: RuleOptions) -> Vec<Diagnostic> {
        let code_blocks = options.bool("code_blocks", true);

        doc.numbered_lines()
            .filter(|(number, _)| code_blocks || !doc.in_code_block(*number))
            .filter_map(|(number, line)| {
                let index = line.find('\t')?;
                let column = char_len(&line[..index]) + 1;
                let tabs = line[index..].chars().take_while(|c| *c == '\t').count();
                Some(
                    self.diagnostic(number)
                        .with_detail(format!("Column: {}", column))
                        .with_range(ErrorRange::new(column, tabs)),
                )
            })
            .collect()
    }
}

pub(crate) struct NoMultipleBlanks;

impl Rule for NoMultipleBlanks {
    fn name(&self) -> &'static str {
        "MD012"
    }

    fn alias(&self) -> &'static str {
        "no-multiple-blanks"
    }

    fn description(&self) -> &'static str {
        "Multiple consecutive blank lines"
    }

    fn check(&self, doc: &Document, options: RuleOptions) -> Vec<Diagnostic> {
        let maximum = options.usize("maximum", 1);
        let mut found = Vec::new();
        let mut blanks = 0;

        for (number, line) in doc.numbered_lines() {
            if !line.trim().is_empty() || doc.in_code_block(number) {
                blanks = 0;
                continue;
            }

            blanks += 1;
            if blanks > maximum {
                found.push(
                    self.diagnostic(number)
                        .with_detail(format!("Expected: {}; Actual: {}", maximum, blanks)),
                );
            }
        }

        found
    }
}

pub(crate) struct LineLength;

impl Rule for LineLength {
    fn name(&self) -> &'static str {
        "MD013"
    }

    fn alias(&self) -> &'static str {
        "line-length"
    }

    fn description(&self) -> &'static str {
        "Line length"
    }

    fn check(&self, doc: &Document, options: RuleOptions) -> Vec<Diagnostic> {
        let limit = options.usize("line_length", 80);
        let code_blocks = options.bool("code_blocks", true);

        doc.numbered_lines()
            .filter(|(number, _)| code_blocks || !doc.in_code_block(*number))
            .filter_map(|(number, line)| {
                let length = char_len(line);
                // Overlong lines without a break opportunity past the limit
                // (long URLs and the like) are tolerated.
                if length <= limit || !line.chars().skip(limit).any(char::is_whitespace) {
                    return None;
                }
                Some(
                    self.diagnostic(number)
                        .with_detail(format!("Expected: {}; Actual: {}", limit, length))
                        .with_range(ErrorRange::new(limit + 1, length - limit)),
                )
            })
            .collect()
    }
}

pub(crate) struct NoMissingSpaceAtx;

impl Rule for NoMissingSpaceAtx {
    fn name(&self) -> &'static str {
        "MD018"
    }

    fn alias(&self) -> &'static str {
        "no-missing-space-atx"
    }

    fn description(&self) -> &'static str {
        "No space after hash on atx style heading"
    }

    fn check(&self, doc: &Document, _options: RuleOptions) -> Vec<Diagnostic> {
        doc.numbered_lines()
            .filter(|(number, _)| !doc.in_code_block(*number))
            .filter_map(|(number, line)| {
                let hashes = line.chars().take_while(|c| *c == '#').count();
                let next = line[hashes..].chars().next()?;
                // Closed headings like `#Title#` belong to another rule.
                if hashes == 0 || next == ' ' || next == '\t' || line.trim_end().ends_with('#') {
                    return None;
                }
                Some(
                    self.diagnostic(number)
                        .with_context(line.trim_end())
                        .with_range(ErrorRange::new(1, hashes + 1)),
                )
            })
            .collect()
    }
}

pub(crate) struct SingleH1;

impl Rule for SingleH1 {
    fn name(&self) -> &'static str {
        "MD025"
    }

    fn alias(&self) -> &'static str {
        "single-h1"
    }

    fn description(&self) -> &'static str {
        "Multiple top-level headings in the same document"
    }

    fn check(&self, doc: &Document, options: RuleOptions) -> Vec<Diagnostic> {
        let level = options.usize("level", 1);
        let is_top = |depth: u8| usize::from(depth) == level;

        match doc.headings.first() {
            Some(first) if is_top(first.depth) => doc.headings[1..]
                .iter()
                .filter(|heading| is_top(heading.depth))
                .map(|heading| {
                    let mut diag = self.diagnostic(heading.line);
                    if let Some(line) = doc.lines.get(heading.line - 1) {
                        diag = diag.with_context(line.trim());
                    }
                    diag
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}

pub(crate) struct SingleTrailingNewline;

impl Rule for SingleTrailingNewline {
    fn name(&self) -> &'static str {
        "MD047"
    }

    fn alias(&self) -> &'static str {
        "single-trailing-newline"
    }

    fn description(&self) -> &'static str {
        "Files should end with a single newline character"
    }

    fn check(&self, doc: &Document, _options: RuleOptions) -> Vec<Diagnostic> {
        if doc.text.is_empty() || doc.text.ends_with('\n') {
            return Vec::new();
        }

        let number = doc.lines.len().max(1);
        let length = doc.lines.last().map_or(0, |line| char_len(line));
        let mut diag = self.diagnostic(number);
        if length > 0 {
            diag = diag.with_range(ErrorRange::new(length, 1));
        }
        vec![diag]
    }
}
