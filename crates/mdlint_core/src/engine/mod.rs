//! Built-in lint engine.
//!
//! A small markdownlint-compatible rule set so the driver works without an
//! external engine. Rules are configured with markdownlint-style keys:
//!
//! ```json
//! {
//!   "default": true,
//!   "MD013": { "line_length": 100 },
//!   "no-hard-tabs": false
//! }
//! ```

mod document;
mod rules;

use std::path::PathBuf;

use rayon::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::config::LintConfig;
use crate::diagnostic::{Diagnostic, ResultSet};
use crate::error::LinterError;
use crate::invoker::LintEngine;

use document::Document;
use rules::{Rule, RuleOptions};

/// Lints files in parallel with the built-in rules.
pub struct BuiltinEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl BuiltinEngine {
    pub fn new() -> Self {
        Self { rules: rules::all() }
    }

    /// Lints a single document.
    ///
    /// Diagnostics are grouped by rule, not sorted by line.
    pub fn lint_content(
        &self,
        content: &str,
        config: &LintConfig,
    ) -> Result<Vec<Diagnostic>, LinterError> {
        let doc = Document::parse(content)?;

        Ok(self
            .rules
            .iter()
            .filter_map(|rule| rule_options(config.as_value(), rule.as_ref()).map(|o| (rule, o)))
            .flat_map(|(rule, options)| rule.check(&doc, options))
            .collect())
    }
}

impl Default for BuiltinEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LintEngine for BuiltinEngine {
    fn lint(&self, files: &[PathBuf], config: &LintConfig) -> Result<ResultSet, LinterError> {
        files
            .par_iter()
            .map(|path| {
                let bytes = std::fs::read(path).map_err(|e| {
                    LinterError::file(format!("Failed to read {}: {}", path.display(), e))
                })?;
                // Invalid UTF-8 is replaced rather than rejected.
                let content = String::from_utf8_lossy(&bytes);
                let diagnostics = self.lint_content(&content, config)?;
                debug!("{}: {} issues", path.display(), diagnostics.len());
                Ok((path.clone(), diagnostics))
            })
            .collect()
    }
}

/// Resolves whether `rule` is enabled and with which options.
///
/// Keys match the rule name or alias, ignoring case. `false` disables,
/// `true` or an options object enables; anything else defers to `default`.
fn rule_options<'a>(config: &'a Value, rule: &dyn Rule) -> Option<RuleOptions<'a>> {
    let default_enabled = config
        .get("default")
        .and_then(Value::as_bool)
        .unwrap_or(true);

    let setting = config.as_object().and_then(|map| {
        map.iter()
            .find(|(key, _)| {
                key.eq_ignore_ascii_case(rule.name()) || key.eq_ignore_ascii_case(rule.alias())
            })
            .map(|(_, value)| value)
    });

    match setting {
        Some(Value::Bool(false)) => None,
        Some(Value::Bool(true)) => Some(RuleOptions::default()),
        Some(value @ Value::Object(_)) => Some(RuleOptions::new(Some(value))),
        _ => default_enabled.then(RuleOptions::default),
    }
}
