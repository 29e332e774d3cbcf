//! Rule configuration and ignore-file loading.
//!
//! Both loaders are infallible: a missing or broken file is logged and
//! replaced by a default, so configuration problems never abort a run.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Rule configuration handed to the lint engine.
///
/// The pipeline never looks inside; only the engine interprets the rule
/// settings it contains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LintConfig(Value);

impl LintConfig {
    /// Wraps a raw configuration value.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parses a JSON (with comments) configuration document.
    ///
    /// Returns `None` for invalid input or a top level that is not an object.
    pub fn from_jsonc(content: &str) -> Option<Self> {
        let parse_options = jsonc_parser::ParseOptions::default();
        match jsonc_parser::parse_to_serde_value(content, &parse_options) {
            Ok(Some(value @ Value::Object(_))) => Some(Self(value)),
            Ok(_) => None,
            Err(e) => {
                debug!("Invalid config document: {}", e);
                None
            }
        }
    }

    /// Returns the underlying value.
    pub fn as_value(&self) -> &Value {
        &self.0
    }
}

impl Default for LintConfig {
    /// `{"default": true}`: every built-in rule enabled with its defaults.
    fn default() -> Self {
        let mut map = Map::new();
        map.insert("default".to_string(), Value::Bool(true));
        Self(Value::Object(map))
    }
}

/// Loads the rule configuration at `path`, falling back to the default.
pub async fn resolve_config(path: impl AsRef<Path>) -> LintConfig {
    let path = path.as_ref();
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            debug!("No config at {} ({}), using defaults", path.display(), e);
            return LintConfig::default();
        }
    };

    match LintConfig::from_jsonc(&content) {
        Some(config) => {
            debug!("Using config: {}", path.display());
            config
        }
        None => {
            warn!("Ignoring malformed config {}, using defaults", path.display());
            LintConfig::default()
        }
    }
}

/// Loads ignore patterns from `path`.
///
/// A missing or unreadable file yields no patterns.
pub async fn resolve_ignore(path: impl AsRef<Path>) -> Vec<String> {
    let path = path.as_ref();
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        debug!("No ignore file at {}", path.display());
        return Vec::new();
    }

    match tokio::fs::read_to_string(path).await {
        Ok(content) => parse_ignore(&content),
        Err(e) => {
            warn!("Failed to read ignore file {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Splits ignore-file content into patterns, one per non-blank line.
pub fn parse_ignore(content: &str) -> Vec<String> {
    content
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = LintConfig::default();
        assert_eq!(config.as_value(), &serde_json::json!({ "default": true }));
    }

    #[test]
    fn test_from_jsonc_accepts_comments() {
        let json = r#"{
            // keep long lines in tables
            "MD013": { "line_length": 120 },
            "no-hard-tabs": false
        }"#;

        let config = LintConfig::from_jsonc(json).unwrap();
        assert_eq!(config.as_value()["MD013"]["line_length"], 120);
        assert_eq!(config.as_value()["no-hard-tabs"], false);
    }

    #[rstest]
    #[case::not_json("default = true")]
    #[case::array("[1, 2, 3]")]
    #[case::empty("")]
    fn test_from_jsonc_rejects(#[case] content: &str) {
        assert!(LintConfig::from_jsonc(content).is_none());
    }

    #[tokio::test]
    async fn test_resolve_config_missing_file() {
        let temp_dir = tempdir().unwrap();
        let config = resolve_config(temp_dir.path().join(".mdlintrc")).await;
        assert_eq!(config, LintConfig::default());
    }

    #[tokio::test]
    async fn test_resolve_config_malformed_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(".mdlintrc");
        fs::write(&path, "{ not json").unwrap();

        assert_eq!(resolve_config(&path).await, LintConfig::default());
    }

    #[tokio::test]
    async fn test_resolve_config_reads_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(".mdlintrc");
        fs::write(&path, r#"{ "default": false, "MD009": true }"#).unwrap();

        let config = resolve_config(&path).await;
        assert_eq!(
            config.as_value(),
            &serde_json::json!({ "default": false, "MD009": true })
        );
    }

    #[tokio::test]
    async fn test_resolve_ignore_missing_file() {
        let temp_dir = tempdir().unwrap();
        let patterns = resolve_ignore(temp_dir.path().join(".mdlintignore")).await;
        assert!(patterns.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_ignore_unreadable_is_empty() {
        // A directory exists but cannot be read as a file.
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(".mdlintignore");
        fs::create_dir(&path).unwrap();

        assert!(resolve_ignore(&path).await.is_empty());
    }

    #[tokio::test]
    async fn test_resolve_ignore_reads_lines() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(".mdlintignore");
        fs::write(&path, "node_modules\nvendor\n").unwrap();

        let patterns = resolve_ignore(&path).await;
        assert_eq!(patterns, vec!["node_modules", "vendor"]);
    }

    #[test]
    fn test_parse_ignore_strips_crlf_and_blank_lines() {
        let patterns = parse_ignore("\n  build\r\n\r\ndocs/drafts  \r\n");
        assert_eq!(patterns, vec!["build", "docs/drafts"]);
    }

    #[test]
    fn test_parse_ignore_empty() {
        assert!(parse_ignore("   \n").is_empty());
    }
}
