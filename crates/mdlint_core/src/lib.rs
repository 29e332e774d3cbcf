//! # mdlint_core
//!
//! File discovery and result aggregation pipeline for mdlint.
//!
//! This crate provides:
//! - Config and ignore-file loading with defaults
//! - Expansion of file and directory arguments into Markdown files
//! - The `LintEngine` seam and a built-in engine
//! - Sorting, summary statistics and text reporting
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use mdlint_core::{BuiltinEngine, Linter};
//!
//! let linter = Linter::from_files(Arc::new(BuiltinEngine::new()), ".mdlintrc", ".mdlintignore").await;
//! let outcome = linter.run(&["docs".to_string()], false).await?;
//! print!("{}", outcome.output);
//! std::process::exit(outcome.exit_code.into());
//! ```

mod aggregate;
mod config;
mod diagnostic;
pub mod engine;
mod error;
pub mod expander;
mod invoker;
mod linter;
mod reporter;

pub use aggregate::{Aggregate, FileReport, RenderPlan, Summary, aggregate};
pub use config::{LintConfig, parse_ignore, resolve_config, resolve_ignore};
pub use diagnostic::{Diagnostic, ErrorRange, ResultSet};
pub use engine::BuiltinEngine;
pub use error::LinterError;
pub use expander::{KNOWN_EXTENSIONS, PathExpander, has_known_extension};
pub use invoker::{LintEngine, lint};
pub use linter::{Linter, RunOutcome};
pub use reporter::render;
