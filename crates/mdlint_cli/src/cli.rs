//! CLI argument definitions

use std::path::PathBuf;

use clap::Parser;

/// mdlint - lint Markdown files and directories
#[derive(Parser, Debug)]
#[command(name = "mdlint")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Files or directories to lint
    pub paths: Vec<String>,

    /// Configuration file path
    #[arg(short, long, default_value = ".mdlintrc")]
    pub config: PathBuf,

    /// Ignore file path
    #[arg(short, long, default_value = ".mdlintignore")]
    pub ignore: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
