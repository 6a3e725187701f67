use crate::application::dto::OutputFormat;
use clap::Parser;

/// Analyze dependency risk for npm projects from package-lock.json
#[derive(Parser, Debug)]
#[command(name = "deprisk")]
#[command(version)]
#[command(
    about = "Analyze dependency risk for npm projects from package-lock.json",
    long_about = None
)]
pub struct Args {
    /// Output format: json or markdown (default: json, unless the config
    /// file says otherwise)
    #[arg(short, long)]
    pub format: Option<OutputFormat>,

    /// Path to the project directory (defaults to current directory)
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Maximum number of packages to analyze
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Maximum entries in the top-priority list
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Repository commit recorded as report provenance
    #[arg(long)]
    pub commit: Option<String>,

    /// Explicit config file path (default: auto-discover deprisk.config.yml)
    #[arg(short, long)]
    pub config: Option<String>,
}

impl Args {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
