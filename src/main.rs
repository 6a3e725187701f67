use deprisk::cli::Args;
use deprisk::config::{self, ConfigFile};
use deprisk::prelude::*;
use deprisk::shared::error::{AnalysisError, ExitCode};
use owo_colors::OwoColorize;
use std::path::{Path, PathBuf};
use std::process;

fn main() {
    if let Err(e) = run() {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        for cause in e.chain().skip(1) {
            eprintln!("\nCaused by: {}", cause);
        }

        eprintln!();
        process::exit(ExitCode::ApplicationError.as_i32());
    }
}

#[tokio::main]
async fn run() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate project directory
    let project_dir = args.path.as_deref().unwrap_or(".");
    let project_path = PathBuf::from(project_dir);

    validate_project_path(&project_path)?;

    // Load config: explicit path wins over auto-discovery; CLI arguments
    // win over config values.
    let config_file = match &args.config {
        Some(path) => Some(config::load_config_from_path(Path::new(path))?),
        None => config::discover_config(&project_path)?,
    };

    let format = resolve_format(&args, config_file.as_ref())?;
    let options = resolve_options(&args, config_file.as_ref());

    // Create adapters (Dependency Injection)
    let lockfile_reader = FileSystemReader::new();
    let manifest_reader = FileSystemReader::new();
    let registry_repository = NpmRegistryRepository::new()?;
    let progress_reporter = StderrProgressReporter::new();

    // Create use case with injected dependencies
    let use_case = AnalyzeDependenciesUseCase::new(
        lockfile_reader,
        manifest_reader,
        registry_repository,
        progress_reporter,
    );

    // Execute use case
    let request = AnalysisRequest::new(project_path, options);
    let response = use_case.execute(request).await?;

    print_risk_summary(&response.report);

    // Format and present the report
    eprintln!("{}", FormatterFactory::progress_message(format));
    let formatter = FormatterFactory::create(format);
    let formatted_output = formatter.format(&response.report)?;

    let presenter: Box<dyn OutputPresenter> = if let Some(output_path) = args.output {
        Box::new(FileSystemWriter::new(PathBuf::from(output_path)))
    } else {
        Box::new(StdoutPresenter::new())
    };

    presenter.present(&formatted_output)?;

    Ok(())
}

fn resolve_format(args: &Args, config_file: Option<&ConfigFile>) -> Result<OutputFormat> {
    if let Some(format) = args.format {
        return Ok(format);
    }

    if let Some(format) = config_file.and_then(|c| c.format.as_deref()) {
        return format
            .parse::<OutputFormat>()
            .map_err(|e| anyhow::anyhow!(e));
    }

    Ok(OutputFormat::Json)
}

fn resolve_options(args: &Args, config_file: Option<&ConfigFile>) -> AnalysisOptions {
    let defaults = AnalysisOptions::default();

    AnalysisOptions {
        limit: args
            .limit
            .or(config_file.and_then(|c| c.limit))
            .unwrap_or(defaults.limit),
        top_n: args
            .top
            .or(config_file.and_then(|c| c.top_priority))
            .unwrap_or(defaults.top_n),
        repo_commit: args.commit.clone(),
    }
}

fn print_risk_summary(report: &AnalysisReport) {
    let distribution = &report.executive_summary.risk_distribution;
    eprintln!(
        "   {} {}   {} {}   {} {}   {} {}",
        "critical:".red().bold(),
        distribution.critical,
        "high:".yellow(),
        distribution.high,
        "medium:".cyan(),
        distribution.medium,
        "low:".green(),
        distribution.low,
    );
}

fn validate_project_path(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AnalysisError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Directory does not exist".to_string(),
        }
        .into());
    }

    // Reject symbolic links for project paths
    let metadata = std::fs::symlink_metadata(path).map_err(|e| AnalysisError::InvalidProjectPath {
        path: path.to_path_buf(),
        reason: format!("Failed to read path metadata: {}", e),
    })?;

    if metadata.is_symlink() {
        return Err(AnalysisError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Project path is a symbolic link; symbolic links are not allowed".to_string(),
        }
        .into());
    }

    if !metadata.is_dir() {
        return Err(AnalysisError::InvalidProjectPath {
            path: path.to_path_buf(),
            reason: "Path is not a directory".to_string(),
        }
        .into());
    }

    Ok(())
}
