//! deprisk - dependency risk analysis for npm projects
//!
//! This library analyzes a project's package-lock.json against live npm
//! registry data: it classifies every locked dependency, computes how
//! far behind the latest release it is, scores its risk, and produces
//! prioritized remediation guidance plus an executive summary.
//!
//! # Architecture
//!
//! The library is organized into the following layers:
//!
//! - **Domain Layer** (`risk_analysis`): pure analysis logic - version
//!   classification, origin resolution, scoring, recommendation
//! - **Application Layer** (`application`): use cases and DTOs
//! - **Ports** (`ports`): interface definitions for infrastructure
//! - **Adapters** (`adapters`): concrete implementations of ports
//! - **Shared** (`shared`): common utilities and error types
//!
//! # Example
//!
//! ```no_run
//! use deprisk::prelude::*;
//! use std::path::PathBuf;
//!
//! # async fn run() -> Result<()> {
//! // Create adapters
//! let lockfile_reader = FileSystemReader::new();
//! let manifest_reader = FileSystemReader::new();
//! let registry_repository = NpmRegistryRepository::new()?;
//! let progress_reporter = StderrProgressReporter::new();
//!
//! // Create use case
//! let use_case = AnalyzeDependenciesUseCase::new(
//!     lockfile_reader,
//!     manifest_reader,
//!     registry_repository,
//!     progress_reporter,
//! );
//!
//! // Execute
//! let request = AnalysisRequest::new(PathBuf::from("."), AnalysisOptions::default());
//! let response = use_case.execute(request).await?;
//!
//! // Format output
//! let formatter = JsonReportFormatter::new();
//! let output = formatter.format(&response.report)?;
//! println!("{}", output);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod application;
pub mod cli;
pub mod config;
pub mod ports;
pub mod risk_analysis;
pub mod shared;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::adapters::outbound::console::StderrProgressReporter;
    pub use crate::adapters::outbound::filesystem::{
        FileSystemReader, FileSystemWriter, StdoutPresenter,
    };
    pub use crate::adapters::outbound::formatters::{JsonReportFormatter, MarkdownReportFormatter};
    pub use crate::adapters::outbound::network::NpmRegistryRepository;
    pub use crate::application::dto::{AnalysisRequest, AnalysisResponse, OutputFormat};
    pub use crate::application::factories::FormatterFactory;
    pub use crate::application::use_cases::AnalyzeDependenciesUseCase;
    pub use crate::ports::outbound::{
        LockfileReader, ManifestReader, OutputPresenter, ProgressReporter, RegistryMetadata,
        RegistryRepository, ReportFormatter,
    };
    pub use crate::risk_analysis::domain::{
        ActionType, AnalysisReport, DependencyAnalysis, ExecutiveSummary, LockfileSnapshot,
        ManifestFallback, RiskLevel, Tag,
    };
    pub use crate::risk_analysis::policies::ScoringPolicy;
    pub use crate::risk_analysis::services::{
        AnalysisOptions, CachingRegistryRepository, MetadataEnricher, RiskAnalyzer,
    };
    pub use crate::shared::Result;
}
