use crate::risk_analysis::domain::AnalysisReport;
use crate::shared::Result;

/// ReportFormatter port for rendering an analysis report
///
/// This port abstracts the formatting logic for the different report
/// output formats (JSON, Markdown, etc.).
pub trait ReportFormatter {
    /// Formats the analysis report (per-dependency verdicts plus the
    /// executive summary) into its output representation.
    ///
    /// # Errors
    /// Returns an error if formatting or serialization fails
    fn format(&self, report: &AnalysisReport) -> Result<String>;
}
