use crate::ports::outbound::ReportFormatter;
use crate::risk_analysis::domain::{AnalysisReport, DependencyAnalysis};
use crate::shared::Result;

/// Markdown table header for the full dependency listing
const TABLE_HEADER: &str =
    "| Package | Current | Latest | Score | Level | Tags | Recommended Action |\n";

/// Markdown table separator line
const TABLE_SEPARATOR: &str =
    "|---------|---------|--------|-------|-------|------|--------------------|\n";

/// Markdown table header for the top-priority listing
const TOP_TABLE_HEADER: &str = "| # | Package | Current | Latest | Score | Level | Action |\n";

/// Markdown table separator line for the top-priority table
const TOP_TABLE_SEPARATOR: &str = "|---|---------|---------|--------|-------|-------|--------|\n";

/// MarkdownReportFormatter adapter for a human-readable risk report
///
/// This adapter implements the ReportFormatter port for Markdown format:
/// executive summary tables first, then the prioritized listing, then
/// every analyzed dependency.
pub struct MarkdownReportFormatter;

impl MarkdownReportFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Escapes pipe characters and newlines for safe Markdown table rendering
    fn escape_table_cell(text: &str) -> String {
        text.replace('|', "\\|").replace('\n', " ")
    }

    /// Generate a Markdown hyperlink to the package's npm page
    fn package_link(name: &str) -> String {
        format!(
            "[{}](https://www.npmjs.com/package/{})",
            Self::escape_table_cell(name),
            name
        )
    }

    fn tags_cell(analysis: &DependencyAnalysis) -> String {
        if analysis.tags.is_empty() {
            "-".to_string()
        } else {
            analysis
                .tags
                .iter()
                .map(|tag| tag.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    fn dependency_row(analysis: &DependencyAnalysis) -> String {
        format!(
            "| {} | {} | {} | {} | {} | {} | {} |\n",
            Self::package_link(analysis.package_name()),
            Self::escape_table_cell(&analysis.record.current_version),
            Self::escape_table_cell(analysis.record.latest_version.as_deref().unwrap_or("N/A")),
            analysis.risk_score,
            analysis.risk_level,
            Self::tags_cell(analysis),
            Self::escape_table_cell(&analysis.recommended_action.display_text),
        )
    }
}

impl Default for MarkdownReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for MarkdownReportFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = String::new();
        let summary = &report.executive_summary;

        output.push_str("# Dependency Risk Report\n\n");
        output.push_str(&format!("Generated: {}\n\n", report.metadata.generated_at));
        if let Some(commit) = &report.metadata.repo_commit {
            output.push_str(&format!("Commit: `{}`\n\n", Self::escape_table_cell(commit)));
        }

        output.push_str("## Executive Summary\n\n");
        output.push_str("| Risk Level | Count |\n");
        output.push_str("|------------|-------|\n");
        output.push_str(&format!(
            "| Critical | {} |\n",
            summary.risk_distribution.critical
        ));
        output.push_str(&format!("| High | {} |\n", summary.risk_distribution.high));
        output.push_str(&format!(
            "| Medium | {} |\n",
            summary.risk_distribution.medium
        ));
        output.push_str(&format!("| Low | {} |\n\n", summary.risk_distribution.low));

        output.push_str(&format!(
            "Analyzed **{}** package(s): {} deprecated, {} safe update(s), {} up to date, {} non-semver.\n\n",
            summary.stats.total,
            summary.stats.deprecated,
            summary.stats.safe_updates,
            summary.stats.up_to_date,
            summary.stats.non_semver,
        ));

        if !summary.top_priority.is_empty() {
            output.push_str("## Top Priority\n\n");
            output.push_str(TOP_TABLE_HEADER);
            output.push_str(TOP_TABLE_SEPARATOR);
            for (rank, analysis) in summary.top_priority.iter().enumerate() {
                output.push_str(&format!(
                    "| {} | {} | {} | {} | {} | {} | {} |\n",
                    rank + 1,
                    Self::package_link(analysis.package_name()),
                    Self::escape_table_cell(&analysis.record.current_version),
                    Self::escape_table_cell(
                        analysis.record.latest_version.as_deref().unwrap_or("N/A")
                    ),
                    analysis.risk_score,
                    analysis.risk_level,
                    Self::escape_table_cell(&analysis.recommended_action.display_text),
                ));
            }
            output.push('\n');
        }

        output.push_str("## All Dependencies\n\n");
        if report.dependencies.is_empty() {
            output.push_str("No dependencies were analyzed.\n");
        } else {
            output.push_str(TABLE_HEADER);
            output.push_str(TABLE_SEPARATOR);
            for analysis in &report.dependencies {
                output.push_str(&Self::dependency_row(analysis));
            }
        }

        Ok(output)
    }
}
