use crate::ports::outbound::ReportFormatter;
use crate::risk_analysis::domain::AnalysisReport;
use crate::shared::Result;

/// JsonReportFormatter adapter producing the machine-readable report
///
/// The serialized shape mirrors the wire contract the consuming UI
/// renders directly: camelCase keys, kebab-case tags, null for unknown
/// classification fields.
pub struct JsonReportFormatter;

impl JsonReportFormatter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReportFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for JsonReportFormatter {
    fn format(&self, report: &AnalysisReport) -> Result<String> {
        let mut output = serde_json::to_string_pretty(report)?;
        output.push('\n');
        Ok(output)
    }
}
