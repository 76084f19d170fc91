//! Compact output formatter
//!
//! One line per finding, minimal output for scripting.

use super::OutputFormatter;
use crate::batch::{Finding, ScanSummary};

/// Compact one-line-per-finding formatter
pub struct CompactFormatter {
    /// Show severity prefix
    pub show_severity: bool,
    /// Show rule ID
    pub show_rule: bool,
}

impl CompactFormatter {
    /// Create a new compact formatter
    pub fn new() -> Self {
        Self {
            show_severity: true,
            show_rule: true,
        }
    }

    /// Hide severity prefix
    pub fn without_severity(mut self) -> Self {
        self.show_severity = false;
        self
    }

    /// Hide rule ID
    pub fn without_rule(mut self) -> Self {
        self.show_rule = false;
        self
    }
}

impl Default for CompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for CompactFormatter {
    fn format(&self, summary: &ScanSummary) -> String {
        let mut output = String::new();

        for report in &summary.reports {
            for finding in &report.findings {
                output.push_str(&self.format_finding(&report.label, finding));
                output.push('\n');
            }
        }

        output
    }

    fn format_finding(&self, label: &str, finding: &Finding) -> String {
        let mut parts = Vec::new();

        parts.push(format!("{}:{}:{}", label, finding.line, finding.column));

        if self.show_severity {
            parts.push(finding.violation.severity.to_string());
        }

        if self.show_rule {
            parts.push(finding.violation.rule_id.as_str().to_string());
        }

        parts.push(finding.violation.message.clone());

        parts.join(": ")
    }
}
