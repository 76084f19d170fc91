//! GitHub Actions output formatter
//!
//! Outputs findings in GitHub Actions workflow command format:
//! ::warning file={name},line={line},col={col}::{message}

use super::OutputFormatter;
use crate::batch::{Finding, ScanSummary};
use crate::diagnostic::Severity;

/// Formatter for GitHub Actions annotations
pub struct GithubFormatter {
    /// Whether to include summary
    pub show_summary: bool,
}

impl GithubFormatter {
    /// Create a new GitHub formatter
    pub fn new() -> Self {
        Self { show_summary: true }
    }

    /// Disable summary output
    pub fn without_summary(mut self) -> Self {
        self.show_summary = false;
        self
    }
}

impl Default for GithubFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for GithubFormatter {
    fn format(&self, summary: &ScanSummary) -> String {
        let mut output = String::new();

        for report in &summary.reports {
            for finding in &report.findings {
                output.push_str(&self.format_finding(&report.label, finding));
                output.push('\n');
            }
        }

        if self.show_summary && summary.violation_count > 0 {
            output.push_str(&format!(
                "::notice::Accessibility scan complete: {} error(s), {} warning(s) in {} file(s)\n",
                summary.error_count, summary.warning_count, summary.files_scanned
            ));
            output.push_str("::group::Accessibility Summary\n");
            output.push_str(&format!("Files checked: {}\n", summary.files_scanned));
            output.push_str(&format!("Errors: {}\n", summary.error_count));
            output.push_str(&format!("Warnings: {}\n", summary.warning_count));
            output.push_str("::endgroup::\n");
        }

        output
    }

    fn format_finding(&self, label: &str, finding: &Finding) -> String {
        let level = match finding.violation.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };

        // Escape special characters in message
        let message = finding
            .violation
            .message
            .replace('%', "%25")
            .replace('\r', "%0D")
            .replace('\n', "%0A");

        format!(
            "::{} file={},line={},col={},title={}::{}",
            level,
            label,
            finding.line,
            finding.column.max(1),
            finding.violation.rule_id,
            message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FileReport;
    use crate::diagnostic::{RuleId, Violation};
    use crate::span::SourceSpan;

    fn make_finding(severity: Severity, rule_id: RuleId, msg: &str) -> Finding {
        let text = "IconButton(icon: i)";
        Finding::locate(
            text,
            Violation::new(rule_id, severity, msg, SourceSpan::new(0, text.len())),
        )
    }

    #[test]
    fn test_format_error() {
        let formatter = GithubFormatter::new();
        let finding = make_finding(
            Severity::Error,
            RuleId::MissingOnpressed,
            "Button missing onPressed callback - inaccessible to screen readers",
        );

        let output = formatter.format_finding("lib/main.dart", &finding);
        assert!(output.starts_with("::error"));
        assert!(output.contains("file=lib/main.dart"));
        assert!(output.contains("line=1"));
        assert!(output.contains("title=missing-onpressed"));
    }

    #[test]
    fn test_format_warning() {
        let formatter = GithubFormatter::new();
        let finding = make_finding(
            Severity::Warning,
            RuleId::MissingSemantics,
            "IconButton should be wrapped in Semantics for accessibility",
        );

        let output = formatter.format_finding("lib/main.dart", &finding);
        assert!(output.starts_with("::warning"));
    }

    #[test]
    fn test_escape_newlines() {
        let formatter = GithubFormatter::new();
        let finding = make_finding(Severity::Error, RuleId::MissingOnpressed, "Line1\nLine2");

        let output = formatter.format_finding("a.dart", &finding);
        assert!(output.contains("%0A"));
        assert!(!output.contains('\n'));
    }

    #[test]
    fn test_format_summary() {
        let formatter = GithubFormatter::new();
        let summary = ScanSummary {
            files_scanned: 1,
            violation_count: 2,
            error_count: 1,
            warning_count: 1,
            reports: vec![FileReport {
                label: "a.dart".to_string(),
                findings: vec![
                    make_finding(Severity::Error, RuleId::MissingOnpressed, "Error"),
                    make_finding(Severity::Warning, RuleId::MissingSemantics, "Warning"),
                ],
            }],
            ..ScanSummary::default()
        };

        let output = formatter.format(&summary);
        assert!(output.contains("::error"));
        assert!(output.contains("::warning"));
        assert!(output.contains("::group::"));
        assert!(output.contains("::endgroup::"));
    }

    #[test]
    fn test_clean_summary_is_silent() {
        let formatter = GithubFormatter::new();
        assert_eq!(formatter.format(&ScanSummary::default()), "");
    }
}
