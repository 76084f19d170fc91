//! JSON output formatter

use super::OutputFormatter;
use crate::batch::{Finding, ScanSummary};
use serde::Serialize;

/// JSON formatter for machine-readable output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print with indentation
    pub pretty: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pretty printing
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    fn finding_json<'a>(&self, label: &'a str, finding: &'a Finding) -> JsonFinding<'a> {
        JsonFinding {
            rule_id: finding.violation.rule_id.as_str(),
            severity: finding.violation.severity.to_string(),
            message: &finding.violation.message,
            source: finding.violation.source,
            file: label,
            line: finding.line,
            column: finding.column,
            span_start: finding.violation.span.start,
            span_end: finding.violation.span.end,
        }
    }
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    findings: Vec<JsonFinding<'a>>,
    failures: Vec<JsonFailure<'a>>,
    summary: JsonSummary,
}

#[derive(Serialize)]
struct JsonFinding<'a> {
    rule_id: &'a str,
    severity: String,
    message: &'a str,
    source: &'a str,
    file: &'a str,
    line: usize,
    column: usize,
    span_start: usize,
    span_end: usize,
}

#[derive(Serialize)]
struct JsonFailure<'a> {
    file: &'a str,
    error: &'a str,
}

#[derive(Serialize)]
struct JsonSummary {
    files_scanned: usize,
    files_with_violations: usize,
    violation_count: usize,
    error_count: usize,
    warning_count: usize,
    cancelled: bool,
    duration_ms: u128,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, summary: &ScanSummary) -> String {
        let findings: Vec<JsonFinding> = summary
            .reports
            .iter()
            .flat_map(|r| r.findings.iter().map(move |f| self.finding_json(&r.label, f)))
            .collect();

        let output = JsonOutput {
            findings,
            failures: summary
                .failures
                .iter()
                .map(|(file, error)| JsonFailure {
                    file,
                    error,
                })
                .collect(),
            summary: JsonSummary {
                files_scanned: summary.files_scanned,
                files_with_violations: summary.reports.len(),
                violation_count: summary.violation_count,
                error_count: summary.error_count,
                warning_count: summary.warning_count,
                cancelled: summary.cancelled,
                duration_ms: summary.duration.as_millis(),
            },
        };

        if self.pretty {
            serde_json::to_string_pretty(&output).unwrap_or_default()
        } else {
            serde_json::to_string(&output).unwrap_or_default()
        }
    }

    fn format_finding(&self, label: &str, finding: &Finding) -> String {
        let json_finding = self.finding_json(label, finding);
        if self.pretty {
            serde_json::to_string_pretty(&json_finding).unwrap_or_default()
        } else {
            serde_json::to_string(&json_finding).unwrap_or_default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::FileReport;
    use crate::diagnostic::{RuleId, Severity, Violation};
    use crate::span::SourceSpan;

    fn sample_finding() -> Finding {
        let text = "TextButton(child: Text('Go'))";
        Finding::locate(
            text,
            Violation::new(
                RuleId::MissingOnpressed,
                Severity::Error,
                "Button missing onPressed callback - inaccessible to screen readers",
                SourceSpan::new(0, text.len()),
            ),
        )
    }

    #[test]
    fn test_json_format_finding() {
        let formatter = JsonFormatter::new();
        let output = formatter.format_finding("lib/main.dart", &sample_finding());
        assert!(output.contains("\"rule_id\":\"missing-onpressed\""));
        assert!(output.contains("\"severity\":\"error\""));
        assert!(output.contains("\"file\":\"lib/main.dart\""));
        assert!(output.contains("\"line\":1"));
        assert!(output.contains("\"source\":\"flutter-a11y\""));
    }

    #[test]
    fn test_json_format_summary() {
        let formatter = JsonFormatter::new();
        let summary = ScanSummary {
            files_scanned: 5,
            violation_count: 1,
            error_count: 1,
            reports: vec![FileReport {
                label: "lib/main.dart".to_string(),
                findings: vec![sample_finding()],
            }],
            ..ScanSummary::default()
        };

        let output = formatter.format(&summary);
        assert!(output.contains("\"files_scanned\":5"));
        assert!(output.contains("\"files_with_violations\":1"));
        assert!(output.contains("\"error_count\":1"));
        assert!(output.contains("\"cancelled\":false"));
    }

    #[test]
    fn test_json_pretty() {
        let formatter = JsonFormatter::new().pretty();
        let output = formatter.format_finding("a.dart", &sample_finding());
        assert!(output.contains('\n'));
    }

    #[test]
    fn test_json_empty_summary_is_valid() {
        let formatter = JsonFormatter::new();
        let output = formatter.format(&ScanSummary::default());
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["summary"]["violation_count"], 0);
        assert!(parsed["findings"].as_array().unwrap().is_empty());
    }
}
