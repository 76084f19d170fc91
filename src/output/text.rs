//! Human-readable text output formatter

use super::OutputFormatter;
use crate::batch::{Finding, ScanSummary};
use crate::diagnostic::Severity;
use colored::*;

/// Text formatter with optional color support
pub struct TextFormatter {
    /// Enable colored output
    pub colored: bool,

    /// Show source context
    pub show_source: bool,

    /// Show statistics
    pub show_stats: bool,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self {
            colored: true,
            show_source: true,
            show_stats: true,
        }
    }
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable colors
    pub fn without_color(mut self) -> Self {
        self.colored = false;
        self
    }

    fn severity_str(&self, severity: Severity) -> ColoredString {
        let s = format!("{}", severity);
        if !self.colored {
            return s.normal();
        }
        match severity {
            Severity::Error => s.red().bold(),
            Severity::Warning => s.yellow().bold(),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, summary: &ScanSummary) -> String {
        let mut output = String::new();

        for report in &summary.reports {
            if self.colored {
                output.push_str(&format!("{}\n", report.label.underline()));
            } else {
                output.push_str(&format!("{}\n", report.label));
            }

            for finding in &report.findings {
                output.push_str(&self.format_finding(&report.label, finding));
                output.push('\n');
            }
            output.push('\n');
        }

        for (label, error) in &summary.failures {
            let line = format!("failed to scan {}: {}", label, error);
            if self.colored {
                output.push_str(&format!("{}\n", line.red()));
            } else {
                output.push_str(&format!("{}\n", line));
            }
        }

        if summary.cancelled {
            output.push_str("Scan cancelled.\n");
        }

        if self.show_stats {
            output.push_str(&format!(
                "\nFound {} potential {} in {} {}",
                summary.violation_count,
                if summary.violation_count == 1 {
                    "issue"
                } else {
                    "issues"
                },
                summary.files_scanned,
                if summary.files_scanned == 1 {
                    "file"
                } else {
                    "files"
                }
            ));

            let mut counts = Vec::new();
            if summary.error_count > 0 {
                let s = format!(
                    "{} {}",
                    summary.error_count,
                    if summary.error_count == 1 {
                        "error"
                    } else {
                        "errors"
                    }
                );
                counts.push(if self.colored {
                    s.red().to_string()
                } else {
                    s
                });
            }
            if summary.warning_count > 0 {
                let s = format!(
                    "{} {}",
                    summary.warning_count,
                    if summary.warning_count == 1 {
                        "warning"
                    } else {
                        "warnings"
                    }
                );
                counts.push(if self.colored {
                    s.yellow().to_string()
                } else {
                    s
                });
            }

            if !counts.is_empty() {
                output.push_str(&format!(": {}", counts.join(", ")));
            }
            output.push('\n');

            output.push_str(&format!(
                "Finished in {:.2}s\n",
                summary.duration.as_secs_f64()
            ));
        }

        output
    }

    fn format_finding(&self, label: &str, finding: &Finding) -> String {
        let mut output = String::new();
        let v = &finding.violation;

        output.push_str(&format!(
            "{}:{}:{}: {}[{}]: {}\n",
            label,
            finding.line,
            finding.column,
            self.severity_str(v.severity),
            if self.colored {
                v.rule_id.as_str().cyan().to_string()
            } else {
                v.rule_id.as_str().to_string()
            },
            v.message
        ));

        if self.show_source && !finding.source_line.is_empty() {
            let line_num = format!("{:>4}", finding.line);
            output.push_str(&format!(
                "{} {} {}\n",
                if self.colored {
                    line_num.blue().to_string()
                } else {
                    line_num
                },
                if self.colored {
                    "|".blue().to_string()
                } else {
                    "|".to_string()
                },
                finding.source_line
            ));

            if finding.column > 0 {
                let padding = " ".repeat(finding.column - 1);
                let underline = "^".repeat(v.span.len().min(finding.source_line.len()).max(1));
                output.push_str(&format!(
                    "     {} {}{}\n",
                    if self.colored {
                        "|".blue().to_string()
                    } else {
                        "|".to_string()
                    },
                    padding,
                    if self.colored {
                        underline.red().to_string()
                    } else {
                        underline
                    }
                ));
            }
        }

        output
    }
}
