//! Batch scanning over a set of documents
//!
//! The driver walks a document enumeration sequentially, polling a
//! cancellation predicate between files and reporting progress after each
//! one. Per-file failures are isolated: a document that cannot be read is
//! logged and recorded, and the scan continues.

use crate::diagnostic::{RuleId, Severity, Violation};
use crate::engine::detect;
use crate::span::{line_at, line_col};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Language tag for Dart widget-tree sources; all other documents are ignored
pub const DART_LANGUAGE: &str = "dart";

/// Error reading a document's text
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("failed to read {label}: {source}")]
    Read {
        label: String,
        #[source]
        source: std::io::Error,
    },
}

/// A scannable document: a stable label, a language tag, and a text accessor
pub trait Document {
    /// Stable identifier shown in reports (file path, URI, ...)
    fn label(&self) -> &str;

    /// Language tag; only [`DART_LANGUAGE`] documents are scanned
    fn language(&self) -> &str;

    /// Full text content
    fn text(&self) -> Result<String, DocumentError>;
}

/// A document backed by a file on disk
pub struct FileDocument {
    path: PathBuf,
    label: String,
    language: String,
}

impl FileDocument {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        let language = match path.extension().and_then(|e| e.to_str()) {
            Some("dart") => DART_LANGUAGE.to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        };
        Self {
            path,
            label,
            language,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Document for FileDocument {
    fn label(&self) -> &str {
        &self.label
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn text(&self) -> Result<String, DocumentError> {
        std::fs::read_to_string(&self.path).map_err(|source| DocumentError::Read {
            label: self.label.clone(),
            source,
        })
    }
}

/// A document held in memory (hosts passing editor buffers, tests)
pub struct InMemoryDocument {
    label: String,
    language: String,
    text: String,
}

impl InMemoryDocument {
    pub fn new(label: &str, language: &str, text: &str) -> Self {
        Self {
            label: label.to_string(),
            language: language.to_string(),
            text: text.to_string(),
        }
    }

    /// Convenience constructor for Dart sources
    pub fn dart(label: &str, text: &str) -> Self {
        Self::new(label, DART_LANGUAGE, text)
    }
}

impl Document for InMemoryDocument {
    fn label(&self) -> &str {
        &self.label
    }

    fn language(&self) -> &str {
        &self.language
    }

    fn text(&self) -> Result<String, DocumentError> {
        Ok(self.text.clone())
    }
}

/// One violation positioned for display
#[derive(Debug, Clone)]
pub struct Finding {
    /// The underlying violation
    pub violation: Violation,
    /// 1-based line of the span start
    pub line: usize,
    /// 1-based column of the span start
    pub column: usize,
    /// The source line containing the span start
    pub source_line: String,
}

impl Finding {
    /// Position a violation against the text it was computed from
    pub fn locate(text: &str, violation: Violation) -> Self {
        let (line, column) = line_col(text, violation.span.start);
        let source_line = line_at(text, violation.span.start).to_string();
        Self {
            violation,
            line,
            column,
            source_line,
        }
    }
}

/// All findings for one document
#[derive(Debug, Clone, Default)]
pub struct FileReport {
    /// Document label
    pub label: String,
    /// Findings, in detect() order
    pub findings: Vec<Finding>,
}

impl FileReport {
    pub fn has_findings(&self) -> bool {
        !self.findings.is_empty()
    }
}

/// Aggregate result of a batch scan
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Documents actually scanned (Dart language, readable)
    pub files_scanned: usize,
    /// Total violations across all files
    pub violation_count: usize,
    /// Violations with error severity
    pub error_count: usize,
    /// Violations with warning severity
    pub warning_count: usize,
    /// Per-file reports for files with at least one finding
    pub reports: Vec<FileReport>,
    /// Per-file failures (label, error message); the scan continued past them
    pub failures: Vec<(String, String)>,
    /// Whether the scan stopped early on cancellation
    pub cancelled: bool,
    /// Wall-clock scan duration
    pub duration: Duration,
}

impl ScanSummary {
    /// Labels of files with at least one violation
    pub fn files_with_violations(&self) -> Vec<&str> {
        self.reports.iter().map(|r| r.label.as_str()).collect()
    }

    /// Check if there are any error-severity violations
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if the scan found nothing
    pub fn is_clean(&self) -> bool {
        self.violation_count == 0
    }

    /// Get exit code (0 = clean, 1 = warnings, 2 = errors)
    pub fn exit_code(&self) -> i32 {
        if self.error_count > 0 {
            2
        } else if self.warning_count > 0 {
            1
        } else {
            0
        }
    }
}

/// Batch scanner with per-invocation rule filtering
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    disabled: Vec<RuleId>,
    min_severity: Option<Severity>,
}

impl Scanner {
    /// Create a scanner running every registered rule
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable specific rules for this scanner
    pub fn with_disabled_rules(mut self, rules: &[RuleId]) -> Self {
        self.disabled.extend_from_slice(rules);
        self
    }

    /// Drop violations below the given severity
    pub fn with_min_severity(mut self, severity: Severity) -> Self {
        self.min_severity = Some(severity);
        self
    }

    /// Detect violations in one text, applying the scanner's filters
    pub fn detect_filtered(&self, text: &str) -> Vec<Violation> {
        let mut violations = detect(text);
        violations.retain(|v| !self.disabled.contains(&v.rule_id));
        if let Some(min) = self.min_severity {
            violations.retain(|v| v.severity >= min);
        }
        violations
    }

    /// Scan one document; non-Dart documents yield an empty report
    pub fn scan_document(&self, doc: &dyn Document) -> Result<FileReport, DocumentError> {
        let mut report = FileReport {
            label: doc.label().to_string(),
            ..FileReport::default()
        };
        if doc.language() != DART_LANGUAGE {
            return Ok(report);
        }
        let text = doc.text()?;
        report.findings = self
            .detect_filtered(&text)
            .into_iter()
            .map(|v| Finding::locate(&text, v))
            .collect();
        Ok(report)
    }

    /// Scan a document enumeration.
    ///
    /// `cancelled` is polled between files only; a file that has started is
    /// always finished. `progress` is invoked after each file with
    /// (processed, total, label) and is never invoked for an empty
    /// enumeration.
    pub fn scan(
        &self,
        docs: &[Box<dyn Document>],
        cancelled: impl Fn() -> bool,
        mut progress: impl FnMut(usize, usize, &str),
    ) -> ScanSummary {
        let start = Instant::now();
        let mut summary = ScanSummary::default();
        let total = docs.len();
        let mut processed = 0;

        for doc in docs {
            if cancelled() {
                summary.cancelled = true;
                break;
            }
            processed += 1;

            match self.scan_document(doc.as_ref()) {
                Ok(report) => {
                    if doc.language() == DART_LANGUAGE {
                        summary.files_scanned += 1;
                    }
                    for finding in &report.findings {
                        summary.violation_count += 1;
                        match finding.violation.severity {
                            Severity::Error => summary.error_count += 1,
                            Severity::Warning => summary.warning_count += 1,
                        }
                    }
                    if report.has_findings() {
                        summary.reports.push(report);
                    }
                }
                Err(e) => {
                    log::warn!("{}", e);
                    summary.failures.push((doc.label().to_string(), e.to_string()));
                }
            }

            progress(processed, total, doc.label());
        }

        summary.duration = start.elapsed();
        summary
    }
}
