//! Output formatters for scan results

mod compact;
mod github;
mod json;
mod text;

pub use compact::CompactFormatter;
pub use github::GithubFormatter;
pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::batch::{Finding, ScanSummary};

/// Output formatter trait
pub trait OutputFormatter: Send + Sync {
    /// Format the entire scan summary
    fn format(&self, summary: &ScanSummary) -> String;

    /// Format a single finding from the named file
    fn format_finding(&self, label: &str, finding: &Finding) -> String;
}
