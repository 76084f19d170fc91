//! Diagnostic types for accessibility findings

use crate::span::SourceSpan;
use serde::{Deserialize, Serialize};

/// Diagnostic source tag, used by hosts to tell our findings apart from other
/// tools' diagnostics on the same document.
pub const SOURCE_TAG: &str = "flutter-a11y";

/// Severity level for violations
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Warning - the widget is usable but poorly described to screen readers
    #[default]
    Warning,
    /// Error - the widget is unreachable via assistive technology
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "warning" | "warn" => Ok(Severity::Warning),
            "error" | "err" => Ok(Severity::Error),
            _ => Err(()),
        }
    }
}

/// Identity of the rule that produced a violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleId {
    /// Interactive or content widget not wrapped in Semantics
    MissingSemantics,
    /// Image widget without a semanticLabel property
    MissingSemanticLabel,
    /// Button widget without an onPressed callback
    MissingOnpressed,
}

impl RuleId {
    /// The kebab-case identifier shown to users
    pub fn as_str(&self) -> &'static str {
        match self {
            RuleId::MissingSemantics => "missing-semantics",
            RuleId::MissingSemanticLabel => "missing-semantic-label",
            RuleId::MissingOnpressed => "missing-onpressed",
        }
    }
}

impl std::fmt::Display for RuleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuleId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "missing-semantics" => Ok(RuleId::MissingSemantics),
            "missing-semantic-label" => Ok(RuleId::MissingSemanticLabel),
            "missing-onpressed" => Ok(RuleId::MissingOnpressed),
            _ => Err(format!("Unknown rule: {}", s)),
        }
    }
}

/// One detected accessibility issue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule that triggered this violation
    pub rule_id: RuleId,
    /// Severity level
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Span of the offending widget expression in the scanned text
    pub span: SourceSpan,
    /// Tool identity, always [`SOURCE_TAG`]
    pub source: &'static str,
}

impl Violation {
    /// Create a new violation
    pub fn new(rule_id: RuleId, severity: Severity, message: &str, span: SourceSpan) -> Self {
        Self {
            rule_id,
            severity,
            message: message.to_string(),
            span,
            source: SOURCE_TAG,
        }
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Check if this is a warning
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}
