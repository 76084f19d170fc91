//! Fix synthesis for accessibility violations
//!
//! `synthesize` produces candidate edits a user chooses among; nothing here
//! applies an edit to a document on its own. Each edit is an independent
//! alternative computed against one text snapshot, not part of a batch.

use crate::diagnostic::{RuleId, Violation};
use crate::rules::IMAGE_WIDGET;
use crate::span::SourceSpan;
use serde::{Deserialize, Serialize};

/// Placeholder label inserted by both fix kinds; users replace it
pub const PLACEHOLDER_LABEL: &str = "TODO: Add descriptive label";

/// What a candidate edit does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditKind {
    /// Replace the widget expression with a Semantics wrapper holding the
    /// original expression verbatim as its child
    WrapInSemantics,
    /// Insert a semanticLabel property before the widget's closing paren
    InsertSemanticLabel,
}

/// A single proposed text substitution
///
/// A zero-length span denotes a pure insertion. Edits are valid only against
/// the exact text snapshot they were computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    /// Fix classification
    pub kind: EditKind,
    /// Range to replace (zero-length for insertions)
    pub span: SourceSpan,
    /// Replacement text
    pub replacement: String,
    /// Human-readable description for fix pickers
    pub description: String,
}

impl Edit {
    /// Check if this edit inserts without deleting anything
    pub fn is_insertion(&self) -> bool {
        self.span.is_empty()
    }

    /// Apply this edit to `text`, re-validating the span first.
    ///
    /// Returns `None` when the span no longer fits the text (the snapshot
    /// changed since the edit was synthesized).
    pub fn apply(&self, text: &str) -> Option<String> {
        let before = text.get(..self.span.start)?;
        let after = text.get(self.span.end..)?;
        let mut out = String::with_capacity(before.len() + self.replacement.len() + after.len());
        out.push_str(before);
        out.push_str(&self.replacement);
        out.push_str(after);
        Some(out)
    }
}

/// Produce candidate fixes for one violation.
///
/// Returns an empty vector when the violation's span cannot be located in
/// `text` (stale span); never panics.
pub fn synthesize(text: &str, violation: &Violation) -> Vec<Edit> {
    let Some(original) = violation.span.slice(text) else {
        return Vec::new();
    };
    if original.is_empty() {
        return Vec::new();
    }

    let mut edits = vec![Edit {
        kind: EditKind::WrapInSemantics,
        span: violation.span,
        replacement: format!(
            "Semantics(\n  label: '{}',\n  child: {}\n)",
            PLACEHOLDER_LABEL, original
        ),
        description: "Wrap in Semantics".to_string(),
    }];

    if violation.rule_id == RuleId::MissingSemanticLabel || original.starts_with(IMAGE_WIDGET) {
        // Outermost close paren of the matched expression, scanning backward.
        if let Some(rel) = original.rfind(')') {
            if rel > 0 {
                edits.push(Edit {
                    kind: EditKind::InsertSemanticLabel,
                    span: SourceSpan::at(violation.span.start + rel),
                    replacement: format!(", semanticLabel: '{}'", PLACEHOLDER_LABEL),
                    description: "Add semanticLabel to Image".to_string(),
                });
            }
        }
    }

    edits
}

/// Produce fixes for every violation whose span intersects `cursor`.
///
/// This is the quick-fix lookup a host calls when the user asks for code
/// actions at a position; a zero-length cursor hits the violation containing
/// that offset.
pub fn synthesize_at(text: &str, violations: &[Violation], cursor: SourceSpan) -> Vec<Edit> {
    violations
        .iter()
        .filter(|v| {
            if cursor.is_empty() {
                v.span.contains(cursor.start) || v.span.end == cursor.start
            } else {
                v.span.intersects(&cursor)
            }
        })
        .flat_map(|v| synthesize(text, v))
        .collect()
}
