//! fal - Flutter Accessibility Linter
//!
//! A fast accessibility linter for Flutter widget code. It flags interactive
//! widgets that are not wrapped in `Semantics`, images without a
//! `semanticLabel`, and buttons without an `onPressed` callback, and can
//! synthesize the edits that fix them.
//!
//! # Architecture
//!
//! ```text
//! CLI/host -> Scanner -> detect -> Violations -> synthesize -> Edits
//! ```
//!
//! `detect` and `synthesize` are pure functions over the document text, so
//! hosts (the CLI batch scanner, an editor integration) can call them on
//! every keystroke without coordination. The widget registry is a versioned
//! constant, not user configuration.

pub mod batch;
pub mod diagnostic;
pub mod engine;
pub mod fix;
pub mod output;
pub mod rules;
pub mod scanner;
pub mod span;

// Re-export main types
pub use batch::{
    Document, DocumentError, FileDocument, FileReport, Finding, InMemoryDocument, ScanSummary,
    Scanner, DART_LANGUAGE,
};
pub use diagnostic::{RuleId, Severity, Violation, SOURCE_TAG};
pub use engine::detect;
pub use fix::{synthesize, synthesize_at, Edit, EditKind, PLACEHOLDER_LABEL};
pub use output::{CompactFormatter, GithubFormatter, JsonFormatter, OutputFormatter, TextFormatter};
pub use rules::{RuleDef, RuleScope, BUTTON_WIDGETS, INTERACTIVE_WIDGETS, RULES, REGISTRY_VERSION};
pub use span::SourceSpan;
