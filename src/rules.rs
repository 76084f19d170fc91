//! Static rule registry
//!
//! The rule table and widget name lists are versioned constants, not user
//! configuration. Hosts can disable rules per invocation but cannot add
//! widgets or change what a rule looks for.

use crate::diagnostic::{RuleId, Severity};

/// Registry version, bumped whenever the widget tables change
pub const REGISTRY_VERSION: &str = "1";

/// Scope a rule scans
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleScope {
    /// Every registered interactive or content widget
    AllWidgets,
    /// Only `Image.<variant>(...)` invocations
    ImageVariants,
    /// Only button-like widgets
    Buttons,
}

/// A lint rule definition
#[derive(Debug, Clone, Copy)]
pub struct RuleDef {
    /// Rule identity
    pub id: RuleId,
    /// Default severity
    pub severity: Severity,
    /// Token whose absence inside the widget span triggers the rule
    pub required_token: &'static str,
    /// What the rule scans
    pub scope: RuleScope,
    /// Short description for `--list-rules`
    pub description: &'static str,
}

/// All rules, in registry order
pub const RULES: &[RuleDef] = &[
    RuleDef {
        id: RuleId::MissingSemantics,
        severity: Severity::Warning,
        required_token: "Semantics",
        scope: RuleScope::AllWidgets,
        description: "Interactive widgets should be wrapped in Semantics for accessibility",
    },
    RuleDef {
        id: RuleId::MissingSemanticLabel,
        severity: Severity::Warning,
        required_token: "semanticLabel",
        scope: RuleScope::ImageVariants,
        description: "Images should have a semanticLabel for screen readers",
    },
    RuleDef {
        id: RuleId::MissingOnpressed,
        severity: Severity::Error,
        required_token: "onPressed",
        scope: RuleScope::Buttons,
        description: "Buttons without an onPressed callback are unreachable via screen readers",
    },
];

/// Widgets that are interactive or carry content and therefore need semantics
pub const INTERACTIVE_WIDGETS: &[&str] = &[
    "GestureDetector",
    "InkWell",
    "TextButton",
    "ElevatedButton",
    "IconButton",
    "FloatingActionButton",
    "Image",
    "TextField",
    "Switch",
    "Checkbox",
    "Radio",
    "Slider",
    "ListTile",
];

/// Button-like widgets that need an onPressed callback
pub const BUTTON_WIDGETS: &[&str] = &[
    "TextButton",
    "ElevatedButton",
    "OutlinedButton",
    "IconButton",
];

/// The accessibility wrapper widget
pub const SEMANTICS_WIDGET: &str = "Semantics";

/// The image widget; matched both plain and through named variants
pub const IMAGE_WIDGET: &str = "Image";

/// Message for a violation of `id` on the widget named `widget`
pub fn message_for(id: RuleId, widget: &str) -> String {
    match id {
        RuleId::MissingSemantics => {
            format!("{} should be wrapped in Semantics for accessibility", widget)
        }
        RuleId::MissingSemanticLabel => {
            "Image should have a semanticLabel for screen readers".to_string()
        }
        RuleId::MissingOnpressed => {
            "Button missing onPressed callback - inaccessible to screen readers".to_string()
        }
    }
}
