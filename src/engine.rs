//! Rule engine: detect accessibility violations in widget-tree source
//!
//! `detect` is a pure function of the text. It holds no state between calls,
//! never panics, and yields the same violations in the same order for the
//! same input, so hosts may invoke it from any thread at any cadence.

use crate::diagnostic::Violation;
use crate::rules::{
    message_for, RuleScope, BUTTON_WIDGETS, IMAGE_WIDGET, INTERACTIVE_WIDGETS, RULES,
    SEMANTICS_WIDGET,
};
use crate::scanner::{contains_token, find_constructs, InvocationForm, Occurrence};
use crate::span::SourceSpan;

/// Scan `text` for accessibility violations.
///
/// Output is eager and deterministic, ordered by ascending span start, then
/// span end, then rule id. Empty text, unbalanced parens, and text with no
/// registered widgets all yield an empty vector.
pub fn detect(text: &str) -> Vec<Violation> {
    let mut violations = Vec::new();
    if text.is_empty() {
        return violations;
    }

    // Spans of Semantics(...) wrappers; widgets nested inside one are
    // already annotated.
    let wrapper_spans: Vec<SourceSpan> =
        find_constructs(text, SEMANTICS_WIDGET, InvocationForm::Plain)
            .into_iter()
            .map(|o| o.span)
            .collect();

    for rule in RULES {
        match rule.scope {
            RuleScope::AllWidgets => {
                for widget in INTERACTIVE_WIDGETS {
                    // Image is also invoked through named constructors
                    // (Image.asset, Image.network, ...).
                    let form = if *widget == IMAGE_WIDGET {
                        InvocationForm::PlainOrVariant
                    } else {
                        InvocationForm::Plain
                    };
                    for occ in find_constructs(text, widget, form) {
                        if satisfied(text, &occ, rule.required_token)
                            || is_wrapped(&occ, &wrapper_spans)
                        {
                            continue;
                        }
                        violations.push(Violation::new(
                            rule.id,
                            rule.severity,
                            &message_for(rule.id, widget),
                            occ.span,
                        ));
                    }
                }
            }
            RuleScope::ImageVariants => {
                for occ in find_constructs(text, IMAGE_WIDGET, InvocationForm::VariantOnly) {
                    if !satisfied(text, &occ, rule.required_token) {
                        violations.push(Violation::new(
                            rule.id,
                            rule.severity,
                            &message_for(rule.id, IMAGE_WIDGET),
                            occ.span,
                        ));
                    }
                }
            }
            RuleScope::Buttons => {
                for widget in BUTTON_WIDGETS {
                    for occ in find_constructs(text, widget, InvocationForm::Tight) {
                        if !satisfied(text, &occ, rule.required_token) {
                            violations.push(Violation::new(
                                rule.id,
                                rule.severity,
                                &message_for(rule.id, widget),
                                occ.span,
                            ));
                        }
                    }
                }
            }
        }
    }

    violations.sort_by(|a, b| {
        a.span
            .start
            .cmp(&b.span.start)
            .then(a.span.end.cmp(&b.span.end))
            .then(a.rule_id.as_str().cmp(b.rule_id.as_str()))
    });
    violations
}

/// Check whether the required token appears inside the occurrence span.
fn satisfied(text: &str, occ: &Occurrence, token: &str) -> bool {
    occ.span
        .slice(text)
        .is_some_and(|span_text| contains_token(span_text, token))
}

/// Check whether the occurrence sits inside a Semantics wrapper.
fn is_wrapped(occ: &Occurrence, wrapper_spans: &[SourceSpan]) -> bool {
    wrapper_spans.iter().any(|w| w.encloses(&occ.span))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::{RuleId, Severity, SOURCE_TAG};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_text() {
        assert!(detect("").is_empty());
    }

    #[test]
    fn test_no_registered_widgets() {
        let text = "final x = Container(child: Text('plain'));";
        assert!(detect(text).is_empty());
    }

    #[test]
    fn test_gesture_detector_unwrapped() {
        let text = "GestureDetector(onTap: () {})";
        let violations = detect(text);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, RuleId::MissingSemantics);
        assert_eq!(violations[0].severity, Severity::Warning);
        assert_eq!(violations[0].span.slice(text), Some(text));
        assert_eq!(violations[0].source, SOURCE_TAG);
    }

    #[test]
    fn test_wrapped_in_semantics_is_clean() {
        let text = "Semantics(label: 'x', child: GestureDetector(onTap: () {}))";
        assert!(detect(text).is_empty());
    }

    #[test]
    fn test_widget_wrapping_its_child_in_semantics_is_clean() {
        let text = "InkWell(onTap: f, child: Semantics(label: 'x', child: icon))";
        assert!(detect(text).is_empty());
    }

    #[test]
    fn test_image_asset_two_violations() {
        let text = "Image.asset('a.png')";
        let violations = detect(text);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].rule_id, RuleId::MissingSemanticLabel);
        assert_eq!(violations[1].rule_id, RuleId::MissingSemantics);
        for v in &violations {
            assert_eq!(v.span.slice(text), Some(text));
            assert_eq!(v.severity, Severity::Warning);
        }
    }

    #[test]
    fn test_image_with_semantic_label_still_needs_wrapper() {
        let text = "Image.asset('a.png', semanticLabel: 'logo')";
        let violations = detect(text);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, RuleId::MissingSemantics);
    }

    #[test]
    fn test_semantic_label_lookalike_does_not_satisfy() {
        let text = "Image.asset('a.png', semanticLabelOverride: 'x')";
        let rule_ids: Vec<_> = detect(text).iter().map(|v| v.rule_id).collect();
        assert!(rule_ids.contains(&RuleId::MissingSemanticLabel));
    }

    #[test]
    fn test_button_without_onpressed() {
        let text = "TextButton(child: Text('Go'))";
        let violations = detect(text);
        assert_eq!(violations.len(), 2);
        // Same span, ordered by rule id.
        assert_eq!(violations[0].rule_id, RuleId::MissingOnpressed);
        assert_eq!(violations[0].severity, Severity::Error);
        assert_eq!(violations[1].rule_id, RuleId::MissingSemantics);
        assert_eq!(violations[1].severity, Severity::Warning);
        assert_eq!(violations[0].span, violations[1].span);
        assert_eq!(violations[0].span.slice(text), Some(text));
    }

    #[test]
    fn test_button_with_onpressed_only_needs_semantics() {
        let text = "ElevatedButton(onPressed: submit, child: Text('Go'))";
        let violations = detect(text);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, RuleId::MissingSemantics);
    }

    #[test]
    fn test_outlined_button_only_checked_for_onpressed() {
        // OutlinedButton is in the button registry but not the interactive
        // registry, matching the upstream widget lists.
        let text = "OutlinedButton(child: Text('Go'))";
        let violations = detect(text);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, RuleId::MissingOnpressed);
    }

    #[test]
    fn test_nested_widgets_report_outer_and_inner() {
        let text = "InkWell(child: Switch(value: v, onChanged: f))";
        let violations = detect(text);
        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].span.slice(text), Some(text));
        assert_eq!(
            violations[1].span.slice(text),
            Some("Switch(value: v, onChanged: f)")
        );
    }

    #[test]
    fn test_outer_span_not_truncated_by_inner_close_paren() {
        let text = "GestureDetector(onTap: () {}, child: Text('x'))";
        let violations = detect(text);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].span.slice(text), Some(text));
    }

    #[test]
    fn test_multiple_occurrences_same_widget() {
        let text = "Row(children: [Checkbox(value: a, onChanged: f), Checkbox(value: b, onChanged: g)])";
        let violations = detect(text);
        assert_eq!(violations.len(), 2);
        assert!(violations[0].span.start < violations[1].span.start);
    }

    #[test]
    fn test_unbalanced_text_does_not_panic() {
        let text = "TextField(((('";
        assert!(detect(text).is_empty());
        let text = ")))(((TextButton(";
        assert!(detect(text).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let text = "Column(children: [Image.asset('a.png'), TextButton(child: Text('x')), Slider(value: 0.0)])";
        let first = detect(text);
        let second = detect(text);
        assert_eq!(first, second);
        let starts: Vec<_> = first.iter().map(|v| v.span.start).collect();
        let mut sorted = starts.clone();
        sorted.sort_unstable();
        assert_eq!(starts, sorted);
    }

    #[test]
    fn test_only_onpressed_violations_are_errors() {
        let text = "Column(children: [Image.asset('a.png'), IconButton(icon: i), GestureDetector(onTap: f)])";
        for v in detect(text) {
            if v.rule_id == RuleId::MissingOnpressed {
                assert_eq!(v.severity, Severity::Error);
            } else {
                assert_eq!(v.severity, Severity::Warning);
            }
        }
    }

    #[test]
    fn test_wrapped_image_still_reports_missing_label() {
        let text = "Semantics(label: 'pic', child: Image.asset('a.png'))";
        let violations = detect(text);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].rule_id, RuleId::MissingSemanticLabel);
    }
}
