//! Widget invocation scanning over raw Dart text
//!
//! This is deliberately not a Dart parser. Widget constructs are located by
//! name-plus-paren pattern matching, and their argument spans are computed by
//! depth counting over `(` / `)` rather than by regex, so nested invocations
//! resolve to the outer matching close paren instead of truncating at an
//! inner one. The depth counter ignores parens inside `'...'` and `"..."`
//! string literals (backslash escapes honoured).

use crate::span::SourceSpan;
use regex::Regex;

/// How a widget name may be joined to its argument list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvocationForm {
    /// `Name(` with optional whitespace before the paren
    Plain,
    /// `Name(` with the paren immediately adjacent
    Tight,
    /// `Name(` or `Name.variant(`
    PlainOrVariant,
    /// `Name.variant(` only
    VariantOnly,
}

/// One widget invocation found in the text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    /// Span of the full expression, from the name to its matching close paren
    pub span: SourceSpan,
    /// Byte offset of the opening paren
    pub open_paren: usize,
}

/// Find every `name(...)` invocation in `text` and compute its balanced span.
///
/// Occurrences whose opening paren has no matching close before end of text
/// (truncated or malformed source) are skipped.
pub fn find_constructs(text: &str, name: &str, form: InvocationForm) -> Vec<Occurrence> {
    let pattern = match form {
        InvocationForm::Plain => format!(r"\b{}\s*\(", name),
        InvocationForm::Tight => format!(r"\b{}\(", name),
        InvocationForm::PlainOrVariant => {
            format!(r"\b{}\s*(?:\.\s*[A-Za-z_][A-Za-z0-9_]*\s*)?\(", name)
        }
        InvocationForm::VariantOnly => {
            format!(r"\b{}\s*\.\s*[A-Za-z_][A-Za-z0-9_]*\s*\(", name)
        }
    };

    // Registered names are plain identifiers, so the pattern always compiles.
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return Vec::new(),
    };

    let mut occurrences = Vec::new();
    for m in re.find_iter(text) {
        // The match ends at the opening paren.
        let open = m.end() - 1;
        match matching_close_paren(text, open) {
            Some(close) => occurrences.push(Occurrence {
                span: SourceSpan::new(m.start(), close + 1),
                open_paren: open,
            }),
            None => {
                log::debug!(
                    "skipping unbalanced {} invocation at offset {}",
                    name,
                    m.start()
                );
            }
        }
    }
    occurrences
}

/// Find the close paren matching the open paren at `open`, by depth counting.
///
/// Parens inside string literals do not affect the depth. Returns `None` for
/// unbalanced input or when `open` does not point at `(`.
pub fn matching_close_paren(text: &str, open: usize) -> Option<usize> {
    if text.as_bytes().get(open) != Some(&b'(') {
        return None;
    }

    let mut depth = 0usize;
    let mut in_string: Option<char> = None;
    let mut escaped = false;

    for (idx, ch) in text[open..].char_indices() {
        if let Some(quote) = in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == quote {
                in_string = None;
            }
            continue;
        }
        match ch {
            '\'' | '"' => in_string = Some(ch),
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(open + idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Check whether `token` occurs in `haystack` as a whole identifier.
///
/// `semanticLabelOverride` does not count as `semanticLabel`; a hit adjacent
/// to `[A-Za-z0-9_]` on either side is rejected.
pub fn contains_token(haystack: &str, token: &str) -> bool {
    if token.is_empty() {
        return false;
    }
    let bytes = haystack.as_bytes();
    let mut from = 0;
    while let Some(rel) = haystack[from..].find(token) {
        let start = from + rel;
        let end = start + token.len();
        let before_ok = start == 0 || !is_ident_byte(bytes[start - 1]);
        let after_ok = end == bytes.len() || !is_ident_byte(bytes[end]);
        if before_ok && after_ok {
            return true;
        }
        from = start + 1;
    }
    false
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
