//! Source spans for diagnostics and edits

use serde::{Deserialize, Serialize};

/// A half-open byte range `[start, end)` into one document's text.
///
/// Spans are computed against a single text snapshot and become stale as soon
/// as that text changes; callers must recompute rather than reuse them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct SourceSpan {
    /// Byte offset of the first character
    pub start: usize,
    /// Byte offset one past the last character
    pub end: usize,
}

impl SourceSpan {
    /// Create a new span. Callers must ensure `start <= end`.
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// A zero-length span at `offset` (used for pure insertions).
    pub fn at(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Length in bytes
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Check if the span is zero-length
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Check if this span contains the byte offset
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.start && offset < self.end
    }

    /// Check if this span fully encloses another
    pub fn encloses(&self, other: &SourceSpan) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Check if this span overlaps another (half-open semantics)
    pub fn intersects(&self, other: &SourceSpan) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Extract the spanned text, re-validating against the given snapshot.
    ///
    /// Returns `None` when the span is out of bounds or does not fall on
    /// UTF-8 character boundaries, i.e. when it was computed against a
    /// different text version.
    pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        if self.start > self.end {
            return None;
        }
        text.get(self.start..self.end)
    }
}

/// Convert a byte offset to a 1-based (line, column) pair.
///
/// Column counts characters, not bytes. Offsets past the end of text clamp to
/// the final position.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (idx, ch) in text.char_indices() {
        if idx >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// The full source line containing `offset`, without its trailing newline.
pub fn line_at(text: &str, offset: usize) -> &str {
    let offset = offset.min(text.len());
    let start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = text[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(text.len());
    &text[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_basics() {
        let span = SourceSpan::new(2, 5);
        assert_eq!(span.len(), 3);
        assert!(!span.is_empty());
        assert!(span.contains(2));
        assert!(span.contains(4));
        assert!(!span.contains(5));
    }

    #[test]
    fn test_span_at_is_empty() {
        let span = SourceSpan::at(7);
        assert!(span.is_empty());
        assert_eq!(span.len(), 0);
    }

    #[test]
    fn test_span_encloses() {
        let outer = SourceSpan::new(0, 10);
        let inner = SourceSpan::new(3, 7);
        assert!(outer.encloses(&inner));
        assert!(!inner.encloses(&outer));
        assert!(outer.encloses(&outer));
    }

    #[test]
    fn test_span_intersects() {
        let a = SourceSpan::new(0, 5);
        let b = SourceSpan::new(4, 9);
        let c = SourceSpan::new(5, 9);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_slice_valid() {
        let text = "TextButton(child: x)";
        let span = SourceSpan::new(0, 10);
        assert_eq!(span.slice(text), Some("TextButton"));
    }

    #[test]
    fn test_slice_out_of_bounds() {
        let text = "short";
        let span = SourceSpan::new(0, 100);
        assert_eq!(span.slice(text), None);
    }

    #[test]
    fn test_slice_inverted() {
        let span = SourceSpan { start: 5, end: 2 };
        assert_eq!(span.slice("some text"), None);
    }

    #[test]
    fn test_slice_non_boundary() {
        let text = "Text('héllo')";
        // Offset lands inside the two-byte 'é'
        let bad = SourceSpan::new(0, 8);
        assert_eq!(bad.slice(text), None);
    }

    #[test]
    fn test_line_col() {
        let text = "first\nsecond\nthird";
        assert_eq!(line_col(text, 0), (1, 1));
        assert_eq!(line_col(text, 6), (2, 1));
        assert_eq!(line_col(text, 8), (2, 3));
        assert_eq!(line_col(text, 13), (3, 1));
    }

    #[test]
    fn test_line_col_past_end() {
        let text = "ab";
        assert_eq!(line_col(text, 100), (1, 3));
    }

    #[test]
    fn test_line_at() {
        let text = "first\nsecond\nthird";
        assert_eq!(line_at(text, 0), "first");
        assert_eq!(line_at(text, 8), "second");
        assert_eq!(line_at(text, 17), "third");
    }
}
