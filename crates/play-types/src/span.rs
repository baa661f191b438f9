use serde::{Deserialize, Serialize};
use std::fmt;

/// Location of a single token.
///
/// `begin..end` is the half-open byte range in the source; `line` and `col`
/// are 1-based and point at the first character, `end_line` and `end_col`
/// at the last one. Columns count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub begin: usize,
    pub end: usize,
    pub line: u32,
    pub col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

impl Position {
    /// A position on one line whose text is one byte per character.
    pub fn new(begin: usize, end: usize, line: u32, col: u32) -> Self {
        Self {
            begin,
            end,
            line,
            col,
            end_line: line,
            end_col: col + (end - begin).saturating_sub(1) as u32,
        }
    }

    /// Set where the last character sits.
    pub fn ending_at(self, end_line: u32, end_col: u32) -> Self {
        Self {
            end_line,
            end_col,
            ..self
        }
    }

    /// The span covering just this position.
    pub fn span(self) -> Span {
        Span {
            start: self.begin,
            end: self.end,
            start_line: self.line,
            start_col: self.col,
            end_line: self.end_line,
            end_col: self.end_col,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Source location span of an AST node.
///
/// All line/column values are 1-based for human-readable error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    #[serde(rename = "line")]
    pub start_line: u32,
    #[serde(rename = "column")]
    pub start_col: u32,
    pub end_line: u32,
    #[serde(rename = "end_column")]
    pub end_col: u32,
}

impl Span {
    /// Create a zero-width span at a single location.
    pub fn point(offset: usize, line: u32, col: u32) -> Self {
        Self {
            start: offset,
            end: offset,
            start_line: line,
            start_col: col,
            end_line: line,
            end_col: col,
        }
    }

    /// Merge two spans into one that covers both.
    pub fn merge(self, other: Span) -> Span {
        let first = if (self.start_line, self.start_col) <= (other.start_line, other.start_col) {
            self
        } else {
            other
        };
        let last = if (self.end_line, self.end_col) >= (other.end_line, other.end_col) {
            self
        } else {
            other
        };
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            start_line: first.start_line,
            start_col: first.start_col,
            end_line: last.end_line,
            end_col: last.end_col,
        }
    }

    /// Number of source bytes covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl Default for Span {
    fn default() -> Self {
        Span::point(0, 1, 1)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// Holds the source text for error reporting.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub source: String,
    /// Cached line start byte offsets for fast line lookup.
    line_starts: Vec<usize>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        let source = source.into();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self {
            name: name.into(),
            source,
            line_starts,
        }
    }

    /// Extract a source line by 1-based line number.
    ///
    /// Returns `None` if the line number is out of range.
    pub fn line(&self, line_number: u32) -> Option<&str> {
        let idx = line_number.checked_sub(1)? as usize;
        let start = *self.line_starts.get(idx)?;
        let end = self
            .line_starts
            .get(idx + 1)
            .map(|&s| s.saturating_sub(1))
            .unwrap_or(self.source.len());
        Some(self.source[start..end].trim_end_matches('\r'))
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// The source text covered by `span`.
    pub fn slice(&self, span: Span) -> &str {
        self.source.get(span.start..span.end).unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_span() {
        let s = Position::new(4, 12, 1, 5).span();
        assert_eq!(s.start, 4);
        assert_eq!(s.end, 12);
        assert_eq!(s.start_col, 5);
        assert_eq!(s.end_col, 12);
        assert_eq!(s.len(), 8);
    }

    #[test]
    fn test_position_ending_at() {
        let s = Position::new(0, 8, 1, 9).ending_at(1, 12).span();
        assert_eq!((s.start_col, s.end_col), (9, 12));
        assert_eq!(s.len(), 8);
    }

    #[test]
    fn test_span_merge() {
        let a = Position::new(4, 9, 1, 5).span();
        let b = Position::new(20, 25, 2, 3).span();
        let merged = a.merge(b);
        assert_eq!((merged.start, merged.end), (4, 25));
        assert_eq!((merged.start_line, merged.start_col), (1, 5));
        assert_eq!((merged.end_line, merged.end_col), (2, 7));
        assert_eq!(merged, b.merge(a));
    }

    #[test]
    fn test_span_display() {
        let s = Position::new(30, 33, 3, 7).span();
        assert_eq!(format!("{s}"), "3:7");
    }

    #[test]
    fn test_source_file_line_extraction() {
        let src = SourceFile::new("test.play", "line one\nline two\r\nline three");
        assert_eq!(src.line(1), Some("line one"));
        assert_eq!(src.line(2), Some("line two"));
        assert_eq!(src.line(3), Some("line three"));
        assert_eq!(src.line(0), None);
        assert_eq!(src.line(4), None);
        assert_eq!(src.line_count(), 3);
    }

    #[test]
    fn test_source_file_slice() {
        let src = SourceFile::new("test.play", "let a = 3;");
        let span = Position::new(4, 5, 1, 5).span();
        assert_eq!(src.slice(span), "a");
    }
}
