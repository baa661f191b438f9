//! Character cursor over source text.

use play_types::Position;

/// Walks source text one `char` at a time, tracking the byte offset and a
/// 1-based line/column for diagnostics.
#[derive(Debug, Clone)]
pub struct CharStream<'src> {
    source: &'src str,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'src> CharStream<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// The next character, without consuming it. `None` at end of input.
    pub fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    /// The character after [`peek`](Self::peek).
    pub fn peek_second(&self) -> Option<char> {
        let mut chars = self.source[self.pos..].chars();
        chars.next();
        chars.next()
    }

    /// Consume one character.
    ///
    /// A newline moves to column 1 of the next line; anything else advances
    /// the column.
    pub fn next(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    /// Zero-width position at the cursor.
    pub fn position(&self) -> Position {
        Position::new(self.pos, self.pos, self.line, self.col)
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Current byte offset.
    pub fn offset(&self) -> usize {
        self.pos
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn col(&self) -> u32 {
        self.col
    }

    /// Source text between `begin` and the current offset.
    pub fn slice_from(&self, begin: usize) -> &'src str {
        &self.source[begin..self.pos]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peek_does_not_consume() {
        let stream = CharStream::new("ab");
        assert_eq!(stream.peek(), Some('a'));
        assert_eq!(stream.peek(), Some('a'));
        assert_eq!(stream.peek_second(), Some('b'));
    }

    #[test]
    fn test_next_tracks_lines_and_columns() {
        let mut stream = CharStream::new("a\nbc");
        assert_eq!((stream.line(), stream.col()), (1, 1));
        stream.next();
        assert_eq!((stream.line(), stream.col()), (1, 2));
        assert_eq!(stream.next(), Some('\n'));
        assert_eq!((stream.line(), stream.col()), (2, 1));
        stream.next();
        assert_eq!((stream.line(), stream.col()), (2, 2));
        assert_eq!(stream.offset(), 3);
        assert_eq!(stream.position(), Position::new(3, 3, 2, 2));
    }

    #[test]
    fn test_eof_sentinel() {
        let mut stream = CharStream::new("x");
        assert!(!stream.eof());
        stream.next();
        assert!(stream.eof());
        assert_eq!(stream.peek(), None);
        assert_eq!(stream.next(), None);
        assert_eq!(stream.offset(), 1);
    }

    #[test]
    fn test_multibyte_offsets() {
        let mut stream = CharStream::new("é1");
        stream.next();
        assert_eq!(stream.offset(), 2);
        assert_eq!(stream.col(), 2);
        assert_eq!(stream.slice_from(0), "é");
    }
}
