//! Token types for the PlayScript lexer.
//!
//! A [`Token`] pairs a [`TokenKind`] classification with the token's text and
//! source [`Position`]. Keywords, separators and operators are classified by
//! kind and told apart by their text.

use play_types::Position;
use std::fmt;

/// Reserved words. Scanned as identifiers, then re-tagged.
pub const KEYWORDS: &[&str] = &["function", "let"];

/// Single-character separators.
pub const SEPARATORS: &[char] = &['(', ')', '{', '}', ';', ',', ':'];

/// Token classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    /// Text is the content between the quotes.
    StringLiteral,
    IntegerLiteral,
    DecimalLiteral,
    NullLiteral,
    BooleanLiteral,
    Separator,
    Operator,
    Eof,
}

impl TokenKind {
    /// Returns `true` for the five literal kinds.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::StringLiteral
                | TokenKind::IntegerLiteral
                | TokenKind::DecimalLiteral
                | TokenKind::NullLiteral
                | TokenKind::BooleanLiteral
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Keyword => "keyword",
            TokenKind::Identifier => "identifier",
            TokenKind::StringLiteral => "string literal",
            TokenKind::IntegerLiteral => "integer literal",
            TokenKind::DecimalLiteral => "decimal literal",
            TokenKind::NullLiteral => "null literal",
            TokenKind::BooleanLiteral => "boolean literal",
            TokenKind::Separator => "separator",
            TokenKind::Operator => "operator",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A single token produced by the tokenizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: Position,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: Position) -> Self {
        Self {
            kind,
            text: text.into(),
            pos,
        }
    }

    /// The end-of-input sentinel at `pos`.
    pub fn eof(pos: Position) -> Self {
        Self::new(TokenKind::Eof, "", pos)
    }

    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    pub fn is_separator(&self, sep: char) -> bool {
        self.kind == TokenKind::Separator && self.text.starts_with(sep)
    }

    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text == op
    }

    /// How the token is named in a diagnostic: `')'`, `"text"` or
    /// `end of input`.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::StringLiteral => format!("\"{}\"", self.text),
            _ => format!("'{}'", self.text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} at {}", self.kind, self.describe(), self.pos)
    }
}
