//! PlayScript tokenizer: converts a character stream into tokens.
//!
//! - Identifiers, with `function`/`let` re-tagged as keywords and
//!   `true`/`false`/`null` as literals
//! - Integer and decimal literals, double-quoted strings without escapes
//! - Greedy two-character operators
//! - `//` and `/* */` comments skipped
//! - Errors never stop scanning: the bad input is skipped and a diagnostic
//!   is recorded

use play_types::{Diagnostic, Diagnostics, ErrorCode, Position, SourceFile};

use crate::char_stream::CharStream;
use crate::token::{Token, TokenKind, KEYWORDS, SEPARATORS};

/// Streaming tokenizer with a one-token lookahead buffer.
///
/// Once input is exhausted every further call returns the EOF sentinel.
pub struct Tokenizer<'src> {
    stream: CharStream<'src>,
    source_file: &'src SourceFile,
    /// Token scanned by `peek` but not yet handed out by `next`.
    lookahead: Option<Token>,
    errors: Diagnostics,
}

/// Result of tokenizing a whole file.
pub struct LexResult {
    /// Always ends with exactly one [`TokenKind::Eof`].
    pub tokens: Vec<Token>,
    pub diagnostics: Diagnostics,
}

/// Tokenize a whole source file.
pub fn tokenize(source_file: &SourceFile) -> LexResult {
    let mut tokenizer = Tokenizer::new(source_file);
    let mut tokens = Vec::new();
    loop {
        let token = tokenizer.next();
        let is_eof = token.is_eof();
        tokens.push(token);
        if is_eof {
            break;
        }
    }
    let diagnostics = tokenizer.into_diagnostics();
    log::debug!(
        "{}: {} tokens, {} lexical errors",
        source_file.name,
        tokens.len(),
        diagnostics.total_errors
    );
    LexResult {
        tokens,
        diagnostics,
    }
}

impl<'src> Tokenizer<'src> {
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            stream: CharStream::new(&source_file.source),
            source_file,
            lookahead: None,
            errors: Diagnostics::empty(),
        }
    }

    /// The next token, without consuming it.
    pub fn peek(&mut self) -> &Token {
        let token = match self.lookahead.take() {
            Some(token) => token,
            None => self.scan(),
        };
        self.lookahead.insert(token)
    }

    /// Consume and return the next token.
    pub fn next(&mut self) -> Token {
        match self.lookahead.take() {
            Some(token) => token,
            None => self.scan(),
        }
    }

    /// Lexical diagnostics reported so far.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.errors
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.errors
    }

    fn emit_error(&mut self, code: ErrorCode, message: impl Into<String>, at: Position) {
        let source_line = self.source_file.line(at.line).unwrap_or("").to_string();
        let error = Diagnostic::new(&self.source_file.name, code, message, at.span(), source_line);
        self.errors.push_error(error);
    }

    /// The position from `start` up to the cursor.
    fn finish(&self, start: Position) -> Position {
        let end = self.stream.offset();
        let (end_line, end_col) = if end == start.begin {
            (start.line, start.col)
        } else {
            (self.stream.line(), self.stream.col().saturating_sub(1).max(1))
        };
        Position { end, ..start }.ending_at(end_line, end_col)
    }

    fn scan(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            let start = self.stream.position();
            let Some(ch) = self.stream.peek() else {
                return Token::eof(start);
            };

            if ch.is_ascii_alphabetic() {
                return self.scan_identifier(start);
            }
            if ch.is_ascii_digit() {
                return self.scan_number(start);
            }
            if ch == '"' {
                return self.scan_string(start);
            }
            if SEPARATORS.contains(&ch) {
                self.stream.next();
                return Token::new(TokenKind::Separator, ch, self.finish(start));
            }
            if ch == '/' && self.skip_comment(start) {
                continue;
            }
            if let Some(token) = self.scan_operator(start) {
                return token;
            }

            self.stream.next();
            self.emit_error(
                ErrorCode::UNEXPECTED_CHARACTER,
                format!("unexpected character '{ch}' at {start}"),
                self.finish(start),
            );
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\n' | '\r') = self.stream.peek() {
            self.stream.next();
        }
    }

    /// Skip a comment starting at `/`. Returns `false`, consuming nothing,
    /// when the `/` is an operator.
    fn skip_comment(&mut self, start: Position) -> bool {
        match self.stream.peek_second() {
            Some('/') => {
                while let Some(ch) = self.stream.next() {
                    if ch == '\n' {
                        break;
                    }
                }
                true
            }
            Some('*') => {
                self.stream.next();
                self.stream.next();
                let mut prev = '\0';
                loop {
                    match self.stream.next() {
                        Some('/') if prev == '*' => return true,
                        Some(ch) => prev = ch,
                        None => {
                            self.emit_error(
                                ErrorCode::UNTERMINATED_COMMENT,
                                format!("unterminated block comment starting at {start}"),
                                Position::new(start.begin, start.begin + 2, start.line, start.col),
                            );
                            return true;
                        }
                    }
                }
            }
            _ => false,
        }
    }

    fn scan_identifier(&mut self, start: Position) -> Token {
        while let Some(ch) = self.stream.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                self.stream.next();
            } else {
                break;
            }
        }
        let text = self.stream.slice_from(start.begin);
        let kind = match text {
            "true" | "false" => TokenKind::BooleanLiteral,
            "null" => TokenKind::NullLiteral,
            _ if KEYWORDS.contains(&text) => TokenKind::Keyword,
            _ => TokenKind::Identifier,
        };
        Token::new(kind, text, self.finish(start))
    }

    fn scan_number(&mut self, start: Position) -> Token {
        self.skip_digits();
        let mut kind = TokenKind::IntegerLiteral;
        if self.stream.peek() == Some('.')
            && self.stream.peek_second().is_some_and(|c| c.is_ascii_digit())
        {
            self.stream.next();
            self.skip_digits();
            kind = TokenKind::DecimalLiteral;
        }
        let text = self.stream.slice_from(start.begin);
        Token::new(kind, text, self.finish(start))
    }

    fn skip_digits(&mut self) {
        while self.stream.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.stream.next();
        }
    }

    fn scan_string(&mut self, start: Position) -> Token {
        self.stream.next(); // opening quote
        let content_start = self.stream.offset();
        loop {
            match self.stream.peek() {
                Some('"') => {
                    let text = self.stream.slice_from(content_start);
                    self.stream.next();
                    return Token::new(TokenKind::StringLiteral, text, self.finish(start));
                }
                Some(_) => {
                    self.stream.next();
                }
                None => {
                    let text = self.stream.slice_from(content_start);
                    let pos = self.finish(start);
                    self.emit_error(
                        ErrorCode::UNTERMINATED_STRING,
                        format!("unterminated string literal starting at {start}"),
                        pos,
                    );
                    return Token::new(TokenKind::StringLiteral, text, pos);
                }
            }
        }
    }

    /// Greedy operator match: a second character is taken whenever the pair
    /// forms an operator.
    fn scan_operator(&mut self, start: Position) -> Option<Token> {
        let first = self.stream.peek()?;
        let second = self.stream.peek_second();
        let pair = second.is_some_and(|second| is_operator_pair(first, second));
        if !pair && !is_single_operator(first) {
            return None;
        }
        self.stream.next();
        if pair {
            self.stream.next();
        }
        let text = self.stream.slice_from(start.begin);
        Some(Token::new(TokenKind::Operator, text, self.finish(start)))
    }
}

fn is_single_operator(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/' | '%' | '=' | '!' | '<' | '>')
}

fn is_operator_pair(first: char, second: char) -> bool {
    matches!(
        (first, second),
        ('+', '+' | '=')
            | ('-', '-' | '=')
            | ('*' | '/' | '%' | '=' | '!' | '<' | '>', '=')
            | ('&', '&')
            | ('|', '|')
    )
}
