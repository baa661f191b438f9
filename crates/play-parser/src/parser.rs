//! Core parser infrastructure: token cursor, error reporting, helpers.

use play_lexer::{tokenize, Token, TokenKind};
use play_types::ast::{DeclId, Ident, Program};
use play_types::{Diagnostic, Diagnostics, ErrorCode, Position, SourceFile, Span};

/// The PlayScript parser.
///
/// Consumes a token stream produced by the tokenizer and builds an AST.
/// Collects errors and recovers at statement boundaries.
pub struct Parser<'src> {
    /// The token stream, always ending with Eof.
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    source_file: &'src SourceFile,
    errors: Diagnostics,
    /// Next `DeclId` to hand out.
    next_decl: u32,
    /// Current nesting of expression parsing.
    pub(crate) expr_depth: u32,
    /// Cursor of the `}` the last recovery stopped in front of.
    pub(crate) recovered_at: Option<usize>,
}

/// Result of parsing.
pub struct ParseResult {
    /// Always present; statements that failed to parse are error nodes.
    pub program: Program,
    /// Lexical diagnostics first, then syntactic ones.
    pub diagnostics: Diagnostics,
}

/// Tokenize and parse a whole source file.
pub fn parse(source_file: &SourceFile) -> ParseResult {
    let lexed = tokenize(source_file);
    Parser::new(lexed.tokens, source_file)
        .with_diagnostics(lexed.diagnostics)
        .parse()
}

impl<'src> Parser<'src> {
    pub fn new(mut tokens: Vec<Token>, source_file: &'src SourceFile) -> Self {
        if !tokens.last().is_some_and(Token::is_eof) {
            let end = tokens.last().map_or(0, |t| t.pos.end);
            let line = tokens.last().map_or(1, |t| t.pos.line);
            tokens.push(Token::eof(Position::new(end, end, line, 1)));
        }
        Self {
            tokens,
            pos: 0,
            source_file,
            errors: Diagnostics::empty(),
            next_decl: 0,
            expr_depth: 0,
            recovered_at: None,
        }
    }

    /// Continue an existing collection, e.g. the tokenizer's. Its limit
    /// also bounds the parser.
    pub fn with_diagnostics(mut self, diagnostics: Diagnostics) -> Self {
        self.errors = diagnostics;
        self
    }

    /// Parse the token stream into a `Program` AST.
    pub fn parse(mut self) -> ParseResult {
        let program = self.parse_program();
        log::debug!(
            "{}: parsed {} statements, {} declarations, {} errors",
            self.source_file.name,
            program.stmts.len(),
            program.decl_count,
            self.errors.total_errors
        );
        ParseResult {
            program,
            diagnostics: self.errors,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    /// Advance the cursor by one and return the consumed token.
    /// At Eof the cursor stays put.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    /// Index of the current token; compare against a saved value to see
    /// whether anything was consumed.
    pub(crate) fn cursor(&self) -> usize {
        self.pos
    }

    /// Returns the previously consumed token's span.
    pub(crate) fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].pos.span()
        } else {
            Span::default()
        }
    }

    pub(crate) fn current_span(&self) -> Span {
        self.peek().pos.span()
    }

    pub(crate) fn at_end(&self) -> bool {
        self.peek().is_eof()
    }

    pub(crate) fn check_separator(&self, sep: char) -> bool {
        self.peek().is_separator(sep)
    }

    pub(crate) fn check_keyword(&self, word: &str) -> bool {
        self.peek().is_keyword(word)
    }

    pub(crate) fn check_operator(&self, op: &str) -> bool {
        self.peek().is_operator(op)
    }

    /// If the current token is `sep`, advance and return `true`.
    pub(crate) fn eat_separator(&mut self, sep: char) -> bool {
        if self.check_separator(sep) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ── Expect Helpers ────────────────────────────────────────────────────────

    /// Expect a separator. Returns the token if matched, or emits an error.
    pub(crate) fn expect_separator(&mut self, sep: char) -> Option<Token> {
        if self.check_separator(sep) {
            Some(self.advance())
        } else {
            self.error_at_current(
                ErrorCode::UNEXPECTED_TOKEN,
                format!("expected '{sep}', got {}", self.peek().describe()),
            );
            None
        }
    }

    /// Expect an identifier; `what` names it in the error message.
    pub(crate) fn expect_identifier(&mut self, what: &str) -> Option<Ident> {
        if self.peek().kind == TokenKind::Identifier {
            let token = self.advance();
            Some(Ident::new(token.text, token.pos.span()))
        } else {
            self.error_at_current(
                ErrorCode::UNEXPECTED_TOKEN,
                format!("expected {what}, got {}", self.peek().describe()),
            );
            None
        }
    }

    pub(crate) fn alloc_decl_id(&mut self) -> DeclId {
        let id = DeclId(self.next_decl);
        self.next_decl += 1;
        id
    }

    pub(crate) fn decl_count(&self) -> u32 {
        self.next_decl
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    /// Report an error at the current token position.
    pub(crate) fn error_at_current(&mut self, code: ErrorCode, message: impl Into<String>) {
        let span = self.current_span();
        self.error_at(code, message, span);
    }

    /// Report an error at a specific span.
    pub(crate) fn error_at(&mut self, code: ErrorCode, message: impl Into<String>, span: Span) {
        let source_line = self
            .source_file
            .line(span.start_line)
            .unwrap_or("")
            .to_string();
        let error = Diagnostic::new(&self.source_file.name, code, message, span, source_line);
        self.errors.push_error(error);
    }

    /// Returns `true` if we've hit the error limit and should stop.
    pub(crate) fn too_many_errors(&self) -> bool {
        self.errors.is_full()
    }

    // ── Synchronization ───────────────────────────────────────────────────────

    /// Skip tokens until the next statement boundary.
    ///
    /// Stops after a `;` at the current nesting depth, before a `}` that
    /// closes the enclosing block, or after the `}` that closes a block the
    /// abandoned statement opened.
    pub(crate) fn synchronize(&mut self) {
        let mut depth = 0usize;
        while !self.at_end() {
            if self.check_separator('{') {
                depth += 1;
            } else if self.check_separator('}') {
                if depth == 0 {
                    self.recovered_at = Some(self.pos);
                    return;
                }
                depth -= 1;
                if depth == 0 {
                    self.advance();
                    return;
                }
            } else if depth == 0 && self.check_separator(';') {
                self.advance();
                return;
            }
            self.advance();
        }
    }
}
