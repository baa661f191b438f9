//! Statement parsing: program, blocks, and statement-level recovery.

use crate::parser::Parser;
use play_types::ast::*;
use play_types::ErrorCode;

impl<'src> Parser<'src> {
    /// `program := statement* EOF`
    pub(crate) fn parse_program(&mut self) -> Program {
        let start = self.current_span();
        let mut stmts = Vec::new();
        while !self.at_end() {
            if self.too_many_errors() {
                break;
            }
            if self.check_separator('}') {
                // Already reported by the statement that stopped here.
                if self.recovered_at == Some(self.cursor()) {
                    self.advance();
                    continue;
                }
                self.error_at_current(
                    ErrorCode::UNEXPECTED_TOKEN,
                    "expected statement, got '}' outside of a block",
                );
                self.advance();
                continue;
            }
            stmts.push(self.parse_statement_or_recover());
        }
        let span = if stmts.is_empty() {
            start
        } else {
            start.merge(self.previous_span())
        };
        Program {
            stmts,
            decl_count: self.decl_count(),
            span,
        }
    }

    /// Parse a block of statements: `{ stmts... }`
    pub(crate) fn parse_block(&mut self) -> Option<Block> {
        let open = self.expect_separator('{')?;
        let mut stmts = Vec::new();
        while !self.check_separator('}') {
            if self.at_end() {
                self.error_at(
                    ErrorCode::UNCLOSED_BLOCK,
                    format!("expected '}}' to close the block opened at {}, got end of input", open.pos),
                    open.pos.span(),
                );
                return None;
            }
            if self.too_many_errors() {
                return None;
            }
            stmts.push(self.parse_statement_or_recover());
        }
        let close = self.advance();
        Some(Block {
            stmts,
            span: open.pos.span().merge(close.pos.span()),
        })
    }

    /// Parse one statement. On failure, skip to the next statement boundary
    /// and return an error node covering what was skipped.
    fn parse_statement_or_recover(&mut self) -> Stmt {
        let start = self.current_span();
        let start_cursor = self.cursor();
        if let Some(stmt) = self.parse_statement() {
            return stmt;
        }
        self.synchronize();
        let span = if self.cursor() > start_cursor {
            start.merge(self.previous_span())
        } else {
            start
        };
        Stmt::Error(ErrorStmt { span })
    }

    /// `statement := variableDecl | functionDecl | expressionStatement`
    fn parse_statement(&mut self) -> Option<Stmt> {
        if self.check_keyword("let") {
            return self.parse_variable_decl().map(Stmt::Variable);
        }
        if self.check_keyword("function") {
            return self.parse_function_decl().map(Stmt::Function);
        }
        self.parse_expression_statement().map(Stmt::Expr)
    }

    /// `expressionStatement := expression ';'`
    fn parse_expression_statement(&mut self) -> Option<ExprStmt> {
        let expr = self.parse_expression()?;
        let semi = self.expect_separator(';')?;
        Some(ExprStmt {
            span: expr.span.merge(semi.pos.span()),
            expr,
        })
    }
}
