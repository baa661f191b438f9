//! Expression parsing by precedence climbing.
//!
//! Precedence (lowest → highest):
//! 1. `=`, `+=`, `-=`, `*=`, `/=`, `%=` (right-associative)
//! 2. `||`
//! 3. `&&`
//! 4. `==`, `!=`
//! 5. `<`, `>`, `<=`, `>=`
//! 6. `+`, `-`
//! 7. `*`, `/`, `%`
//!
//! Operators that are not binary (`++`, `--`, `!`) end the expression.

use play_lexer::TokenKind;
use play_types::ast::*;
use play_types::{ErrorCode, Literal};

use crate::parser::Parser;

/// Deepest expression nesting the parser accepts.
pub(crate) const MAX_EXPR_DEPTH: u32 = 64;

impl<'src> Parser<'src> {
    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> Option<Expr> {
        self.parse_binary(1)
    }

    /// Parse operands joined by operators binding at least as tight as
    /// `min_prec`.
    fn parse_binary(&mut self, min_prec: u8) -> Option<Expr> {
        self.expr_depth += 1;
        if self.expr_depth > MAX_EXPR_DEPTH {
            self.error_at_current(
                ErrorCode::NESTING_TOO_DEEP,
                format!("maximum expression nesting depth is {MAX_EXPR_DEPTH}"),
            );
            self.expr_depth -= 1;
            return None;
        }
        let result = self.parse_operands(min_prec);
        self.expr_depth -= 1;
        result
    }

    fn parse_operands(&mut self, min_prec: u8) -> Option<Expr> {
        let mut left = self.parse_primary()?;
        while let Some(op) = self.peek_binary_op() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let next_min = if op.is_right_assoc() { prec } else { prec + 1 };
            let right = self.parse_binary(next_min)?;
            if op.is_assignment() {
                left.should_be_left_value = true;
            }
            let span = left.span.merge(right.span);
            left = Expr::new(
                ExprKind::Binary(Binary {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                }),
                span,
            );
        }
        Some(left)
    }

    fn peek_binary_op(&self) -> Option<BinaryOp> {
        let token = self.peek();
        if token.kind != TokenKind::Operator {
            return None;
        }
        BinaryOp::from_operator(&token.text)
    }

    /// ```text
    /// primary := StringLiteral | IntegerLiteral | DecimalLiteral
    ///          | BooleanLiteral | NullLiteral | '(' expression ')'
    ///          | functionCall | Identifier
    /// ```
    fn parse_primary(&mut self) -> Option<Expr> {
        let token = self.peek().clone();
        let span = token.pos.span();
        let literal = match token.kind {
            TokenKind::StringLiteral => Literal::String(token.text),
            TokenKind::IntegerLiteral => match token.text.parse::<i64>() {
                Ok(n) => Literal::Integer(n),
                Err(_) => {
                    self.error_at_current(
                        ErrorCode::UNEXPECTED_TOKEN,
                        format!("integer literal '{}' is out of range", token.text),
                    );
                    return None;
                }
            },
            TokenKind::DecimalLiteral => match token.text.parse::<f64>() {
                Ok(n) => Literal::Decimal(n),
                Err(_) => {
                    self.error_at_current(
                        ErrorCode::UNEXPECTED_TOKEN,
                        format!("invalid decimal literal '{}'", token.text),
                    );
                    return None;
                }
            },
            TokenKind::BooleanLiteral => Literal::Boolean(token.text == "true"),
            TokenKind::NullLiteral => Literal::Null,
            TokenKind::Separator if token.is_separator('(') => {
                self.advance();
                let mut inner = self.parse_expression()?;
                let close = self.expect_separator(')')?;
                inner.span = span.merge(close.pos.span());
                return Some(inner);
            }
            TokenKind::Identifier => {
                self.advance();
                let name = Ident::new(token.text, span);
                if self.check_separator('(') {
                    return self.parse_call(name);
                }
                return Some(Expr::new(ExprKind::Variable(Variable::new(name.name)), span));
            }
            _ => {
                self.error_at_current(
                    ErrorCode::EXPECTED_EXPRESSION,
                    format!("expected expression, got {}", token.describe()),
                );
                return None;
            }
        };
        self.advance();
        Some(Expr::new(ExprKind::Literal(literal), span))
    }

    /// `functionCall := Identifier '(' (expression (',' expression)*)? ')'`
    fn parse_call(&mut self, name: Ident) -> Option<Expr> {
        self.advance(); // '('
        let mut args = Vec::new();
        if !self.check_separator(')') {
            loop {
                args.push(self.parse_expression()?);
                if !self.eat_separator(',') {
                    break;
                }
            }
        }
        let close = self.expect_separator(')')?;
        let span = name.span.merge(close.pos.span());
        Some(Expr::new(ExprKind::Call(FunctionCall::new(name, args)), span))
    }
}
