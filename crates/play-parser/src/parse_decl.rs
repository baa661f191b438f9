//! Declaration parsing: variables, functions and their signatures.

use crate::parser::Parser;
use play_types::ast::*;

impl<'src> Parser<'src> {
    /// `variableDecl := 'let' Identifier (':' Identifier)? ('=' expression)? ';'`
    pub(crate) fn parse_variable_decl(&mut self) -> Option<VariableDecl> {
        let start = self.advance().pos.span(); // 'let'
        let mut decl = self.parse_variable_binding("variable name")?;
        let semi = self.expect_separator(';')?;
        decl.span = start.merge(semi.pos.span());
        Some(decl)
    }

    /// The part shared by `let` statements and parameters:
    /// `Identifier (':' Identifier)? ('=' expression)?`
    fn parse_variable_binding(&mut self, what: &str) -> Option<VariableDecl> {
        let name = self.expect_identifier(what)?;
        let id = self.alloc_decl_id();
        let type_ann = if self.eat_separator(':') {
            Some(self.expect_identifier("type name")?)
        } else {
            None
        };
        let init = if self.check_operator("=") {
            self.advance();
            Some(self.parse_expression()?)
        } else {
            None
        };
        Some(VariableDecl {
            id,
            span: name.span.merge(self.previous_span()),
            name,
            type_ann,
            init,
            inferred_type: Default::default(),
        })
    }

    /// `functionDecl := 'function' Identifier '(' parameterList? ')' (':' Identifier)? block`
    pub(crate) fn parse_function_decl(&mut self) -> Option<FunctionDecl> {
        let start = self.advance().pos.span(); // 'function'
        let name = self.expect_identifier("function name")?;
        let id = self.alloc_decl_id();
        let signature = self.parse_call_signature()?;
        let body = self.parse_block()?;
        Some(FunctionDecl {
            id,
            name,
            signature,
            span: start.merge(body.span),
            body,
        })
    }

    fn parse_call_signature(&mut self) -> Option<CallSignature> {
        let open = self.expect_separator('(')?.pos.span();
        let mut params = Vec::new();
        if !self.check_separator(')') {
            loop {
                params.push(self.parse_variable_binding("parameter name")?);
                if !self.eat_separator(',') {
                    break;
                }
            }
        }
        let close = self.expect_separator(')')?.pos.span();
        let params = ParameterList {
            params,
            span: open.merge(close),
        };
        let return_type = if self.eat_separator(':') {
            Some(self.expect_identifier("return type name")?)
        } else {
            None
        };
        Some(CallSignature {
            params,
            return_type,
            span: open.merge(self.previous_span()),
        })
    }
}
