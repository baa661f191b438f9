//! Reference resolution: the second semantic pass.
//!
//! Binds every `Variable` and `FunctionCall` to the declaration its name
//! denotes, searching from the innermost enclosing scope outward.
//!
//! Error codes emitted:
//! - E300: name not found
//! - E302: called name is not a function
//! - E303: referenced name is not a variable
//! - E304: too many arguments
//! - E305: assignment to something that is not a variable

use play_types::ast::*;
use play_types::visit::{walk_binary, walk_function_call, walk_function_decl, Visitor};
use play_types::{Diagnostics, ErrorCode, SourceFile, Span};

use crate::report;
use crate::scope::{ScopeId, SymbolKind, SymbolTable};

/// The only builtin. Resolves without a declaration unless a user
/// declaration of the same name is in scope.
pub const PRINTLN: &str = "println";

pub struct RefResolver<'a> {
    symbols: &'a SymbolTable,
    errors: &'a mut Diagnostics,
    source: &'a SourceFile,
}

impl<'a> RefResolver<'a> {
    pub fn new(
        symbols: &'a SymbolTable,
        errors: &'a mut Diagnostics,
        source: &'a SourceFile,
    ) -> Self {
        Self {
            symbols,
            errors,
            source,
        }
    }

    pub fn run(&mut self, program: &Program) {
        self.visit_program(program, ScopeId::ROOT);
    }

    fn error(&mut self, code: ErrorCode, message: String, span: Span) {
        report(self.errors, self.source, code, message, span);
    }
}

impl<'ast> Visitor<'ast> for RefResolver<'_> {
    type Output = ();
    type Extra = ScopeId;

    fn empty(&mut self) {}

    fn visit_function_decl(&mut self, decl: &'ast FunctionDecl, scope: ScopeId) {
        let inner = self.symbols.function_scope(decl.id).unwrap_or(scope);
        walk_function_decl(self, decl, inner);
    }

    fn visit_variable(&mut self, variable: &'ast Variable, expr: &'ast Expr, scope: ScopeId) {
        let symbols = self.symbols;
        match symbols.lookup(scope, &variable.name) {
            Some(symbol) if symbol.kind == SymbolKind::Variable => {
                log::trace!("resolve variable {} -> {}", variable.name, symbol.decl);
                debug_assert!(variable.decl().map_or(true, |d| d == symbol.decl));
                debug_assert!(expr.inferred_type.get().map_or(true, |t| *t == symbol.ty));
                let _ = variable.decl.set(symbol.decl);
                let _ = expr.inferred_type.set(symbol.ty.clone());
                expr.is_left_value.set(true);
            }
            Some(_) => self.error(
                ErrorCode::NOT_A_VARIABLE,
                format!("'{}' is not a variable", variable.name),
                expr.span,
            ),
            None => self.error(
                ErrorCode::NAME_NOT_FOUND,
                format!("name '{}' not found", variable.name),
                expr.span,
            ),
        }
    }

    fn visit_function_call(
        &mut self,
        call: &'ast FunctionCall,
        expr: &'ast Expr,
        scope: ScopeId,
    ) {
        let name = &call.name.name;
        let symbols = self.symbols;
        match symbols.lookup(scope, name) {
            Some(symbol) if symbol.kind == SymbolKind::Function => {
                log::trace!("resolve call {} -> {}", name, symbol.decl);
                debug_assert!(call.decl().map_or(true, |d| d == symbol.decl));
                debug_assert!(expr.inferred_type.get().map_or(true, |t| *t == symbol.ty));
                let _ = call.decl.set(symbol.decl);
                let _ = expr.inferred_type.set(symbol.ty.clone());
                if call.args.len() > symbol.param_count {
                    self.error(
                        ErrorCode::WRONG_ARG_COUNT,
                        format!(
                            "'{name}' takes {} argument(s) but {} were supplied",
                            symbol.param_count,
                            call.args.len()
                        ),
                        expr.span,
                    );
                }
            }
            Some(_) => self.error(
                ErrorCode::NOT_A_FUNCTION,
                format!("'{name}' is not a function"),
                call.name.span,
            ),
            None if name == PRINTLN => log::trace!("resolve call {name} -> builtin"),
            None => self.error(
                ErrorCode::NAME_NOT_FOUND,
                format!("name '{name}' not found"),
                call.name.span,
            ),
        }
        walk_function_call(self, call, scope);
    }

    fn visit_binary(&mut self, binary: &'ast Binary, _expr: &'ast Expr, scope: ScopeId) {
        walk_binary(self, binary, scope);
        let target = &binary.left;
        // A variable that failed to resolve has already been reported.
        let is_variable = matches!(target.kind, ExprKind::Variable(_));
        if target.should_be_left_value && !target.is_left_value.get() && !is_variable {
            let text = self.source.slice(target.span).to_string();
            self.error(
                ErrorCode::INVALID_ASSIGNMENT_TARGET,
                format!("invalid assignment target: '{text}' is not a variable"),
                target.span,
            );
        }
    }
}
