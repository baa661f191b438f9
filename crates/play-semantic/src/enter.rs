//! Declaration entry: the first semantic pass.
//!
//! Registers every function and variable declaration in its enclosing
//! scope and fills in each variable's inferred type. References are left
//! for [`RefResolver`](crate::RefResolver), so a call may name a function
//! declared further down the same block.

use play_types::ast::*;
use play_types::visit::{walk_function_decl, walk_variable_decl, Visitor};
use play_types::{Diagnostics, ErrorCode, SourceFile, Type};

use crate::report;
use crate::scope::{ScopeId, Symbol, SymbolTable};

pub struct Enter<'a> {
    symbols: &'a mut SymbolTable,
    errors: &'a mut Diagnostics,
    source: &'a SourceFile,
}

impl<'a> Enter<'a> {
    pub fn new(
        symbols: &'a mut SymbolTable,
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

    fn declare(&mut self, scope: ScopeId, symbol: Symbol) {
        log::trace!("enter {} {} in scope {}", symbol.name, symbol.decl, scope.0);
        let name = symbol.name.clone();
        let span = symbol.span;
        if let Some(previous) = self.symbols.define(scope, symbol) {
            report(
                self.errors,
                self.source,
                ErrorCode::ALREADY_DECLARED,
                format!(
                    "'{name}' is already declared in this scope (first declared at {})",
                    previous.span
                ),
                span,
            );
        }
    }
}

/// The declared type unless it is `any`, else the type of a literal
/// initializer, else `any`.
fn infer_type(decl: &VariableDecl) -> Type {
    let declared = decl.declared_type();
    if !declared.is_any() {
        return declared;
    }
    decl.init
        .as_ref()
        .and_then(Expr::constant)
        .map_or(Type::Any, |lit| lit.ty())
}

impl<'ast> Visitor<'ast> for Enter<'_> {
    type Output = ();
    type Extra = ScopeId;

    fn empty(&mut self) {}

    fn visit_function_decl(&mut self, decl: &'ast FunctionDecl, scope: ScopeId) {
        self.declare(
            scope,
            Symbol::function(
                &decl.name.name,
                decl.id,
                decl.signature.return_type(),
                decl.name.span,
                decl.params().len(),
            ),
        );
        let inner = self.symbols.push_function_scope(scope, decl.id);
        walk_function_decl(self, decl, inner);
    }

    fn visit_variable_decl(&mut self, decl: &'ast VariableDecl, scope: ScopeId) {
        let ty = infer_type(decl);
        debug_assert!(decl.inferred_type.get().map_or(true, |t| *t == ty));
        let _ = decl.inferred_type.set(ty.clone());
        self.declare(
            scope,
            Symbol::variable(&decl.name.name, decl.id, ty, decl.name.span),
        );
        walk_variable_decl(self, decl, scope);
    }
}
