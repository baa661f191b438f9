//! Traversal protocol for the AST.
//!
//! A pass implements [`Visitor`] and overrides only the node kinds it acts
//! on. Every provided method forwards to the matching `walk_*` function,
//! which visits children in source order and returns the last child's
//! result; nodes without children return [`Visitor::empty`].
//!
//! `Extra` is threaded through every call unchanged unless a pass decides
//! otherwise, e.g. the resolver passes the current scope down.

use crate::ast::*;
use crate::Literal;

pub trait Visitor<'ast>: Sized {
    type Output;
    type Extra: Copy;

    /// The result of visiting a node with nothing to visit.
    fn empty(&mut self) -> Self::Output;

    fn visit_program(&mut self, program: &'ast Program, extra: Self::Extra) -> Self::Output {
        walk_program(self, program, extra)
    }

    fn visit_block(&mut self, block: &'ast Block, extra: Self::Extra) -> Self::Output {
        walk_block(self, block, extra)
    }

    fn visit_stmt(&mut self, stmt: &'ast Stmt, extra: Self::Extra) -> Self::Output {
        walk_stmt(self, stmt, extra)
    }

    fn visit_function_decl(
        &mut self,
        decl: &'ast FunctionDecl,
        extra: Self::Extra,
    ) -> Self::Output {
        walk_function_decl(self, decl, extra)
    }

    fn visit_variable_decl(
        &mut self,
        decl: &'ast VariableDecl,
        extra: Self::Extra,
    ) -> Self::Output {
        walk_variable_decl(self, decl, extra)
    }

    fn visit_expr_stmt(&mut self, stmt: &'ast ExprStmt, extra: Self::Extra) -> Self::Output {
        self.visit_expr(&stmt.expr, extra)
    }

    fn visit_error_stmt(&mut self, _stmt: &'ast ErrorStmt, _extra: Self::Extra) -> Self::Output {
        self.empty()
    }

    fn visit_expr(&mut self, expr: &'ast Expr, extra: Self::Extra) -> Self::Output {
        walk_expr(self, expr, extra)
    }

    fn visit_literal(
        &mut self,
        _literal: &'ast Literal,
        _expr: &'ast Expr,
        _extra: Self::Extra,
    ) -> Self::Output {
        self.empty()
    }

    fn visit_variable(
        &mut self,
        _variable: &'ast Variable,
        _expr: &'ast Expr,
        _extra: Self::Extra,
    ) -> Self::Output {
        self.empty()
    }

    fn visit_function_call(
        &mut self,
        call: &'ast FunctionCall,
        _expr: &'ast Expr,
        extra: Self::Extra,
    ) -> Self::Output {
        walk_function_call(self, call, extra)
    }

    fn visit_binary(
        &mut self,
        binary: &'ast Binary,
        _expr: &'ast Expr,
        extra: Self::Extra,
    ) -> Self::Output {
        walk_binary(self, binary, extra)
    }
}

fn walk_stmts<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    stmts: &'ast [Stmt],
    extra: V::Extra,
) -> V::Output {
    let mut result = None;
    for stmt in stmts {
        result = Some(visitor.visit_stmt(stmt, extra));
    }
    result.unwrap_or_else(|| visitor.empty())
}

pub fn walk_program<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    program: &'ast Program,
    extra: V::Extra,
) -> V::Output {
    walk_stmts(visitor, &program.stmts, extra)
}

pub fn walk_block<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    block: &'ast Block,
    extra: V::Extra,
) -> V::Output {
    walk_stmts(visitor, &block.stmts, extra)
}

pub fn walk_stmt<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    stmt: &'ast Stmt,
    extra: V::Extra,
) -> V::Output {
    match stmt {
        Stmt::Variable(decl) => visitor.visit_variable_decl(decl, extra),
        Stmt::Function(decl) => visitor.visit_function_decl(decl, extra),
        Stmt::Expr(stmt) => visitor.visit_expr_stmt(stmt, extra),
        Stmt::Error(stmt) => visitor.visit_error_stmt(stmt, extra),
    }
}

/// Visits the parameters, then the body; returns the body's result.
pub fn walk_function_decl<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    decl: &'ast FunctionDecl,
    extra: V::Extra,
) -> V::Output {
    for param in decl.params() {
        let _ = visitor.visit_variable_decl(param, extra);
    }
    visitor.visit_block(&decl.body, extra)
}

pub fn walk_variable_decl<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    decl: &'ast VariableDecl,
    extra: V::Extra,
) -> V::Output {
    match &decl.init {
        Some(init) => visitor.visit_expr(init, extra),
        None => visitor.empty(),
    }
}

pub fn walk_expr<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    expr: &'ast Expr,
    extra: V::Extra,
) -> V::Output {
    match &expr.kind {
        ExprKind::Literal(lit) => visitor.visit_literal(lit, expr, extra),
        ExprKind::Variable(var) => visitor.visit_variable(var, expr, extra),
        ExprKind::Call(call) => visitor.visit_function_call(call, expr, extra),
        ExprKind::Binary(binary) => visitor.visit_binary(binary, expr, extra),
    }
}

pub fn walk_function_call<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    call: &'ast FunctionCall,
    extra: V::Extra,
) -> V::Output {
    let mut result = None;
    for arg in &call.args {
        result = Some(visitor.visit_expr(arg, extra));
    }
    result.unwrap_or_else(|| visitor.empty())
}

pub fn walk_binary<'ast, V: Visitor<'ast>>(
    visitor: &mut V,
    binary: &'ast Binary,
    extra: V::Extra,
) -> V::Output {
    let _ = visitor.visit_expr(&binary.left, extra);
    visitor.visit_expr(&binary.right, extra)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Span, Type};

    fn lit(n: i64) -> Expr {
        Expr::new(ExprKind::Literal(Literal::Integer(n)), Span::default())
    }

    fn var(name: &str) -> Expr {
        Expr::new(ExprKind::Variable(Variable::new(name)), Span::default())
    }

    fn program(stmts: Vec<Stmt>) -> Program {
        Program {
            stmts,
            decl_count: 0,
            span: Span::default(),
        }
    }

    /// Collects variable names in visiting order.
    struct Names(Vec<String>);

    impl<'ast> Visitor<'ast> for Names {
        type Output = ();
        type Extra = ();

        fn empty(&mut self) {}

        fn visit_variable(&mut self, variable: &'ast Variable, _expr: &'ast Expr, _: ()) {
            self.0.push(variable.name.clone());
        }
    }

    /// Returns the value of the last integer literal visited.
    struct LastLiteral;

    impl<'ast> Visitor<'ast> for LastLiteral {
        type Output = Option<i64>;
        type Extra = ();

        fn empty(&mut self) -> Option<i64> {
            None
        }

        fn visit_literal(&mut self, literal: &'ast Literal, _: &'ast Expr, _: ()) -> Option<i64> {
            match literal {
                Literal::Integer(n) => Some(*n),
                _ => None,
            }
        }
    }

    #[test]
    fn test_pre_order_visits_every_reference() {
        let call = FunctionCall::new(
            crate::ast::Ident::new("f", Span::default()),
            vec![var("a"), var("b")],
        );
        let binary = Binary {
            op: BinaryOp::Add,
            left: Box::new(var("c")),
            right: Box::new(Expr::new(ExprKind::Call(call), Span::default())),
        };
        let prog = program(vec![Stmt::Expr(ExprStmt {
            expr: Expr::new(ExprKind::Binary(binary), Span::default()),
            span: Span::default(),
        })]);

        let mut names = Names(Vec::new());
        names.visit_program(&prog, ());
        assert_eq!(names.0, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_default_walk_returns_last_child_result() {
        let prog = program(vec![
            Stmt::Expr(ExprStmt {
                expr: lit(1),
                span: Span::default(),
            }),
            Stmt::Expr(ExprStmt {
                expr: lit(2),
                span: Span::default(),
            }),
        ]);
        assert_eq!(LastLiteral.visit_program(&prog, ()), Some(2));
        assert_eq!(LastLiteral.visit_program(&program(Vec::new()), ()), None);
    }

    #[test]
    fn test_variable_decl_without_init_is_empty() {
        let decl = VariableDecl {
            id: DeclId(0),
            name: crate::ast::Ident::new("x", Span::default()),
            type_ann: None,
            init: None,
            inferred_type: Default::default(),
            span: Span::default(),
        };
        assert_eq!(decl.declared_type(), Type::Any);
        assert_eq!(LastLiteral.visit_variable_decl(&decl, ()), None);
    }
}
