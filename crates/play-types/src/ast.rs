//! AST node types for PlayScript.
//!
//! Every node carries a [`Span`] for error reporting. Spans are fixed at
//! parse time; the only slots written afterwards are resolution links,
//! inferred types and the left-value flag, all behind `Cell`/`OnceCell`
//! so the semantic passes can annotate a shared `&Program`.

use std::cell::{Cell, OnceCell};
use std::fmt;

use crate::{Literal, Span, Type};

// ══════════════════════════════════════════════════════════════════════════════
// Identity
// ══════════════════════════════════════════════════════════════════════════════

/// Index of a declaration, assigned by the parser in source order.
///
/// Reference nodes point at declarations through a `DeclId`, never through
/// a reference to the node itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclId(pub u32);

impl DeclId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DeclId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Behaviour shared by every node.
pub trait AstNode {
    fn span(&self) -> Span;

    /// `true` if the node, or a statement inside it, was produced while
    /// recovering from a syntax error.
    fn is_error(&self) -> bool {
        false
    }
}

/// A spanned identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: String,
    pub span: Span,
}

impl Ident {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete program: the statements of the top-level block.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub stmts: Vec<Stmt>,
    /// Number of `DeclId`s handed out while parsing.
    pub decl_count: u32,
    pub span: Span,
}

impl AstNode for Program {
    fn span(&self) -> Span {
        self.span
    }

    fn is_error(&self) -> bool {
        self.stmts.iter().any(Stmt::is_error)
    }
}

/// `{ statements... }`
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub span: Span,
}

impl AstNode for Block {
    fn span(&self) -> Span {
        self.span
    }

    fn is_error(&self) -> bool {
        self.stmts.iter().any(Stmt::is_error)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// A statement in a program or block.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    /// `let name: type = init;`
    Variable(VariableDecl),
    /// `function name(params) { body }`
    Function(FunctionDecl),
    /// `expr;`
    Expr(ExprStmt),
    /// A statement abandoned during error recovery.
    Error(ErrorStmt),
}

impl AstNode for Stmt {
    fn span(&self) -> Span {
        match self {
            Stmt::Variable(decl) => decl.span,
            Stmt::Function(decl) => decl.span,
            Stmt::Expr(stmt) => stmt.span,
            Stmt::Error(stmt) => stmt.span,
        }
    }

    fn is_error(&self) -> bool {
        match self {
            Stmt::Function(decl) => decl.is_error(),
            Stmt::Error(_) => true,
            Stmt::Variable(_) | Stmt::Expr(_) => false,
        }
    }
}

/// `function name(params): type { body }`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub id: DeclId,
    pub name: Ident,
    pub signature: CallSignature,
    pub body: Block,
    pub span: Span,
}

impl FunctionDecl {
    pub fn params(&self) -> &[VariableDecl] {
        &self.signature.params.params
    }
}

impl AstNode for FunctionDecl {
    fn span(&self) -> Span {
        self.span
    }

    fn is_error(&self) -> bool {
        self.body.is_error()
    }
}

/// Parameter list plus return type name.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSignature {
    pub params: ParameterList,
    /// `None` means `any`.
    pub return_type: Option<Ident>,
    pub span: Span,
}

impl CallSignature {
    pub fn return_type(&self) -> Type {
        self.return_type
            .as_ref()
            .map_or(Type::Any, |ident| Type::from_name(&ident.name))
    }
}

/// Ordered parameter declarations.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterList {
    pub params: Vec<VariableDecl>,
    pub span: Span,
}

/// A variable declaration: a `let` statement or a function parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableDecl {
    pub id: DeclId,
    pub name: Ident,
    /// Declared type name; `None` means `any`.
    pub type_ann: Option<Ident>,
    pub init: Option<Expr>,
    /// Filled by the Enter pass.
    pub inferred_type: OnceCell<Type>,
    pub span: Span,
}

impl VariableDecl {
    pub fn declared_type(&self) -> Type {
        self.type_ann
            .as_ref()
            .map_or(Type::Any, |ident| Type::from_name(&ident.name))
    }

    /// The declared type name as written, or `any`.
    pub fn type_name(&self) -> &str {
        self.type_ann.as_ref().map_or("any", |ident| &ident.name)
    }
}

impl AstNode for VariableDecl {
    fn span(&self) -> Span {
        self.span
    }
}

/// A bare expression statement.
#[derive(Debug, Clone, PartialEq)]
pub struct ExprStmt {
    pub expr: Expr,
    pub span: Span,
}

/// The tokens skipped while recovering from a syntax error.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorStmt {
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    /// Literal types are set by the parser, variable types by the resolver.
    pub inferred_type: OnceCell<Type>,
    /// Set by the parser on the left operand of an assignment.
    pub should_be_left_value: bool,
    /// Set by the resolver when the expression denotes a variable.
    pub is_left_value: Cell<bool>,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        let inferred_type = OnceCell::new();
        if let ExprKind::Literal(lit) = &kind {
            let _ = inferred_type.set(lit.ty());
        }
        Self {
            kind,
            span,
            inferred_type,
            should_be_left_value: false,
            is_left_value: Cell::new(false),
        }
    }

    /// The statically known value, if any. Only literals have one.
    pub fn constant(&self) -> Option<&Literal> {
        match &self.kind {
            ExprKind::Literal(lit) => Some(lit),
            _ => None,
        }
    }

    pub fn ty(&self) -> Option<&Type> {
        self.inferred_type.get()
    }
}

impl AstNode for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

/// The kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(Literal),
    Variable(Variable),
    Call(FunctionCall),
    Binary(Binary),
}

/// A reference to a variable by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
    /// Resolution link, written once by the resolver.
    pub decl: OnceCell<DeclId>,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            decl: OnceCell::new(),
        }
    }

    pub fn decl(&self) -> Option<DeclId> {
        self.decl.get().copied()
    }
}

/// `name(args...)`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub name: Ident,
    pub args: Vec<Expr>,
    /// Resolution link; stays empty for the builtin `println`.
    pub decl: OnceCell<DeclId>,
}

impl FunctionCall {
    pub fn new(name: Ident, args: Vec<Expr>) -> Self {
        Self {
            name,
            args,
            decl: OnceCell::new(),
        }
    }

    pub fn decl(&self) -> Option<DeclId> {
        self.decl.get().copied()
    }
}

/// `left op right`
#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub op: BinaryOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

/// Binary operators, including assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
    RemAssign,
    Or,
    And,
    Eq,
    NotEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    Add,
    Sub,
    Mul,
    Div,
    Rem,
}

impl BinaryOp {
    /// Map operator text to a binary operator.
    pub fn from_operator(text: &str) -> Option<BinaryOp> {
        let op = match text {
            "=" => BinaryOp::Assign,
            "+=" => BinaryOp::AddAssign,
            "-=" => BinaryOp::SubAssign,
            "*=" => BinaryOp::MulAssign,
            "/=" => BinaryOp::DivAssign,
            "%=" => BinaryOp::RemAssign,
            "||" => BinaryOp::Or,
            "&&" => BinaryOp::And,
            "==" => BinaryOp::Eq,
            "!=" => BinaryOp::NotEq,
            "<" => BinaryOp::Less,
            ">" => BinaryOp::Greater,
            "<=" => BinaryOp::LessEq,
            ">=" => BinaryOp::GreaterEq,
            "+" => BinaryOp::Add,
            "-" => BinaryOp::Sub,
            "*" => BinaryOp::Mul,
            "/" => BinaryOp::Div,
            "%" => BinaryOp::Rem,
            _ => return None,
        };
        Some(op)
    }

    /// Binding strength; higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Assign
            | BinaryOp::AddAssign
            | BinaryOp::SubAssign
            | BinaryOp::MulAssign
            | BinaryOp::DivAssign
            | BinaryOp::RemAssign => 1,
            BinaryOp::Or => 2,
            BinaryOp::And => 3,
            BinaryOp::Eq | BinaryOp::NotEq => 4,
            BinaryOp::Less | BinaryOp::Greater | BinaryOp::LessEq | BinaryOp::GreaterEq => 5,
            BinaryOp::Add | BinaryOp::Sub => 6,
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 7,
        }
    }

    pub fn is_assignment(self) -> bool {
        self.precedence() == 1
    }

    /// Assignments are right-associative, everything else left.
    pub fn is_right_assoc(self) -> bool {
        self.is_assignment()
    }

    /// The arithmetic operator a compound assignment applies (`+=` → `+`).
    pub fn compound_base(self) -> Option<BinaryOp> {
        match self {
            BinaryOp::AddAssign => Some(BinaryOp::Add),
            BinaryOp::SubAssign => Some(BinaryOp::Sub),
            BinaryOp::MulAssign => Some(BinaryOp::Mul),
            BinaryOp::DivAssign => Some(BinaryOp::Div),
            BinaryOp::RemAssign => Some(BinaryOp::Rem),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Assign => "=",
            BinaryOp::AddAssign => "+=",
            BinaryOp::SubAssign => "-=",
            BinaryOp::MulAssign => "*=",
            BinaryOp::DivAssign => "/=",
            BinaryOp::RemAssign => "%=",
            BinaryOp::Or => "||",
            BinaryOp::And => "&&",
            BinaryOp::Eq => "==",
            BinaryOp::NotEq => "!=",
            BinaryOp::Less => "<",
            BinaryOp::Greater => ">",
            BinaryOp::LessEq => "<=",
            BinaryOp::GreaterEq => ">=",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_expr_is_typed_at_construction() {
        let expr = Expr::new(ExprKind::Literal(Literal::Integer(3)), Span::default());
        assert_eq!(expr.ty(), Some(&Type::Integer));
        assert_eq!(expr.constant(), Some(&Literal::Integer(3)));
    }

    #[test]
    fn test_variable_expr_starts_unresolved() {
        let expr = Expr::new(ExprKind::Variable(Variable::new("a")), Span::default());
        assert_eq!(expr.ty(), None);
        assert_eq!(expr.constant(), None);
        assert!(!expr.is_left_value.get());
        match &expr.kind {
            ExprKind::Variable(var) => assert_eq!(var.decl(), None),
            other => panic!("expected variable, got {other:?}"),
        }
    }

    #[test]
    fn test_operator_table() {
        for op in ["=", "+=", "||", "&&", "==", "<=", "+", "%"] {
            let parsed = BinaryOp::from_operator(op).unwrap();
            assert_eq!(parsed.as_str(), op);
        }
        assert_eq!(BinaryOp::from_operator("++"), None);
        assert!(BinaryOp::Mul.precedence() > BinaryOp::Add.precedence());
        assert!(BinaryOp::Add.precedence() > BinaryOp::Less.precedence());
        assert!(BinaryOp::And.precedence() > BinaryOp::Or.precedence());
        assert!(BinaryOp::Assign.is_right_assoc());
        assert!(!BinaryOp::Sub.is_right_assoc());
        assert_eq!(BinaryOp::RemAssign.compound_base(), Some(BinaryOp::Rem));
        assert_eq!(BinaryOp::Assign.compound_base(), None);
    }

    #[test]
    fn test_error_flag_propagates_to_enclosing_nodes() {
        let error = Stmt::Error(ErrorStmt {
            span: Span::default(),
        });
        let block = Block {
            stmts: vec![error],
            span: Span::default(),
        };
        assert!(block.is_error());

        let program = Program {
            stmts: Vec::new(),
            decl_count: 0,
            span: Span::default(),
        };
        assert!(!program.is_error());
    }
}
