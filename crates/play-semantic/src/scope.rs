//! Lexical scopes and the symbol table.
//!
//! [`SymbolTable`] is an arena of [`Scope`]s linked to their parents. The
//! program owns the root scope and every function declaration owns one
//! child scope holding its parameters and body declarations.

use std::collections::HashMap;

use play_types::ast::DeclId;
use play_types::{Span, Type};

// ══════════════════════════════════════════════════════════════════════════════
// Symbols
// ══════════════════════════════════════════════════════════════════════════════

/// Index of a scope in its [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub u32);

impl ScopeId {
    /// The program scope.
    pub const ROOT: ScopeId = ScopeId(0);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Program,
    Function,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolKind {
    Variable,
    Function,
}

/// A declared name.
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub decl: DeclId,
    /// Variable type, or a function's return type.
    pub ty: Type,
    pub span: Span,
    /// Zero for variables.
    pub param_count: usize,
}

impl Symbol {
    pub fn variable(name: impl Into<String>, decl: DeclId, ty: Type, span: Span) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Variable,
            decl,
            ty,
            span,
            param_count: 0,
        }
    }

    pub fn function(
        name: impl Into<String>,
        decl: DeclId,
        return_type: Type,
        span: Span,
        param_count: usize,
    ) -> Self {
        Self {
            name: name.into(),
            kind: SymbolKind::Function,
            decl,
            ty: return_type,
            span,
            param_count,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Scope
// ══════════════════════════════════════════════════════════════════════════════

/// A single scope level.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    pub kind: ScopeKind,
    pub parent: Option<ScopeId>,
    /// The function that owns this scope; `None` for the program scope.
    pub owner: Option<DeclId>,
    symbols: HashMap<String, Symbol>,
}

impl Scope {
    pub fn get(&self, name: &str) -> Option<&Symbol> {
        self.symbols.get(name)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in declaration order.
    pub fn symbols(&self) -> Vec<&Symbol> {
        let mut symbols: Vec<_> = self.symbols.values().collect();
        symbols.sort_by_key(|s| s.decl);
        symbols
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// SymbolTable
// ══════════════════════════════════════════════════════════════════════════════

/// All scopes of one program.
#[derive(Debug, Clone, PartialEq)]
pub struct SymbolTable {
    scopes: Vec<Scope>,
    function_scopes: HashMap<DeclId, ScopeId>,
}

impl SymbolTable {
    /// Create a table holding only the empty program scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                kind: ScopeKind::Program,
                parent: None,
                owner: None,
                symbols: HashMap::new(),
            }],
            function_scopes: HashMap::new(),
        }
    }

    /// Open the scope owned by the function `owner`, nested in `parent`.
    pub fn push_function_scope(&mut self, parent: ScopeId, owner: DeclId) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            kind: ScopeKind::Function,
            parent: Some(parent),
            owner: Some(owner),
            symbols: HashMap::new(),
        });
        self.function_scopes.insert(owner, id);
        id
    }

    pub fn scope(&self, id: ScopeId) -> Option<&Scope> {
        self.scopes.get(id.0 as usize)
    }

    /// The scope owned by a function declaration.
    pub fn function_scope(&self, decl: DeclId) -> Option<ScopeId> {
        self.function_scopes.get(&decl).copied()
    }

    /// Define a symbol in `scope`. Returns the symbol it replaced, if the
    /// name was already declared there.
    pub fn define(&mut self, scope: ScopeId, symbol: Symbol) -> Option<Symbol> {
        let scope = self.scopes.get_mut(scope.0 as usize)?;
        scope.symbols.insert(symbol.name.clone(), symbol)
    }

    /// Look up a name, searching from `scope` outward to the program scope.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Symbol> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = self.scope(id)?;
            if let Some(symbol) = scope.get(name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// Number of scopes, including the program scope.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }

    /// Number of symbols across all scopes.
    pub fn symbol_count(&self) -> usize {
        self.scopes.iter().map(Scope::len).sum()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
