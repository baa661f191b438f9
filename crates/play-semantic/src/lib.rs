//! PlayScript semantic analysis: scopes and name resolution.
//!
//! ```text
//! Program → Enter (declarations) → RefResolver (references) → annotated Program
//! ```
//!
//! Both passes annotate the shared AST through its write-once slots and
//! report into a [`Diagnostics`] collection; neither aborts on an error.

mod enter;
mod resolver;
pub mod scope;

pub use enter::Enter;
pub use resolver::{RefResolver, PRINTLN};
pub use scope::{Scope, ScopeId, ScopeKind, Symbol, SymbolKind, SymbolTable};

use play_types::ast::Program;
use play_types::{Diagnostic, Diagnostics, ErrorCode, SourceFile, Span};

/// Result of semantic analysis.
#[derive(Debug)]
pub struct Analysis {
    pub symbols: SymbolTable,
    pub diagnostics: Diagnostics,
}

/// Run Enter, then RefResolver, over `program`.
pub fn analyze(program: &Program, source: &SourceFile) -> Analysis {
    let mut symbols = SymbolTable::new();
    let mut diagnostics = Diagnostics::empty();
    Enter::new(&mut symbols, &mut diagnostics, source).run(program);
    RefResolver::new(&symbols, &mut diagnostics, source).run(program);
    log::debug!(
        "{}: {} symbols in {} scopes, {} reference errors",
        source.name,
        symbols.symbol_count(),
        symbols.scope_count(),
        diagnostics.total_errors
    );
    Analysis {
        symbols,
        diagnostics,
    }
}

pub(crate) fn report(
    errors: &mut Diagnostics,
    source: &SourceFile,
    code: ErrorCode,
    message: impl Into<String>,
    span: Span,
) {
    let source_line = source.line(span.start_line).unwrap_or("").to_string();
    errors.push_error(Diagnostic::new(&source.name, code, message, span, source_line));
}
