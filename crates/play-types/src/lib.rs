//! Shared types for the PlayScript front end.
//!
//! This crate defines the AST node types and their traversal protocol,
//! source positions and spans, diagnostics, and the static types used
//! across all pipeline stages.

mod error;
mod span;
mod ty;
pub mod ast;
pub mod visit;

pub use error::{Diagnostic, Diagnostics, ErrorCategory, ErrorCode, Severity, MAX_DIAGNOSTICS};
pub use span::{Position, SourceFile, Span};
pub use ty::{Literal, Type};
