use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of diagnostics stored before later ones are only counted.
pub const MAX_DIAGNOSTICS: usize = 100;

/// Diagnostic severity.
///
/// Every front-end problem is currently an `Error`; `Warning` is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// Diagnostic category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Lexical,
    Syntax,
    Reference,
}

/// Numeric error code (E100–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Lexical errors (E100–E199) ──
    pub const UNEXPECTED_CHARACTER: Self = Self(100);
    pub const UNTERMINATED_STRING: Self = Self(101);
    pub const UNTERMINATED_COMMENT: Self = Self(102);

    // ── Syntax errors (E200–E299) ──
    pub const UNEXPECTED_TOKEN: Self = Self(200);
    pub const EXPECTED_EXPRESSION: Self = Self(201);
    pub const UNCLOSED_BLOCK: Self = Self(202);
    pub const NESTING_TOO_DEEP: Self = Self(203);

    // ── Reference errors (E300–E399) ──
    pub const NAME_NOT_FOUND: Self = Self(300);
    pub const ALREADY_DECLARED: Self = Self(301);
    pub const NOT_A_FUNCTION: Self = Self(302);
    pub const NOT_A_VARIABLE: Self = Self(303);
    pub const WRONG_ARG_COUNT: Self = Self(304);
    pub const INVALID_ASSIGNMENT_TARGET: Self = Self(305);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Lexical,
            200..=299 => ErrorCategory::Syntax,
            _ => ErrorCategory::Reference,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "lexical"),
            Self::Syntax => write!(f, "syntax"),
            Self::Reference => write!(f, "reference"),
        }
    }
}

/// A single lexical, syntactic or resolution problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Source file name.
    pub file: String,
    pub code: ErrorCode,
    pub severity: Severity,
    /// Derived from `code`.
    pub category: ErrorCategory,
    /// Human-readable message naming the construct and the token found.
    pub message: String,
    #[serde(flatten)]
    pub span: Span,
    /// The source line the diagnostic points into, for context.
    pub source_line: String,
}

impl Diagnostic {
    pub fn new(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            code,
            severity: Severity::Error,
            category: code.category(),
            message: message.into(),
            span,
            source_line: source_line.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.file, self.span, self.code, self.category, self.message
        )
    }
}

impl std::error::Error for Diagnostic {}

/// Diagnostics collected by one or more pipeline stages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub total_errors: usize,
    pub total_warnings: usize,
    #[serde(skip, default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    MAX_DIAGNOSTICS
}

impl Diagnostics {
    /// Create an empty collection with the default storage limit.
    pub fn empty() -> Self {
        Self::with_limit(MAX_DIAGNOSTICS)
    }

    /// Create an empty collection storing at most `limit` errors.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
            total_errors: 0,
            total_warnings: 0,
            limit,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// `true` once at least one error was reported and the storage limit
    /// has been reached.
    pub fn is_full(&self) -> bool {
        self.has_errors() && self.total_errors >= self.limit
    }

    /// Add an error, respecting the storage limit.
    pub fn push_error(&mut self, error: Diagnostic) {
        if self.errors.len() < self.limit {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }

    pub fn push_warning(&mut self, warning: Diagnostic) {
        self.warnings.push(warning);
        self.total_warnings += 1;
    }

    /// Move everything from `other` into `self`.
    pub fn extend(&mut self, other: Diagnostics) {
        let dropped = other.total_errors - other.errors.len();
        for error in other.errors {
            self.push_error(error);
        }
        self.total_errors += dropped;
        for warning in other.warnings {
            self.push_warning(warning);
        }
    }

    /// Stored errors and warnings, errors first.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.errors.iter().chain(self.warnings.iter())
    }

    /// Error codes in the order they were reported.
    pub fn codes(&self) -> Vec<ErrorCode> {
        self.errors.iter().map(|e| e.code).collect()
    }

    /// Human-readable lines, one per stored diagnostic.
    pub fn lines(&self) -> Vec<String> {
        self.iter().map(ToString::to_string).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::empty()
    }
}
