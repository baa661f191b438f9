//! Runtime error types for the PlayScript interpreter.

use thiserror::Error;

/// Evaluation error. Ends the run; output produced so far is kept.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Division or remainder by zero, integer overflow, non-finite decimal.
    #[error("arithmetic trap: {0}")]
    ArithmeticTrap(String),
    /// Operator applied to values of the wrong kind
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// Assignment to something that is not a variable
    #[error("invalid assignment: {0}")]
    InvalidAssignment(String),
    /// Call nesting exceeded the configured depth
    #[error("stack overflow: call depth exceeded {limit}")]
    StackOverflow { limit: usize },
}

/// Result alias for interpreter operations.
pub type EvalResult<T> = Result<T, EvalError>;
