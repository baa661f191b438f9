//! Static types and literal constants.
//!
//! PlayScript only tags literals with their type; declared type names are
//! recorded but never checked.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A static type, either written in a declaration or inferred from a literal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    Any,
    String,
    Integer,
    Decimal,
    Boolean,
    Null,
    /// Any other type name. Carried through untouched.
    Named(String),
}

impl Type {
    /// Map a declared type name to a type.
    pub fn from_name(name: &str) -> Type {
        match name {
            "any" => Type::Any,
            "string" => Type::String,
            "integer" | "int" => Type::Integer,
            "decimal" | "number" => Type::Decimal,
            "boolean" | "bool" => Type::Boolean,
            "null" => Type::Null,
            other => Type::Named(other.to_string()),
        }
    }

    /// The canonical name, as it would be written in source.
    pub fn name(&self) -> &str {
        match self {
            Type::Any => "any",
            Type::String => "string",
            Type::Integer => "integer",
            Type::Decimal => "decimal",
            Type::Boolean => "boolean",
            Type::Null => "null",
            Type::Named(name) => name,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Type::Any)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A literal constant, as written in source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    String(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Null,
}

impl Literal {
    /// The type a literal is tagged with at parse time.
    pub fn ty(&self) -> Type {
        match self {
            Literal::String(_) => Type::String,
            Literal::Integer(_) => Type::Integer,
            Literal::Decimal(_) => Type::Decimal,
            Literal::Boolean(_) => Type::Boolean,
            Literal::Null => Type::Null,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "\"{s}\""),
            Literal::Integer(n) => write!(f, "{n}"),
            Literal::Decimal(n) => write!(f, "{n}"),
            Literal::Boolean(b) => write!(f, "{b}"),
            Literal::Null => write!(f, "null"),
        }
    }
}
