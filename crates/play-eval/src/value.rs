//! Runtime values.

use std::fmt;

use play_types::{Literal, Type};

/// A PlayScript runtime value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Null,
    /// Result of a declaration, an unresolved call, or an unbound read.
    Undefined,
}

impl Value {
    pub fn from_literal(literal: &Literal) -> Value {
        match literal {
            Literal::String(s) => Value::String(s.clone()),
            Literal::Integer(n) => Value::Integer(*n),
            Literal::Decimal(n) => Value::Decimal(*n),
            Literal::Boolean(b) => Value::Boolean(*b),
            Literal::Null => Value::Null,
        }
    }

    /// The static type this value inhabits; `None` for `Undefined`.
    pub fn ty(&self) -> Option<Type> {
        match self {
            Value::String(_) => Some(Type::String),
            Value::Integer(_) => Some(Type::Integer),
            Value::Decimal(_) => Some(Type::Decimal),
            Value::Boolean(_) => Some(Type::Boolean),
            Value::Null => Some(Type::Null),
            Value::Undefined => None,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Integer(_) => "integer",
            Value::Decimal(_) => "decimal",
            Value::Boolean(_) => "boolean",
            Value::Null => "null",
            Value::Undefined => "undefined",
        }
    }

    /// Numeric value of an integer or decimal.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Decimal(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Equality as `==` sees it: integers and decimals compare numerically.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Integer(_), Value::Decimal(_)) | (Value::Decimal(_), Value::Integer(_)) => {
                self.as_f64() == other.as_f64()
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Decimal(n) => write!(f, "{n}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::Undefined => f.write_str("undefined"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_forms() {
        assert_eq!(Value::String("hi".into()).to_string(), "hi");
        assert_eq!(Value::Integer(-3).to_string(), "-3");
        assert_eq!(Value::Decimal(2.5).to_string(), "2.5");
        assert_eq!(Value::Decimal(2.0).to_string(), "2");
        assert_eq!(Value::Boolean(true).to_string(), "true");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Undefined.to_string(), "undefined");
    }

    #[test]
    fn test_from_literal_keeps_type() {
        for literal in [
            Literal::String("s".into()),
            Literal::Integer(1),
            Literal::Decimal(1.5),
            Literal::Boolean(false),
            Literal::Null,
        ] {
            assert_eq!(Value::from_literal(&literal).ty(), Some(literal.ty()));
        }
        assert_eq!(Value::Undefined.ty(), None);
    }

    #[test]
    fn test_loose_equality() {
        assert!(Value::Integer(2).loosely_equals(&Value::Decimal(2.0)));
        assert!(Value::Decimal(2.0).loosely_equals(&Value::Integer(2)));
        assert!(!Value::Integer(2).loosely_equals(&Value::String("2".into())));
        assert!(Value::Null.loosely_equals(&Value::Null));
        assert!(!Value::Null.loosely_equals(&Value::Undefined));
    }
}
