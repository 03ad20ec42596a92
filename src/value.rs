use std::collections::HashMap;
use std::fmt;

/// A context value that rules are evaluated against.
///
/// This is the natural decoding of a JSON document: every number is an
/// `f64`, so `25` and `25.0` are the same value.
///
/// # Examples
///
/// ```
/// use logix::Value;
/// use std::collections::HashMap;
///
/// let mut user = HashMap::new();
/// user.insert("age".to_string(), Value::Number(25.0));
/// user.insert("tags".to_string(), Value::Array(vec![Value::String("new".into())]));
///
/// let context = Value::Object(user);
/// assert_eq!(context.type_name(), "object");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// JSON null, also what a missing key resolves to
    #[default]
    Null,

    Boolean(bool),

    Number(f64),

    String(String),

    Array(Vec<Value>),

    Object(HashMap<String, Value>),
}

impl Value {
    /// Human-readable type name used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "float",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }
}

/// A literal operand written in rule text.
///
/// Only the four scalar kinds exist in the language: strings, numbers,
/// `true`/`false` and `nil`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Number(f64),
    String(String),
}

impl Literal {
    pub fn type_name(&self) -> &'static str {
        match self {
            Literal::Null => "null",
            Literal::Boolean(_) => "boolean",
            Literal::Number(_) => "float",
            Literal::String(_) => "string",
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Render the literal the way it would be written in rule text
    /// (strings quoted, null as `nil`).
    pub fn to_source(&self) -> String {
        match self {
            Literal::String(s) => format!("{:?}", s),
            other => other.to_string(),
        }
    }
}

/// The operand-as-string form used by the string operators.
impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "nil"),
            Literal::Boolean(b) => write!(f, "{}", b),
            Literal::Number(n) => write!(f, "{}", n),
            Literal::String(s) => f.write_str(s),
        }
    }
}

/// Structural equality between a resolved value and a literal.
///
/// Arrays and objects never equal a literal.
impl PartialEq<Literal> for Value {
    fn eq(&self, other: &Literal) -> bool {
        match (self, other) {
            (Value::Null, Literal::Null) => true,
            (Value::Boolean(a), Literal::Boolean(b)) => a == b,
            (Value::Number(a), Literal::Number(b)) => a == b,
            (Value::String(a), Literal::String(b)) => a == b,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_equality_is_kind_sensitive() {
        assert_eq!(Value::Number(25.0), Literal::Number(25.0));
        assert_ne!(Value::String("25".into()), Literal::Number(25.0));
        assert_ne!(Value::Boolean(false), Literal::Null);
        assert_eq!(Value::Null, Literal::Null);
        assert_ne!(Value::Array(vec![Value::Null]), Literal::Null);
    }

    #[test]
    fn test_literal_rendering() {
        assert_eq!(Literal::Number(10.0).to_string(), "10");
        assert_eq!(Literal::Number(2.5).to_string(), "2.5");
        assert_eq!(Literal::Null.to_string(), "nil");
        assert_eq!(Literal::String("a\"b".into()).to_source(), r#""a\"b""#);
    }
}
