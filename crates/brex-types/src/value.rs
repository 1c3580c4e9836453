//! Runtime values and literal coercion.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A value produced by evaluating a node or returned by a command handler.
///
/// `Null` never comes out of the grammar itself; it is the fallback of
/// action-kind commands and a legal handler result.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    /// Truthiness used by the logical commands.
    ///
    /// Non-zero integers, non-empty strings and `true` are truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Str(s) => !s.is_empty(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Str(_) => "string",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Literal> for Value {
    fn from(lit: Literal) -> Self {
        match lit {
            Literal::Bool(b) => Value::Bool(b),
            Literal::Int(n) => Value::Int(n),
            Literal::Str(s) => Value::Str(s),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Literals
// ─────────────────────────────────────────────────────────────────────

/// The interpretation of a leaf token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Literal {
    /// Interpret a token as a literal. Anything that is not a boolean or a
    /// number is kept verbatim as a string.
    pub fn parse(token: &str) -> Literal {
        Literal::parse_scalar(token).unwrap_or_else(|| Literal::Str(token.to_string()))
    }

    /// Interpret a token as a boolean or integer literal, or `None`.
    pub fn parse_scalar(token: &str) -> Option<Literal> {
        if let Some(b) = parse_bool(token) {
            return Some(Literal::Bool(b));
        }
        parse_integer(token).map(Literal::Int)
    }

    pub fn to_value(&self) -> Value {
        Value::from(self.clone())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Str(s) => write!(f, "{s}"),
        }
    }
}

/// `true` / `false`, case-insensitive.
pub fn parse_bool(token: &str) -> Option<bool> {
    if token.eq_ignore_ascii_case("true") {
        Some(true)
    } else if token.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Numeric tokens become `i64`. Decimal and exponent forms are truncated
/// toward zero; non-finite or out-of-range numbers are not numeric.
pub fn parse_integer(token: &str) -> Option<i64> {
    if let Ok(n) = token.parse::<i64>() {
        return Some(n);
    }
    // f64's parser also accepts "inf" and "NaN"
    if !token.bytes().any(|b| b.is_ascii_digit()) {
        return None;
    }
    let f: f64 = token.parse().ok()?;
    if !f.is_finite() {
        return None;
    }
    let t = f.trunc();
    if t < i64::MIN as f64 || t >= i64::MAX as f64 {
        return None;
    }
    Some(t as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_case_insensitive() {
        assert_eq!(Literal::parse("true"), Literal::Bool(true));
        assert_eq!(Literal::parse("TRUE"), Literal::Bool(true));
        assert_eq!(Literal::parse("False"), Literal::Bool(false));
        assert_eq!(Literal::parse("truthy"), Literal::Str("truthy".into()));
    }

    #[test]
    fn test_parse_integer() {
        assert_eq!(Literal::parse("42"), Literal::Int(42));
        assert_eq!(Literal::parse("-7"), Literal::Int(-7));
        assert_eq!(Literal::parse("+3"), Literal::Int(3));
        assert_eq!(Literal::parse("0"), Literal::Int(0));
    }

    #[test]
    fn test_parse_decimal_truncates() {
        assert_eq!(Literal::parse("1.9"), Literal::Int(1));
        assert_eq!(Literal::parse("-1.9"), Literal::Int(-1));
        assert_eq!(Literal::parse("1e3"), Literal::Int(1000));
        assert_eq!(Literal::parse(".5"), Literal::Int(0));
    }

    #[test]
    fn test_parse_non_numeric_stays_string() {
        for token in ["inf", "NaN", "infinity", "1e400", "12abc", "\"1\"", "", "1_000"] {
            assert_eq!(
                Literal::parse(token),
                Literal::Str(token.to_string()),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn test_parse_scalar_rejects_strings() {
        assert_eq!(Literal::parse_scalar("abc"), None);
        assert_eq!(Literal::parse_scalar("b[c,d]"), None);
        assert_eq!(Literal::parse_scalar("5"), Some(Literal::Int(5)));
    }

    #[test]
    fn test_truthiness() {
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(Value::Int(-1).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Null.is_truthy());
    }

    #[test]
    fn test_value_json_is_untagged() {
        assert_eq!(serde_json::to_string(&Value::Int(3)).unwrap(), "3");
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
        let v: Value = serde_json::from_str("\"hi\"").unwrap();
        assert_eq!(v, Value::from("hi"));
        let v: Value = serde_json::from_str("true").unwrap();
        assert_eq!(v, Value::Bool(true));
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Int(5).to_string(), "5");
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Literal::Str("abc".into()).to_string(), "abc");
    }
}
