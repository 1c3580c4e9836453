//! Token type for the brex lexer.
//!
//! A [`Token`] is one top-level comma-separated piece of an expression,
//! trimmed, together with the [`Span`] it occupies in the original input.

use brex_types::Span;
use std::fmt;

/// A single top-level piece of an expression, e.g. `equals[1,1]` or `42`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Trimmed token text.
    pub text: String,
    /// Source location of the trimmed text.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(text: impl Into<String>, span: Span) -> Self {
        Self {
            text: text.into(),
            span,
        }
    }

    /// Whether the token opens a parameter list somewhere.
    pub fn has_brackets(&self) -> bool {
        self.text.contains('[')
    }

    /// Split at the first `[` into the command name and the parameter blob.
    ///
    /// The blob excludes the opening `[` and a single trailing `]` if one is
    /// present. Returned offsets are relative to the start of the token.
    pub fn split_head(&self) -> (&str, Option<(&str, usize)>) {
        match self.text.find('[') {
            None => (&self.text, None),
            Some(open) => {
                let head = &self.text[..open];
                let rest = &self.text[open + 1..];
                let blob = rest.strip_suffix(']').unwrap_or(rest);
                (head, Some((blob, open + 1)))
            }
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_head_with_params() {
        let tok = Token::new("equals[1,b[c]]", Span::new(0, 14));
        let (head, blob) = tok.split_head();
        assert_eq!(head, "equals");
        assert_eq!(blob, Some(("1,b[c]", 7)));
    }

    #[test]
    fn test_split_head_bare_name() {
        let tok = Token::new("always", Span::new(0, 6));
        assert_eq!(tok.split_head(), ("always", None));
        assert!(!tok.has_brackets());
    }

    #[test]
    fn test_split_head_missing_close() {
        let tok = Token::new("AND[true", Span::new(0, 8));
        assert_eq!(tok.split_head(), ("AND", Some(("true", 4))));
    }

    #[test]
    fn test_split_head_empty_params() {
        let tok = Token::new("AND[]", Span::new(0, 5));
        assert_eq!(tok.split_head(), ("AND", Some(("", 4))));
    }
}
