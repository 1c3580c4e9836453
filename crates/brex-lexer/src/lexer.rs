//! Bracket-aware lexer: splits an expression into its top-level tokens.
//!
//! Commas separate tokens only at bracket depth zero, so
//! `a,b[c,d],e` yields `a`, `b[c,d]` and `e`. Brackets stay part of the
//! token text. The lexer never fails; unbalanced brackets are reported as
//! diagnostics alongside whatever tokens resulted.

use brex_types::{BrexError, Span};

use crate::token::Token;

/// The brex lexer.
pub struct Lexer<'src> {
    /// The text being split.
    source: &'src str,
    /// Byte offset of `source` inside the original expression.
    offset: usize,
}

/// Result of lexing: tokens + any bracket diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct LexResult {
    pub tokens: Vec<Token>,
    /// `MalformedExpression` errors for stray `]` or unclosed `[`.
    pub errors: Vec<BrexError>,
}

impl LexResult {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

impl<'src> Lexer<'src> {
    /// Create a lexer over a complete expression.
    pub fn new(source: &'src str) -> Self {
        Self { source, offset: 0 }
    }

    /// Report spans as if `source` started at byte `offset` of a larger
    /// expression. Used when re-lexing a parameter blob.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Split the source into top-level tokens.
    pub fn lex(self) -> LexResult {
        let mut tokens = Vec::new();
        let mut errors = Vec::new();
        let mut depth: i64 = 0;
        let mut start = 0;
        let mut outermost_open = None;
        let mut reported_stray = false;

        for (i, ch) in self.source.char_indices() {
            match ch {
                '[' => {
                    if depth == 0 {
                        outermost_open = Some(i);
                    }
                    depth += 1;
                }
                ']' => {
                    depth -= 1;
                    if depth < 0 && !reported_stray {
                        reported_stray = true;
                        errors.push(BrexError::malformed(
                            format!("unexpected ']' at offset {}", self.offset + i),
                            Span::new(i, i + 1).shifted(self.offset),
                        ));
                    }
                }
                ',' if depth == 0 => {
                    tokens.push(self.token(start, i));
                    start = i + 1;
                }
                _ => {}
            }
        }

        if start < self.source.len() {
            let tail = self.token(start, self.source.len());
            if !tail.text.is_empty() {
                tokens.push(tail);
            }
        }

        if depth > 0 {
            let open = outermost_open.unwrap_or(0);
            errors.push(BrexError::malformed(
                format!("unclosed '[' opened at offset {}", self.offset + open),
                Span::new(open, self.source.len()).shifted(self.offset),
            ));
        }

        LexResult { tokens, errors }
    }

    /// Build a trimmed token from `source[start..end]`.
    fn token(&self, start: usize, end: usize) -> Token {
        let raw = &self.source[start..end];
        let lead = raw.len() - raw.trim_start().len();
        let text = raw.trim();
        let from = start + lead;
        Token::new(text, Span::new(from, from + text.len()).shifted(self.offset))
    }
}

/// Split `input` into trimmed top-level tokens, ignoring bracket diagnostics.
pub fn tokenize(input: &str) -> Vec<Token> {
    Lexer::new(input).lex().tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_single_token() {
        assert_eq!(texts("AND[true,false]"), vec!["AND[true,false]"]);
    }

    #[test]
    fn test_top_level_commas_split() {
        assert_eq!(texts("a,b[c,d],e"), vec!["a", "b[c,d]", "e"]);
    }

    #[test]
    fn test_empty_middle_token_kept() {
        assert_eq!(texts("a,,b"), vec!["a", "", "b"]);
        assert_eq!(texts(",a"), vec!["", "a"]);
    }

    #[test]
    fn test_trailing_comma_dropped() {
        assert_eq!(texts("a,"), vec!["a"]);
        assert_eq!(texts("a,  "), vec!["a"]);
    }

    #[test]
    fn test_spans_point_at_trimmed_text() {
        let toks = tokenize(" a , bb ");
        assert_eq!(toks[0].span, Span::new(1, 2));
        assert_eq!(toks[1].span, Span::new(5, 7));
    }

    #[test]
    fn test_offset_shifts_spans() {
        let result = Lexer::new("x,y").with_offset(10).lex();
        assert_eq!(result.tokens[1].span, Span::new(12, 13));
    }
}
