use crate::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of diagnostics kept per evaluation.
pub const MAX_DIAGNOSTICS: usize = 20;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// The expression string could not be turned into a tree.
    Syntax,
    /// The tree was built but a command could not be evaluated.
    Evaluation,
}

/// Numeric error code (E100–E299).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const MALFORMED_EXPRESSION: Self = Self(100);
    pub const DEPTH_EXCEEDED: Self = Self(101);

    // ── Evaluation errors (E200–E299) ──
    pub const UNKNOWN_COMMAND: Self = Self(200);
    pub const INVALID_PARAMETERS: Self = Self(201);
    pub const HANDLER_ERROR: Self = Self(202);

    /// Get the category for this error code.
    pub fn category(self) -> ErrorCategory {
        match self.0 {
            100..=199 => ErrorCategory::Syntax,
            _ => ErrorCategory::Evaluation,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// The failure modes of parsing and evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Unbalanced brackets or an empty command name.
    MalformedExpression,
    /// Nesting deeper than the configured limit.
    DepthExceeded,
    /// No command registered under the name.
    UnknownCommand,
    /// Arity or type mismatch against the command's schema.
    InvalidParameters,
    /// The command handler itself failed.
    HandlerError,
}

impl ErrorKind {
    pub fn code(self) -> ErrorCode {
        match self {
            ErrorKind::MalformedExpression => ErrorCode::MALFORMED_EXPRESSION,
            ErrorKind::DepthExceeded => ErrorCode::DEPTH_EXCEEDED,
            ErrorKind::UnknownCommand => ErrorCode::UNKNOWN_COMMAND,
            ErrorKind::InvalidParameters => ErrorCode::INVALID_PARAMETERS,
            ErrorKind::HandlerError => ErrorCode::HANDLER_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedExpression => write!(f, "malformed expression"),
            Self::DepthExceeded => write!(f, "depth exceeded"),
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::InvalidParameters => write!(f, "invalid parameters"),
            Self::HandlerError => write!(f, "handler error"),
        }
    }
}

/// A structured brex diagnostic.
///
/// Hosts get these from `Evaluation::diagnostics` or serialize them as JSON;
/// the `message` is for humans, `kind`/`code` are for programs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrexError {
    pub code: ErrorCode,
    pub kind: ErrorKind,
    pub category: ErrorCategory,
    pub message: String,
    /// Command being evaluated when the error occurred.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    /// Location in the input expression.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl BrexError {
    /// Create a new error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let code = kind.code();
        Self {
            code,
            kind,
            category: code.category(),
            message: message.into(),
            command: None,
            span: None,
        }
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = Some(command.into());
        self
    }

    pub fn malformed(message: impl Into<String>, span: Span) -> Self {
        Self::new(ErrorKind::MalformedExpression, message).with_span(span)
    }

    pub fn depth_exceeded(limit: usize, span: Span) -> Self {
        Self::new(
            ErrorKind::DepthExceeded,
            format!("expression nests deeper than {limit} levels"),
        )
        .with_span(span)
    }

    pub fn unknown_command(name: &str, span: Span) -> Self {
        Self::new(
            ErrorKind::UnknownCommand,
            format!("no command registered as '{name}'"),
        )
        .with_command(name)
        .with_span(span)
    }

    pub fn invalid_parameters(name: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParameters, message).with_command(name)
    }

    pub fn handler(name: &str, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::HandlerError, message).with_command(name)
    }
}

impl fmt::Display for BrexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(span) = self.span {
            write!(f, "{span}: ")?;
        }
        write!(f, "{} [{}] {}", self.code, self.kind, self.message)
    }
}

impl std::error::Error for BrexError {}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "syntax"),
            Self::Evaluation => write!(f, "evaluation"),
        }
    }
}

/// Diagnostics collected over one evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostics {
    pub errors: Vec<BrexError>,
    pub total_errors: usize,
    #[serde(skip, default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    MAX_DIAGNOSTICS
}

impl Diagnostics {
    /// Create an empty collection keeping at most `limit` errors.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            errors: Vec::new(),
            total_errors: 0,
            limit,
        }
    }

    pub fn empty() -> Self {
        Self::with_limit(MAX_DIAGNOSTICS)
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Add an error, respecting the limit. The first error and the total
    /// count are always kept.
    pub fn push(&mut self, error: BrexError) {
        if self.errors.len() < self.limit.max(1) {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }

    pub fn first(&self) -> Option<&BrexError> {
        self.errors.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BrexError> {
        self.errors.iter()
    }

    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.errors.iter().map(|e| e.kind).collect()
    }
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::empty()
    }
}
