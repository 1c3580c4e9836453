//! Error types for the brex evaluator.

use brex_types::{BrexError, CommandKind, Value};
use thiserror::Error;

/// What a command handler returns when it cannot produce a value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// Wrong number of arguments.
    #[error("expected {expected} argument(s), got {found}")]
    Arity { expected: usize, found: usize },

    /// The two operands have no ordering.
    #[error("cannot compare {left} with {right}")]
    Incomparable {
        left: &'static str,
        right: &'static str,
    },

    /// A host handler panicked.
    #[error("handler panicked: {0}")]
    Panicked(String),

    /// Any other handler-specific failure.
    #[error("{0}")]
    Message(String),
}

impl CommandError {
    pub fn msg(message: impl Into<String>) -> Self {
        CommandError::Message(message.into())
    }

    /// Fail unless exactly `expected` arguments were given.
    pub fn check_arity(args: &[Value], expected: usize) -> Result<(), CommandError> {
        if args.len() != expected {
            return Err(CommandError::Arity {
                expected,
                found: args.len(),
            });
        }
        Ok(())
    }
}

/// A failed command evaluation.
///
/// The kind of the failing command decides the value the parent sees in
/// its place.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{error}")]
pub struct EvalError {
    pub error: BrexError,
    pub kind: CommandKind,
}

impl EvalError {
    pub fn new(error: BrexError, kind: CommandKind) -> Self {
        Self { error, kind }
    }

    /// Value used in place of the failed command.
    pub fn fallback(&self) -> Value {
        self.kind.fallback()
    }
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
