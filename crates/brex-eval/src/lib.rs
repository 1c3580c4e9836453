//! brex tree-walking evaluator.
//!
//! Evaluates a [`brex_types::SyntaxNode`] against a [`Registry`] of named
//! commands. Arguments are validated against each command's schema before
//! its handler runs, and any failure is turned into the command kind's
//! fallback value instead of an error.

pub mod builtins;
pub mod error;
pub mod evaluator;
pub mod registry;
pub mod validate;

pub use builtins::Builtin;
pub use error::{CommandError, EvalError, EvalResult};
pub use evaluator::{evaluate, Evaluation, Evaluator};
pub use registry::{CommandDescriptor, Handler, HandlerFn, Registry};
pub use validate::validate;
