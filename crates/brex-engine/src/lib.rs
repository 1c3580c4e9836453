//! brex: a rule engine for bracket expressions.
//!
//! ```text
//! "AND[equals[1,1],greater_than[10,5]]" → Lexer → Parser → SyntaxNode → Evaluator → Value
//! ```
//!
//! Hosts register their own conditions with [`Engine::register_fn`] and
//! evaluate configured rules with [`Engine::parse`], which never fails:
//! broken rules evaluate to `false`.

mod engine;

pub use engine::Engine;

pub use brex_eval::{Builtin, CommandDescriptor, CommandError, Evaluation, Handler, Registry};
pub use brex_types::{
    BrexError, CommandKind, CommandSchema, ConfigError, Diagnostics, EngineConfig, ErrorCode,
    ErrorKind, ParamSpec, ParamType, SyntaxNode, Value, MAX_DEPTH_LIMIT,
};
