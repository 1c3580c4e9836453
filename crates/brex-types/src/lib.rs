//! Shared types for brex.
//!
//! This crate defines the syntax tree, runtime values, command schemas,
//! source spans, error types and configuration used across all stages.

mod config;
mod error;
mod schema;
mod span;
mod value;
pub mod ast;

pub use ast::{CommandNode, LiteralNode, SyntaxNode};
pub use config::{ConfigError, EngineConfig, DEFAULT_MAX_DEPTH, MAX_DEPTH_LIMIT};
pub use error::{BrexError, Diagnostics, ErrorCategory, ErrorCode, ErrorKind, MAX_DIAGNOSTICS};
pub use schema::{CommandKind, CommandSchema, ParamSpec, ParamType};
pub use span::Span;
pub use value::{parse_bool, parse_integer, Literal, Value};

/// Result type used throughout brex.
pub type Result<T> = std::result::Result<T, BrexError>;
