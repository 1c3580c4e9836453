//! brex parser: converts rule expressions into a syntax tree.

mod parser;

pub use parser::{build, build_tokens, Parser};
