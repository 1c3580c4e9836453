//! brex lexer: splits rule expressions into bracket-aware tokens.

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, LexResult, Lexer};
pub use token::Token;
