//! Syntax tree for rule expressions.
//!
//! An expression is either a literal leaf or a named command with an ordered
//! argument list. Each argument is itself a node, so the tree distinguishes
//! literal parameters from nested sub-expressions structurally; the
//! evaluator never has to re-inspect strings.

use crate::{Literal, Span};
use std::fmt;

/// One parsed sub-expression.
#[derive(Debug, Clone, PartialEq)]
pub enum SyntaxNode {
    Literal(LiteralNode),
    Command(CommandNode),
}

/// A bare value such as `true`, `42` or `active`.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralNode {
    pub value: Literal,
    pub span: Span,
}

/// `name[arg, ...]`, or a bare `name` with no arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandNode {
    pub name: String,
    pub args: Vec<SyntaxNode>,
    pub span: Span,
}

impl SyntaxNode {
    pub fn literal(value: Literal, span: Span) -> Self {
        SyntaxNode::Literal(LiteralNode { value, span })
    }

    pub fn command(name: impl Into<String>, args: Vec<SyntaxNode>, span: Span) -> Self {
        SyntaxNode::Command(CommandNode {
            name: name.into(),
            args,
            span,
        })
    }

    pub fn span(&self) -> Span {
        match self {
            SyntaxNode::Literal(lit) => lit.span,
            SyntaxNode::Command(cmd) => cmd.span,
        }
    }

    /// Command name, or `None` for a literal.
    pub fn name(&self) -> Option<&str> {
        match self {
            SyntaxNode::Literal(_) => None,
            SyntaxNode::Command(cmd) => Some(&cmd.name),
        }
    }

    /// Arguments of a command; empty for a literal.
    pub fn args(&self) -> &[SyntaxNode] {
        match self {
            SyntaxNode::Literal(_) => &[],
            SyntaxNode::Command(cmd) => &cmd.args,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            SyntaxNode::Literal(lit) => Some(&lit.value),
            SyntaxNode::Command(_) => None,
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, SyntaxNode::Command(_))
    }

    /// Depth of the deepest command chain; a literal is depth 0.
    pub fn depth(&self) -> usize {
        match self {
            SyntaxNode::Literal(_) => 0,
            SyntaxNode::Command(cmd) => {
                1 + cmd.args.iter().map(SyntaxNode::depth).max().unwrap_or(0)
            }
        }
    }
}

/// Renders the canonical form: no whitespace, arguments comma-separated.
/// A command without arguments prints as a bare name.
impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxNode::Literal(lit) => write!(f, "{}", lit.value),
            SyntaxNode::Command(cmd) => {
                write!(f, "{}", cmd.name)?;
                if cmd.args.is_empty() {
                    return Ok(());
                }
                write!(f, "[")?;
                for (i, arg) in cmd.args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, "]")
            }
        }
    }
}
