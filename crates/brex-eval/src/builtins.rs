//! The six built-in commands.

use crate::error::CommandError;
use brex_types::{CommandSchema, ParamSpec, ParamType, Value};
use std::cmp::Ordering;
use std::fmt;

/// A command implemented by the engine itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Builtin {
    And,
    Or,
    Not,
    Equals,
    GreaterThan,
    LessThan,
}

impl Builtin {
    pub const ALL: [Builtin; 6] = [
        Builtin::And,
        Builtin::Or,
        Builtin::Not,
        Builtin::Equals,
        Builtin::GreaterThan,
        Builtin::LessThan,
    ];

    /// Name the command is registered under.
    pub fn name(self) -> &'static str {
        match self {
            Builtin::And => "AND",
            Builtin::Or => "OR",
            Builtin::Not => "NOT",
            Builtin::Equals => "equals",
            Builtin::GreaterThan => "greater_than",
            Builtin::LessThan => "less_than",
        }
    }

    pub fn schema(self) -> CommandSchema {
        match self {
            Builtin::And | Builtin::Or => {
                CommandSchema::condition(vec![ParamSpec::variadic(ParamType::Condition)])
            }
            Builtin::Not => CommandSchema::condition(vec![ParamSpec::required(ParamType::Condition)]),
            Builtin::Equals | Builtin::GreaterThan | Builtin::LessThan => {
                CommandSchema::condition(vec![
                    ParamSpec::required(ParamType::Any),
                    ParamSpec::required(ParamType::Any),
                ])
            }
        }
    }

    pub fn call(self, args: &[Value]) -> Result<Value, CommandError> {
        match self {
            Builtin::And => Ok(Value::Bool(args.iter().all(Value::is_truthy))),
            Builtin::Or => Ok(Value::Bool(args.iter().any(Value::is_truthy))),
            Builtin::Not => {
                CommandError::check_arity(args, 1)?;
                Ok(Value::Bool(!args[0].is_truthy()))
            }
            Builtin::Equals => {
                CommandError::check_arity(args, 2)?;
                Ok(Value::Bool(args[0] == args[1]))
            }
            Builtin::GreaterThan => compare(args).map(|ord| Value::Bool(ord == Ordering::Greater)),
            Builtin::LessThan => compare(args).map(|ord| Value::Bool(ord == Ordering::Less)),
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Order two operands of the same type. Mixed types do not compare.
fn compare(args: &[Value]) -> Result<Ordering, CommandError> {
    CommandError::check_arity(args, 2)?;
    let (left, right) = (&args[0], &args[1]);
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Ok(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) => Ok(a.cmp(b)),
        _ => Err(CommandError::Incomparable {
            left: left.type_name(),
            right: right.type_name(),
        }),
    }
}
