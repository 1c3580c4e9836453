//! Parameter schemas and command kinds.

use crate::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a parameter slot accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Any evaluated value.
    #[default]
    Any,
    /// Must already be a boolean after evaluation.
    Condition,
}

/// One slot of a command's parameter list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParamSpec {
    #[serde(default)]
    pub required: bool,
    /// Slot absorbs a variable-length tail. Only meaningful on the last slot.
    #[serde(default)]
    pub multiple: bool,
    #[serde(rename = "type", default)]
    pub ty: ParamType,
}

impl ParamSpec {
    pub fn required(ty: ParamType) -> Self {
        Self {
            required: true,
            multiple: false,
            ty,
        }
    }

    pub fn optional(ty: ParamType) -> Self {
        Self {
            required: false,
            multiple: false,
            ty,
        }
    }

    /// A tail slot taking zero or more arguments of `ty`.
    pub fn variadic(ty: ParamType) -> Self {
        Self {
            required: true,
            multiple: true,
            ty,
        }
    }
}

/// Whether a command produces a condition or an arbitrary result.
///
/// The kind decides the value returned when evaluation of the command fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandKind {
    #[default]
    Condition,
    Action,
}

impl CommandKind {
    /// `false` for conditions, `Null` for actions.
    pub fn fallback(self) -> Value {
        match self {
            CommandKind::Condition => Value::Bool(false),
            CommandKind::Action => Value::Null,
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandKind::Condition => write!(f, "condition"),
            CommandKind::Action => write!(f, "action"),
        }
    }
}

/// Full signature of a registered command.
///
/// ```json
/// {"kind": "condition", "params": [{"required": true, "type": "any"}]}
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSchema {
    #[serde(default)]
    pub kind: CommandKind,
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl CommandSchema {
    pub fn condition(params: Vec<ParamSpec>) -> Self {
        Self {
            kind: CommandKind::Condition,
            params,
        }
    }

    pub fn action(params: Vec<ParamSpec>) -> Self {
        Self {
            kind: CommandKind::Action,
            params,
        }
    }

    /// Number of arguments the schema demands. Variadic slots never count.
    pub fn min_args(&self) -> usize {
        self.params
            .iter()
            .filter(|p| p.required && !p.multiple)
            .count()
    }

    /// The trailing variadic slot, if the schema ends with one.
    pub fn variadic_tail(&self) -> Option<&ParamSpec> {
        self.params.last().filter(|p| p.multiple)
    }
}
