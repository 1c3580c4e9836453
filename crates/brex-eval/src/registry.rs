//! Command registry: name → handler + schema.

use crate::builtins::Builtin;
use crate::error::CommandError;
use brex_types::{CommandKind, CommandSchema, Value};
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tracing::debug;

/// Signature of a host-supplied command.
///
/// Receives the evaluated arguments and the context passed to the
/// top-level evaluation, unchanged.
pub type HandlerFn =
    dyn Fn(&[Value], Option<&dyn Any>) -> Result<Value, CommandError> + Send + Sync;

/// The implementation behind a command name.
#[derive(Clone)]
pub enum Handler {
    Builtin(Builtin),
    External(Arc<HandlerFn>),
}

impl Handler {
    /// Wrap a host closure.
    pub fn external<F>(f: F) -> Self
    where
        F: Fn(&[Value], Option<&dyn Any>) -> Result<Value, CommandError> + Send + Sync + 'static,
    {
        Handler::External(Arc::new(f))
    }

    /// Run the handler. A panicking host closure becomes
    /// [`CommandError::Panicked`].
    pub fn call(&self, args: &[Value], ctx: Option<&dyn Any>) -> Result<Value, CommandError> {
        match self {
            Handler::Builtin(builtin) => builtin.call(args),
            Handler::External(f) => match catch_unwind(AssertUnwindSafe(|| (**f)(args, ctx))) {
                Ok(result) => result,
                Err(payload) => Err(CommandError::Panicked(panic_message(payload.as_ref()))),
            },
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Handler::Builtin(builtin) => write!(f, "Builtin({builtin})"),
            Handler::External(_) => write!(f, "External(<fn>)"),
        }
    }
}

/// A registered command.
#[derive(Debug, Clone)]
pub struct CommandDescriptor {
    pub name: String,
    pub handler: Handler,
    pub schema: CommandSchema,
}

impl CommandDescriptor {
    pub fn kind(&self) -> CommandKind {
        self.schema.kind
    }
}

/// Commands available to the evaluator, keyed by case-sensitive name.
///
/// Registering an existing name replaces it, which is how built-ins are
/// overridden.
#[derive(Debug, Clone)]
pub struct Registry {
    commands: BTreeMap<String, CommandDescriptor>,
}

impl Registry {
    /// A registry with no commands at all.
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    /// A registry holding the built-in commands.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for builtin in Builtin::ALL {
            registry.register(builtin.name(), Handler::Builtin(builtin), builtin.schema());
        }
        registry
    }

    /// Insert or replace a command. Returns the replaced descriptor.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        handler: Handler,
        schema: CommandSchema,
    ) -> Option<CommandDescriptor> {
        let name = name.into();
        let descriptor = CommandDescriptor {
            name: name.clone(),
            handler,
            schema,
        };
        let previous = self.commands.insert(name.clone(), descriptor);
        debug!(
            command = %name,
            replaced = previous.is_some(),
            "registered command"
        );
        previous
    }

    /// Register a host closure.
    pub fn register_fn<F>(
        &mut self,
        name: impl Into<String>,
        schema: CommandSchema,
        f: F,
    ) -> Option<CommandDescriptor>
    where
        F: Fn(&[Value], Option<&dyn Any>) -> Result<Value, CommandError> + Send + Sync + 'static,
    {
        self.register(name, Handler::external(f), schema)
    }

    pub fn unregister(&mut self, name: &str) -> Option<CommandDescriptor> {
        self.commands.remove(name)
    }

    pub fn lookup(&self, name: &str) -> Option<&CommandDescriptor> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// The built-in commands.
impl Default for Registry {
    fn default() -> Self {
        Self::with_builtins()
    }
}
