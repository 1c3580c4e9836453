//! The host-facing rule engine.

use brex_eval::{CommandDescriptor, CommandError, Evaluation, Evaluator, Handler, Registry};
use brex_parser::Parser;
use brex_types::{
    BrexError, CommandKind, CommandSchema, ConfigError, EngineConfig, Result, SyntaxNode, Value,
};
use std::any::Any;
use tracing::{debug, warn};

/// Parses and evaluates rule expressions against its own command registry.
///
/// Each engine owns its registry, so independent engines with different
/// command sets can coexist. Evaluation takes `&self` and registration
/// `&mut self`; share a fully configured engine behind an `Arc`, or wrap it
/// in a lock if commands must be registered while rules are running.
#[derive(Debug, Clone)]
pub struct Engine {
    registry: Registry,
    config: EngineConfig,
}

impl Engine {
    /// An engine with the built-in commands and default configuration.
    pub fn new() -> Self {
        Self {
            registry: Registry::with_builtins(),
            config: EngineConfig::default(),
        }
    }

    /// An engine with the built-in commands. Fails if `config` does not
    /// pass [`EngineConfig::validate`].
    pub fn with_config(config: EngineConfig) -> std::result::Result<Self, ConfigError> {
        Self::with_registry(Registry::with_builtins(), config)
    }

    pub fn with_registry(
        registry: Registry,
        config: EngineConfig,
    ) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { registry, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    // ── Registration ─────────────────────────────────────────────────────

    /// Register a command, replacing any command of the same name
    /// (built-ins included). Returns the replaced descriptor.
    pub fn register_command(
        &mut self,
        name: impl Into<String>,
        handler: Handler,
        schema: CommandSchema,
    ) -> Option<CommandDescriptor> {
        self.registry.register(name, handler, schema)
    }

    /// Register a host closure as a command.
    pub fn register_fn<F>(
        &mut self,
        name: impl Into<String>,
        schema: CommandSchema,
        f: F,
    ) -> Option<CommandDescriptor>
    where
        F: Fn(&[Value], Option<&dyn Any>) -> std::result::Result<Value, CommandError>
            + Send
            + Sync
            + 'static,
    {
        self.registry.register_fn(name, schema, f)
    }

    // ── Parsing & evaluation ─────────────────────────────────────────────

    /// Build the syntax tree for `input` without evaluating it.
    pub fn build(&self, input: &str) -> Result<SyntaxNode> {
        Parser::with_config(input, self.config.clone()).parse()
    }

    /// Evaluate a rule and keep every diagnostic.
    ///
    /// Absent or blank input is an unconditionally satisfied rule.
    pub fn evaluate(&self, input: Option<&str>, ctx: Option<&dyn Any>) -> Evaluation {
        let Some(input) = input.filter(|s| !s.trim().is_empty()) else {
            return Evaluation::ok(Value::Bool(true));
        };
        debug!(rule = input, "evaluating rule");

        match self.build(input) {
            Ok(node) => {
                debug!(depth = node.depth(), "rule built");
                Evaluator::new(&self.registry)
                    .with_config(&self.config)
                    .evaluate(&node, ctx)
            }
            Err(err) => {
                warn!(
                    code = %err.code,
                    kind = %err.kind,
                    rule = input,
                    "rule could not be parsed: {}",
                    err.message
                );
                Evaluation::failed(err, CommandKind::Condition)
            }
        }
    }

    /// Evaluate a rule. Never fails: a rule that cannot be parsed or
    /// evaluated yields `false` (or `Null` for a failing action command).
    pub fn parse(&self, input: Option<&str>, ctx: Option<&dyn Any>) -> Value {
        self.evaluate(input, ctx).value
    }

    /// Evaluate a rule and report the first failure, if any.
    pub fn try_parse(
        &self,
        input: Option<&str>,
        ctx: Option<&dyn Any>,
    ) -> std::result::Result<Value, BrexError> {
        self.evaluate(input, ctx).into_result()
    }

    /// Whether the rule holds for `ctx`.
    pub fn is_satisfied(&self, input: Option<&str>, ctx: Option<&dyn Any>) -> bool {
        self.parse(input, ctx).is_truthy()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
