//! Tree-walking evaluator.

use crate::error::{EvalError, EvalResult};
use crate::registry::Registry;
use crate::validate::validate;
use brex_types::{
    BrexError, CommandKind, CommandNode, Diagnostics, EngineConfig, SyntaxNode, Value,
    DEFAULT_MAX_DEPTH, MAX_DIAGNOSTICS,
};
use std::any::Any;
use tracing::{trace, warn};

/// Outcome of evaluating one expression.
///
/// `value` is what the host sees; `diagnostics` holds every failure that
/// was replaced by a fallback on the way there.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub value: Value,
    pub diagnostics: Diagnostics,
}

impl Evaluation {
    /// A successful evaluation with no diagnostics.
    pub fn ok(value: Value) -> Self {
        Self {
            value,
            diagnostics: Diagnostics::empty(),
        }
    }

    /// An evaluation that failed outright, e.g. because the expression
    /// could not be parsed.
    pub fn failed(error: BrexError, kind: CommandKind) -> Self {
        let mut diagnostics = Diagnostics::empty();
        diagnostics.push(error);
        Self {
            value: kind.fallback(),
            diagnostics,
        }
    }

    pub fn is_clean(&self) -> bool {
        !self.diagnostics.has_errors()
    }

    /// The value, or the first recorded error.
    pub fn into_result(self) -> Result<Value, BrexError> {
        match self.diagnostics.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(self.value),
        }
    }
}

/// The evaluator: walks a [`SyntaxNode`] and dispatches commands through
/// a [`Registry`].
///
/// Arguments are evaluated eagerly, left to right, before their command's
/// handler runs. A failing command is replaced by its kind's fallback and
/// the failure is recorded, so a broken sub-rule never aborts its parent.
pub struct Evaluator<'r> {
    registry: &'r Registry,
    max_depth: usize,
    diagnostics: Diagnostics,
}

impl<'r> Evaluator<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            max_depth: DEFAULT_MAX_DEPTH,
            diagnostics: Diagnostics::with_limit(MAX_DIAGNOSTICS),
        }
    }

    pub fn with_config(mut self, config: &EngineConfig) -> Self {
        self.max_depth = config.depth_limit();
        self.diagnostics = Diagnostics::with_limit(config.max_diagnostics);
        self
    }

    /// Evaluate `node` with an optional host context.
    pub fn evaluate(mut self, node: &SyntaxNode, ctx: Option<&dyn Any>) -> Evaluation {
        let value = self.eval_or_fallback(node, ctx, 1);
        Evaluation {
            value,
            diagnostics: self.diagnostics,
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Node evaluation
    // ══════════════════════════════════════════════════════════════════════

    fn eval_or_fallback(&mut self, node: &SyntaxNode, ctx: Option<&dyn Any>, depth: usize) -> Value {
        match self.eval_node(node, ctx, depth) {
            Ok(value) => value,
            Err(err) => self.fall_back(err),
        }
    }

    fn eval_node(
        &mut self,
        node: &SyntaxNode,
        ctx: Option<&dyn Any>,
        depth: usize,
    ) -> EvalResult<Value> {
        match node {
            SyntaxNode::Literal(lit) => Ok(lit.value.to_value()),
            SyntaxNode::Command(cmd) => self.eval_command(cmd, ctx, depth),
        }
    }

    fn eval_command(
        &mut self,
        cmd: &CommandNode,
        ctx: Option<&dyn Any>,
        depth: usize,
    ) -> EvalResult<Value> {
        let registry = self.registry;
        let descriptor = registry.lookup(&cmd.name);
        // unknown commands fall back as conditions
        let kind = descriptor.map_or(CommandKind::Condition, |d| d.kind());

        if depth > self.max_depth {
            return Err(EvalError::new(
                BrexError::depth_exceeded(self.max_depth, cmd.span),
                kind,
            ));
        }
        let Some(descriptor) = descriptor else {
            return Err(EvalError::new(
                BrexError::unknown_command(&cmd.name, cmd.span),
                kind,
            ));
        };

        let mut args = Vec::with_capacity(cmd.args.len());
        for arg in &cmd.args {
            args.push(self.eval_or_fallback(arg, ctx, depth + 1));
        }

        validate(&args, &descriptor.schema, &cmd.name)
            .map_err(|e| EvalError::new(e.with_span(cmd.span), kind))?;

        trace!(command = %cmd.name, args = args.len(), "dispatching command");
        descriptor.handler.call(&args, ctx).map_err(|e| {
            EvalError::new(
                BrexError::handler(&cmd.name, e.to_string()).with_span(cmd.span),
                kind,
            )
        })
    }

    /// Record `err` and return the value that stands in for the command.
    fn fall_back(&mut self, err: EvalError) -> Value {
        let fallback = err.fallback();
        warn!(
            code = %err.error.code,
            kind = %err.error.kind,
            command = err.error.command.as_deref().unwrap_or(""),
            fallback = %fallback,
            "rule evaluation fell back: {}",
            err.error.message
        );
        self.diagnostics.push(err.error);
        fallback
    }
}

/// Evaluate `node` against `registry` with default settings.
pub fn evaluate(registry: &Registry, node: &SyntaxNode, ctx: Option<&dyn Any>) -> Evaluation {
    Evaluator::new(registry).evaluate(node, ctx)
}
