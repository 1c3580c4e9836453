//! Engine configuration.

use crate::error::MAX_DIAGNOSTICS;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum command nesting depth.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Largest `max_depth` a config may ask for. The builder and the evaluator
/// both recurse once per nesting level, so this bounds their stack use.
pub const MAX_DEPTH_LIMIT: usize = 256;

/// Tunables shared by the parser and the evaluator.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum command nesting depth before `DepthExceeded`, at most
    /// [`MAX_DEPTH_LIMIT`].
    pub max_depth: usize,
    /// Reject unbalanced brackets and empty command names. When off, the
    /// builder works with whatever tokens the lexer produced.
    pub strict_brackets: bool,
    /// Diagnostics kept per evaluation. At least one.
    pub max_diagnostics: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_brackets: true,
            max_diagnostics: MAX_DIAGNOSTICS,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("max_depth must be at least 1")]
    ZeroDepth,

    #[error("max_depth {0} exceeds the limit of {MAX_DEPTH_LIMIT}")]
    DepthTooLarge(usize),

    #[error("max_diagnostics must be at least 1")]
    ZeroDiagnostics,
}

impl EngineConfig {
    /// Parse a config from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::DepthTooLarge(self.max_depth));
        }
        if self.max_diagnostics == 0 {
            return Err(ConfigError::ZeroDiagnostics);
        }
        Ok(())
    }

    /// The nesting limit actually enforced. Configs that skipped
    /// [`validate`](Self::validate) are capped at [`MAX_DEPTH_LIMIT`].
    pub fn depth_limit(&self) -> usize {
        self.max_depth.min(MAX_DEPTH_LIMIT)
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn lenient(mut self) -> Self {
        self.strict_brackets = false;
        self
    }
}
