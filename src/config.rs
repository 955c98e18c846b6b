//! Evaluator configuration

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Nesting limit used when none is configured
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Tunables for an [`Evaluator`](crate::Evaluator)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EvalConfig {
    /// Maximum number of simultaneously open parentheses and brackets
    ///
    /// Nested array values are dropped, compared and printed recursively,
    /// so this also bounds the stack those operations need.
    pub max_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        EvalConfig {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EvalConfig {
    /// Loads a configuration from JSON, missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Sets the nesting limit (builder style)
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = limit;
        self
    }
}
