//! Evaluator configuration.
//!
//! [`CalcConfig`] derives serde's `Serialize`/`Deserialize` so a host can keep it
//! next to its own settings in whatever format it already uses; every field has a
//! default, so partial documents work.

use alloc::string::{String, ToString};
use serde::{Deserialize, Serialize};

use crate::format::DEFAULT_DECIMAL_PLACES;

/// Text shown in place of a result when evaluation fails.
pub const DEFAULT_ERROR_SENTINEL: &str = "Error";

/// Longest normalized expression the parser accepts, in bytes.
pub const DEFAULT_MAX_EXPRESSION_LENGTH: usize = 10_000;

/// Deepest nesting of groups, function calls and prefix operators.
pub const DEFAULT_MAX_RECURSION_DEPTH: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Digits kept after the decimal point when formatting.
    pub decimal_places: usize,
    /// Display text for any failed evaluation.
    pub error_sentinel: String,
    pub max_expression_length: usize,
    pub max_recursion_depth: usize,
}

impl Default for CalcConfig {
    fn default() -> Self {
        Self {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            error_sentinel: DEFAULT_ERROR_SENTINEL.to_string(),
            max_expression_length: DEFAULT_MAX_EXPRESSION_LENGTH,
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}
