//! Arena-managed expression evaluator
//!
//! This module runs the whole pipeline (normalize, tokenize, parse, evaluate,
//! format) with automatic arena lifecycle management.

use alloc::string::String;
use bumpalo::Bump;
use log::debug;

use crate::Real;
use crate::config::CalcConfig;
use crate::engine::parse_expression_with_config;
use crate::error::Result;
use crate::eval::eval_ast;
use crate::format::format_real;
use crate::normalize::normalize;

/// An expression evaluator that manages its own memory arena.
///
/// The arena is reset at the start of every call, so a long-lived evaluator
/// does not grow with the number of expressions it has seen.
///
/// # Examples
///
/// ```
/// use calc_rs::evaluator::Evaluator;
/// use calc_rs::error::ErrorKind;
///
/// let mut evaluator = Evaluator::new();
/// assert_eq!(evaluator.eval("2 + 3 * 4").unwrap(), 14.0);
/// assert_eq!(evaluator.evaluate("√(2)").unwrap(), "1.4142136");
/// assert_eq!(evaluator.evaluate("5/0").unwrap_err().kind(), ErrorKind::Domain);
/// assert_eq!(evaluator.eval_display("5/0"), "Error");
/// ```
pub struct Evaluator {
    arena: Bump,
    config: CalcConfig,
}

impl Evaluator {
    /// Creates a new evaluator with a fresh arena and the default configuration.
    pub fn new() -> Self {
        Self::with_config(CalcConfig::default())
    }

    pub fn with_config(config: CalcConfig) -> Self {
        Self {
            arena: Bump::new(),
            config,
        }
    }

    /// Creates a new evaluator with a pre-allocated arena capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            arena: Bump::with_capacity(capacity),
            config: CalcConfig::default(),
        }
    }

    pub fn config(&self) -> &CalcConfig {
        &self.config
    }

    /// Evaluates a raw keypad expression to a number.
    pub fn eval(&mut self, expression: &str) -> Result<Real> {
        self.arena.reset();
        let normalized = normalize(expression);
        let ast = parse_expression_with_config(&normalized, &self.arena, &self.config)?;
        eval_ast(ast)
    }

    /// Evaluates and formats, keeping the failure kind.
    pub fn evaluate(&mut self, expression: &str) -> Result<String> {
        let value = self.eval(expression)?;
        format_real(value, self.config.decimal_places)
    }

    /// Evaluates and formats for display: any failure becomes the error sentinel.
    pub fn eval_display(&mut self, expression: &str) -> String {
        match self.evaluate(expression) {
            Ok(text) => text,
            Err(err) => {
                debug!("evaluation of {:?} failed ({}): {}", expression, err.kind(), err);
                self.config.error_sentinel.clone()
            }
        }
    }

    /// Returns the current memory usage of the arena in bytes.
    pub fn allocated_bytes(&self) -> usize {
        self.arena.allocated_bytes()
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot display evaluation with the default configuration.
///
/// Returns the formatted result, or `"Error"` for any failure.
pub fn evaluate_display(expression: &str) -> String {
    Evaluator::new().eval_display(expression)
}
