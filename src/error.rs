//! Error types and handling for the calc-rs crate.
//!
//! Every stage of the pipeline (tokenizer, parser, evaluator, formatter) reports
//! failures through [`CalcError`]. The variants are fine-grained to make
//! diagnostics useful; [`CalcError::kind`] folds them into the three categories
//! callers actually branch on: syntax, domain and overflow.

use alloc::string::String;
use core::fmt;
use serde::{Deserialize, Serialize};

/// Result type used throughout the crate.
pub type Result<T> = core::result::Result<T, CalcError>;

/// Coarse classification of a [`CalcError`].
///
/// The display layer does not distinguish these (everything becomes `"Error"`),
/// but logging and tests do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    /// Malformed token stream or grammar violation.
    Syntax,
    /// Well-formed, but numerically undefined.
    Domain,
    /// The result does not fit in [`Real`](crate::Real).
    Overflow,
}

/// Error type for expression tokenizing, parsing, evaluation and formatting.
#[derive(Debug, Clone, PartialEq)]
pub enum CalcError {
    /// Error during lexical analysis.
    ///
    /// Raised for characters or identifiers the tokenizer cannot classify and for
    /// malformed number literals such as `1.2.3`.
    Tokenizer(String),

    /// Error during syntax analysis: dangling operators, a function name not
    /// followed by `(`, implicit multiplication, empty input.
    Syntax(String),

    /// A parenthesis without a partner.
    ///
    /// `position` is the byte offset of the offending token in the normalized
    /// input, or of the end of input when a `(` is never closed.
    UnmatchedParenthesis { position: usize, found: char },

    /// The expression nests deeper than the configured limit.
    RecursionLimit(String),

    /// Division or remainder with a zero divisor.
    DivideByZero,

    /// A function or operator applied outside its domain, e.g. `log(0)`,
    /// `sqrt(-1)`, `fact(2.5)` or `(-8)^0.5`.
    Domain(String),

    /// A finite computation produced a value too large to represent.
    Overflow(String),
}

impl CalcError {
    /// The category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::Tokenizer(_)
            | CalcError::Syntax(_)
            | CalcError::UnmatchedParenthesis { .. }
            | CalcError::RecursionLimit(_) => ErrorKind::Syntax,
            CalcError::DivideByZero | CalcError::Domain(_) => ErrorKind::Domain,
            CalcError::Overflow(_) => ErrorKind::Overflow,
        }
    }
}

impl fmt::Display for CalcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalcError::Tokenizer(err) => write!(f, "Tokenizer error: {}", err),
            CalcError::Syntax(err) => write!(f, "Syntax error: {}", err),
            CalcError::UnmatchedParenthesis { position, found } => {
                write!(
                    f,
                    "Unmatched parenthesis at position {}: found '{}'",
                    position, found
                )
            }
            CalcError::RecursionLimit(err) => write!(f, "Recursion limit exceeded: {}", err),
            CalcError::DivideByZero => write!(f, "Division by zero"),
            CalcError::Domain(err) => write!(f, "Domain error: {}", err),
            CalcError::Overflow(err) => write!(f, "Overflow: {}", err),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Syntax => "syntax",
            ErrorKind::Domain => "domain",
            ErrorKind::Overflow => "overflow",
        };
        f.write_str(name)
    }
}

impl core::error::Error for CalcError {}
