//! Keypad glyph normalization.
//!
//! A keypad labels its buttons with typographic symbols; the tokenizer only
//! understands ASCII operators and function names. [`normalize`] bridges the two
//! with plain literal substitutions, applied in a fixed order.

use alloc::string::{String, ToString};

use crate::constants;

/// Rewrite keypad glyphs into tokenizer syntax.
///
/// - `×` → `*`
/// - `÷` → `/`
/// - `√` → `sqrt` (the caller supplies the parenthesis, e.g. `√(` → `sqrt(`)
/// - `π` → the decimal expansion of π at full [`Real`](crate::Real) precision
///
/// This never fails. Text that is already in tokenizer syntax passes through
/// unchanged.
pub fn normalize(raw: &str) -> String {
    if raw.is_ascii() {
        return raw.to_string();
    }
    raw.replace('×', "*")
        .replace('÷', "/")
        .replace('√', "sqrt")
        .replace('π', &constants::PI.to_string())
}
