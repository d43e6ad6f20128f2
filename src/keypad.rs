//! Headless calculator keypad.
//!
//! [`Keypad`] turns button presses into the raw expression text the evaluator
//! consumes, and keeps what the screen should show. It knows nothing about
//! layout or rendering: a host UI forwards the label of the pressed button to
//! [`Keypad::press`] and draws [`Keypad::display`].
//!
//! The state that must survive the host tearing down and rebuilding its views
//! (display, expression, inverse mode) lives in [`KeypadState`], which is
//! serde-serializable and can be taken out with [`Keypad::snapshot`] and put back
//! with [`Keypad::restore`].

use bitflags::bitflags;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

use crate::config::CalcConfig;
use crate::evaluator::Evaluator;

/// Capacity of the expression and display buffers, in bytes.
///
/// Large enough for the longest formatted `f64` (`Real::MAX` has 309 integer
/// digits) plus the text of a pending expression.
pub const EXPRESSION_CAPACITY: usize = 512;

pub type Buffer = heapless::String<EXPRESSION_CAPACITY>;

/// Longest text [`format_real`](crate::format::format_real) can produce at the
/// default precision: sign, 309 integer digits, point and 7 decimals.
const LONGEST_RESULT: usize = 1 + 309 + 1 + crate::format::DEFAULT_DECIMAL_PLACES;

const _: () = assert!(EXPRESSION_CAPACITY >= LONGEST_RESULT);

/// The button rows of the standard scientific layout, top to bottom.
pub const BUTTON_ROWS: &[&[&str]] = &[
    &["inv", "sin", "ln", "cos", "log", "tan"],
    &["√", "xʸ", "x!", "(", ")", "π"],
    &["AC", "⌫", "%", "÷"],
    &["7", "8", "9", "×"],
    &["4", "5", "6", "-"],
    &["1", "2", "3", "+"],
    &["0", ".", "="],
];

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modes: u8 {
        /// Trig keys enter their inverse (`sin` becomes `asin`).
        const INVERSE = 0b0000_0001;
    }
}

/// Everything a keypad remembers between presses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeypadState {
    pub display: Buffer,
    pub expression: Buffer,
    pub modes: Modes,
}

impl Default for KeypadState {
    fn default() -> Self {
        Self {
            display: zero(),
            expression: Buffer::new(),
            modes: Modes::empty(),
        }
    }
}

// The idle display; one byte always fits (see `LONGEST_RESULT`)
fn zero() -> Buffer {
    Buffer::try_from("0").unwrap_or_default()
}

/// Keys that open a function call: the label followed by `(`.
const FUNCTION_KEYS: &[&str] = &["sin", "cos", "tan", "asin", "acos", "atan", "log", "ln", "√"];

pub struct Keypad {
    state: KeypadState,
    evaluator: Evaluator,
}

impl Keypad {
    pub fn new() -> Self {
        Self::with_config(CalcConfig::default())
    }

    pub fn with_config(config: CalcConfig) -> Self {
        Self {
            state: KeypadState::default(),
            evaluator: Evaluator::with_config(config),
        }
    }

    /// What the screen shows.
    pub fn display(&self) -> &str {
        &self.state.display
    }

    /// The expression being composed. Empty after `AC` or a failed `=`.
    pub fn expression(&self) -> &str {
        &self.state.expression
    }

    pub fn is_inverse(&self) -> bool {
        self.state.modes.contains(Modes::INVERSE)
    }

    pub fn snapshot(&self) -> KeypadState {
        self.state.clone()
    }

    pub fn restore(&mut self, state: KeypadState) {
        self.state = state;
    }

    /// Label to draw on `key` in the current mode.
    pub fn button_label<'k>(&self, key: &'k str) -> &'k str {
        if !self.is_inverse() {
            return key;
        }
        match key {
            "sin" => "sin⁻¹",
            "cos" => "cos⁻¹",
            "tan" => "tan⁻¹",
            _ => key,
        }
    }

    fn sentinel(&self) -> &str {
        &self.evaluator.config().error_sentinel
    }

    /// The expression is a placeholder that the next function key replaces.
    fn expression_is_placeholder(&self) -> bool {
        let expression = self.state.expression.as_str();
        expression == "0" || expression == self.sentinel()
    }

    /// Handle one button press.
    ///
    /// Returns `false` when the press was ignored because the expression would
    /// no longer fit in [`EXPRESSION_CAPACITY`]; the state is then unchanged.
    pub fn press(&mut self, key: &str) -> bool {
        let key = if self.is_inverse() {
            match key {
                "sin" => "asin",
                "cos" => "acos",
                "tan" => "atan",
                other => other,
            }
        } else {
            key
        };
        trace!("keypad press {:?} on {:?}", key, self.state.expression);

        match key {
            "AC" => {
                self.state.expression.clear();
                self.state.display = zero();
                true
            }
            "⌫" => {
                if self.state.expression.pop().is_some() {
                    self.show_expression();
                }
                true
            }
            "=" => {
                if !self.state.expression.is_empty() {
                    self.evaluate();
                }
                true
            }
            "inv" => {
                self.state.modes.toggle(Modes::INVERSE);
                true
            }
            "x!" => self.append_parts(&["fact("]),
            "xʸ" => self.append_parts(&["^("]),
            "1/x" => {
                if self.expression_is_placeholder() {
                    self.replace_parts(&["1/"])
                } else {
                    let current = self.state.expression.clone();
                    self.replace_parts(&["1/(", current.as_str(), ")"])
                }
            }
            function if FUNCTION_KEYS.contains(&function) => {
                if self.expression_is_placeholder() {
                    self.replace_parts(&[function, "("])
                } else {
                    self.append_parts(&[function, "("])
                }
            }
            other => {
                let fresh = self.state.display == "0" || self.state.expression == self.sentinel();
                if fresh {
                    self.replace_parts(&[other])
                } else {
                    self.append_parts(&[other])
                }
            }
        }
    }

    fn evaluate(&mut self) {
        let result = self.evaluator.eval_display(&self.state.expression);
        self.state.expression = if result == self.sentinel() {
            Buffer::new()
        } else {
            // A result too long to keep editing starts the next expression afresh
            Buffer::try_from(result.as_str()).unwrap_or_default()
        };
        self.set_display(&result);
    }

    fn append_parts(&mut self, parts: &[&str]) -> bool {
        let mut next = self.state.expression.clone();
        for part in parts {
            if next.push_str(part).is_err() {
                return false;
            }
        }
        self.commit(next)
    }

    fn replace_parts(&mut self, parts: &[&str]) -> bool {
        let mut next = Buffer::new();
        for part in parts {
            if next.push_str(part).is_err() {
                return false;
            }
        }
        self.commit(next)
    }

    fn commit(&mut self, expression: Buffer) -> bool {
        self.state.expression = expression;
        self.show_expression();
        true
    }

    fn show_expression(&mut self) {
        if self.state.expression.is_empty() {
            self.state.display = zero();
        } else {
            self.state.display = self.state.expression.clone();
        }
    }

    fn set_display(&mut self, text: &str) {
        self.state.display = match Buffer::try_from(text) {
            Ok(buffer) => buffer,
            Err(()) => {
                debug!("{} bytes do not fit the display, showing the error sentinel", text.len());
                match Buffer::try_from(self.sentinel()) {
                    Ok(buffer) => buffer,
                    // A sentinel longer than the buffer leaves the display blank
                    Err(()) => Buffer::new(),
                }
            }
        };
    }
}

impl Default for Keypad {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press_all(keypad: &mut Keypad, keys: &[&str]) {
        for key in keys {
            assert!(keypad.press(key), "key {:?} rejected", key);
        }
    }

    #[test]
    fn test_initial_state() {
        let keypad = Keypad::new();
        assert_eq!(keypad.display(), "0");
        assert_eq!(keypad.expression(), "");
        assert!(!keypad.is_inverse());
    }

    #[test]
    fn test_digits_and_operators() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["1", "2", "+", "3", "×", "4"]);
        assert_eq!(keypad.display(), "12+3×4");
        press_all(&mut keypad, &["="]);
        assert_eq!(keypad.display(), "24");
        assert_eq!(keypad.expression(), "24");
    }

    #[test]
    fn test_result_is_carried_into_next_expression() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["6", "÷", "4", "=", "×", "2", "="]);
        assert_eq!(keypad.display(), "3");
    }

    #[test]
    fn test_zero_display_is_replaced() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["0", "7"]);
        assert_eq!(keypad.expression(), "7");
    }

    #[test]
    fn test_clear_and_backspace() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["1", "2", "⌫"]);
        assert_eq!(keypad.display(), "1");
        press_all(&mut keypad, &["⌫"]);
        assert_eq!(keypad.display(), "0");
        assert_eq!(keypad.expression(), "");
        // Backspace on empty is a no-op
        press_all(&mut keypad, &["⌫"]);
        assert_eq!(keypad.display(), "0");

        press_all(&mut keypad, &["9", "9", "AC"]);
        assert_eq!(keypad.display(), "0");
        assert_eq!(keypad.expression(), "");
    }

    #[test]
    fn test_backspace_removes_whole_glyph() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["2", "×", "⌫"]);
        assert_eq!(keypad.expression(), "2");
    }

    #[test]
    fn test_equals_on_empty_does_nothing() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["="]);
        assert_eq!(keypad.display(), "0");
        assert_eq!(keypad.expression(), "");
    }

    #[test]
    fn test_error_clears_expression() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["5", "÷", "0", "="]);
        assert_eq!(keypad.display(), "Error");
        assert_eq!(keypad.expression(), "");
        press_all(&mut keypad, &["4"]);
        assert_eq!(keypad.display(), "4");
    }

    #[test]
    fn test_function_keys() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["√", "1", "6", ")", "="]);
        assert_eq!(keypad.display(), "4");

        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["5", "x!", ")", "="]);
        // "5fact(" is rejected: no implicit multiplication
        assert_eq!(keypad.display(), "Error");

        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["x!", "5", ")", "="]);
        assert_eq!(keypad.display(), "120");
    }

    #[test]
    fn test_power_key() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["2", "xʸ", "1", "0", ")", "="]);
        assert_eq!(keypad.display(), "1024");
    }

    #[test]
    fn test_reciprocal_key() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["4", "1/x"]);
        assert_eq!(keypad.expression(), "1/(4)");
        press_all(&mut keypad, &["="]);
        assert_eq!(keypad.display(), "0.25");

        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["0", "1/x", "8", "="]);
        assert_eq!(keypad.display(), "0.125");
    }

    #[test]
    fn test_inverse_mode() {
        let mut keypad = Keypad::new();
        assert_eq!(keypad.button_label("sin"), "sin");
        press_all(&mut keypad, &["inv"]);
        assert!(keypad.is_inverse());
        assert_eq!(keypad.button_label("sin"), "sin⁻¹");
        assert_eq!(keypad.button_label("log"), "log");

        press_all(&mut keypad, &["sin", "1", ")", "="]);
        assert_eq!(keypad.display(), "1.5707963");

        press_all(&mut keypad, &["AC", "inv", "cos", "1", ")", "="]);
        assert!(!keypad.is_inverse());
        assert_eq!(keypad.display(), "0.5403023");
    }

    #[test]
    fn test_overflowing_input_is_ignored() {
        let mut keypad = Keypad::new();
        for _ in 0..EXPRESSION_CAPACITY {
            assert!(keypad.press("1"));
        }
        let before = keypad.snapshot();
        assert!(!keypad.press("1"));
        assert!(!keypad.press("x!"));
        assert_eq!(keypad.snapshot(), before);
    }

    #[test]
    fn test_result_too_long_for_the_display() {
        let config = CalcConfig {
            decimal_places: 600,
            ..CalcConfig::default()
        };
        let mut keypad = Keypad::with_config(config);
        // 2^-1000 needs every one of the 600 places
        press_all(&mut keypad, &["2", "xʸ", "-", "1", "0", "0", "0", ")", "="]);
        assert_eq!(keypad.display(), "Error");
        assert_eq!(keypad.expression(), "");

        press_all(&mut keypad, &["AC", "2", "+", "2", "="]);
        assert_eq!(keypad.display(), "4");
    }

    #[test]
    fn test_oversized_sentinel_blanks_the_display() {
        let config = CalcConfig {
            error_sentinel: "E".repeat(EXPRESSION_CAPACITY + 1),
            ..CalcConfig::default()
        };
        let mut keypad = Keypad::with_config(config);
        press_all(&mut keypad, &["5", "÷", "0", "="]);
        assert_eq!(keypad.display(), "");
        assert_eq!(keypad.expression(), "");
        press_all(&mut keypad, &["7"]);
        assert_eq!(keypad.display(), "7");
    }

    #[test]
    fn test_snapshot_restore() {
        let mut keypad = Keypad::new();
        press_all(&mut keypad, &["inv", "7", "+"]);
        let saved = keypad.snapshot();

        let mut rebuilt = Keypad::new();
        rebuilt.restore(saved);
        assert_eq!(rebuilt.display(), "7+");
        assert!(rebuilt.is_inverse());
        press_all(&mut rebuilt, &["1", "="]);
        assert_eq!(rebuilt.display(), "8");
    }

    #[test]
    fn test_button_rows_cover_every_key() {
        let mut keypad = Keypad::new();
        for row in BUTTON_ROWS {
            for key in *row {
                keypad.press(key);
            }
        }
        // Whatever the sequence, the keypad stays usable
        press_all(&mut keypad, &["AC", "2", "+", "2", "="]);
        assert_eq!(keypad.display(), "4");
    }
}
