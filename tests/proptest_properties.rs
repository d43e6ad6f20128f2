//! Property-based tests for the evaluation pipeline

use calc_rs::engine::interp;
use calc_rs::error::ErrorKind;
use calc_rs::evaluate_display;
use calc_rs::format::format_display;
use calc_rs::keypad::{BUTTON_ROWS, Keypad};
use proptest::prelude::*;

/// Arbitrary keypad-like text, up to 256 characters
fn keypad_text_strategy() -> impl Strategy<Value = String> {
    "[0-9+*/^%().\\-]{0,256}"
}

/// Small well-formed expressions
fn expr_strategy() -> impl Strategy<Value = String> {
    let leaf = (-1000i32..1000).prop_map(|n| format!("({})", n));
    leaf.prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({}+{})", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({}-{})", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({}*{})", a, b)),
            (inner.clone(), inner.clone()).prop_map(|(a, b)| format!("({}/{})", a, b)),
            inner.clone().prop_map(|a| format!("sqrt({})", a)),
            inner.prop_map(|a| format!("-{}", a)),
        ]
    })
}

fn keypad_key_strategy() -> impl Strategy<Value = &'static str> {
    let keys: Vec<&'static str> = BUTTON_ROWS.iter().flat_map(|row| row.iter().copied()).collect();
    proptest::sample::select(keys)
}

proptest! {
    /// Anything typed is either a number or the sentinel; nothing panics
    #[test]
    fn prop_never_panics(input in keypad_text_strategy()) {
        let shown = evaluate_display(&input);
        prop_assert!(shown == "Error" || shown.parse::<f64>().is_ok(), "shown {:?}", shown);
        prop_assert!(!shown.contains('e'));
    }

    /// Unbalanced parentheses are always a syntax error
    #[test]
    fn prop_unbalanced_parens_are_syntax_errors(input in keypad_text_strategy()) {
        let opens = input.matches('(').count();
        let closes = input.matches(')').count();
        prop_assume!(opens != closes);
        let err = interp(&input).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Syntax);
    }

    /// Formatting a result and evaluating the text again gives the same display
    #[test]
    fn prop_display_round_trip(value in -1.0e6..1.0e6f64) {
        let shown = format_display(value as calc_rs::Real).unwrap();
        prop_assert_eq!(evaluate_display(&shown), shown.clone());
    }

    /// A successful display is a fixed point of evaluation
    #[test]
    fn prop_result_is_fixed_point(expr in expr_strategy()) {
        let first = evaluate_display(&expr);
        prop_assume!(first != "Error");
        prop_assert_eq!(evaluate_display(&first), first);
    }

    /// Random button mashing keeps the keypad consistent
    #[test]
    fn prop_keypad_display_is_never_empty(keys in proptest::collection::vec(keypad_key_strategy(), 0..64)) {
        let mut keypad = Keypad::new();
        for key in keys {
            keypad.press(key);
            prop_assert!(!keypad.display().is_empty());
            if !keypad.expression().is_empty() {
                prop_assert_eq!(keypad.display(), keypad.expression());
            }
        }
    }
}
