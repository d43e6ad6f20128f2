//! Button sequences through the headless keypad

use calc_rs::keypad::{BUTTON_ROWS, Keypad, KeypadState};

fn run(keys: &[&str]) -> Keypad {
    let mut keypad = Keypad::new();
    for key in keys {
        keypad.press(key);
    }
    keypad
}

#[test]
fn test_scientific_sequences() {
    let cases: &[(&[&str], &str)] = &[
        (&["3", "+", "4", "×", "sin", "5", ")", "="], "-0.8356971"),
        (&["inv", "sin", "1", ")", "="], "1.5707963"),
        (&["inv", "tan", "1", ")", "="], "0.7853982"),
        (&["log", "1", "0", "0", ")", "="], "2"),
        (&["ln", "1", ")", "="], "0"),
        (&["2", "xʸ", "3", "xʸ", "2", ")", ")", "="], "512"),
        (&["x!", "6", ")", "="], "720"),
        (&["√", "2", ")", "="], "1.4142136"),
        (&["π", "="], "3.1415927"),
        (&["(", "1", "+", "2", ")", "×", "3", "="], "9"),
        (&["1", "0", "%", "4", "="], "2"),
        (&["-", "2", "xʸ", "2", ")", "="], "-4"),
    ];
    for (keys, expected) in cases {
        assert_eq!(run(keys).display(), *expected, "keys {:?}", keys);
    }
}

#[test]
fn test_errors_then_recovery() {
    let mut keypad = run(&["log", "0", ")", "="]);
    assert_eq!(keypad.display(), "Error");
    assert_eq!(keypad.expression(), "");

    keypad.press("sin");
    assert_eq!(keypad.expression(), "sin(");
    keypad.press("0");
    keypad.press(")");
    keypad.press("=");
    assert_eq!(keypad.display(), "0");
}

#[test]
fn test_unbalanced_input_shows_error() {
    let keypad = run(&["(", "2", "+", "3", "="]);
    assert_eq!(keypad.display(), "Error");
}

#[test]
fn test_inverse_labels_follow_mode() {
    let mut keypad = Keypad::new();
    let labels: Vec<&str> = BUTTON_ROWS[0].iter().map(|k| keypad.button_label(k)).collect();
    assert_eq!(labels, ["inv", "sin", "ln", "cos", "log", "tan"]);

    keypad.press("inv");
    let labels: Vec<&str> = BUTTON_ROWS[0].iter().map(|k| keypad.button_label(k)).collect();
    assert_eq!(labels, ["inv", "sin⁻¹", "ln", "cos⁻¹", "log", "tan⁻¹"]);

    keypad.press("inv");
    assert!(!keypad.is_inverse());
}

#[test]
fn test_state_survives_serialization() {
    let keypad = run(&["inv", "1", "2", "+"]);
    let json = serde_json::to_string(&keypad.snapshot()).unwrap();

    let state: KeypadState = serde_json::from_str(&json).unwrap();
    assert_eq!(state, keypad.snapshot());

    let mut rebuilt = Keypad::new();
    rebuilt.restore(state);
    assert_eq!(rebuilt.display(), "12+");
    assert!(rebuilt.is_inverse());
    rebuilt.press("cos");
    rebuilt.press("1");
    rebuilt.press(")");
    rebuilt.press("=");
    assert_eq!(rebuilt.display(), "12");
}
