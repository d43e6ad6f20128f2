use calc_rs::keypad::{BUTTON_ROWS, Keypad};

fn main() {
    let mut keypad = Keypad::new();

    // Show the layout as the current mode labels it
    keypad.press("inv");
    for row in BUTTON_ROWS {
        let labels: Vec<&str> = row.iter().map(|key| keypad.button_label(key)).collect();
        println!("{}", labels.join("  "));
    }
    println!();

    for key in ["sin", "1", ")", "×", "2", "="] {
        keypad.press(key);
        println!("{:>4} -> {}", key, keypad.display());
    }

    // Keys pressed after a result extend it
    for key in ["÷", "π", "="] {
        keypad.press(key);
        println!("{:>4} -> {}", key, keypad.display());
    }
}
