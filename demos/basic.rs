use calc_rs::{Evaluator, interp};

fn main() {
    // Plain arithmetic and the keypad glyphs
    let result = interp("2 + 3 * 4").unwrap_or_else(|e| {
        panic!("{}", e);
    });
    println!("2 + 3 * 4 = {:?}", result);

    let mut evaluator = Evaluator::new();
    for input in ["3+4×sin(5)", "2^3^2", "√(2)", "fact(10)", "π÷2", "log(0)", "(2+3"] {
        match evaluator.evaluate(input) {
            Ok(shown) => println!("{:>12} = {}", input, shown),
            Err(err) => println!("{:>12} : {} ({})", input, evaluator.eval_display(input), err),
        }
    }
}
