#![cfg_attr(not(test), no_std)]
#![doc = r#"
# calc-rs

A small, no_std-friendly expression engine for pocket-calculator input.

## Overview

calc-rs takes the raw text a calculator keypad produces (for example
`"3+4×sin(5)"`) and turns it into a display string such as `"-0.8356971"`, or
into the sentinel `"Error"` when the input cannot be evaluated. The pipeline is:

1. **Normalize**: `×` → `*`, `÷` → `/`, `√` → `sqrt`, `π` → its decimal expansion.
2. **Tokenize**: numbers, operators, function names, constants and parentheses.
3. **Parse**: precedence climbing into an arena-allocated tree.
4. **Evaluate**: post-order, with domain checks (`log(0)`, `sqrt(-1)`, `fact(2.5)`, `5/0`).
5. **Format**: at most 7 decimals, trailing zeros trimmed, never scientific notation.

Every stage fails fast. The internal API keeps the three failure kinds apart
(syntax, domain, overflow); the display boundary collapses them into `"Error"`.

## Quick Start

```rust
use calc_rs::evaluator::evaluate_display;

assert_eq!(evaluate_display("2+3×4"), "14");
assert_eq!(evaluate_display("2^3^2"), "512");
assert_eq!(evaluate_display("fact(5)"), "120");
assert_eq!(evaluate_display("log(0)"), "Error");
```

## Inspecting Errors

```rust
use calc_rs::engine::interp;
use calc_rs::error::ErrorKind;

let err = interp("sqrt(-4)").unwrap_err();
assert_eq!(err.kind(), ErrorKind::Domain);

let err = interp("(2+3").unwrap_err();
assert_eq!(err.kind(), ErrorKind::Syntax);

let err = interp("fact(200)").unwrap_err();
assert_eq!(err.kind(), ErrorKind::Overflow);
```

## Reusing an Evaluator

The [`Evaluator`](evaluator::Evaluator) owns a bump arena that is reset on every
call, so repeated evaluations do not grow memory:

```rust
use calc_rs::evaluator::Evaluator;

let mut evaluator = Evaluator::new();
assert_eq!(evaluator.eval_display("1/3"), "0.3333333");
assert_eq!(evaluator.eval_display("asin(1)"), "1.5707963");
```

## The Keypad

[`Keypad`](keypad::Keypad) is the button-press state machine of a classic
calculator screen. A host UI forwards button labels and renders `display()`:

```rust
use calc_rs::keypad::Keypad;

let mut keypad = Keypad::new();
for key in ["inv", "sin", "1", ")", "="] {
    keypad.press(key);
}
assert_eq!(keypad.display(), "1.5707963");
```

## Supported Grammar

From lowest to highest precedence:

| Precedence | Operators     | Associativity |
|------------|---------------|---------------|
| 1          | `+` `-`       | Left          |
| 2          | `*` `/` `%`   | Left          |
| -          | unary `-` `+` | Prefix        |
| 3          | `^`           | Right         |

Unary minus sits between `*` and `^`, so `-2^2` is `-4` while `2^-1` is `0.5`.
Implicit multiplication (`2(3)`, `2pi`) is rejected.

Functions (one argument, parentheses required): `sin`, `cos`, `tan`, `asin`,
`acos`, `atan` (radians), `log` (base 10), `ln`, `sqrt`, `fact`.

Constants: `pi`, `e` (and the `π` glyph).

## Feature Flags

- `f32`: use 32-bit floating point. 64-bit is the default.
"#]

extern crate alloc;

pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod evaluator;
pub mod format;
pub mod functions;
pub mod keypad;
pub mod lexer;
pub mod normalize;
pub mod types;

pub use config::CalcConfig;
pub use engine::{interp, parse_expression};
pub use error::{CalcError, ErrorKind, Result};
pub use evaluator::{Evaluator, evaluate_display};
pub use keypad::Keypad;
pub use types::*;

/// Define the floating-point type based on feature flags
#[cfg(feature = "f32")]
pub type Real = f32;

#[cfg(not(feature = "f32"))]
pub type Real = f64;

pub mod constants {
    use super::Real;

    #[cfg(feature = "f32")]
    pub const PI: Real = core::f32::consts::PI;
    #[cfg(feature = "f32")]
    pub const E: Real = core::f32::consts::E;
    #[cfg(feature = "f32")]
    pub const TEST_PRECISION: Real = 1e-5;

    #[cfg(not(feature = "f32"))]
    pub const PI: Real = core::f64::consts::PI;
    #[cfg(not(feature = "f32"))]
    pub const E: Real = core::f64::consts::E;
    #[cfg(not(feature = "f32"))]
    pub const TEST_PRECISION: Real = 1e-10;
}

/// Utility macro to check if two floating point values are approximately equal
/// within a specified epsilon. Supports an optional format message like assert_eq!.
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr $(,)?) => {
        $crate::assert_approx_eq!($left, $right, $crate::constants::TEST_PRECISION)
    };
    ($left:expr, $right:expr, $epsilon:expr $(,)?) => {{
        let left_val = $left;
        let right_val = $right;
        let eps = $epsilon;
        assert!(
            (left_val - right_val).abs() < eps,
            "assertion failed: `(left ≈ right)` (left: `{}`, right: `{}`, epsilon: `{}`)",
            left_val,
            right_val,
            eps
        );
    }};
    ($left:expr, $right:expr, $epsilon:expr, $($arg:tt)+) => {{
        let left_val = $left;
        let right_val = $right;
        let eps = $epsilon;
        assert!((left_val - right_val).abs() < eps, $($arg)+);
    }};
}
