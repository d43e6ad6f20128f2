//! Built-in arithmetic and mathematical functions with domain checking.
//!
//! Every function here takes finite operands and either returns a finite result
//! or an error: arguments outside the mathematical domain produce
//! [`CalcError::Domain`] (or [`CalcError::DivideByZero`]), and results too large
//! for [`Real`] produce [`CalcError::Overflow`]. No function ever hands NaN or an
//! infinity back to the evaluator.
//!
//! All transcendental functions use the `libm` crate, which keeps the crate
//! usable without `std`. Depending on the selected floating-point precision (the
//! `f32` feature), the single- or double-precision variants are used.

use alloc::format;

#[cfg(feature = "f32")]
use libm::{
    acosf as libm_acos, asinf as libm_asin, atanf as libm_atan, cosf as libm_cos,
    fmodf as libm_fmod, log10f as libm_log10, logf as libm_ln, powf as libm_pow,
    sinf as libm_sin, sqrtf as libm_sqrt, tanf as libm_tan, truncf as libm_trunc,
};

#[cfg(not(feature = "f32"))]
use libm::{
    acos as libm_acos, asin as libm_asin, atan as libm_atan, cos as libm_cos, fmod as libm_fmod,
    log as libm_ln, log10 as libm_log10, pow as libm_pow, sin as libm_sin, sqrt as libm_sqrt,
    tan as libm_tan, trunc as libm_trunc,
};

use crate::Real;
use crate::error::{CalcError, Result};
use crate::types::{BinaryOp, Function};

/// Turn a raw floating-point result into a checked one.
///
/// Operands are always finite here, so an infinity means the true result does
/// not fit and NaN means the operation was undefined.
fn checked(what: &str, value: Real) -> Result<Real> {
    if value.is_nan() {
        Err(CalcError::Domain(format!("{} is undefined", what)))
    } else if value.is_infinite() {
        Err(CalcError::Overflow(format!("{} is too large", what)))
    } else {
        Ok(value)
    }
}

fn is_integer(x: Real) -> bool {
    libm_trunc(x) == x
}

pub fn add(a: Real, b: Real) -> Result<Real> {
    checked("sum", a + b)
}

pub fn sub(a: Real, b: Real) -> Result<Real> {
    checked("difference", a - b)
}

pub fn mul(a: Real, b: Real) -> Result<Real> {
    checked("product", a * b)
}

/// Divides `a` by `b`. A zero divisor is an error, not an infinity.
pub fn div(a: Real, b: Real) -> Result<Real> {
    if b == 0.0 {
        return Err(CalcError::DivideByZero);
    }
    checked("quotient", a / b)
}

/// Floating-point remainder of `a / b`, with the sign of `a`.
pub fn rem(a: Real, b: Real) -> Result<Real> {
    if b == 0.0 {
        return Err(CalcError::DivideByZero);
    }
    checked("remainder", libm_fmod(a, b))
}

/// Real exponentiation.
///
/// A negative base only accepts integer exponents, and zero cannot be raised
/// to a negative power.
pub fn pow(base: Real, exponent: Real) -> Result<Real> {
    if base < 0.0 && !is_integer(exponent) {
        return Err(CalcError::Domain(format!(
            "negative base {} raised to non-integer power {}",
            base, exponent
        )));
    }
    if base == 0.0 && exponent < 0.0 {
        return Err(CalcError::Domain(format!(
            "zero raised to negative power {}",
            exponent
        )));
    }
    checked("power", libm_pow(base, exponent))
}

pub fn neg(a: Real) -> Real {
    -a
}

pub fn sin(a: Real) -> Result<Real> {
    checked("sin", libm_sin(a))
}

pub fn cos(a: Real) -> Result<Real> {
    checked("cos", libm_cos(a))
}

pub fn tan(a: Real) -> Result<Real> {
    checked("tan", libm_tan(a))
}

pub fn asin(a: Real) -> Result<Real> {
    if !(-1.0..=1.0).contains(&a) {
        return Err(CalcError::Domain(format!("asin({}) is outside [-1, 1]", a)));
    }
    checked("asin", libm_asin(a))
}

pub fn acos(a: Real) -> Result<Real> {
    if !(-1.0..=1.0).contains(&a) {
        return Err(CalcError::Domain(format!("acos({}) is outside [-1, 1]", a)));
    }
    checked("acos", libm_acos(a))
}

pub fn atan(a: Real) -> Result<Real> {
    checked("atan", libm_atan(a))
}

/// Base-10 logarithm, defined for positive arguments only.
pub fn log(a: Real) -> Result<Real> {
    if a <= 0.0 {
        return Err(CalcError::Domain(format!("log({}) needs a positive argument", a)));
    }
    checked("log", libm_log10(a))
}

/// Natural logarithm, defined for positive arguments only.
pub fn ln(a: Real) -> Result<Real> {
    if a <= 0.0 {
        return Err(CalcError::Domain(format!("ln({}) needs a positive argument", a)));
    }
    checked("ln", libm_ln(a))
}

pub fn sqrt(a: Real) -> Result<Real> {
    if a < 0.0 {
        return Err(CalcError::Domain(format!("sqrt({}) of a negative number", a)));
    }
    checked("sqrt", libm_sqrt(a))
}

/// Factorial of a non-negative integer, as the running product `1 × 2 × … × n`.
///
/// The product stops as soon as it leaves the representable range, so huge
/// arguments fail quickly with [`CalcError::Overflow`] instead of looping.
pub fn fact(n: Real) -> Result<Real> {
    if n < 0.0 || !is_integer(n) {
        return Err(CalcError::Domain(format!(
            "fact({}) needs a non-negative integer",
            n
        )));
    }

    let mut result: Real = 1.0;
    let mut i: Real = 2.0;
    while i <= n {
        result *= i;
        if result.is_infinite() {
            return Err(CalcError::Overflow(format!("fact({}) is too large", n)));
        }
        i += 1.0;
    }
    Ok(result)
}

/// Apply a binary operator to two evaluated operands.
pub fn apply_binary(op: BinaryOp, a: Real, b: Real) -> Result<Real> {
    match op {
        BinaryOp::Add => add(a, b),
        BinaryOp::Sub => sub(a, b),
        BinaryOp::Mul => mul(a, b),
        BinaryOp::Div => div(a, b),
        BinaryOp::Rem => rem(a, b),
        BinaryOp::Pow => pow(a, b),
    }
}

/// Apply a built-in function to its evaluated argument.
pub fn apply_function(func: Function, a: Real) -> Result<Real> {
    match func {
        Function::Sin => sin(a),
        Function::Cos => cos(a),
        Function::Tan => tan(a),
        Function::Asin => asin(a),
        Function::Acos => acos(a),
        Function::Atan => atan(a),
        Function::Log => log(a),
        Function::Ln => ln(a),
        Function::Sqrt => sqrt(a),
        Function::Fact => fact(a),
    }
}
