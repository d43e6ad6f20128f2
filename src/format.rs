//! Fixed-precision display formatting.

use alloc::format;
use alloc::string::{String, ToString};

use crate::Real;
use crate::error::{CalcError, Result};

/// Default number of digits kept after the decimal point.
pub const DEFAULT_DECIMAL_PLACES: usize = 7;

/// Render a finite number the way a calculator display shows it.
///
/// The value is rounded to at most `decimal_places` fractional digits, then
/// trailing zeros and a trailing decimal point are trimmed. Scientific notation
/// is never used, and a value that rounds to zero prints as `"0"`, not `"-0"`.
///
/// Non-finite values cannot be displayed and are reported as errors.
pub fn format_real(value: Real, decimal_places: usize) -> Result<String> {
    if value.is_nan() {
        return Err(CalcError::Domain("result is not a number".to_string()));
    }
    if value.is_infinite() {
        return Err(CalcError::Overflow("result is infinite".to_string()));
    }

    let mut text = format!("{:.*}", decimal_places, value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text.remove(0);
    }
    Ok(text)
}

/// [`format_real`] with [`DEFAULT_DECIMAL_PLACES`].
pub fn format_display(value: Real) -> Result<String> {
    format_real(value, DEFAULT_DECIMAL_PLACES)
}
