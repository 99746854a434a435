//! The element type stored in the container and parsing of user input.

use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// A single stack element. Real-valued, signed.
pub type Value = f64;

/// Parse a value typed by the user.
///
/// Surrounding whitespace is ignored. Accepts an optional leading sign and an
/// optional fractional part (`12`, `-3.5`, `+.25`, `7.`); exponents and the
/// textual forms `NaN`/`inf` are rejected.
pub fn parse_value(input: &str) -> Result<Value, InputError> {
    let text = input.trim();
    if text.is_empty() {
        return Err(InputError::Empty);
    }

    if !is_decimal_literal(text) {
        return Err(InputError::NotNumeric(text.to_string()));
    }

    let value: Value = text
        .parse()
        .map_err(|_| InputError::NotNumeric(text.to_string()))?;

    // Literals with hundreds of digits overflow to infinity.
    if !value.is_finite() {
        return Err(InputError::NotNumeric(text.to_string()));
    }

    Ok(value)
}

fn is_decimal_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if !all_digits(whole) || !fraction.is_none_or(all_digits) {
        return false;
    }

    !whole.is_empty() || fraction.is_some_and(|f| !f.is_empty())
}

/// Sign classification used to colour rendered cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueSign {
    Positive,
    Negative,
    Zero,
}

impl ValueSign {
    pub fn of(value: Value) -> Self {
        if value > 0.0 {
            Self::Positive
        } else if value < 0.0 {
            Self::Negative
        } else {
            Self::Zero
        }
    }
}
