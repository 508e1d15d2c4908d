//! Numeric conversion.
//!
//! <https://drafts.csswg.org/css-syntax/#convert-a-string-to-a-number>
//!
//! A number's `repr` is reparsed through the spec's own
//! sign/integer/fractional/exponent composition formula rather than handed
//! to a generic float parser: a bare `.5` is a valid CSS number but not a
//! valid Rust float literal in every grammar a scanner might produce, and
//! the spec's infinity-clamping behavior needs to be expressed explicitly
//! either way.

use crate::scanner::Scanner;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberType {
    Integer,
    Number,
}

/// The value of a `<number-token>`, `<percentage-token>`, or
/// `<dimension-token>`, carrying the CSS spec's integer/number type
/// distinction (see [NumberType]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumberValue {
    Integer(i64),
    Number(f64),
}

impl NumberValue {
    pub fn number_type(&self) -> NumberType {
        match self {
            NumberValue::Integer(_) => NumberType::Integer,
            NumberValue::Number(_) => NumberType::Number,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            NumberValue::Integer(i) => i as f64,
            NumberValue::Number(n) => n,
        }
    }
}

/// <https://drafts.csswg.org/css-syntax/#convert-a-string-to-a-number>
pub(crate) fn convert_string_to_number(repr: &str) -> f64 {
    let mut scanner = Scanner::new(repr.chars().collect());
    let parts = scanner.scan_number_str().unwrap_or_default();

    let s = if parts.sign.as_deref() == Some("-") {
        -1.0
    } else {
        1.0
    };

    let i: f64 = parts
        .integer
        .as_deref()
        .filter(|digits| !digits.is_empty())
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0.0);

    let fractional_digits = parts.fractional.as_deref().unwrap_or("");
    let f: f64 = if fractional_digits.is_empty() {
        0.0
    } else {
        fractional_digits.parse().unwrap_or(0.0)
    };
    let d = fractional_digits.len() as i32;

    let t = if parts.exponent_sign.as_deref() == Some("-") {
        -1.0
    } else {
        1.0
    };
    let e: f64 = parts
        .exponent
        .as_deref()
        .filter(|digits| !digits.is_empty())
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0.0);

    let value = s * (i + f * 10f64.powi(-d)) * 10f64.powf(t * e);
    value.clamp(f64::MIN, f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integer() {
        assert_eq!(convert_string_to_number("42"), 42.0);
    }

    #[test]
    fn negative_integer() {
        assert_eq!(convert_string_to_number("-7"), -7.0);
    }

    #[test]
    fn fractional_value() {
        assert!((convert_string_to_number("3.14") - 3.14).abs() < 1e-9);
    }

    #[test]
    fn exponent_forms() {
        assert_eq!(convert_string_to_number("1e2"), 100.0);
        assert_eq!(convert_string_to_number("1e-2"), 0.01);
        assert_eq!(convert_string_to_number("-1.5e+2"), -150.0);
    }

    #[test]
    fn empty_repr_is_zero() {
        assert_eq!(convert_string_to_number(""), 0.0);
    }

    #[test]
    fn huge_exponent_clamps_to_finite_max() {
        let value = convert_string_to_number("1e999");
        assert_eq!(value, f64::MAX);
        assert!(value.is_finite());
    }

    #[test]
    fn huge_negative_exponent_clamps_to_finite_min() {
        let value = convert_string_to_number("-1e999");
        assert_eq!(value, f64::MIN);
        assert!(value.is_finite());
    }
}
