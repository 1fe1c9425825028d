use std::cmp::Ordering;
use std::str::FromStr;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::{Oom, Rational};
use crate::error::{NumericError, Result};

/// How a value is rounded onto a grid of `10^oom`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    /// Away from zero.
    Up,
    /// Towards zero.
    Down,
    /// Towards positive infinity.
    Ceiling,
    /// Towards negative infinity.
    Floor,
    /// To nearest, ties away from zero.
    #[default]
    HalfUp,
    /// To nearest, ties towards zero.
    HalfDown,
    /// To nearest, ties to the even neighbour.
    HalfEven,
}

impl RoundingMode {
    /// The mode to apply to the magnitude of a negative value.
    pub(crate) fn mirrored(self) -> Self {
        match self {
            Self::Ceiling => Self::Floor,
            Self::Floor => Self::Ceiling,
            other => other,
        }
    }
}

/// Creates a rational from an integer.
#[must_use]
pub fn integer(n: i64) -> Rational {
    Rational::from_integer(BigInt::from(n))
}

/// Creates the rational `numer / denom`.
///
/// # Panics
///
/// Panics if `denom` is zero.
#[must_use]
pub fn ratio(numer: i64, denom: i64) -> Rational {
    Rational::new(BigInt::from(numer), BigInt::from(denom))
}

/// Returns `10^exp` exactly.
#[must_use]
pub fn pow10(exp: i32) -> Rational {
    let magnitude = BigInt::from(10u32).pow(exp.unsigned_abs());
    if exp >= 0 {
        Rational::from_integer(magnitude)
    } else {
        Rational::new(BigInt::one(), magnitude)
    }
}

/// Parses a decimal literal such as `-12.5`, `3e-4` or a fraction `7/3`.
///
/// # Errors
///
/// Returns [`NumericError::Parse`] if the text is not a decimal or fraction.
pub fn parse_decimal(text: &str) -> Result<Rational> {
    let s = text.trim();
    let fail = || NumericError::Parse(text.to_owned());

    if s.contains('/') {
        return Rational::from_str(s).map_err(|_| fail().into());
    }

    let (mantissa, exponent) = match s.find(|c: char| c == 'e' || c == 'E') {
        Some(i) => (&s[..i], s[i + 1..].parse::<i32>().map_err(|_| fail())?),
        None => (s, 0),
    };
    let negative = mantissa.starts_with('-');
    let unsigned = mantissa.trim_start_matches(|c: char| c == '+' || c == '-');
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));

    if whole.is_empty() && fraction.is_empty() {
        return Err(fail().into());
    }
    if !whole.chars().chain(fraction.chars()).all(|c| c.is_ascii_digit()) {
        return Err(fail().into());
    }

    let digits = format!("{whole}{fraction}");
    let unscaled = BigInt::from_str(&digits).map_err(|_| fail())?;
    let scale = i32::try_from(fraction.len()).map_err(|_| fail())?;
    let value = Rational::from_integer(unscaled) * pow10(exponent - scale);
    Ok(if negative { -value } else { value })
}

/// Rounds `x` to a multiple of `10^oom`.
#[must_use]
pub fn round(x: &Rational, oom: Oom, mode: RoundingMode) -> Rational {
    let unit = pow10(oom);
    let scaled = x / &unit;
    Rational::from_integer(round_to_integer(&scaled, mode)) * unit
}

/// Rounds `x` to an integer.
pub(crate) fn round_to_integer(x: &Rational, mode: RoundingMode) -> BigInt {
    let floor = x.floor().to_integer();
    if x.is_integer() {
        return floor;
    }
    let ceil = &floor + BigInt::one();
    let negative = x.is_negative();

    match mode {
        RoundingMode::Floor => floor,
        RoundingMode::Ceiling => ceil,
        RoundingMode::Down => {
            if negative {
                ceil
            } else {
                floor
            }
        }
        RoundingMode::Up => {
            if negative {
                floor
            } else {
                ceil
            }
        }
        RoundingMode::HalfUp | RoundingMode::HalfDown | RoundingMode::HalfEven => {
            let twice_fraction = (x - Rational::from_integer(floor.clone())) * BigInt::from(2);
            match twice_fraction.cmp(&Rational::one()) {
                Ordering::Less => floor,
                Ordering::Greater => ceil,
                Ordering::Equal => match mode {
                    RoundingMode::HalfUp if negative => floor,
                    RoundingMode::HalfUp => ceil,
                    RoundingMode::HalfDown if negative => ceil,
                    RoundingMode::HalfDown => floor,
                    _ if floor.is_even() => floor,
                    _ => ceil,
                },
            }
        }
    }
}

/// Nearest `f64`, for display and approximate comparisons only.
#[must_use]
pub fn to_f64(x: &Rational) -> f64 {
    if x.is_zero() {
        return 0.0;
    }
    x.to_f64().unwrap_or(f64::NAN)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_signed_decimals() {
        assert_eq!(parse_decimal("0.5").unwrap(), ratio(1, 2));
        assert_eq!(parse_decimal("-12.25").unwrap(), ratio(-49, 4));
        assert_eq!(parse_decimal("+3").unwrap(), integer(3));
        assert_eq!(parse_decimal(".75").unwrap(), ratio(3, 4));
    }

    #[test]
    fn parses_exponents_and_fractions() {
        assert_eq!(parse_decimal("3e-4").unwrap(), ratio(3, 10_000));
        assert_eq!(parse_decimal("1.5E2").unwrap(), integer(150));
        assert_eq!(parse_decimal("7/3").unwrap(), ratio(7, 3));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_decimal("").is_err());
        assert!(parse_decimal("1.2.3").is_err());
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("-").is_err());
    }

    #[test]
    fn pow10_handles_both_signs() {
        assert_eq!(pow10(3), integer(1000));
        assert_eq!(pow10(-2), ratio(1, 100));
        assert_eq!(pow10(0), integer(1));
    }

    #[test]
    fn rounding_modes_on_a_tie() {
        let x = ratio(25, 10); // 2.5
        assert_eq!(round(&x, 0, RoundingMode::HalfUp), integer(3));
        assert_eq!(round(&x, 0, RoundingMode::HalfDown), integer(2));
        assert_eq!(round(&x, 0, RoundingMode::HalfEven), integer(2));
        assert_eq!(round(&-x.clone(), 0, RoundingMode::HalfUp), integer(-3));
        assert_eq!(round(&-x, 0, RoundingMode::HalfEven), integer(-2));
    }

    #[test]
    fn directed_rounding_of_negative_values() {
        let x = ratio(-17, 10); // -1.7
        assert_eq!(round(&x, 0, RoundingMode::Floor), integer(-2));
        assert_eq!(round(&x, 0, RoundingMode::Ceiling), integer(-1));
        assert_eq!(round(&x, 0, RoundingMode::Down), integer(-1));
        assert_eq!(round(&x, 0, RoundingMode::Up), integer(-2));
    }

    #[test]
    fn rounds_to_fractional_and_coarse_grids() {
        let x = ratio(1, 3);
        assert_eq!(round(&x, -3, RoundingMode::HalfUp), ratio(333, 1000));
        assert_eq!(round(&integer(1249), 2, RoundingMode::HalfUp), integer(1200));
    }

    #[test]
    fn converts_to_f64() {
        assert!((to_f64(&ratio(1, 4)) - 0.25).abs() < f64::EPSILON);
        assert!(to_f64(&integer(0)).abs() < f64::EPSILON);
    }
}
