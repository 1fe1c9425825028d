use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use super::rational::pow10;
use super::{Oom, Rational, RoundingMode};
use crate::error::{NumericError, Result};

/// A signed square root `±√x` of a non-negative rational `x`.
///
/// The exact root is kept whenever `x` is a perfect square, so products and
/// quotients of such values never lose exactness. Otherwise a decimal is
/// materialised on request at the caller's precision.
#[derive(Debug, Clone)]
pub struct RationalSqrt {
    square: Rational,
    negative: bool,
    root: Option<Rational>,
}

impl RationalSqrt {
    /// Creates `√x`.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::NegativeRadicand`] if `x < 0`.
    pub fn new(x: Rational) -> Result<Self> {
        if x.is_negative() {
            return Err(NumericError::NegativeRadicand.into());
        }
        Ok(Self::from_non_negative(x))
    }

    /// Creates `√x` for an `x` known to be non-negative.
    pub(crate) fn from_non_negative(x: Rational) -> Self {
        debug_assert!(!x.is_negative());
        let root = exact_sqrt(&x);
        Self {
            square: x,
            negative: false,
            root,
        }
    }

    /// Wraps a known root `r`, so that `square() == r²`.
    #[must_use]
    pub fn from_root(r: Rational) -> Self {
        let negative = r.is_negative();
        let magnitude = r.abs();
        Self {
            square: &magnitude * &magnitude,
            negative,
            root: Some(magnitude),
        }
    }

    /// `√0`.
    #[must_use]
    pub fn zero() -> Self {
        Self::from_root(Rational::zero())
    }

    /// The radicand `x`; the value squared.
    #[must_use]
    pub fn square(&self) -> &Rational {
        &self.square
    }

    /// Whether the value is `-√x` with `x > 0`.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Whether the radicand is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.square.is_zero()
    }

    /// Whether the radicand is a perfect square.
    #[must_use]
    pub fn is_exact(&self) -> bool {
        self.root.is_some()
    }

    /// The exact signed value, when the radicand is a perfect square.
    #[must_use]
    pub fn exact(&self) -> Option<Rational> {
        self.root
            .as_ref()
            .map(|r| if self.negative { -r } else { r.clone() })
    }

    /// The value: exact when the radicand is a perfect square, otherwise
    /// rounded to a multiple of `10^oom`.
    #[must_use]
    pub fn sqrt(&self, oom: Oom, mode: RoundingMode) -> Rational {
        self.exact().unwrap_or_else(|| self.to_decimal(oom, mode))
    }

    /// The value rounded to a multiple of `10^oom`, exactly as `mode` dictates.
    #[must_use]
    pub fn to_decimal(&self, oom: Oom, mode: RoundingMode) -> Rational {
        let unit = pow10(oom);
        if let Some(root) = &self.root {
            let magnitude = super::round(root, oom, if self.negative { mode.mirrored() } else { mode });
            return if self.negative { -magnitude } else { magnitude };
        }

        let magnitude_mode = if self.negative { mode.mirrored() } else { mode };
        // y = √x / 10^oom, so y² is rational and the rounding decision is exact.
        let scaled_square = &self.square / (&unit * &unit);
        let floor_root = scaled_square.floor().to_integer().sqrt();
        let ceil_root = &floor_root + BigInt::one();

        let rounded = match magnitude_mode {
            RoundingMode::Down | RoundingMode::Floor => floor_root,
            RoundingMode::Up | RoundingMode::Ceiling => ceil_root,
            RoundingMode::HalfUp | RoundingMode::HalfDown | RoundingMode::HalfEven => {
                let twice_half = Rational::from_integer(&floor_root * BigInt::from(2) + BigInt::one());
                let lhs = &twice_half * &twice_half;
                let rhs = scaled_square * BigInt::from(4);
                match rhs.cmp(&lhs) {
                    Ordering::Greater => ceil_root,
                    Ordering::Less => floor_root,
                    Ordering::Equal => match magnitude_mode {
                        RoundingMode::HalfUp => ceil_root,
                        RoundingMode::HalfDown => floor_root,
                        _ if floor_root.is_even() => floor_root,
                        _ => ceil_root,
                    },
                }
            }
        };

        let magnitude = Rational::from_integer(rounded) * unit;
        if self.negative {
            -magnitude
        } else {
            magnitude
        }
    }

    /// `-self`.
    #[must_use]
    pub fn negate(&self) -> Self {
        Self {
            square: self.square.clone(),
            negative: !self.negative && !self.is_zero(),
            root: self.root.clone(),
        }
    }

    /// `self · other`, using `√a·√b = √(ab)`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let square = &self.square * &other.square;
        let root = match (&self.root, &other.root) {
            (Some(a), Some(b)) => Some(a * b),
            _ => exact_sqrt(&square),
        };
        Self {
            negative: (self.negative != other.negative) && !square.is_zero(),
            square,
            root,
        }
    }

    /// `self / other`, or `None` when `other` is zero.
    #[must_use]
    pub fn divide(&self, other: &Self) -> Option<Self> {
        if other.is_zero() {
            return None;
        }
        let square = &self.square / &other.square;
        let root = match (&self.root, &other.root) {
            (Some(a), Some(b)) => Some(a / b),
            _ => exact_sqrt(&square),
        };
        Some(Self {
            negative: (self.negative != other.negative) && !square.is_zero(),
            square,
            root,
        })
    }

    /// `self + other` when the sum is again of the form `±√q`.
    ///
    /// This covers every sum of two exact values and sums such as
    /// `√2 + √8 = √18` where `√(ab)` is rational. Returns `None` otherwise.
    #[must_use]
    pub fn add(&self, other: &Self) -> Option<Self> {
        if self.is_zero() {
            return Some(other.clone());
        }
        if other.is_zero() {
            return Some(self.clone());
        }
        if let (Some(a), Some(b)) = (self.exact(), other.exact()) {
            return Some(Self::from_root(a + b));
        }

        // (±√a ± √b)² = a + b ± 2√(ab)
        let cross = exact_sqrt(&(&self.square * &other.square))? * BigInt::from(2);
        let sum = &self.square + &other.square;
        let square = if self.negative == other.negative {
            sum + cross
        } else {
            sum - cross
        };
        let dominant_negative = if self.square >= other.square {
            self.negative
        } else {
            other.negative
        };
        Some(Self {
            negative: dominant_negative && !square.is_zero(),
            root: exact_sqrt(&square),
            square,
        })
    }
}

/// The exact root of a non-negative rational, when it is a perfect square.
fn exact_sqrt(x: &Rational) -> Option<Rational> {
    if x.is_negative() {
        return None;
    }
    let numer_root = x.numer().sqrt();
    if &(&numer_root * &numer_root) != x.numer() {
        return None;
    }
    let denom_root = x.denom().sqrt();
    if &(&denom_root * &denom_root) != x.denom() {
        return None;
    }
    Some(Rational::new(numer_root, denom_root))
}

impl PartialEq for RationalSqrt {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RationalSqrt {}

impl PartialOrd for RationalSqrt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RationalSqrt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.square.cmp(&other.square),
            (true, true) => other.square.cmp(&self.square),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl Hash for RationalSqrt {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.square.hash(state);
        self.negative.hash(state);
    }
}

impl From<Rational> for RationalSqrt {
    fn from(value: Rational) -> Self {
        Self::from_root(value)
    }
}
