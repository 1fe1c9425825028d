pub mod hull;
pub mod rational;
pub mod sqrt;
pub mod trig;

pub use rational::{integer, parse_decimal, pow10, ratio, round, to_f64, RoundingMode};
pub use sqrt::RationalSqrt;

/// Exact arbitrary-precision rational scalar.
pub type Rational = num_rational::BigRational;

/// Order of magnitude: rounded results are multiples of `10^oom`.
///
/// `-3` keeps three decimal places, `0` rounds to integers, `2` to hundreds.
pub type Oom = i32;

/// 3D column of exact rationals.
pub type Vector3 = nalgebra::Vector3<Rational>;

/// 3x3 matrix of exact rationals.
pub type Matrix3 = nalgebra::Matrix3<Rational>;
