use num_traits::{One, Signed, Zero};

use super::rational::{integer, pow10, ratio, round, round_to_integer};
use super::{Oom, Rational, RoundingMode};

/// Extra decimal places carried by intermediate sums.
const GUARD_DIGITS: i32 = 6;

/// π rounded to a multiple of `10^oom` (Machin's formula).
#[must_use]
pub fn pi(oom: Oom) -> Rational {
    let working = oom - GUARD_DIGITS;
    let value = arctan_inverse(5, working) * integer(16) - arctan_inverse(239, working) * integer(4);
    round(&value, oom, RoundingMode::HalfEven)
}

/// `atan(1/k)` to within a few units of `10^working`.
fn arctan_inverse(k: i64, working: Oom) -> Rational {
    let epsilon = pow10(working);
    let k_squared = integer(k * k);
    let mut power = ratio(1, k);
    let mut sum = Rational::zero();
    let mut n: i64 = 0;
    loop {
        let term = &power / integer(2 * n + 1);
        if term < epsilon {
            break;
        }
        let term = round(&term, working, RoundingMode::HalfEven);
        if n % 2 == 0 {
            sum += term;
        } else {
            sum -= term;
        }
        power /= &k_squared;
        n += 1;
    }
    sum
}

/// `(sin θ, cos θ)` for `θ` in radians, each rounded to a multiple of `10^oom`.
///
/// `θ` is first reduced into `[-π, π]`; partial sums are rounded to a working
/// precision below `oom` so operand sizes stay bounded.
#[must_use]
pub fn sin_cos(theta: &Rational, oom: Oom) -> (Rational, Rational) {
    let working = oom - GUARD_DIGITS;
    let two_pi = pi(working - GUARD_DIGITS) * integer(2);
    let turns = round_to_integer(&(theta / &two_pi), RoundingMode::HalfEven);
    let x = theta - Rational::from_integer(turns) * &two_pi;

    let epsilon = pow10(working);
    let mut sin = Rational::zero();
    let mut cos = Rational::zero();
    let mut term = Rational::one();
    let mut n: i64 = 0;
    loop {
        if n > 3 && term.abs() < epsilon {
            break;
        }
        match n % 4 {
            0 => cos += &term,
            1 => sin += &term,
            2 => cos -= &term,
            _ => sin -= &term,
        }
        n += 1;
        term = round(&(term * &x / integer(n)), working, RoundingMode::HalfEven);
    }

    (
        round(&sin, oom, RoundingMode::HalfEven),
        round(&cos, oom, RoundingMode::HalfEven),
    )
}
