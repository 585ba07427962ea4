//! Numeric semantics of Float operators
//!
//! Pure functions, independent of the specialization machinery. Each
//! specialization installed by an operation node is a thin wrapper around
//! one of these after widening its operand to a double.

use std::cmp::Ordering;

use num_bigint::BigInt;

use crate::error::{RuntimeError, RuntimeResult};
use crate::shape::widen_bignum;

// ========== Arithmetic ==========

#[inline]
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

#[inline]
pub fn sub(a: f64, b: f64) -> f64 {
    a - b
}

#[inline]
pub fn mul(a: f64, b: f64) -> f64 {
    a * b
}

/// IEEE division; a zero divisor yields a signed infinity (or NaN for 0/0).
#[inline]
pub fn div(a: f64, b: f64) -> f64 {
    a / b
}

/// Real power.
#[inline]
pub fn pow(base: f64, exponent: f64) -> f64 {
    base.powf(exponent)
}

/// A negative base raised to a non-integral exponent has no real result and
/// must be computed in the complex domain.
#[inline]
pub fn pow_needs_complex(base: f64, exponent: f64) -> bool {
    base < 0.0 && exponent != exponent.round()
}

#[inline]
pub fn neg(a: f64) -> f64 {
    -a
}

#[inline]
pub fn abs(a: f64) -> f64 {
    a.abs()
}

// ========== Remainder ==========

/// IEEE 754 remainder: `x - n*y` where `n` is `x/y` rounded to the nearest
/// integer, ties to even. The result lies in `[-|y|/2, |y|/2]`.
pub fn ieee_remainder(x: f64, y: f64) -> f64 {
    if x.is_nan() || y.is_nan() || x.is_infinite() || y == 0.0 {
        return f64::NAN;
    }
    if y.is_infinite() {
        return x;
    }

    let ay = y.abs();
    // fold into (-2|y|, 2|y|); fmod is exact
    let folded = if ay <= f64::MAX / 2.0 { x % (ay + ay) } else { x };
    let negative = folded.is_sign_negative();
    let mut r = folded.abs();

    if ay < 2.0 * f64::MIN_POSITIVE {
        if r + r > ay {
            r -= ay;
            if r + r >= ay {
                r -= ay;
            }
        }
    } else {
        let half = 0.5 * ay;
        if r > half {
            r -= ay;
            if r >= half {
                r -= ay;
            }
        }
    }

    if negative {
        -r
    } else {
        r
    }
}

/// Float modulo. The result carries the divisor's sign.
pub fn modulo(a: f64, b: f64) -> RuntimeResult<f64> {
    if b == 0.0 {
        return Err(RuntimeError::zero_division());
    }
    let mut result = ieee_remainder(a, b);
    if b * result < 0.0 {
        result += b;
    }
    Ok(result)
}

// ========== Comparison ==========

/// Three-way compare. `None` (incomparable) when either side is NaN.
///
/// Signed zeros are ordered: `-0.0` sorts below `0.0`.
#[inline]
pub fn compare(a: f64, b: f64) -> Option<Ordering> {
    if a.is_nan() || b.is_nan() {
        None
    } else {
        Some(a.total_cmp(&b))
    }
}

/// Three-way compare against an arbitrary-precision integer.
///
/// An infinite receiver is ordered by its sign alone, so the integer is never
/// converted in that case.
pub fn compare_bignum(a: f64, b: &BigInt) -> Option<Ordering> {
    if a.is_nan() {
        None
    } else if a.is_infinite() {
        Some(if a < 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        })
    } else {
        compare(a, widen_bignum(b))
    }
}

/// `-1`, `0` or `1` for an ordering.
#[inline]
pub fn ordering_to_i64(ordering: Ordering) -> i64 {
    match ordering {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

// ========== Predicates ==========

/// `Some(1)` for +Infinity, `Some(-1)` for -Infinity, `None` otherwise.
#[inline]
pub fn infinite(a: f64) -> Option<i64> {
    if a.is_infinite() {
        Some(if a < 0.0 { -1 } else { 1 })
    } else {
        None
    }
}

#[inline]
pub fn is_nan(a: f64) -> bool {
    a.is_nan()
}

// ========== Rounding ==========

#[inline]
pub fn ceil(a: f64) -> f64 {
    a.ceil()
}

#[inline]
pub fn floor(a: f64) -> f64 {
    a.floor()
}

/// Round to the nearest integer, ties away from zero.
pub fn round_half_away(n: f64) -> RuntimeResult<f64> {
    let n = RuntimeError::check_finite(n)?;
    let mut f = n;

    if f > 0.0 {
        f = f.floor();
        if n - f >= 0.5 {
            f += 1.0;
        }
    } else if f < 0.0 {
        f = f.ceil();
        if f - n >= 0.5 {
            f -= 1.0;
        }
    }

    Ok(f)
}

/// Truncate toward zero.
pub fn truncate(n: f64) -> RuntimeResult<f64> {
    Ok(RuntimeError::check_finite(n)?.trunc())
}
