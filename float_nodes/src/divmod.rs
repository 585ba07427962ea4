//! Floored division with remainder
//!
//! `divmod` is delegated to a collaborator so an embedder can share one
//! implementation between its numeric types. [`FloorDivmod`] is the default:
//! the quotient is floored and the remainder carries the divisor's sign, the
//! same convention `%` uses.

use crate::error::{RuntimeError, RuntimeResult};
use crate::integer::IntegerClassifier;
use crate::value::Value;

/// Divmod collaborator
pub trait Divmod: Send + Sync {
    /// Returns `(quotient, remainder)`; the quotient is an integer value.
    fn divmod(
        &self,
        integers: &dyn IntegerClassifier,
        dividend: f64,
        divisor: f64,
    ) -> RuntimeResult<(Value, Value)>;
}

/// Default divmod: floored quotient, remainder signed like the divisor.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloorDivmod;

impl Divmod for FloorDivmod {
    fn divmod(
        &self,
        integers: &dyn IntegerClassifier,
        dividend: f64,
        divisor: f64,
    ) -> RuntimeResult<(Value, Value)> {
        let (quotient, remainder) = floor_divmod(dividend, divisor)?;
        Ok((integers.classify(quotient)?, Value::Float(remainder)))
    }
}

/// Floored quotient and remainder as doubles.
pub fn floor_divmod(x: f64, y: f64) -> RuntimeResult<(f64, f64)> {
    if y == 0.0 {
        return Err(RuntimeError::zero_division());
    }

    let mut modulus = if y.is_infinite() && !x.is_infinite() {
        x
    } else {
        x % y
    };
    let mut quotient = if x.is_infinite() && !y.is_infinite() {
        x
    } else {
        ((x - modulus) / y).round()
    };

    if y * modulus < 0.0 {
        modulus += y;
        quotient -= 1.0;
    }

    Ok((quotient, modulus))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DomainTag;
    use crate::integer::SmallIntegerRange;

    #[test]
    fn test_floor_divmod_signs() {
        assert_eq!(floor_divmod(7.0, 2.0), Ok((3.0, 1.0)));
        assert_eq!(floor_divmod(-7.0, 2.0), Ok((-4.0, 1.0)));
        assert_eq!(floor_divmod(7.0, -2.0), Ok((-4.0, -1.0)));
        assert_eq!(floor_divmod(-7.0, -2.0), Ok((3.0, -1.0)));
        assert_eq!(floor_divmod(7.5, 2.0), Ok((3.0, 1.5)));
    }

    #[test]
    fn test_floor_divmod_infinite_divisor() {
        assert_eq!(floor_divmod(1.0, f64::INFINITY), Ok((0.0, 1.0)));
        assert_eq!(floor_divmod(-1.0, f64::INFINITY), Ok((-1.0, f64::INFINITY)));
    }

    #[test]
    fn test_floor_divmod_zero_divisor() {
        assert_eq!(floor_divmod(1.0, 0.0), Err(RuntimeError::ZeroDivision));
    }

    #[test]
    fn test_divmod_classifies_quotient() {
        let range = SmallIntegerRange::default();
        assert_eq!(
            FloorDivmod.divmod(&range, 11.0, 4.0),
            Ok((Value::Fixnum(2), Value::Float(3.0)))
        );
        assert_eq!(
            FloorDivmod.divmod(&range, f64::NAN, 1.0),
            Err(RuntimeError::FloatDomain(DomainTag::NaN))
        );
    }
}
