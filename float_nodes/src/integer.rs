//! Integer representation for float → integer conversions
//!
//! `ceil`, `floor`, `round`, `to_i` and the divmod quotient all end by turning an
//! integral double into an integer value. Which representation that value gets
//! (machine-sized or arbitrary precision) is decided by an
//! [`IntegerClassifier`].

use num_bigint::BigInt;
use num_traits::FromPrimitive;

use crate::config::IntegerConfig;
use crate::error::{DomainTag, RuntimeError, RuntimeResult};
use crate::value::Value;

/// Chooses the representation of an integral value.
pub trait IntegerClassifier: Send + Sync {
    /// Convert an integral double. Non-finite input is a `FloatDomainError`.
    fn classify(&self, integral: f64) -> RuntimeResult<Value>;
}

/// Classifier with a configurable small-integer width.
///
/// Values in `[-2^(bits-1), 2^(bits-1))` become `Value::Fixnum`; everything
/// else becomes `Value::Bignum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmallIntegerRange {
    bits: u32,
}

impl SmallIntegerRange {
    /// Widest supported small integer.
    pub const MAX_BITS: u32 = 64;
    /// Narrowest supported small integer.
    pub const MIN_BITS: u32 = 2;

    /// `bits` is clamped into `MIN_BITS..=MAX_BITS`.
    pub const fn new(bits: u32) -> Self {
        let bits = if bits < Self::MIN_BITS {
            Self::MIN_BITS
        } else if bits > Self::MAX_BITS {
            Self::MAX_BITS
        } else {
            bits
        };
        Self { bits }
    }

    pub fn from_config(config: &IntegerConfig) -> Self {
        Self::new(config.small_bits)
    }

    pub fn bits(&self) -> u32 {
        self.bits
    }

    /// Does the integral value fit the small representation?
    #[inline]
    pub fn contains(&self, integral: f64) -> bool {
        // powers of two are exact in f64
        let half = 2f64.powi(self.bits as i32 - 1);
        integral >= -half && integral < half
    }
}

impl Default for SmallIntegerRange {
    fn default() -> Self {
        Self::new(Self::MAX_BITS)
    }
}

impl IntegerClassifier for SmallIntegerRange {
    fn classify(&self, integral: f64) -> RuntimeResult<Value> {
        let integral = RuntimeError::check_finite(integral)?;
        if self.contains(integral) {
            // range-checked above, the cast is exact
            Ok(Value::Fixnum(integral as i64))
        } else {
            BigInt::from_f64(integral)
                .map(Value::bignum)
                .ok_or(RuntimeError::float_domain(DomainTag::NaN))
        }
    }
}
