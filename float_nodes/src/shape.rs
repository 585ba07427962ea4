//! Operand shape classification (guard evaluation).
//!
//! Every operand reaching an operation node is classified into exactly one
//! [`OperandShape`]. Classification is total: anything that is not one of the
//! three numeric representations lands in `Other`, which is the fallback arm.
//! Nothing in this module allocates, raises or calls out of the core.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};

use crate::value::Value;

/// Runtime shape of an operand, as seen by specialization guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperandShape {
    SmallInteger,
    Float,
    BigInteger,
    Other,
}

impl OperandShape {
    /// Shapes a node may install a specialization for.
    pub const NUMERIC: [OperandShape; 3] = [
        OperandShape::SmallInteger,
        OperandShape::Float,
        OperandShape::BigInteger,
    ];

    pub fn is_numeric(self) -> bool {
        !matches!(self, OperandShape::Other)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OperandShape::SmallInteger => "small-integer",
            OperandShape::Float => "float",
            OperandShape::BigInteger => "big-integer",
            OperandShape::Other => "other",
        }
    }
}

/// A classified operand with its payload already extracted.
#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    SmallInteger(i64),
    Float(f64),
    BigInteger(&'a BigInt),
    /// Anything else; handed to the fallback dispatcher as is.
    Other(&'a Value),
}

impl<'a> Operand<'a> {
    /// Classify a value. Never fails.
    #[inline]
    pub fn classify(value: &'a Value) -> Self {
        match value {
            Value::Fixnum(n) => Operand::SmallInteger(*n),
            Value::Float(f) => Operand::Float(*f),
            Value::Bignum(n) => Operand::BigInteger(n),
            other => Operand::Other(other),
        }
    }

    #[inline]
    pub fn shape(&self) -> OperandShape {
        match self {
            Operand::SmallInteger(_) => OperandShape::SmallInteger,
            Operand::Float(_) => OperandShape::Float,
            Operand::BigInteger(_) => OperandShape::BigInteger,
            Operand::Other(_) => OperandShape::Other,
        }
    }

    /// Widen a numeric operand to a double. `None` for `Other`.
    #[inline]
    pub fn widen(&self) -> Option<f64> {
        match self {
            Operand::SmallInteger(n) => Some(*n as f64),
            Operand::Float(f) => Some(*f),
            Operand::BigInteger(n) => Some(widen_bignum(n)),
            Operand::Other(_) => None,
        }
    }
}

/// Convert an arbitrary-precision integer to the nearest double.
///
/// Magnitudes beyond the double range become signed infinity.
pub fn widen_bignum(n: &BigInt) -> f64 {
    n.to_f64().unwrap_or(if n.is_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    })
}
