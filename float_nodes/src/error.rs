//! Runtime error types raised by Float operation nodes
//!
//! The core raises only two domain errors of its own (`ZeroDivisionError` and
//! `FloatDomainError`) plus `TypeError` for operand shapes an operator has no
//! policy for. Every other variant exists so that a dispatch target can raise
//! it; the core hands such errors back to its caller untouched.

use std::fmt;

use thiserror::Error;

/// Tag carried by a `FloatDomainError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainTag {
    Infinity,
    NaN,
}

impl DomainTag {
    /// Tag for a non-finite value, or `None` when the value is finite.
    pub fn of(value: f64) -> Option<Self> {
        if value.is_nan() {
            Some(DomainTag::NaN)
        } else if value.is_infinite() {
            Some(DomainTag::Infinity)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DomainTag::Infinity => "Infinity",
            DomainTag::NaN => "NaN",
        }
    }
}

impl fmt::Display for DomainTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runtime error type
///
/// Represents errors raised while executing a Float operation, either by the
/// core itself or by a collaborator it called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Modulo (or divmod) by exactly zero
    #[error("ZeroDivisionError: divided by 0")]
    ZeroDivision,

    /// Integer conversion of a non-finite float
    #[error("FloatDomainError: {0}")]
    FloatDomain(DomainTag),

    /// Operand of the wrong kind
    #[error("TypeError: {0}")]
    TypeError(String),

    /// Bad argument (e.g. failed comparison coercion)
    #[error("ArgumentError: {0}")]
    ArgumentError(String),

    /// Dispatch found no method for the receiver
    #[error("NoMethodError: undefined method `{method}' for {class}")]
    NoMethod {
        /// Selector that was sent
        method: String,
        /// Class name of the receiver
        class: String,
    },
}

impl RuntimeError {
    /// Create a zero-division error
    pub fn zero_division() -> Self {
        RuntimeError::ZeroDivision
    }

    /// Create a float-domain error
    pub fn float_domain(tag: DomainTag) -> Self {
        RuntimeError::FloatDomain(tag)
    }

    /// Create a type error
    pub fn type_error<S: Into<String>>(msg: S) -> Self {
        RuntimeError::TypeError(msg.into())
    }

    /// Create an argument error
    pub fn argument_error<S: Into<String>>(msg: S) -> Self {
        RuntimeError::ArgumentError(msg.into())
    }

    /// Create a no-method error
    pub fn no_method<S1: Into<String>, S2: Into<String>>(method: S1, class: S2) -> Self {
        RuntimeError::NoMethod {
            method: method.into(),
            class: class.into(),
        }
    }

    /// `TypeError` raised when an operand cannot take part in Float arithmetic.
    pub fn cant_coerce_into_float(class: &str) -> Self {
        RuntimeError::TypeError(format!("{} can't be coerced into Float", class))
    }

    /// Fail with `FloatDomainError` unless `value` is finite.
    pub fn check_finite(value: f64) -> RuntimeResult<f64> {
        match DomainTag::of(value) {
            Some(tag) => Err(RuntimeError::FloatDomain(tag)),
            None => Ok(value),
        }
    }
}

/// Result type alias for Float operations
pub type RuntimeResult<T> = Result<T, RuntimeError>;
