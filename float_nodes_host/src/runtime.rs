//! Reference host runtime
//!
//! A small object model that gives Float operation nodes something real to
//! talk to. It answers the coercion protocol the nodes fall back on, provides
//! the complex-number collaborator, and routes dynamic sends to floats through
//! a shared set of operation nodes.
//!
//! Receivers understood by [`HostRuntime::send`]:
//!
//! | receiver | methods |
//! |---|---|
//! | Float | every Float method, plus `coerce`, `redo_coerced`, `math_coerce`, `equal_fallback`, `round_internal`, `to_c` |
//! | Fixnum, Bignum | `coerce`, `==`, `to_f` |
//! | Complex | `coerce`, `+`, `-`, `*`, `/`, `**`, `==`, `real`, `imaginary`, `abs`, `arg`, `to_s` |

use float_nodes::config::{ConfigError, FloatConfig};
use float_nodes::fallback::{
    COERCE, COMPARE_ERROR, EQUAL_FALLBACK, MATH_COERCE, REDO_COERCED, ROUND_INTERNAL,
};
use float_nodes::prelude::*;
use float_nodes::semantics;

use crate::complex::Complex;

/// Host runtime owning the Float call sites.
#[derive(Debug)]
pub struct HostRuntime {
    sites: FloatCallSites,
    integers: SmallIntegerRange,
}

impl HostRuntime {
    pub fn new() -> Self {
        Self::with_config(&FloatConfig::default())
    }

    pub fn with_config(config: &FloatConfig) -> Self {
        let integers = SmallIntegerRange::from_config(&config.integer);
        tracing::debug!(small_bits = integers.bits(), "host runtime configured");
        Self {
            sites: FloatCallSites::new(),
            integers,
        }
    }

    /// Build a runtime from a TOML configuration document.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(Self::with_config(&FloatConfig::from_toml_str(src)?))
    }

    /// Collaborators handed to operation nodes.
    pub fn context(&self) -> FloatContext<'_> {
        FloatContext::new(self, self).with_integers(&self.integers)
    }

    pub fn sites(&self) -> &FloatCallSites {
        &self.sites
    }

    /// Send `method` to `receiver`.
    pub fn send(&self, receiver: &Value, method: &str, args: &[Value]) -> RuntimeResult<Value> {
        self.call(receiver, method, args)
    }

    // ========== Float ==========

    fn send_float(&self, receiver: f64, method: &str, args: &[Value]) -> RuntimeResult<Value> {
        match (method, args) {
            (COERCE, [other]) => match real_of(other) {
                Some(other) => Ok(Value::pair(Value::Float(other), Value::Float(receiver))),
                None => Err(RuntimeError::cant_coerce_into_float(other.class_name())),
            },
            (REDO_COERCED, [op, other]) => {
                let op = op
                    .as_symbol()
                    .ok_or_else(|| RuntimeError::type_error("redo_coerced expects a Symbol"))?;
                let (b, a) = self.math_coerce(receiver, other, false)?;
                self.call(&a, op, &[b])
            }
            (MATH_COERCE, [other, mode]) => {
                let compare_error = mode.as_symbol() == Some(COMPARE_ERROR);
                let (b, a) = self.math_coerce(receiver, other, compare_error)?;
                Ok(Value::pair(b, a))
            }
            (EQUAL_FALLBACK, [other]) => {
                // `other == self`; anything that fails to answer is unequal
                let answer = self
                    .call(other, "==", &[Value::Float(receiver)])
                    .map(|v| truthy(&v))
                    .unwrap_or(false);
                Ok(Value::Bool(answer))
            }
            (ROUND_INTERNAL, [ndigits]) => self.round_to_digits(receiver, ndigits),
            ("to_c", []) => Ok(Complex::from_real(receiver).into()),
            _ => self.sites.send(&self.context(), receiver, method, args),
        }
    }

    /// `other.coerce(self)` reordered to `[other', self']`.
    fn math_coerce(
        &self,
        receiver: f64,
        other: &Value,
        compare_error: bool,
    ) -> RuntimeResult<(Value, Value)> {
        let coerced = self
            .call(other, COERCE, &[Value::Float(receiver)])
            .map_err(|err| {
                tracing::trace!(%err, operand = other.class_name(), "coercion failed");
                if compare_error {
                    RuntimeError::argument_error(format!(
                        "comparison of Float with {} failed",
                        describe(other)
                    ))
                } else {
                    RuntimeError::cant_coerce_into_float(other.class_name())
                }
            })?;
        let (a, b) = coerced
            .as_pair()
            .ok_or_else(|| RuntimeError::type_error("coerce must return [x, y]"))?;
        Ok((b, a))
    }

    fn round_to_digits(&self, receiver: f64, ndigits: &Value) -> RuntimeResult<Value> {
        let digits = ndigits
            .as_fixnum()
            .ok_or_else(|| {
                RuntimeError::type_error(format!(
                    "no implicit conversion of {} into Integer",
                    ndigits.class_name()
                ))
            })?
            .clamp(-400, 400) as i32;

        if digits > 0 {
            // 17 significant digits already identify any double
            if !receiver.is_finite() || digits > 16 {
                return Ok(Value::Float(receiver));
            }
            let scale = 10f64.powi(digits);
            let scaled = receiver * scale;
            // too large to carry that many fractional digits
            if !scaled.is_finite() {
                return Ok(Value::Float(receiver));
            }
            let rounded = semantics::round_half_away(scaled)? / scale;
            return Ok(Value::Float(rounded));
        }

        let scale = 10f64.powi(-digits);
        let rounded = if scale.is_infinite() {
            RuntimeError::check_finite(receiver)?;
            0.0
        } else {
            semantics::round_half_away(receiver / scale)? * scale
        };
        self.integers.classify(rounded)
    }

    // ========== Integers ==========

    fn send_integer(&self, receiver: &Value, method: &str, args: &[Value]) -> RuntimeResult<Value> {
        let widened = real_of(receiver).unwrap_or(f64::NAN);
        match (method, args) {
            (COERCE, [Value::Fixnum(n)]) if receiver.as_fixnum().is_some() => {
                Ok(Value::pair(Value::Fixnum(*n), receiver.clone()))
            }
            (COERCE, [other]) => match real_of(other) {
                Some(other) => Ok(Value::pair(Value::Float(other), Value::Float(widened))),
                None => Err(RuntimeError::type_error(format!(
                    "{} can't be coerced into {}",
                    other.class_name(),
                    receiver.class_name()
                ))),
            },
            ("==", [other]) => Ok(Value::Bool(match (receiver, other) {
                (Value::Fixnum(a), Value::Fixnum(b)) => a == b,
                (Value::Bignum(a), Value::Bignum(b)) => a == b,
                _ => real_of(other) == Some(widened),
            })),
            ("to_f", []) => Ok(Value::Float(widened)),
            _ => Err(RuntimeError::no_method(method, receiver.class_name())),
        }
    }

    // ========== Complex ==========

    fn send_complex(&self, receiver: &Complex, method: &str, args: &[Value]) -> RuntimeResult<Value> {
        match (method, args) {
            (COERCE, [other]) => {
                let other = complex_of(other).ok_or_else(|| {
                    RuntimeError::type_error(format!(
                        "{} can't be coerced into Complex",
                        other.class_name()
                    ))
                })?;
                Ok(Value::pair(other.into(), (*receiver).into()))
            }
            ("+" | "-" | "*" | "/" | "**", [other]) => {
                let rhs = complex_of(other).ok_or_else(|| {
                    RuntimeError::type_error(format!(
                        "{} can't be coerced into Complex",
                        other.class_name()
                    ))
                })?;
                let result = match method {
                    "+" => receiver.add(rhs),
                    "-" => receiver.sub(rhs),
                    "*" => receiver.mul(rhs),
                    "/" => receiver.div(rhs),
                    _ => receiver.pow(rhs),
                };
                Ok(result.into())
            }
            ("==", [other]) => Ok(Value::Bool(complex_of(other) == Some(*receiver))),
            ("real", []) => Ok(Value::Float(receiver.re)),
            ("imaginary" | "imag", []) => Ok(Value::Float(receiver.im)),
            ("abs" | "magnitude", []) => Ok(Value::Float(receiver.abs())),
            ("arg" | "angle", []) => Ok(Value::Float(receiver.arg())),
            ("to_s" | "inspect", []) => Ok(Value::string(&receiver.to_string())),
            _ => Err(RuntimeError::no_method(method, "Complex")),
        }
    }
}

impl Default for HostRuntime {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatch for HostRuntime {
    fn call(&self, receiver: &Value, method: &str, args: &[Value]) -> RuntimeResult<Value> {
        match receiver {
            Value::Float(f) => self.send_float(*f, method, args),
            Value::Fixnum(_) | Value::Bignum(_) => self.send_integer(receiver, method, args),
            Value::Object(_) => match receiver.downcast_ref::<Complex>() {
                Some(c) => self.send_complex(c, method, args),
                None => Err(RuntimeError::no_method(method, receiver.class_name())),
            },
            _ => Err(RuntimeError::no_method(method, receiver.class_name())),
        }
    }
}

impl ComplexCollaborator for HostRuntime {
    fn promote(&self, real: f64) -> RuntimeResult<Value> {
        Ok(Complex::from_real(real).into())
    }

    fn pow(&self, base: &Value, exponent: f64) -> RuntimeResult<Value> {
        match base.downcast_ref::<Complex>() {
            Some(c) => Ok(c.powf(exponent).into()),
            None => Err(RuntimeError::type_error(format!(
                "{} is not a Complex",
                base.class_name()
            ))),
        }
    }
}

/// Numeric value widened to a double
fn real_of(value: &Value) -> Option<f64> {
    Operand::classify(value).widen()
}

fn complex_of(value: &Value) -> Option<Complex> {
    match value.downcast_ref::<Complex>() {
        Some(c) => Some(*c),
        None => real_of(value).map(Complex::from_real),
    }
}

fn truthy(value: &Value) -> bool {
    !matches!(value, Value::Nil | Value::Bool(false))
}

// nil, true and false are shown by value, everything else by class
fn describe(value: &Value) -> String {
    match value {
        Value::Nil | Value::Bool(_) => value.to_string(),
        other => other.class_name().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_coerce() {
        let rt = HostRuntime::new();
        assert_eq!(
            rt.send(&Value::Float(1.5), "coerce", &[Value::Fixnum(2)]),
            Ok(Value::pair(Value::Float(2.0), Value::Float(1.5)))
        );
        assert_eq!(
            rt.send(&Value::Float(1.5), "coerce", &[Value::string("2")]),
            Err(RuntimeError::type_error("String can't be coerced into Float"))
        );
    }

    #[test]
    fn test_round_to_digits() {
        let rt = HostRuntime::new();
        let x = Value::Float(1234.5678);
        assert_eq!(
            rt.send(&x, "round", &[Value::Fixnum(2)]),
            Ok(Value::Float(1234.57))
        );
        assert_eq!(
            rt.send(&x, "round", &[Value::Fixnum(-2)]),
            Ok(Value::Fixnum(1200))
        );
        assert_eq!(
            rt.send(&x, "round", &[Value::Fixnum(0)]),
            Ok(Value::Fixnum(1235))
        );
        assert_eq!(
            rt.send(&Value::Float(f64::INFINITY), "round", &[Value::Fixnum(1)]),
            Ok(Value::Float(f64::INFINITY))
        );
        assert_eq!(
            rt.send(&Value::Float(1e300), "round", &[Value::Fixnum(10)]),
            Ok(Value::Float(1e300))
        );
        assert_eq!(
            rt.send(&Value::Float(-f64::MAX), "round", &[Value::Fixnum(1)]),
            Ok(Value::Float(-f64::MAX))
        );
        assert!(rt
            .send(&x, "round", &[Value::Float(1.0)])
            .unwrap_err()
            .to_string()
            .starts_with("TypeError"));
    }

    #[test]
    fn test_describe_for_comparison() {
        assert_eq!(describe(&Value::Nil), "nil");
        assert_eq!(describe(&Value::Bool(true)), "true");
        assert_eq!(describe(&Value::string("x")), "String");
    }

    #[test]
    fn test_integer_receivers() {
        let rt = HostRuntime::new();
        assert_eq!(
            rt.send(&Value::Fixnum(3), "==", &[Value::Float(3.0)]),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            rt.send(&Value::Fixnum(3), "to_f", &[]),
            Ok(Value::Float(3.0))
        );
    }
}
