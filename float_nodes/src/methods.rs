//! Unary Float methods
//!
//! These take no operand to specialize on and run as plain functions.

use crate::context::FloatContext;
use crate::error::{RuntimeError, RuntimeResult};
use crate::fallback::ROUND_INTERNAL;
use crate::ops::UnaryMethod;
use crate::semantics;
use crate::value::Value;

/// Run `method` on `receiver`. Arity has already been checked by the caller.
pub fn invoke(
    cx: &FloatContext<'_>,
    method: UnaryMethod,
    receiver: f64,
    arg: Option<&Value>,
) -> RuntimeResult<Value> {
    match method {
        UnaryMethod::Neg => Ok(neg(receiver)),
        UnaryMethod::Abs => Ok(abs(receiver)),
        UnaryMethod::Ceil => ceil(cx, receiver),
        UnaryMethod::Floor => floor(cx, receiver),
        UnaryMethod::Infinite => Ok(infinite(receiver)),
        UnaryMethod::Nan => Ok(nan(receiver)),
        UnaryMethod::Round => round(cx, receiver, arg),
        UnaryMethod::ToI => to_i(cx, receiver),
        UnaryMethod::ToF => Ok(to_f(receiver)),
        UnaryMethod::ToS => Ok(to_s(cx, receiver)),
    }
}

/// `-@`
pub fn neg(a: f64) -> Value {
    Value::Float(semantics::neg(a))
}

/// `abs`, `magnitude`
pub fn abs(a: f64) -> Value {
    Value::Float(semantics::abs(a))
}

pub fn ceil(cx: &FloatContext<'_>, a: f64) -> RuntimeResult<Value> {
    cx.integers.classify(semantics::ceil(a))
}

pub fn floor(cx: &FloatContext<'_>, a: f64) -> RuntimeResult<Value> {
    cx.integers.classify(semantics::floor(a))
}

/// `infinite?`: `1`, `-1` or `nil`
pub fn infinite(a: f64) -> Value {
    semantics::infinite(a).into()
}

/// `nan?`
pub fn nan(a: f64) -> Value {
    Value::Bool(semantics::is_nan(a))
}

/// `round` and `round(ndigits)`.
///
/// Without digits the receiver is rounded half away from zero to an integer.
/// With digits the request is handed to the runtime's `round_internal`.
pub fn round(cx: &FloatContext<'_>, a: f64, ndigits: Option<&Value>) -> RuntimeResult<Value> {
    match ndigits {
        Some(ndigits) => cx
            .dispatch
            .call(&Value::Float(a), ROUND_INTERNAL, &[ndigits.clone()]),
        None => cx.integers.classify(semantics::round_half_away(a)?),
    }
}

/// `to_i`, `to_int`, `truncate`
pub fn to_i(cx: &FloatContext<'_>, a: f64) -> RuntimeResult<Value> {
    cx.integers.classify(semantics::truncate(a)?)
}

pub fn to_f(a: f64) -> Value {
    Value::Float(a)
}

/// `to_s`, `inspect`
pub fn to_s(cx: &FloatContext<'_>, a: f64) -> Value {
    Value::string(&cx.formatter.format(a))
}

/// Check the argument count of a unary method.
pub fn check_arity(method: UnaryMethod, given: usize) -> RuntimeResult<()> {
    let max = method.max_args();
    if given > max {
        let expected = if max == 0 {
            "0".to_string()
        } else {
            format!("0..{}", max)
        };
        return Err(RuntimeError::argument_error(format!(
            "wrong number of arguments (given {}, expected {})",
            given, expected
        )));
    }
    Ok(())
}
