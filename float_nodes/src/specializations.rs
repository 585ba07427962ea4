//! Specialization bodies
//!
//! One body per `(operator, operand shape)` pair. Bodies receive the operand
//! already classified, so none of them inspects a `Value` again.

use std::cmp::Ordering;

use crate::context::FloatContext;
use crate::error::RuntimeResult;
use crate::ops::FloatOp;
use crate::semantics;
use crate::shape::{Operand, OperandShape};
use crate::value::Value;

/// Body of an installed specialization.
pub type SpecializationFn = fn(&FloatContext<'_>, f64, Operand<'_>) -> RuntimeResult<Value>;

/// Body for `op` applied to an operand of `shape`, or `None` when the shape
/// can only be handled by the fallback dispatcher.
pub fn body_for(op: FloatOp, shape: OperandShape) -> Option<SpecializationFn> {
    if !shape.is_numeric() {
        return None;
    }

    let body: SpecializationFn = match (op, shape) {
        (FloatOp::Add, _) => add,
        (FloatOp::Sub, _) => sub,
        (FloatOp::Mul, _) => mul,
        (FloatOp::Pow, OperandShape::Float) => pow_float,
        (FloatOp::Pow, _) => pow_integral,
        (FloatOp::Div, _) => div,
        (FloatOp::Mod, _) => modulo,
        (FloatOp::DivMod, _) => divmod,
        (FloatOp::Lt, _) => lt,
        (FloatOp::Le, _) => le,
        (FloatOp::Gt, _) => gt,
        (FloatOp::Ge, _) => ge,
        (FloatOp::Eq, _) => eq,
        (FloatOp::Cmp, OperandShape::BigInteger) => cmp_bignum,
        (FloatOp::Cmp, _) => cmp,
    };
    Some(body)
}

// numeric shapes always widen; NaN only if a body is paired with the wrong shape
#[inline]
fn widened(operand: Operand<'_>) -> f64 {
    operand.widen().unwrap_or(f64::NAN)
}

// ========== Arithmetic ==========

fn add(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    Ok(Value::Float(semantics::add(a, widened(b))))
}

fn sub(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    Ok(Value::Float(semantics::sub(a, widened(b))))
}

fn mul(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    Ok(Value::Float(semantics::mul(a, widened(b))))
}

fn div(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    Ok(Value::Float(semantics::div(a, widened(b))))
}

fn pow_integral(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    Ok(Value::Float(semantics::pow(a, widened(b))))
}

fn pow_float(cx: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    let b = widened(b);
    if semantics::pow_needs_complex(a, b) {
        let base = cx.complex.promote(a)?;
        cx.complex.pow(&base, b)
    } else {
        Ok(Value::Float(semantics::pow(a, b)))
    }
}

fn modulo(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    semantics::modulo(a, widened(b)).map(Value::Float)
}

fn divmod(cx: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    let (quotient, remainder) = cx.divmod.divmod(cx.integers, a, widened(b))?;
    Ok(Value::pair(quotient, remainder))
}

// ========== Comparison ==========

fn lt(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    Ok(Value::Bool(a < widened(b)))
}

fn le(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    Ok(Value::Bool(a <= widened(b)))
}

fn gt(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    Ok(Value::Bool(a > widened(b)))
}

fn ge(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    Ok(Value::Bool(a >= widened(b)))
}

fn eq(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    Ok(Value::Bool(a == widened(b)))
}

fn cmp(_: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    Ok(ordering_value(semantics::compare(a, widened(b))))
}

fn cmp_bignum(cx: &FloatContext<'_>, a: f64, b: Operand<'_>) -> RuntimeResult<Value> {
    match b {
        Operand::BigInteger(n) => Ok(ordering_value(semantics::compare_bignum(a, n))),
        other => cmp(cx, a, other),
    }
}

fn ordering_value(ordering: Option<Ordering>) -> Value {
    ordering.map_or(Value::Nil, |o| Value::Fixnum(semantics::ordering_to_i64(o)))
}
