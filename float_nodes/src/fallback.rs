//! Coercion fallback dispatcher.
//!
//! Invoked when an operand is not one of the numeric shapes a node can
//! specialize on. Each operator has its own convention and they are not
//! interchangeable:
//!
//! | convention | call made |
//! |---|---|
//! | `CoerceAndRetry` (`-`, `*`, `**`) | `operand.coerce(self)` → `[x, y]`, then `x OP y` |
//! | `RedoCoercedOnSelf` (`/`) | `self.redo_coerced(:/, operand)` |
//! | `CompareCoerce` (`<`, `<=`, `>`, `>=`) | `self.math_coerce(operand, :compare_error)` → `[b, a]`, then `a OP b` |
//! | `EqualFallback` (`==`) | `self.equal_fallback(operand)` |
//! | `Incomparable` (`<=>`) | none, answers `nil` |
//! | `Unsupported` (`+`, `%`, `divmod`) | none, raises `TypeError` |
//!
//! Whatever the dispatch target returns or raises is passed through as is.

use crate::context::FloatContext;
use crate::error::{RuntimeError, RuntimeResult};
use crate::ops::FloatOp;
use crate::value::Value;

/// Selector of the symmetric coercion protocol
pub const COERCE: &str = "coerce";
/// Self-targeted coerce-and-redo used by division
pub const REDO_COERCED: &str = "redo_coerced";
/// Self-targeted coercion used by relational operators
pub const MATH_COERCE: &str = "math_coerce";
/// Error mode passed to `math_coerce` by relational operators
pub const COMPARE_ERROR: &str = "compare_error";
/// Non-raising equality fallback
pub const EQUAL_FALLBACK: &str = "equal_fallback";
/// Rounding to an explicit number of digits
pub const ROUND_INTERNAL: &str = "round_internal";

/// How an operator treats an operand of shape `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FallbackConvention {
    CoerceAndRetry,
    RedoCoercedOnSelf,
    CompareCoerce,
    EqualFallback,
    Incomparable,
    Unsupported,
}

/// Run the fallback for `op` with a non-numeric operand.
pub fn dispatch_fallback(
    cx: &FloatContext<'_>,
    op: FloatOp,
    receiver: f64,
    operand: &Value,
) -> RuntimeResult<Value> {
    let convention = op.fallback();
    tracing::trace!(
        op = op.as_str(),
        operand = operand.class_name(),
        ?convention,
        "float operation leaving through fallback"
    );

    match convention {
        FallbackConvention::CoerceAndRetry => coerce_and_retry(cx, op, receiver, operand),
        FallbackConvention::RedoCoercedOnSelf => cx.dispatch.call(
            &Value::Float(receiver),
            REDO_COERCED,
            &[Value::symbol(op.as_str()), operand.clone()],
        ),
        FallbackConvention::CompareCoerce => compare_coerce(cx, op, receiver, operand),
        FallbackConvention::EqualFallback => {
            cx.dispatch
                .call(&Value::Float(receiver), EQUAL_FALLBACK, &[operand.clone()])
        }
        FallbackConvention::Incomparable => Ok(Value::Nil),
        FallbackConvention::Unsupported => {
            Err(RuntimeError::cant_coerce_into_float(operand.class_name()))
        }
    }
}

fn coerce_and_retry(
    cx: &FloatContext<'_>,
    op: FloatOp,
    receiver: f64,
    operand: &Value,
) -> RuntimeResult<Value> {
    let coerced = cx
        .dispatch
        .call(operand, COERCE, &[Value::Float(receiver)])?;
    let (lhs, rhs) = expect_pair(&coerced)?;
    cx.dispatch.call(&lhs, op.as_str(), &[rhs])
}

fn compare_coerce(
    cx: &FloatContext<'_>,
    op: FloatOp,
    receiver: f64,
    operand: &Value,
) -> RuntimeResult<Value> {
    let coerced = cx.dispatch.call(
        &Value::Float(receiver),
        MATH_COERCE,
        &[operand.clone(), Value::symbol(COMPARE_ERROR)],
    )?;
    let (b, a) = expect_pair(&coerced)?;
    cx.dispatch.call(&a, op.as_str(), &[b])
}

fn expect_pair(value: &Value) -> RuntimeResult<(Value, Value)> {
    value
        .as_pair()
        .ok_or_else(|| RuntimeError::type_error("coerce must return [x, y]"))
}
