//! Self-specializing operation node
//!
//! An [`OperationNode`] sits at one call site of one binary Float operator and
//! learns which operand shapes flow through it. It starts with no
//! specializations. The first time an operand of a numeric shape arrives, the
//! body for that shape is appended to the node's chain; later operands of the
//! same shape are matched against the chain in installation order and the
//! first hit runs. Non-numeric operands never install anything and always go
//! to the fallback dispatcher.
//!
//! The chain is an immutable snapshot behind a [`crossbeam::epoch::Atomic`].
//! Readers pin the epoch, find their entry and copy its body out. Installers
//! build a new snapshot with the extra entry and publish it with a
//! compare-and-swap; the replaced snapshot is reclaimed once no pinned reader
//! can still observe it. A reader therefore sees either the chain before an
//! install or the chain after it, never a partial one, and two threads racing
//! to install the same shape end up with a single entry.

use std::fmt;
use std::sync::atomic::Ordering;

use crossbeam::epoch::{self, Atomic, Owned};

use crate::context::FloatContext;
use crate::error::RuntimeResult;
use crate::fallback;
use crate::ops::FloatOp;
use crate::shape::{Operand, OperandShape};
use crate::specializations::{self, SpecializationFn};
use crate::value::Value;

/// One installed `(guard, body)` entry.
#[derive(Clone, Copy)]
pub struct Specialization {
    shape: OperandShape,
    body: SpecializationFn,
}

impl Specialization {
    pub fn shape(&self) -> OperandShape {
        self.shape
    }

    #[inline]
    pub fn accepts(&self, operand: &Operand<'_>) -> bool {
        self.shape == operand.shape()
    }
}

impl fmt::Debug for Specialization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Specialization")
            .field("shape", &self.shape)
            .finish_non_exhaustive()
    }
}

/// Published chain snapshot. Never mutated after publication.
struct Chain {
    entries: Vec<Specialization>,
}

impl Chain {
    fn find(&self, operand: &Operand<'_>) -> Option<SpecializationFn> {
        self.entries
            .iter()
            .find(|s| s.accepts(operand))
            .map(|s| s.body)
    }

    fn covers(&self, shape: OperandShape) -> bool {
        self.entries.iter().any(|s| s.shape == shape)
    }
}

/// Observable state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Nothing installed yet
    Uninitialized,
    /// Number of installed specializations (1 to 3)
    Specialized(usize),
}

/// Call-site node for one binary Float operator.
pub struct OperationNode {
    op: FloatOp,
    chain: Atomic<Chain>,
}

impl OperationNode {
    pub fn new(op: FloatOp) -> Self {
        Self {
            op,
            chain: Atomic::null(),
        }
    }

    pub fn op(&self) -> FloatOp {
        self.op
    }

    /// Apply the operator to `receiver` and `operand`.
    ///
    /// Specializes the node on first sight of a numeric operand shape. Errors
    /// come from the operation itself or from the fallback's dispatch target.
    pub fn execute(
        &self,
        cx: &FloatContext<'_>,
        receiver: f64,
        operand: &Value,
    ) -> RuntimeResult<Value> {
        let classified = Operand::classify(operand);

        if let Some(body) = self.lookup(&classified) {
            return body(cx, receiver, classified);
        }

        match specializations::body_for(self.op, classified.shape()) {
            Some(body) => {
                self.install(Specialization {
                    shape: classified.shape(),
                    body,
                });
                body(cx, receiver, classified)
            }
            None => fallback::dispatch_fallback(cx, self.op, receiver, operand),
        }
    }

    pub fn state(&self) -> NodeState {
        match self.installed_shapes().len() {
            0 => NodeState::Uninitialized,
            n => NodeState::Specialized(n),
        }
    }

    /// Installed shapes, in installation order.
    pub fn installed_shapes(&self) -> Vec<OperandShape> {
        let guard = epoch::pin();
        let chain = self.chain.load(Ordering::Acquire, &guard);
        // SAFETY: published snapshots are immutable and are only reclaimed
        // after every thread pinned at the time of the swap has unpinned.
        match unsafe { chain.as_ref() } {
            Some(chain) => chain.entries.iter().map(|s| s.shape).collect(),
            None => Vec::new(),
        }
    }

    fn lookup(&self, operand: &Operand<'_>) -> Option<SpecializationFn> {
        let guard = epoch::pin();
        let chain = self.chain.load(Ordering::Acquire, &guard);
        // SAFETY: see `installed_shapes`. The body is copied out before the
        // guard is dropped.
        unsafe { chain.as_ref() }.and_then(|chain| chain.find(operand))
    }

    /// Append `specialization` unless its shape is already installed.
    ///
    /// Returns `false` when another thread installed the shape first.
    fn install(&self, specialization: Specialization) -> bool {
        let guard = epoch::pin();
        let mut current = self.chain.load(Ordering::Acquire, &guard);

        loop {
            // SAFETY: see `installed_shapes`.
            let snapshot = unsafe { current.as_ref() };
            if snapshot.is_some_and(|chain| chain.covers(specialization.shape)) {
                tracing::debug!(
                    op = self.op.as_str(),
                    shape = specialization.shape.as_str(),
                    "specialization already installed by another thread"
                );
                return false;
            }

            let mut entries = snapshot
                .map(|chain| chain.entries.clone())
                .unwrap_or_default();
            entries.push(specialization);
            let chain_len = entries.len();

            match self.chain.compare_exchange(
                current,
                Owned::new(Chain { entries }),
                Ordering::AcqRel,
                Ordering::Acquire,
                &guard,
            ) {
                Ok(_) => {
                    if !current.is_null() {
                        // SAFETY: `current` has just been unlinked; readers
                        // that still hold it are pinned and keep it alive.
                        unsafe { guard.defer_destroy(current) };
                    }
                    tracing::debug!(
                        op = self.op.as_str(),
                        shape = specialization.shape.as_str(),
                        chain_len,
                        "installed float specialization"
                    );
                    return true;
                }
                Err(err) => current = err.current,
            }
        }
    }
}

impl Drop for OperationNode {
    fn drop(&mut self) {
        // SAFETY: `&mut self` guarantees no other thread can reach the chain.
        unsafe {
            let guard = epoch::unprotected();
            let chain = self.chain.load(Ordering::Acquire, guard);
            if !chain.is_null() {
                drop(chain.into_owned());
            }
        }
    }
}

impl fmt::Debug for OperationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationNode")
            .field("op", &self.op)
            .field("shapes", &self.installed_shapes())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ComplexCollaborator, Dispatch};
    use crate::error::RuntimeError;
    use num_bigint::BigInt;

    struct NoDispatch;

    impl Dispatch for NoDispatch {
        fn call(&self, receiver: &Value, method: &str, _: &[Value]) -> RuntimeResult<Value> {
            Err(RuntimeError::no_method(method, receiver.class_name()))
        }
    }

    impl ComplexCollaborator for NoDispatch {
        fn promote(&self, _: f64) -> RuntimeResult<Value> {
            Err(RuntimeError::no_method("Complex", "Float"))
        }

        fn pow(&self, _: &Value, _: f64) -> RuntimeResult<Value> {
            Err(RuntimeError::no_method("**", "Complex"))
        }
    }

    fn cx() -> FloatContext<'static> {
        static HOST: NoDispatch = NoDispatch;
        FloatContext::new(&HOST, &HOST)
    }

    #[test]
    fn test_new_node_is_uninitialized() {
        let node = OperationNode::new(FloatOp::Add);
        assert_eq!(node.state(), NodeState::Uninitialized);
        assert!(node.installed_shapes().is_empty());
    }

    #[test]
    fn test_installs_in_arrival_order() {
        let node = OperationNode::new(FloatOp::Mul);
        let cx = cx();

        assert_eq!(
            node.execute(&cx, 2.0, &Value::Float(1.5)),
            Ok(Value::Float(3.0))
        );
        assert_eq!(
            node.execute(&cx, 2.0, &Value::Fixnum(4)),
            Ok(Value::Float(8.0))
        );
        assert_eq!(
            node.execute(&cx, 2.0, &Value::Fixnum(5)),
            Ok(Value::Float(10.0))
        );

        assert_eq!(
            node.installed_shapes(),
            vec![OperandShape::Float, OperandShape::SmallInteger]
        );
        assert_eq!(node.state(), NodeState::Specialized(2));
    }

    #[test]
    fn test_chain_never_exceeds_numeric_shapes() {
        let node = OperationNode::new(FloatOp::Lt);
        let cx = cx();
        let operands = [
            Value::Fixnum(1),
            Value::bignum(BigInt::from(1u64 << 63) * 4),
            Value::Float(0.5),
            Value::Fixnum(2),
            Value::Float(2.5),
        ];
        for operand in operands.iter().cycle().take(30) {
            assert!(node.execute(&cx, 1.0, operand).is_ok());
        }
        assert_eq!(node.state(), NodeState::Specialized(3));
    }

    #[test]
    fn test_other_operand_does_not_install() {
        let node = OperationNode::new(FloatOp::Cmp);
        let cx = cx();
        assert_eq!(node.execute(&cx, 1.0, &Value::string("x")), Ok(Value::Nil));
        assert_eq!(node.execute(&cx, 1.0, &Value::Nil), Ok(Value::Nil));
        assert_eq!(node.state(), NodeState::Uninitialized);
    }

    #[test]
    fn test_errors_from_specialized_path_propagate() {
        let node = OperationNode::new(FloatOp::Mod);
        assert_eq!(
            node.execute(&cx(), 1.0, &Value::Fixnum(0)),
            Err(RuntimeError::ZeroDivision)
        );
        // installed before running, so the shape stays
        assert_eq!(node.installed_shapes(), vec![OperandShape::SmallInteger]);
    }
}
