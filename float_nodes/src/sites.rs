//! Float method front door
//!
//! [`FloatCallSites`] owns one [`OperationNode`] per binary operator and
//! resolves selectors for a runtime that dispatches Float sends dynamically.
//! An interpreter that keeps a node per syntactic call site can use
//! [`OperationNode`] directly instead.

use crate::context::FloatContext;
use crate::error::{RuntimeError, RuntimeResult};
use crate::methods;
use crate::node::OperationNode;
use crate::ops::{FloatMethod, FloatOp};
use crate::value::Value;

#[derive(Debug)]
pub struct FloatCallSites {
    nodes: Vec<OperationNode>,
}

impl FloatCallSites {
    pub fn new() -> Self {
        Self {
            nodes: FloatOp::ALL.iter().map(|&op| OperationNode::new(op)).collect(),
        }
    }

    /// Node backing `op`.
    pub fn node(&self, op: FloatOp) -> &OperationNode {
        // ALL lists every variant in declaration order
        &self.nodes[op as usize]
    }

    /// Send `method` to a Float receiver.
    pub fn send(
        &self,
        cx: &FloatContext<'_>,
        receiver: f64,
        method: &str,
        args: &[Value],
    ) -> RuntimeResult<Value> {
        match FloatMethod::lookup(method) {
            Some(FloatMethod::Binary(op)) => match args {
                [operand] => self.node(op).execute(cx, receiver, operand),
                _ => Err(RuntimeError::argument_error(format!(
                    "wrong number of arguments (given {}, expected 1)",
                    args.len()
                ))),
            },
            Some(FloatMethod::Unary(unary)) => {
                methods::check_arity(unary, args.len())?;
                methods::invoke(cx, unary, receiver, args.first())
            }
            None => Err(RuntimeError::no_method(method, "Float")),
        }
    }
}

impl Default for FloatCallSites {
    fn default() -> Self {
        Self::new()
    }
}
