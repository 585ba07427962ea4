//! Float operation nodes
//!
//! Self-specializing call-site nodes for the binary operators of a dynamic
//! language's double-precision Float type, plus the unary Float methods.
//!
//! - [`OperationNode`]: per call site, installs one specialization per operand
//!   shape it observes (small integer, float, big integer) and routes anything
//!   else to the coercion fallback
//! - [`Value`]: the dynamic value model shared with the embedding runtime
//! - [`FloatContext`]: the collaborators a node borrows while it runs
//!   (dispatch, complex numbers, integer representation, divmod, formatting)
//! - [`FloatCallSites`]: selector-based front door for dynamic sends
//! - [`FloatConfig`]: TOML configuration of the integer classifier

#![deny(clippy::print_stderr)]

pub mod config;
pub mod context;
pub mod divmod;
pub mod error;
pub mod fallback;
pub mod format;
pub mod integer;
pub mod methods;
pub mod node;
pub mod ops;
pub mod semantics;
pub mod shape;
pub mod sites;
pub mod specializations;
pub mod value;

/// Prelude module for convenient imports
///
/// # Example
/// ```
/// use float_nodes::prelude::*;
/// ```
pub mod prelude {
    pub use super::config::{ConfigError, FloatConfig};
    pub use super::context::{ComplexCollaborator, Dispatch, FloatContext};
    pub use super::divmod::{Divmod, FloorDivmod};
    pub use super::error::{DomainTag, RuntimeError, RuntimeResult};
    pub use super::format::{FloatFormatter, ShortestFormatter};
    pub use super::integer::{IntegerClassifier, SmallIntegerRange};
    pub use super::node::{NodeState, OperationNode};
    pub use super::ops::{FloatMethod, FloatOp, UnaryMethod};
    pub use super::shape::{Operand, OperandShape};
    pub use super::sites::FloatCallSites;
    pub use super::value::{HostObject, Value};
}

pub use prelude::*;
