//! Collaborator seams
//!
//! Operation nodes never reach into the object model directly. Everything they
//! need from the embedding runtime is borrowed for the duration of one
//! invocation through a [`FloatContext`].

use std::fmt;

use crate::divmod::{Divmod, FloorDivmod};
use crate::error::RuntimeResult;
use crate::format::{FloatFormatter, ShortestFormatter};
use crate::integer::{IntegerClassifier, SmallIntegerRange};
use crate::value::Value;

/// Dynamic method dispatch provided by the object model.
///
/// Errors returned from `call` are exceptions raised by the target; the core
/// propagates them unchanged.
pub trait Dispatch: Send + Sync {
    fn call(&self, receiver: &Value, method: &str, args: &[Value]) -> RuntimeResult<Value>;
}

/// Complex-number collaborator used by `**`.
pub trait ComplexCollaborator: Send + Sync {
    /// Lift a real number into the complex domain with a zero imaginary part.
    fn promote(&self, real: f64) -> RuntimeResult<Value>;

    /// `base ** exponent` where `base` is a value returned by `promote`.
    fn pow(&self, base: &Value, exponent: f64) -> RuntimeResult<Value>;
}

static DEFAULT_INTEGERS: SmallIntegerRange = SmallIntegerRange::new(SmallIntegerRange::MAX_BITS);
static DEFAULT_DIVMOD: FloorDivmod = FloorDivmod;
static DEFAULT_FORMATTER: ShortestFormatter = ShortestFormatter;

/// Collaborators for one invocation of a Float operation.
#[derive(Clone, Copy)]
pub struct FloatContext<'a> {
    pub dispatch: &'a dyn Dispatch,
    pub complex: &'a dyn ComplexCollaborator,
    pub integers: &'a dyn IntegerClassifier,
    pub divmod: &'a dyn Divmod,
    pub formatter: &'a dyn FloatFormatter,
}

impl<'a> FloatContext<'a> {
    /// Context with the default integer classifier (64-bit small integers),
    /// floored divmod and shortest formatter.
    pub fn new(dispatch: &'a dyn Dispatch, complex: &'a dyn ComplexCollaborator) -> Self {
        Self {
            dispatch,
            complex,
            integers: &DEFAULT_INTEGERS,
            divmod: &DEFAULT_DIVMOD,
            formatter: &DEFAULT_FORMATTER,
        }
    }

    pub fn with_integers(mut self, integers: &'a dyn IntegerClassifier) -> Self {
        self.integers = integers;
        self
    }

    pub fn with_divmod(mut self, divmod: &'a dyn Divmod) -> Self {
        self.divmod = divmod;
        self
    }

    pub fn with_formatter(mut self, formatter: &'a dyn FloatFormatter) -> Self {
        self.formatter = formatter;
        self
    }
}

impl fmt::Debug for FloatContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FloatContext").finish_non_exhaustive()
    }
}
