//! Dynamic values crossing the Float operation boundary
//!
//! A `Value` is what a call site hands to an operation node as its operand and
//! what the node hands back. It also carries everything a dispatch target may
//! receive or return during a coercion fallback (symbols, coerce pairs, opaque
//! host objects).

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use num_bigint::BigInt;

use crate::format::format_float;

/// Opaque object owned by the embedding runtime.
///
/// The core never inspects a host object beyond its class name; everything
/// else happens through the dispatch protocol.
pub trait HostObject: fmt::Debug + Send + Sync + 'static {
    /// Class name used in error messages.
    fn class_name(&self) -> &str;

    /// Downcasting hook for the embedder.
    fn as_any(&self) -> &dyn Any;
}

/// Dynamic value
#[derive(Debug, Clone)]
pub enum Value {
    // ========== Immediates ==========
    /// The absence sentinel
    Nil,
    /// Boolean
    Bool(bool),
    /// Machine-sized integer
    Fixnum(i64),
    /// 64-bit floating point
    Float(f64),
    /// Interned selector name
    Symbol(Arc<str>),

    // ========== Heap-Allocated Types ==========
    /// Arbitrary-precision integer outside the small-integer range
    Bignum(Arc<BigInt>),
    /// String
    Str(Arc<str>),
    /// Fixed array (coerce pairs, divmod results)
    Array(Arc<[Value]>),
    /// Host object
    Object(Arc<dyn HostObject>),
}

impl Value {
    pub fn symbol(name: &str) -> Self {
        Value::Symbol(Arc::from(name))
    }

    pub fn string(s: &str) -> Self {
        Value::Str(Arc::from(s))
    }

    pub fn bignum(n: BigInt) -> Self {
        Value::Bignum(Arc::new(n))
    }

    pub fn object<T: HostObject>(obj: T) -> Self {
        Value::Object(Arc::new(obj))
    }

    /// Two-element array, the shape `coerce` answers with.
    pub fn pair(first: Value, second: Value) -> Self {
        Value::Array(Arc::from(vec![first, second]))
    }

    /// Class name of this value as the embedding language reports it
    pub fn class_name(&self) -> &str {
        match self {
            Value::Nil => "NilClass",
            Value::Bool(true) => "TrueClass",
            Value::Bool(false) => "FalseClass",
            Value::Fixnum(_) => "Fixnum",
            Value::Float(_) => "Float",
            Value::Symbol(_) => "Symbol",
            Value::Bignum(_) => "Bignum",
            Value::Str(_) => "String",
            Value::Array(_) => "Array",
            Value::Object(obj) => obj.class_name(),
        }
    }

    /// Check if this value is nil
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Try to extract as i64
    pub fn as_fixnum(&self) -> Option<i64> {
        match self {
            Value::Fixnum(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Value::Symbol(s) => Some(s),
            _ => None,
        }
    }

    /// Try to downcast a host object
    pub fn downcast_ref<T: HostObject>(&self) -> Option<&T> {
        match self {
            Value::Object(obj) => obj.as_any().downcast_ref::<T>(),
            _ => None,
        }
    }

    /// Split a two-element array into its halves
    pub fn as_pair(&self) -> Option<(Value, Value)> {
        match self {
            Value::Array(items) if items.len() == 2 => Some((items[0].clone(), items[1].clone())),
            _ => None,
        }
    }
}

// ========== From implementations ==========

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Fixnum(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<BigInt> for Value {
    fn from(v: BigInt) -> Self {
        Value::bignum(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::string(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(Arc::from(v))
    }
}

impl From<Option<i64>> for Value {
    fn from(v: Option<i64>) -> Self {
        v.map_or(Value::Nil, Value::Fixnum)
    }
}

// ========== Display implementation ==========

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Fixnum(v) => write!(f, "{}", v),
            Value::Float(v) => f.write_str(&format_float(*v)),
            Value::Symbol(s) => write!(f, ":{}", s),
            Value::Bignum(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, v) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", v)?;
                }
                write!(f, "]")
            }
            Value::Object(obj) => write!(f, "#<{}>", obj.class_name()),
        }
    }
}

// ========== PartialEq implementation ==========

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Fixnum(a), Value::Fixnum(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::Bignum(a), Value::Bignum(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            // Host objects compare by identity
            (Value::Object(a), Value::Object(b)) => {
                Arc::as_ptr(a) as *const () == Arc::as_ptr(b) as *const ()
            }
            _ => false,
        }
    }
}
