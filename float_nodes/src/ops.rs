//! Float operators and method names
//!
//! Binary operators are routed through an [`OperationNode`](crate::node::OperationNode);
//! unary methods have no operand to specialize on and are plain functions in
//! [`methods`](crate::methods). [`FloatMethod::lookup`] resolves a selector,
//! aliases included, to one or the other.

use crate::fallback::FallbackConvention;

/// Binary Float operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatOp {
    Add,
    Sub,
    Mul,
    Pow,
    Div,
    Mod,
    DivMod,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Cmp,
}

impl FloatOp {
    pub const ALL: [FloatOp; 13] = [
        FloatOp::Add,
        FloatOp::Sub,
        FloatOp::Mul,
        FloatOp::Pow,
        FloatOp::Div,
        FloatOp::Mod,
        FloatOp::DivMod,
        FloatOp::Lt,
        FloatOp::Le,
        FloatOp::Gt,
        FloatOp::Ge,
        FloatOp::Eq,
        FloatOp::Cmp,
    ];

    /// Canonical selector, also the symbol passed to coercion fallbacks
    pub fn as_str(&self) -> &'static str {
        match self {
            FloatOp::Add => "+",
            FloatOp::Sub => "-",
            FloatOp::Mul => "*",
            FloatOp::Pow => "**",
            FloatOp::Div => "/",
            FloatOp::Mod => "%",
            FloatOp::DivMod => "divmod",
            FloatOp::Lt => "<",
            FloatOp::Le => "<=",
            FloatOp::Gt => ">",
            FloatOp::Ge => ">=",
            FloatOp::Eq => "==",
            FloatOp::Cmp => "<=>",
        }
    }

    /// What happens when the operand is not numeric.
    pub fn fallback(&self) -> FallbackConvention {
        match self {
            FloatOp::Sub | FloatOp::Mul | FloatOp::Pow => FallbackConvention::CoerceAndRetry,
            FloatOp::Div => FallbackConvention::RedoCoercedOnSelf,
            FloatOp::Lt | FloatOp::Le | FloatOp::Gt | FloatOp::Ge => {
                FallbackConvention::CompareCoerce
            }
            FloatOp::Eq => FallbackConvention::EqualFallback,
            FloatOp::Cmp => FallbackConvention::Incomparable,
            FloatOp::Add | FloatOp::Mod | FloatOp::DivMod => FallbackConvention::Unsupported,
        }
    }
}

/// Float method without an operand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryMethod {
    Neg,
    Abs,
    Ceil,
    Floor,
    Infinite,
    Nan,
    /// Takes an optional digit count
    Round,
    ToI,
    ToF,
    ToS,
}

impl UnaryMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryMethod::Neg => "-@",
            UnaryMethod::Abs => "abs",
            UnaryMethod::Ceil => "ceil",
            UnaryMethod::Floor => "floor",
            UnaryMethod::Infinite => "infinite?",
            UnaryMethod::Nan => "nan?",
            UnaryMethod::Round => "round",
            UnaryMethod::ToI => "to_i",
            UnaryMethod::ToF => "to_f",
            UnaryMethod::ToS => "to_s",
        }
    }

    /// Largest number of arguments accepted
    pub fn max_args(&self) -> usize {
        match self {
            UnaryMethod::Round => 1,
            _ => 0,
        }
    }
}

/// Resolved Float method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatMethod {
    Binary(FloatOp),
    Unary(UnaryMethod),
}

impl FloatMethod {
    /// Resolve a selector, aliases included.
    pub fn lookup(name: &str) -> Option<Self> {
        let method = match name {
            "+" => FloatMethod::Binary(FloatOp::Add),
            "-" => FloatMethod::Binary(FloatOp::Sub),
            "*" => FloatMethod::Binary(FloatOp::Mul),
            "**" => FloatMethod::Binary(FloatOp::Pow),
            "/" | "__slash__" => FloatMethod::Binary(FloatOp::Div),
            "%" => FloatMethod::Binary(FloatOp::Mod),
            "divmod" => FloatMethod::Binary(FloatOp::DivMod),
            "<" => FloatMethod::Binary(FloatOp::Lt),
            "<=" => FloatMethod::Binary(FloatOp::Le),
            ">" => FloatMethod::Binary(FloatOp::Gt),
            ">=" => FloatMethod::Binary(FloatOp::Ge),
            "==" | "===" => FloatMethod::Binary(FloatOp::Eq),
            "<=>" => FloatMethod::Binary(FloatOp::Cmp),
            "-@" => FloatMethod::Unary(UnaryMethod::Neg),
            "abs" | "magnitude" => FloatMethod::Unary(UnaryMethod::Abs),
            "ceil" => FloatMethod::Unary(UnaryMethod::Ceil),
            "floor" => FloatMethod::Unary(UnaryMethod::Floor),
            "infinite?" => FloatMethod::Unary(UnaryMethod::Infinite),
            "nan?" => FloatMethod::Unary(UnaryMethod::Nan),
            "round" => FloatMethod::Unary(UnaryMethod::Round),
            "to_i" | "to_int" | "truncate" => FloatMethod::Unary(UnaryMethod::ToI),
            "to_f" => FloatMethod::Unary(UnaryMethod::ToF),
            "to_s" | "inspect" => FloatMethod::Unary(UnaryMethod::ToS),
            _ => return None,
        };
        Some(method)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_names_resolve_to_themselves() {
        for op in FloatOp::ALL {
            assert_eq!(FloatMethod::lookup(op.as_str()), Some(FloatMethod::Binary(op)));
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!(
            FloatMethod::lookup("__slash__"),
            Some(FloatMethod::Binary(FloatOp::Div))
        );
        assert_eq!(
            FloatMethod::lookup("==="),
            Some(FloatMethod::Binary(FloatOp::Eq))
        );
        assert_eq!(
            FloatMethod::lookup("magnitude"),
            Some(FloatMethod::Unary(UnaryMethod::Abs))
        );
        assert_eq!(
            FloatMethod::lookup("truncate"),
            Some(FloatMethod::Unary(UnaryMethod::ToI))
        );
        assert_eq!(
            FloatMethod::lookup("inspect"),
            Some(FloatMethod::Unary(UnaryMethod::ToS))
        );
        assert_eq!(FloatMethod::lookup("frobnicate"), None);
    }

    #[test]
    fn test_fallback_conventions_are_per_operator() {
        assert_eq!(FloatOp::Sub.fallback(), FallbackConvention::CoerceAndRetry);
        assert_eq!(FloatOp::Div.fallback(), FallbackConvention::RedoCoercedOnSelf);
        assert_eq!(FloatOp::Ge.fallback(), FallbackConvention::CompareCoerce);
        assert_eq!(FloatOp::Eq.fallback(), FallbackConvention::EqualFallback);
        assert_eq!(FloatOp::Cmp.fallback(), FallbackConvention::Incomparable);
        assert_eq!(FloatOp::Add.fallback(), FallbackConvention::Unsupported);
        assert_eq!(FloatOp::Mod.fallback(), FallbackConvention::Unsupported);
    }
}
