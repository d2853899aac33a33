//! Expression nodes.

use std::fmt;

use super::operators::{BinaryOp, LogicalOp, UnaryOp};
use crate::{ExprId, ExprRange, FieldRange, Name, Span};

/// Expression node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Constant values usable both as expressions and as literal patterns.
///
/// Numbers are stored as raw bits so the type stays `Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Literal {
    Number(u64),
    Str(Name),
    Bool(bool),
    Null,
    /// The absence sentinel.
    Undefined,
}

impl Literal {
    #[inline]
    pub fn number(value: f64) -> Self {
        Literal::Number(value.to_bits())
    }

    /// The numeric value, if this is a number literal.
    #[inline]
    pub fn as_number(self) -> Option<f64> {
        match self {
            Literal::Number(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }
}

impl fmt::Debug for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(bits) => write!(f, "Number({})", f64::from_bits(*bits)),
            Literal::Str(name) => write!(f, "Str({name:?})"),
            Literal::Bool(b) => write!(f, "Bool({b})"),
            Literal::Null => write!(f, "Null"),
            Literal::Undefined => write!(f, "Undefined"),
        }
    }
}

/// Expression variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    Literal(Literal),

    /// Variable reference.
    Ident(Name),

    /// `object.property`
    Member { object: ExprId, property: Name },

    /// `object[index]`
    Index { object: ExprId, index: ExprId },

    /// `callee(args...)`
    Call { callee: ExprId, args: ExprRange },

    /// `receiver.method(args...)`
    MethodCall {
        receiver: ExprId,
        method: Name,
        args: ExprRange,
    },

    Unary { op: UnaryOp, operand: ExprId },

    Binary {
        op: BinaryOp,
        left: ExprId,
        right: ExprId,
    },

    /// `left && right`, `left || right`. The right operand only runs when
    /// the left one does not decide the result.
    Logical {
        op: LogicalOp,
        left: ExprId,
        right: ExprId,
    },

    /// `target = value`, evaluating to `value`.
    Assign { target: Name, value: ExprId },

    /// `(a, b, c)`: evaluates every operand left to right, yields the last.
    Sequence(ExprRange),

    /// `[a, b, c]`
    Array(ExprRange),

    /// `{ key: value, ... }`
    Object(FieldRange),
}

/// `key: value` entry of an object literal.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectField {
    pub key: Name,
    pub value: ExprId,
}
