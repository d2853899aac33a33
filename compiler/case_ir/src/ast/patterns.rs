//! Clause patterns.
//!
//! Patterns describe how a value is tested and destructured by one clause
//! of a `Match` statement. They only exist between parsing and desugaring.

use std::fmt;

use super::expr::Literal;
use crate::{ExprId, Name, PatternId, PatternRange, PropertyRange, Span, StmtId};

/// Pattern node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Pattern {
    pub kind: PatternKind,
    pub span: Span,
}

impl Pattern {
    pub fn new(kind: PatternKind, span: Span) -> Self {
        Pattern { kind, span }
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Pattern variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum PatternKind {
    /// Strict equality against a constant.
    Literal(Literal),

    /// Always matches, binding the value to `name`.
    Binding(Name),

    /// `{ a, b: pat, c = default }`
    Object(PropertyRange),

    /// `[p0, p1, ...rest]`. Elements are kept in source order; a `Rest`
    /// element is only meaningful in the last position.
    Array(PatternRange),

    /// `...pat`, capturing the remaining suffix of an array.
    Rest(PatternId),

    /// `/pattern/flags`. The grammar accepts it in pattern position, the
    /// desugaring pass does not.
    RegExp { pattern: Name, flags: Name },
}

impl PatternKind {
    /// Short human-readable description for diagnostics.
    pub const fn describe(&self) -> &'static str {
        match self {
            PatternKind::Literal(_) => "literal pattern",
            PatternKind::Binding(_) => "binding pattern",
            PatternKind::Object(_) => "object pattern",
            PatternKind::Array(_) => "array pattern",
            PatternKind::Rest(_) => "rest element",
            PatternKind::RegExp { .. } => "regular expression literal",
        }
    }
}

/// One property of an object pattern.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectProperty {
    pub key: Name,
    /// Subpattern for the property value. `None` is shorthand for binding
    /// the property under its own key.
    pub pattern: Option<PatternId>,
    /// Value used when the property is absent.
    pub default: Option<ExprId>,
    /// Absent properties do not fail the match.
    pub optional: bool,
    pub span: Span,
}

/// One `when` clause of a `Match` statement.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    pub pattern: PatternId,
    pub guard: Option<ExprId>,
    pub body: StmtId,
    pub span: Span,
}
