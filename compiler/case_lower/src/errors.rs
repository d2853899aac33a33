//! Errors raised while compiling a match statement.
//!
//! Every error aborts the whole statement: nothing is rewritten and the
//! caller receives the kind plus the offending pattern node so a host can
//! place the diagnostic.

use case_ir::{PatternId, Span};
use thiserror::Error;

/// Result of a lowering step.
pub type LowerResult<T> = Result<T, LowerError>;

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LowerErrorKind {
    /// A rest element sits before the last position of its array pattern.
    #[error("rest element at position {position} must be the last of {len} elements")]
    OrderConstraint { position: usize, len: usize },

    /// A node kind that cannot appear in pattern position.
    #[error("{kind} is not supported in pattern position")]
    UnsupportedPattern { kind: &'static str },

    /// A rest element outside an array pattern.
    #[error("rest element is only allowed as the last element of an array pattern")]
    MisplacedRest,

    /// The same name is bound twice by one clause pattern.
    #[error("`{name}` is bound more than once in the same pattern")]
    DuplicateBinding { name: String },
}

/// A lowering failure, anchored at the pattern that caused it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}")]
pub struct LowerError {
    pub kind: LowerErrorKind,
    pub span: Span,
    pub pattern: PatternId,
}

impl LowerError {
    pub fn new(kind: LowerErrorKind, pattern: PatternId, span: Span) -> Self {
        LowerError {
            kind,
            span,
            pattern,
        }
    }

    /// Stable diagnostic code.
    pub fn code(&self) -> &'static str {
        match self.kind {
            LowerErrorKind::OrderConstraint { .. } => "E5001",
            LowerErrorKind::UnsupportedPattern { .. } => "E5002",
            LowerErrorKind::MisplacedRest => "E5003",
            LowerErrorKind::DuplicateBinding { .. } => "E5004",
        }
    }
}
