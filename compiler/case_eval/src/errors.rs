//! Evaluation errors.

use thiserror::Error;

pub type EvalResult<T> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("`{name}` is not defined")]
    UndefinedVariable { name: String },

    #[error("assignment to constant `{name}`")]
    AssignToConstant { name: String },

    #[error("cannot read property `{property}` of {target}")]
    PropertyOfNullish {
        property: String,
        target: &'static str,
    },

    #[error("{what} is not callable")]
    NotCallable { what: String },

    #[error("operator `{op}` cannot be applied to {left} and {right}")]
    TypeMismatch {
        op: &'static str,
        left: &'static str,
        right: &'static str,
    },

    /// A `Match` statement reached the evaluator without being lowered.
    #[error("match statement was not lowered")]
    UnresolvedMatch,
}
