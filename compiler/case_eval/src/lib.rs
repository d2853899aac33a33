//! Reference evaluator for lowered trees.
//!
//! Executes statement trees of the host vocabulary so tests can observe
//! what lowered code does instead of comparing its shape. It is deliberately
//! small: no functions, no loops, a handful of builtins. A `Match` statement
//! that reaches it is an error, since its job is to run the pass's output.
//!
//! - [`Interpreter`]: statement execution and expression evaluation
//! - [`Value`]: runtime values with `===` semantics
//! - [`TreeBuilder`]: hand-built input trees for tests

mod builder;
mod environment;
mod errors;
mod interpreter;
mod value;

pub use builder::TreeBuilder;
pub use environment::{AssignError, Environment, Mutability};
pub use errors::{EvalError, EvalResult};
pub use interpreter::{Completion, Interpreter};
pub use value::Value;

use case_ir::{StmtId, StringInterner, TreeArena};

/// Run `root` and return everything it emitted.
pub fn run(arena: &TreeArena, interner: &StringInterner, root: StmtId) -> EvalResult<Vec<Value>> {
    let mut interpreter = Interpreter::new(arena, interner);
    interpreter.exec(root)?;
    Ok(interpreter.into_output())
}
