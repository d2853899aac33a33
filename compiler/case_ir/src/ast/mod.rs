//! Flat tree types for the host statement/expression vocabulary.
//!
//! - `expr`: expressions and literals
//! - `operators`: unary, binary and logical operators
//! - `stmt`: statements, including the `Match` statement a parser produces
//! - `patterns`: clause patterns, object properties, clauses

mod expr;
mod operators;
mod patterns;
mod stmt;

pub use expr::{Expr, ExprKind, Literal, ObjectField};
pub use operators::{BinaryOp, LogicalOp, UnaryOp};
pub use patterns::{Clause, ObjectProperty, Pattern, PatternKind};
pub use stmt::{Stmt, StmtKind};
