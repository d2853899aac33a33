//! Tree vocabulary for the case/when desugaring pass.
//!
//! This crate holds the data the pass consumes and produces:
//! - Interned names ([`Name`], [`StringInterner`])
//! - Source spans ([`Span`])
//! - Arena-allocated expression, statement and pattern nodes ([`TreeArena`])
//!
//! Nothing here knows how a `Match` statement is compiled; that lives in
//! `case_lower`.
//!
//! # Design
//!
//! - **Intern everything**: identifiers, keys and string literals are `Name`s.
//! - **Flatten everything**: children are `ExprId` / `StmtId` / `PatternId`
//!   indices into one arena, lists are `start + len` ranges.
//! - **Plain data**: every node kind is `Copy`, so a pass can read a node,
//!   drop the borrow and allocate freely.

mod arena;
pub mod ast;
mod ids;
mod interner;
mod name;
mod span;
pub mod stack;
pub mod visitor;

pub use arena::TreeArena;
pub use ast::{
    BinaryOp, Clause, Expr, ExprKind, Literal, LogicalOp, ObjectField, ObjectProperty, Pattern,
    PatternKind, Stmt, StmtKind, UnaryOp,
};
pub use ids::{
    ClauseRange, ExprId, ExprRange, FieldRange, PatternId, PatternRange, PropertyRange, StmtId,
    StmtRange,
};
pub use interner::StringInterner;
pub use name::Name;
pub use span::Span;
