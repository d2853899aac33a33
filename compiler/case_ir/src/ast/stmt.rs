//! Statement nodes.

use std::fmt;

use crate::{ClauseRange, ExprId, Name, Span, StmtId, StmtRange};

/// Statement node.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

/// Statement variants.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    /// Expression statement.
    Expr(ExprId),

    /// Block-scoped declaration. A missing initializer declares the name
    /// holding the absence sentinel.
    Let {
        name: Name,
        init: Option<ExprId>,
        mutable: bool,
    },

    If {
        test: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    },

    /// `{ ... }`, opening a new lexical scope.
    Block(StmtRange),

    /// `label: body`
    Labeled { label: Name, body: StmtId },

    /// `break;` or `break label;`
    Break { label: Option<Name> },

    /// `case (discriminant) { when pattern if guard -> body ... }`
    ///
    /// Produced by the parser and removed by the desugaring pass.
    Match {
        discriminant: ExprId,
        clauses: ClauseRange,
    },
}
