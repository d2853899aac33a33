//! Read-only tree traversal.
//!
//! Override `visit_*` methods to act on specific nodes and call the matching
//! `walk_*` function to continue into children. The visitor may mutate its
//! own state; the tree stays immutable.
//!
//! ```text
//! struct CountBindings(usize);
//!
//! impl Visitor for CountBindings {
//!     fn visit_pattern(&mut self, id: PatternId, arena: &TreeArena) {
//!         if let PatternKind::Binding(_) = arena.pattern(id).kind {
//!             self.0 += 1;
//!         }
//!         walk_pattern(self, id, arena);
//!     }
//! }
//! ```

use crate::ast::{Clause, ExprKind, PatternKind, StmtKind};
use crate::stack::ensure_sufficient_stack;
use crate::{ExprId, PatternId, StmtId, TreeArena};

/// Tree visitor.
pub trait Visitor {
    fn visit_stmt(&mut self, id: StmtId, arena: &TreeArena) {
        walk_stmt(self, id, arena);
    }

    fn visit_expr(&mut self, id: ExprId, arena: &TreeArena) {
        walk_expr(self, id, arena);
    }

    /// Visit one clause of a `Match` statement.
    fn visit_clause(&mut self, clause: &Clause, arena: &TreeArena) {
        walk_clause(self, clause, arena);
    }

    fn visit_pattern(&mut self, id: PatternId, arena: &TreeArena) {
        walk_pattern(self, id, arena);
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, id: StmtId, arena: &TreeArena) {
    ensure_sufficient_stack(|| match arena.stmt(id).kind {
        StmtKind::Expr(expr) => visitor.visit_expr(expr, arena),
        StmtKind::Let { init, .. } => {
            if let Some(init) = init {
                visitor.visit_expr(init, arena);
            }
        }
        StmtKind::If {
            test,
            then_branch,
            else_branch,
        } => {
            visitor.visit_expr(test, arena);
            visitor.visit_stmt(then_branch, arena);
            if let Some(else_branch) = else_branch {
                visitor.visit_stmt(else_branch, arena);
            }
        }
        StmtKind::Block(stmts) => {
            for &stmt in arena.get_stmt_list(stmts) {
                visitor.visit_stmt(stmt, arena);
            }
        }
        StmtKind::Labeled { body, .. } => visitor.visit_stmt(body, arena),
        StmtKind::Break { .. } => {}
        StmtKind::Match {
            discriminant,
            clauses,
        } => {
            visitor.visit_expr(discriminant, arena);
            for clause in arena.get_clauses(clauses) {
                visitor.visit_clause(clause, arena);
            }
        }
    });
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, id: ExprId, arena: &TreeArena) {
    ensure_sufficient_stack(|| match arena.expr(id).kind {
        ExprKind::Literal(_) | ExprKind::Ident(_) => {}
        ExprKind::Member { object, .. } => visitor.visit_expr(object, arena),
        ExprKind::Index { object, index } => {
            visitor.visit_expr(object, arena);
            visitor.visit_expr(index, arena);
        }
        ExprKind::Call { callee, args } => {
            visitor.visit_expr(callee, arena);
            for &arg in arena.get_expr_list(args) {
                visitor.visit_expr(arg, arena);
            }
        }
        ExprKind::MethodCall { receiver, args, .. } => {
            visitor.visit_expr(receiver, arena);
            for &arg in arena.get_expr_list(args) {
                visitor.visit_expr(arg, arena);
            }
        }
        ExprKind::Unary { operand, .. } => visitor.visit_expr(operand, arena),
        ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
            visitor.visit_expr(left, arena);
            visitor.visit_expr(right, arena);
        }
        ExprKind::Assign { value, .. } => visitor.visit_expr(value, arena),
        ExprKind::Sequence(items) | ExprKind::Array(items) => {
            for &item in arena.get_expr_list(items) {
                visitor.visit_expr(item, arena);
            }
        }
        ExprKind::Object(fields) => {
            for field in arena.get_fields(fields) {
                visitor.visit_expr(field.value, arena);
            }
        }
    });
}

pub fn walk_clause<V: Visitor + ?Sized>(visitor: &mut V, clause: &Clause, arena: &TreeArena) {
    visitor.visit_pattern(clause.pattern, arena);
    if let Some(guard) = clause.guard {
        visitor.visit_expr(guard, arena);
    }
    visitor.visit_stmt(clause.body, arena);
}

pub fn walk_pattern<V: Visitor + ?Sized>(visitor: &mut V, id: PatternId, arena: &TreeArena) {
    ensure_sufficient_stack(|| match arena.pattern(id).kind {
        PatternKind::Literal(_) | PatternKind::Binding(_) | PatternKind::RegExp { .. } => {}
        PatternKind::Object(properties) => {
            for property in arena.get_properties(properties) {
                if let Some(default) = property.default {
                    visitor.visit_expr(default, arena);
                }
                if let Some(pattern) = property.pattern {
                    visitor.visit_pattern(pattern, arena);
                }
            }
        }
        PatternKind::Array(elements) => {
            for &element in arena.get_pattern_list(elements) {
                visitor.visit_pattern(element, arena);
            }
        }
        PatternKind::Rest(inner) => visitor.visit_pattern(inner, arena),
    });
}
