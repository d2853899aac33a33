//! Arena storage for the flat tree.
//!
//! [`TreeArena`] owns every expression, statement and pattern node of a
//! file plus the flattened lists they reference. Allocation is append-only;
//! passes rewrite a tree by allocating new nodes and then overwriting an
//! existing node through one of the `*_mut` accessors.

use crate::ast::{Clause, Expr, ObjectField, ObjectProperty, Pattern, Stmt};
use crate::{
    ClauseRange, ExprId, ExprRange, FieldRange, PatternId, PatternRange, PropertyRange, StmtId,
    StmtRange,
};

/// Convert an arena length to a `u32` index.
///
/// # Panics
/// Panics if more than `u32::MAX` items of one kind were allocated.
#[inline]
fn to_u32(len: usize, what: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("arena overflow: too many {what}"))
}

/// Append `items` to a flat list store, returning `(start, len)`.
fn push_list<T>(store: &mut Vec<T>, items: impl IntoIterator<Item = T>, what: &str) -> (u32, u32) {
    let start = to_u32(store.len(), what);
    store.extend(items);
    let len = to_u32(store.len(), what) - start;
    (start, len)
}

/// Arena for one tree.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeArena {
    exprs: Vec<Expr>,
    stmts: Vec<Stmt>,
    patterns: Vec<Pattern>,
    /// Flattened lists indexed by the matching range type.
    expr_lists: Vec<ExprId>,
    stmt_lists: Vec<StmtId>,
    pattern_lists: Vec<PatternId>,
    properties: Vec<ObjectProperty>,
    fields: Vec<ObjectField>,
    clauses: Vec<Clause>,
}

impl TreeArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    // Expressions

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(to_u32(self.exprs.len(), "expressions"));
        self.exprs.push(expr);
        id
    }

    #[inline]
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    #[inline]
    pub fn expr_mut(&mut self, id: ExprId) -> &mut Expr {
        &mut self.exprs[id.index()]
    }

    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let (start, len) = push_list(&mut self.expr_lists, ids, "expression lists");
        ExprRange::new(start, len)
    }

    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.bounds()]
    }

    pub fn alloc_fields(&mut self, fields: impl IntoIterator<Item = ObjectField>) -> FieldRange {
        let (start, len) = push_list(&mut self.fields, fields, "object fields");
        FieldRange::new(start, len)
    }

    pub fn get_fields(&self, range: FieldRange) -> &[ObjectField] {
        &self.fields[range.bounds()]
    }

    // Statements

    pub fn alloc_stmt(&mut self, stmt: Stmt) -> StmtId {
        let id = StmtId::new(to_u32(self.stmts.len(), "statements"));
        self.stmts.push(stmt);
        id
    }

    #[inline]
    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    #[inline]
    pub fn stmt_mut(&mut self, id: StmtId) -> &mut Stmt {
        &mut self.stmts[id.index()]
    }

    pub fn alloc_stmt_list(&mut self, ids: impl IntoIterator<Item = StmtId>) -> StmtRange {
        let (start, len) = push_list(&mut self.stmt_lists, ids, "statement lists");
        StmtRange::new(start, len)
    }

    pub fn get_stmt_list(&self, range: StmtRange) -> &[StmtId] {
        &self.stmt_lists[range.bounds()]
    }

    pub fn alloc_clauses(&mut self, clauses: impl IntoIterator<Item = Clause>) -> ClauseRange {
        let (start, len) = push_list(&mut self.clauses, clauses, "clauses");
        ClauseRange::new(start, len)
    }

    pub fn get_clauses(&self, range: ClauseRange) -> &[Clause] {
        &self.clauses[range.bounds()]
    }

    // Patterns

    pub fn alloc_pattern(&mut self, pattern: Pattern) -> PatternId {
        let id = PatternId::new(to_u32(self.patterns.len(), "patterns"));
        self.patterns.push(pattern);
        id
    }

    #[inline]
    pub fn pattern(&self, id: PatternId) -> &Pattern {
        &self.patterns[id.index()]
    }

    pub fn alloc_pattern_list(&mut self, ids: impl IntoIterator<Item = PatternId>) -> PatternRange {
        let (start, len) = push_list(&mut self.pattern_lists, ids, "pattern lists");
        PatternRange::new(start, len)
    }

    pub fn get_pattern_list(&self, range: PatternRange) -> &[PatternId] {
        &self.pattern_lists[range.bounds()]
    }

    pub fn alloc_properties(
        &mut self,
        properties: impl IntoIterator<Item = ObjectProperty>,
    ) -> PropertyRange {
        let (start, len) = push_list(&mut self.properties, properties, "object properties");
        PropertyRange::new(start, len)
    }

    pub fn get_properties(&self, range: PropertyRange) -> &[ObjectProperty] {
        &self.properties[range.bounds()]
    }

    // Sizes

    /// Number of allocated expressions.
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    /// Number of allocated statements.
    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}

#[cfg(test)]
mod tests;
