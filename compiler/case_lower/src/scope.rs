//! Binding scopes for clause desugaring.
//!
//! - [`NameGen`] issues collision-free synthetic names for one compilation
//!   unit. It is an explicit value owned by the caller, so two runs over the
//!   same tree issue the same names in the same order.
//! - [`ClauseScope`] records, for one clause, which pattern-declared names
//!   were renamed to which synthetic bindings, and every synthetic binding
//!   the clause introduced.
//! - [`apply_substitutions`] rewrites free occurrences of pattern-declared
//!   names in a guard or body, using only the mapping of that clause.

use case_ir::ast::{ExprKind, PatternKind, StmtKind};
use case_ir::stack::ensure_sufficient_stack;
use case_ir::visitor::{walk_expr, walk_pattern, walk_stmt, Visitor};
use case_ir::{ExprId, Name, PatternId, StmtId, StringInterner, TreeArena};
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

// Fresh names

/// Generator of synthetic binding names.
///
/// Names have the form `_<hint>`, `_<hint>2`, `_<hint>3`, ... and never
/// repeat a reserved name or a name issued earlier by the same generator.
#[derive(Clone, Debug, Default)]
pub struct NameGen {
    /// Names present in the input plus every name issued so far.
    taken: FxHashSet<Name>,
    /// Next suffix to try per sanitized hint.
    next_suffix: FxHashMap<String, u32>,
    issued: usize,
}

impl NameGen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `name` as in use by surrounding code.
    pub fn reserve(&mut self, name: Name) {
        self.taken.insert(name);
    }

    /// Reserve every identifier, declaration, assignment target, label and
    /// pattern binding reachable from `root`.
    pub fn reserve_tree(&mut self, arena: &TreeArena, root: StmtId) {
        let mut collector = NameCollector {
            names: &mut self.taken,
        };
        collector.visit_stmt(root, arena);
    }

    /// Issue a fresh name derived from `hint`.
    pub fn fresh(&mut self, interner: &StringInterner, hint: &str) -> Name {
        let base = sanitize_hint(hint);
        let mut suffix = self.next_suffix.get(&base).copied().unwrap_or(1);
        loop {
            let candidate = if suffix == 1 {
                interner.intern(&base)
            } else {
                interner.intern(&format!("{base}{suffix}"))
            };
            suffix += 1;
            if self.taken.insert(candidate) {
                tracing::trace!(name = interner.lookup(candidate), "issued fresh name");
                self.next_suffix.insert(base, suffix);
                self.issued += 1;
                return candidate;
            }
        }
    }

    /// Number of names issued so far.
    pub fn issued(&self) -> usize {
        self.issued
    }
}

/// Turn a hint into a base identifier: one leading underscore, the hint
/// without its own leading underscores, anything outside `[A-Za-z0-9_$]`
/// replaced by `_`.
fn sanitize_hint(hint: &str) -> String {
    let trimmed = hint.trim_start_matches('_');
    let mut base = String::with_capacity(trimmed.len() + 1);
    base.push('_');
    if trimmed.is_empty() {
        base.push_str("ref");
    }
    for ch in trimmed.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '$' {
            base.push(ch);
        } else {
            base.push('_');
        }
    }
    base
}

/// Collects every name a synthetic binding could collide with.
struct NameCollector<'a> {
    names: &'a mut FxHashSet<Name>,
}

impl Visitor for NameCollector<'_> {
    fn visit_stmt(&mut self, id: StmtId, arena: &TreeArena) {
        match arena.stmt(id).kind {
            StmtKind::Let { name, .. } => {
                self.names.insert(name);
            }
            StmtKind::Labeled { label, .. } => {
                self.names.insert(label);
            }
            _ => {}
        }
        walk_stmt(self, id, arena);
    }

    fn visit_expr(&mut self, id: ExprId, arena: &TreeArena) {
        match arena.expr(id).kind {
            ExprKind::Ident(name) | ExprKind::Assign { target: name, .. } => {
                self.names.insert(name);
            }
            _ => {}
        }
        walk_expr(self, id, arena);
    }

    fn visit_pattern(&mut self, id: PatternId, arena: &TreeArena) {
        match arena.pattern(id).kind {
            PatternKind::Binding(name) => {
                self.names.insert(name);
            }
            PatternKind::Object(properties) => {
                let shorthand = arena.get_properties(properties).iter();
                self.names
                    .extend(shorthand.filter(|p| p.pattern.is_none()).map(|p| p.key));
            }
            _ => {}
        }
        walk_pattern(self, id, arena);
    }
}

// Clause scope

/// Mapping from pattern-declared names to their synthetic bindings.
pub type Substitution = FxHashMap<Name, Name>;

/// Bindings of a single clause.
#[derive(Clone, Debug, Default)]
pub struct ClauseScope {
    substitutions: Substitution,
    /// Synthetic bindings in the order they were introduced.
    synthetic: SmallVec<[Name; 8]>,
    /// Property defaults, each with the renaming in force where it runs.
    defaults: Vec<(ExprId, Substitution)>,
}

impl ClauseScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a synthetic binding for this clause.
    pub fn fresh_binding(
        &mut self,
        names: &mut NameGen,
        interner: &StringInterner,
        hint: &str,
    ) -> Name {
        let name = names.fresh(interner, hint);
        self.synthetic.push(name);
        name
    }

    /// Rename `original` to `synthetic` inside this clause.
    ///
    /// Returns the earlier synthetic name if `original` was already bound.
    pub fn record_substitution(&mut self, original: Name, synthetic: Name) -> Option<Name> {
        self.substitutions.insert(original, synthetic)
    }

    pub fn lookup(&self, original: Name) -> Option<Name> {
        self.substitutions.get(&original).copied()
    }

    pub fn substitutions(&self) -> &Substitution {
        &self.substitutions
    }

    /// Every synthetic binding the clause introduced.
    pub fn synthetic_names(&self) -> &[Name] {
        &self.synthetic
    }

    /// Record a property default. It sees the names bound so far in the
    /// pattern and the surrounding scope for everything else.
    pub fn record_default(&mut self, default: ExprId) {
        self.defaults.push((default, self.substitutions.clone()));
    }

    pub fn defaults(&self) -> &[(ExprId, Substitution)] {
        &self.defaults
    }
}

// Substitution

/// Root of a subtree to rename.
#[derive(Copy, Clone, Debug)]
pub enum SubstTarget {
    Expr(ExprId),
    Stmt(StmtId),
}

/// Rewrite free occurrences of the names in `subst` under `target`.
///
/// Reads and assignment targets are renamed. A block that declares one of
/// the names with `Let` shadows it for the whole block, and a nested,
/// not yet lowered `Match` clause shadows the names its pattern binds.
/// Inside that clause's property defaults only the names bound before the
/// default are shadowed, so the result does not depend on whether the
/// nested statement is lowered before or after the enclosing one.
pub fn apply_substitutions(arena: &mut TreeArena, subst: &Substitution, target: SubstTarget) {
    if subst.is_empty() {
        return;
    }
    let mut renamer = Renamer { arena };
    match target {
        SubstTarget::Expr(id) => renamer.expr(id, subst),
        SubstTarget::Stmt(id) => renamer.stmt(id, subst),
    }
}

struct Renamer<'a> {
    arena: &'a mut TreeArena,
}

impl Renamer<'_> {
    fn expr(&mut self, id: ExprId, subst: &Substitution) {
        let kind = self.arena.expr(id).kind;
        ensure_sufficient_stack(|| match kind {
            ExprKind::Literal(_) => {}
            ExprKind::Ident(name) => {
                if let Some(&renamed) = subst.get(&name) {
                    self.arena.expr_mut(id).kind = ExprKind::Ident(renamed);
                }
            }
            ExprKind::Assign { target, value } => {
                if let Some(&renamed) = subst.get(&target) {
                    self.arena.expr_mut(id).kind = ExprKind::Assign {
                        target: renamed,
                        value,
                    };
                }
                self.expr(value, subst);
            }
            ExprKind::Member { object, .. } => self.expr(object, subst),
            ExprKind::Index { object, index } => {
                self.expr(object, subst);
                self.expr(index, subst);
            }
            ExprKind::Call { callee, args } => {
                self.expr(callee, subst);
                let args = self.arena.get_expr_list(args).to_vec();
                self.expr_list(args, subst);
            }
            ExprKind::MethodCall { receiver, args, .. } => {
                self.expr(receiver, subst);
                let args = self.arena.get_expr_list(args).to_vec();
                self.expr_list(args, subst);
            }
            ExprKind::Unary { operand, .. } => self.expr(operand, subst),
            ExprKind::Binary { left, right, .. } | ExprKind::Logical { left, right, .. } => {
                self.expr(left, subst);
                self.expr(right, subst);
            }
            ExprKind::Sequence(items) | ExprKind::Array(items) => {
                let items = self.arena.get_expr_list(items).to_vec();
                self.expr_list(items, subst);
            }
            ExprKind::Object(fields) => {
                let values: Vec<ExprId> =
                    self.arena.get_fields(fields).iter().map(|f| f.value).collect();
                self.expr_list(values, subst);
            }
        });
    }

    fn expr_list(&mut self, ids: Vec<ExprId>, subst: &Substitution) {
        for id in ids {
            self.expr(id, subst);
        }
    }

    fn stmt(&mut self, id: StmtId, subst: &Substitution) {
        let kind = self.arena.stmt(id).kind;
        ensure_sufficient_stack(|| match kind {
            StmtKind::Expr(expr) => self.expr(expr, subst),
            StmtKind::Let { init, .. } => {
                if let Some(init) = init {
                    self.expr(init, subst);
                }
            }
            StmtKind::If {
                test,
                then_branch,
                else_branch,
            } => {
                self.expr(test, subst);
                self.stmt(then_branch, subst);
                if let Some(else_branch) = else_branch {
                    self.stmt(else_branch, subst);
                }
            }
            StmtKind::Block(range) => {
                let stmts = self.arena.get_stmt_list(range).to_vec();
                let declared: Vec<Name> = stmts
                    .iter()
                    .filter_map(|&s| match self.arena.stmt(s).kind {
                        StmtKind::Let { name, .. } if subst.contains_key(&name) => Some(name),
                        _ => None,
                    })
                    .collect();
                if declared.is_empty() {
                    for s in stmts {
                        self.stmt(s, subst);
                    }
                } else {
                    let inner = without(subst, &declared);
                    for s in stmts {
                        self.stmt(s, &inner);
                    }
                }
            }
            StmtKind::Labeled { body, .. } => self.stmt(body, subst),
            StmtKind::Break { .. } => {}
            StmtKind::Match {
                discriminant,
                clauses,
            } => {
                self.expr(discriminant, subst);
                for clause in self.arena.get_clauses(clauses).to_vec() {
                    let bindings = PatternBindings::of(self.arena, clause.pattern);
                    for &(default, visible) in &bindings.defaults {
                        let inner = without(subst, &bindings.names[..visible]);
                        self.expr(default, &inner);
                    }
                    let inner = without(subst, &bindings.names);
                    if let Some(guard) = clause.guard {
                        self.expr(guard, &inner);
                    }
                    self.stmt(clause.body, &inner);
                }
            }
        });
    }
}

/// `subst` minus the shadowed names.
fn without(subst: &Substitution, shadowed: &[Name]) -> Substitution {
    let mut inner = subst.clone();
    for name in shadowed {
        inner.remove(name);
    }
    inner
}

/// Names a pattern binds, in the order compilation declares them.
#[derive(Debug, Default)]
pub(crate) struct PatternBindings {
    pub names: Vec<Name>,
    /// `(default, n)`: the default runs when `names[..n]` are bound.
    pub defaults: Vec<(ExprId, usize)>,
}

impl PatternBindings {
    pub(crate) fn of(arena: &TreeArena, pattern: PatternId) -> Self {
        let mut bindings = PatternBindings::default();
        bindings.collect(arena, pattern);
        bindings
    }

    fn collect(&mut self, arena: &TreeArena, pattern: PatternId) {
        ensure_sufficient_stack(|| match arena.pattern(pattern).kind {
            PatternKind::Binding(name) => self.names.push(name),
            PatternKind::Object(properties) => {
                for property in arena.get_properties(properties) {
                    if let Some(default) = property.default {
                        self.defaults.push((default, self.names.len()));
                    }
                    match property.pattern {
                        None => self.names.push(property.key),
                        Some(inner) => self.collect(arena, inner),
                    }
                }
            }
            PatternKind::Array(elements) => {
                for &element in arena.get_pattern_list(elements) {
                    self.collect(arena, element);
                }
            }
            PatternKind::Rest(inner) => self.collect(arena, inner),
            PatternKind::Literal(_) | PatternKind::RegExp { .. } => {}
        });
    }
}
