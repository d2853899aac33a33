//! Match-statement compilation.
//!
//! A `Match` statement is replaced in place by a block:
//!
//! ```text
//! {
//!     const _caseVal = <discriminant>;
//!     let _x = undefined;          // one per synthetic binding, all clauses
//!     let _a = undefined;
//!     <clause chain>
//! }
//! ```
//!
//! Every clause pattern is compiled before anything in the tree is touched.
//! Compilation only appends nodes to the arena, so a failing pattern leaves
//! the original statement exactly as it was.

use case_ir::ast::StmtKind;
use case_ir::visitor::{walk_stmt, Visitor};
use case_ir::{Clause, Name, StmtId, StringInterner, TreeArena};

use crate::chain::ClauseStep;
use crate::errors::LowerResult;
use crate::options::{ChainShape, LowerOptions};
use crate::scope::{apply_substitutions, ClauseScope, NameGen, SubstTarget};

/// Names the generated code refers to.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Vocab {
    pub wildcard: Name,
    pub array: Name,
    pub is_array: Name,
    pub length: Name,
    pub slice: Name,
    pub object: Name,
}

impl Vocab {
    fn new(interner: &StringInterner, options: &LowerOptions) -> Self {
        Vocab {
            wildcard: interner.intern(&options.wildcard),
            array: interner.intern("Array"),
            is_array: interner.intern("isArray"),
            length: interner.intern("length"),
            slice: interner.intern("slice"),
            object: interner.intern("object"),
        }
    }
}

/// State shared by every step of one match-statement compilation.
pub(crate) struct Lowerer<'a> {
    pub(crate) arena: &'a mut TreeArena,
    pub(crate) interner: &'a StringInterner,
    pub(crate) names: &'a mut NameGen,
    pub(crate) options: &'a LowerOptions,
    pub(crate) vocab: Vocab,
}

impl<'a> Lowerer<'a> {
    pub(crate) fn new(
        arena: &'a mut TreeArena,
        interner: &'a StringInterner,
        names: &'a mut NameGen,
        options: &'a LowerOptions,
    ) -> Self {
        Lowerer {
            arena,
            interner,
            names,
            options,
            vocab: Vocab::new(interner, options),
        }
    }
}

/// What compiling one `Match` statement produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MatchSummary {
    pub clauses: usize,
    /// Synthetic bindings hoisted ahead of the chain, the discriminant
    /// binding excluded.
    pub hoisted: usize,
    pub shape: ChainShape,
}

/// Totals for a [`lower_module`] run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LowerStats {
    pub matches: usize,
    pub clauses: usize,
    pub names_issued: usize,
}

/// Compile the `Match` statement at `stmt` and replace it in place.
///
/// Statements of any other kind are left untouched and yield `Ok(None)`.
///
/// `names` should already have reserved every name of the surrounding
/// tree (see [`NameGen::reserve_tree`]). Nested `Match` statements in
/// clause bodies are not lowered here; [`lower_module`] lowers them first.
///
/// # Errors
///
/// Returns the first pattern error. The statement is then left unchanged.
#[tracing::instrument(level = "debug", skip_all, fields(stmt = stmt.raw()))]
pub fn lower_match(
    arena: &mut TreeArena,
    interner: &StringInterner,
    names: &mut NameGen,
    options: &LowerOptions,
    stmt: StmtId,
) -> LowerResult<Option<MatchSummary>> {
    let StmtKind::Match {
        discriminant,
        clauses,
    } = arena.stmt(stmt).kind
    else {
        return Ok(None);
    };
    let clauses: Vec<Clause> = arena.get_clauses(clauses).to_vec();

    let mut lowerer = Lowerer::new(arena, interner, names, options);

    let subject = lowerer.names.fresh(interner, &options.discriminant_hint);

    // Phase 1: compile every pattern. Nothing existing is modified yet.
    let mut compiled = Vec::with_capacity(clauses.len());
    for clause in &clauses {
        let mut scope = ClauseScope::new();
        let test = lowerer.compile_pattern(clause.pattern, subject, &mut scope)?;
        compiled.push((test, scope));
    }

    // Phase 2: rename pattern names inside defaults, guards and bodies,
    // clause by clause.
    let mut steps = Vec::with_capacity(clauses.len());
    let mut hoisted = Vec::new();
    for (clause, (test, scope)) in clauses.iter().zip(compiled) {
        for (default, seen) in scope.defaults() {
            apply_substitutions(lowerer.arena, seen, SubstTarget::Expr(*default));
        }
        let subst = scope.substitutions();
        if let Some(guard) = clause.guard {
            apply_substitutions(lowerer.arena, subst, SubstTarget::Expr(guard));
        }
        apply_substitutions(lowerer.arena, subst, SubstTarget::Stmt(clause.body));
        hoisted.extend_from_slice(scope.synthetic_names());
        steps.push(ClauseStep {
            test,
            guard: clause.guard,
            body: clause.body,
        });
    }

    // Phase 3: declarations, chain, replacement.
    let mut stmts = Vec::with_capacity(hoisted.len() + 2);
    stmts.push(lowerer.stmt(StmtKind::Let {
        name: subject,
        init: Some(discriminant),
        mutable: false,
    }));
    for &name in &hoisted {
        let undefined = lowerer.undefined();
        stmts.push(lowerer.stmt(StmtKind::Let {
            name,
            init: Some(undefined),
            mutable: true,
        }));
    }
    if let Some(chain) = lowerer.assemble_chain(&steps) {
        stmts.push(chain);
    }

    let block = lowerer.arena.alloc_stmt_list(stmts);
    lowerer.arena.stmt_mut(stmt).kind = StmtKind::Block(block);

    let summary = MatchSummary {
        clauses: clauses.len(),
        hoisted: hoisted.len(),
        shape: options.chain,
    };
    tracing::debug!(
        clauses = summary.clauses,
        hoisted = summary.hoisted,
        shape = ?summary.shape,
        "lowered match statement"
    );
    Ok(Some(summary))
}

/// Lower every `Match` statement reachable from `root`.
///
/// The whole tree is validated first; if any pattern is invalid the first
/// error is returned and nothing is rewritten. Nested statements are
/// lowered before the statements containing them, and one [`NameGen`]
/// seeded with every name of the tree serves the whole run, so two runs over
/// equal trees produce equal output.
///
/// # Errors
///
/// Returns the first error [`validate`](crate::validate) reports.
#[tracing::instrument(level = "debug", skip_all)]
pub fn lower_module(
    arena: &mut TreeArena,
    interner: &StringInterner,
    root: StmtId,
    options: &LowerOptions,
) -> LowerResult<LowerStats> {
    if let Some(error) = crate::validate(arena, interner, root, options).into_iter().next() {
        tracing::debug!(code = error.code(), "validation failed, tree left unchanged");
        return Err(error);
    }

    let mut names = NameGen::new();
    names.reserve_tree(arena, root);

    let mut collector = MatchCollector::default();
    collector.visit_stmt(root, arena);

    let mut stats = LowerStats::default();
    for stmt in collector.matches {
        if let Some(summary) = lower_match(arena, interner, &mut names, options, stmt)? {
            stats.matches += 1;
            stats.clauses += summary.clauses;
        }
    }
    stats.names_issued = names.issued();

    tracing::debug!(
        matches = stats.matches,
        names = stats.names_issued,
        "lowered module"
    );
    Ok(stats)
}

/// Collects `Match` statements in post-order: inner statements first.
#[derive(Default)]
struct MatchCollector {
    matches: Vec<StmtId>,
}

impl Visitor for MatchCollector {
    fn visit_stmt(&mut self, id: StmtId, arena: &TreeArena) {
        walk_stmt(self, id, arena);
        if let StmtKind::Match { .. } = arena.stmt(id).kind {
            self.matches.push(id);
        }
    }
}
