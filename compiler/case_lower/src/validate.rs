//! Pattern validation without code generation.
//!
//! Walks a statement tree and checks every clause pattern of every `Match`
//! statement:
//! - A rest element is the last element of its array pattern
//! - A rest element appears nowhere but inside an array pattern
//! - Only supported pattern kinds appear
//! - No name is bound twice by one clause pattern
//!
//! [`lower_module`](crate::lower_module) runs this before rewriting
//! anything, so a tree is either lowered completely or left untouched.

use case_ir::ast::PatternKind;
use case_ir::stack::ensure_sufficient_stack;
use case_ir::visitor::{walk_clause, Visitor};
use case_ir::{Clause, Name, PatternId, PatternRange, Span, StmtId, StringInterner, TreeArena};
use rustc_hash::FxHashSet;

use crate::errors::{LowerError, LowerErrorKind, LowerResult};
use crate::options::LowerOptions;

/// Report every pattern error under `root`, in tree order.
pub fn validate(
    arena: &TreeArena,
    interner: &StringInterner,
    root: StmtId,
    options: &LowerOptions,
) -> Vec<LowerError> {
    let mut checker = PatternChecker {
        interner,
        wildcard: interner.intern(&options.wildcard),
        errors: Vec::new(),
    };
    checker.visit_stmt(root, arena);
    checker.errors
}

/// Fail with `OrderConstraint` if a rest element precedes the last position.
pub(crate) fn check_rest_order(
    arena: &TreeArena,
    pattern: PatternId,
    span: Span,
    elements: PatternRange,
) -> LowerResult<()> {
    let elements = arena.get_pattern_list(elements);
    let len = elements.len();
    let misplaced = elements[..len.saturating_sub(1)]
        .iter()
        .position(|&element| matches!(arena.pattern(element).kind, PatternKind::Rest(_)));
    match misplaced {
        None => Ok(()),
        Some(position) => Err(LowerError::new(
            LowerErrorKind::OrderConstraint { position, len },
            pattern,
            span,
        )),
    }
}

/// Where a pattern sits relative to its parent.
#[derive(Copy, Clone, PartialEq, Eq)]
enum Position {
    ArrayElement,
    Other,
}

struct PatternChecker<'a> {
    interner: &'a StringInterner,
    wildcard: Name,
    errors: Vec<LowerError>,
}

impl PatternChecker<'_> {
    fn check(
        &mut self,
        arena: &TreeArena,
        id: PatternId,
        position: Position,
        bound: &mut FxHashSet<Name>,
    ) {
        let pattern = *arena.pattern(id);
        ensure_sufficient_stack(|| match pattern.kind {
            PatternKind::Literal(_) => {}
            PatternKind::Binding(name) => self.bind(name, id, pattern.span, bound),
            PatternKind::Object(properties) => {
                for property in arena.get_properties(properties) {
                    match property.pattern {
                        Some(inner) => self.check(arena, inner, Position::Other, bound),
                        None => self.bind(property.key, id, property.span, bound),
                    }
                }
            }
            PatternKind::Array(elements) => {
                if let Err(error) = check_rest_order(arena, id, pattern.span, elements) {
                    self.errors.push(error);
                }
                for &element in arena.get_pattern_list(elements) {
                    self.check(arena, element, Position::ArrayElement, bound);
                }
            }
            PatternKind::Rest(inner) => {
                if position != Position::ArrayElement {
                    self.errors.push(LowerError::new(
                        LowerErrorKind::MisplacedRest,
                        id,
                        pattern.span,
                    ));
                }
                self.check(arena, inner, Position::Other, bound);
            }
            PatternKind::RegExp { .. } => self.errors.push(LowerError::new(
                LowerErrorKind::UnsupportedPattern {
                    kind: pattern.kind.describe(),
                },
                id,
                pattern.span,
            )),
        });
    }

    fn bind(&mut self, name: Name, id: PatternId, span: Span, bound: &mut FxHashSet<Name>) {
        if name != self.wildcard && !bound.insert(name) {
            self.errors.push(LowerError::new(
                LowerErrorKind::DuplicateBinding {
                    name: self.interner.lookup(name).to_owned(),
                },
                id,
                span,
            ));
        }
    }
}

impl Visitor for PatternChecker<'_> {
    fn visit_clause(&mut self, clause: &Clause, arena: &TreeArena) {
        let mut bound = FxHashSet::default();
        self.check(arena, clause.pattern, Position::Other, &mut bound);
        walk_clause(self, clause, arena);
    }
}
