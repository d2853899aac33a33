//! Pattern test-and-bind generation.
//!
//! [`Lowerer::compile_pattern`] turns one pattern into a single boolean
//! expression. Evaluating the expression answers "does the value match?"
//! and, as it goes, assigns every name the pattern declares to a synthetic
//! binding. Tests are chained with `&&`, so a binding is only assigned once
//! every structural test before it has passed, and nothing after the first
//! failing test runs.
//!
//! The value under test is always a synthetic binding (the hidden
//! discriminant or a binding holding a sub-value), so reading it any number
//! of times has no side effect and the source expression runs exactly once.
//!
//! # Shapes
//!
//! ```text
//! 5                 _v === 5
//! x                 (_x = _v, true)
//! { a, b: 1 }       _v !== null && _v !== undefined
//!                     && (_a = _v.a, true) && _a !== undefined
//!                     && (_b = _v.b, true) && _b === 1
//! [x, ...rest]      Array.isArray(_v) && _v.length >= 1
//!                     && (_0 = _v[0], true) && (_rest = _v.slice(1), true)
//! ```

use case_ir::ast::{ExprKind, Literal, ObjectProperty, PatternKind};
use case_ir::stack::ensure_sufficient_stack;
use case_ir::{BinaryOp, ExprId, Name, PatternId, PatternRange, PropertyRange, Span, UnaryOp};

use crate::errors::{LowerError, LowerErrorKind, LowerResult};
use crate::lower::Lowerer;
use crate::options::AbsencePolicy;
use crate::scope::ClauseScope;
use crate::validate::check_rest_order;

impl Lowerer<'_> {
    /// Compile `pattern` against the value held by `value`.
    ///
    /// Returns the test expression. Names the pattern declares are recorded
    /// in `scope`.
    pub(crate) fn compile_pattern(
        &mut self,
        pattern: PatternId,
        value: Name,
        scope: &mut ClauseScope,
    ) -> LowerResult<ExprId> {
        ensure_sufficient_stack(|| self.compile_pattern_inner(pattern, value, scope))
    }

    fn compile_pattern_inner(
        &mut self,
        pattern: PatternId,
        value: Name,
        scope: &mut ClauseScope,
    ) -> LowerResult<ExprId> {
        let node = *self.arena.pattern(pattern);
        tracing::trace!(kind = node.kind.describe(), "compiling pattern");

        match node.kind {
            PatternKind::Literal(literal) => Ok(self.is_literal(value, literal)),

            PatternKind::Binding(name) if name == self.vocab.wildcard => Ok(self.bool_lit(true)),

            PatternKind::Binding(name) => {
                let hint = self.interner.lookup(name);
                let synthetic = scope.fresh_binding(self.names, self.interner, hint);
                self.declare(scope, name, synthetic, pattern, node.span)?;
                let source = self.ident(value);
                Ok(self.bind_step(synthetic, source))
            }

            PatternKind::Object(properties) => self.compile_object(pattern, properties, value, scope),

            PatternKind::Array(elements) => {
                self.compile_array(pattern, node.span, elements, value, scope)
            }

            PatternKind::Rest(_) => Err(LowerError::new(
                LowerErrorKind::MisplacedRest,
                pattern,
                node.span,
            )),

            PatternKind::RegExp { .. } => Err(LowerError::new(
                LowerErrorKind::UnsupportedPattern {
                    kind: node.kind.describe(),
                },
                pattern,
                node.span,
            )),
        }
    }

    /// Compile a pattern against a value that already sits in a synthetic
    /// binding of this clause.
    ///
    /// A plain binding reuses that synthetic binding instead of copying it,
    /// and a wildcard adds nothing, so both return `None`.
    fn compile_subpattern(
        &mut self,
        pattern: PatternId,
        value: Name,
        scope: &mut ClauseScope,
    ) -> LowerResult<Option<ExprId>> {
        let node = *self.arena.pattern(pattern);
        match node.kind {
            PatternKind::Binding(name) if name == self.vocab.wildcard => Ok(None),
            PatternKind::Binding(name) => {
                self.declare(scope, name, value, pattern, node.span)?;
                Ok(None)
            }
            _ => self.compile_pattern(pattern, value, scope).map(Some),
        }
    }

    /// Record that `original` now means `synthetic` in this clause.
    fn declare(
        &mut self,
        scope: &mut ClauseScope,
        original: Name,
        synthetic: Name,
        pattern: PatternId,
        span: Span,
    ) -> LowerResult<()> {
        match scope.record_substitution(original, synthetic) {
            None => Ok(()),
            Some(_) => Err(LowerError::new(
                LowerErrorKind::DuplicateBinding {
                    name: self.interner.lookup(original).to_owned(),
                },
                pattern,
                span,
            )),
        }
    }

    // Object patterns

    fn compile_object(
        &mut self,
        pattern: PatternId,
        properties: PropertyRange,
        value: Name,
        scope: &mut ClauseScope,
    ) -> LowerResult<ExprId> {
        let properties: Vec<ObjectProperty> = self.arena.get_properties(properties).to_vec();

        let mut tests = Vec::with_capacity(2 + properties.len() * 3);
        match self.options.absence {
            AbsencePolicy::UndefinedIsAbsent => {
                tests.push(self.is_not_literal(value, Literal::Null));
                tests.push(self.is_not_literal(value, Literal::Undefined));
            }
            AbsencePolicy::KeyPresence => {
                // `in` needs an object operand; primitives never match.
                let operand = self.ident(value);
                let type_of = self.expr(ExprKind::Unary {
                    op: UnaryOp::TypeOf,
                    operand,
                });
                let object = self.literal(Literal::Str(self.vocab.object));
                tests.push(self.binary(BinaryOp::StrictEq, type_of, object));
                tests.push(self.is_not_literal(value, Literal::Null));
            }
        }

        for property in &properties {
            self.compile_property(pattern, property, value, scope, &mut tests)?;
        }

        Ok(self.and_all(&tests))
    }

    fn compile_property(
        &mut self,
        object: PatternId,
        property: &ObjectProperty,
        value: Name,
        scope: &mut ClauseScope,
        tests: &mut Vec<ExprId>,
    ) -> LowerResult<()> {
        let may_be_absent = property.optional || property.default.is_some();

        if self.options.absence == AbsencePolicy::KeyPresence && !may_be_absent {
            let key = self.literal(Literal::Str(property.key));
            let object = self.ident(value);
            tests.push(self.binary(BinaryOp::In, key, object));
        }

        let hint = self.interner.lookup(property.key);
        let binding = scope.fresh_binding(self.names, self.interner, hint);
        let read = self.member(value, property.key);
        tests.push(match property.default {
            None => self.bind_step(binding, read),
            Some(default) => {
                scope.record_default(default);
                // (_k = v.k, _k === undefined && (_k = default), true)
                let assign = self.assign(binding, read);
                let missing = self.is_literal(binding, Literal::Undefined);
                let fallback = self.assign(binding, default);
                let fill = self.and(missing, fallback);
                let done = self.bool_lit(true);
                self.sequence(&[assign, fill, done])
            }
        });

        let subtest = match property.pattern {
            // Shorthand `{ key }` binds the key's own name.
            None => {
                if property.key != self.vocab.wildcard {
                    self.declare(scope, property.key, binding, object, property.span)?;
                }
                None
            }
            Some(pattern) => self.compile_subpattern(pattern, binding, scope)?,
        };

        match subtest {
            None => {
                if !may_be_absent && self.options.absence == AbsencePolicy::UndefinedIsAbsent {
                    tests.push(self.is_not_literal(binding, Literal::Undefined));
                }
            }
            Some(subtest) if property.optional => {
                let missing = self.is_literal(binding, Literal::Undefined);
                tests.push(self.or(missing, subtest));
            }
            Some(subtest) => tests.push(subtest),
        }
        Ok(())
    }

    // Array patterns

    fn compile_array(
        &mut self,
        pattern: PatternId,
        span: Span,
        elements: PatternRange,
        value: Name,
        scope: &mut ClauseScope,
    ) -> LowerResult<ExprId> {
        check_rest_order(self.arena, pattern, span, elements)?;

        let elements: Vec<PatternId> = self.arena.get_pattern_list(elements).to_vec();
        let rest = elements.last().and_then(|&last| match self.arena.pattern(last).kind {
            PatternKind::Rest(inner) => Some(inner),
            _ => None,
        });
        let fixed = if rest.is_some() {
            &elements[..elements.len() - 1]
        } else {
            &elements[..]
        };

        let mut tests = Vec::with_capacity(2 + fixed.len() * 2 + 2);
        tests.push(self.is_array(value));

        let length_op = match rest {
            None => Some(BinaryOp::StrictEq),
            Some(_) if !fixed.is_empty() => Some(BinaryOp::GtEq),
            Some(_) => None,
        };
        if let Some(op) = length_op {
            let length = self.member(value, self.vocab.length);
            let count = self.number(fixed.len());
            tests.push(self.binary(op, length, count));
        }

        for (index, &element) in fixed.iter().enumerate() {
            let binding = scope.fresh_binding(self.names, self.interner, &index.to_string());
            let read = self.index(value, index);
            tests.push(self.bind_step(binding, read));
            if let Some(subtest) = self.compile_subpattern(element, binding, scope)? {
                tests.push(subtest);
            }
        }

        if let Some(inner) = rest {
            let binding = scope.fresh_binding(self.names, self.interner, "rest");
            let start = self.number(fixed.len());
            let slice = self.method_call(value, self.vocab.slice, &[start]);
            tests.push(self.bind_step(binding, slice));
            if let Some(subtest) = self.compile_subpattern(inner, binding, scope)? {
                tests.push(subtest);
            }
        }

        Ok(self.and_all(&tests))
    }
}
