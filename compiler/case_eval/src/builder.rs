//! Shorthands for building trees by hand.
//!
//! Tests build input trees directly instead of parsing source text. Every
//! node gets [`Span::DUMMY`] unless a method takes a span.
//!
//! ```text
//! // case (5) { when x -> emit(x) }
//! let mut b = TreeBuilder::new();
//! let disc = b.num(5.0);
//! let x = b.p_bind("x");
//! let body = b.emit_ident("x");
//! let clause = b.clause(x, None, body);
//! let stmt = b.match_stmt(disc, &[clause]);
//! ```

use case_ir::ast::{
    Clause, Expr, ExprKind, Literal, ObjectField, ObjectProperty, Pattern, PatternKind, Stmt,
    StmtKind,
};
use case_ir::{
    BinaryOp, ExprId, LogicalOp, Name, PatternId, Span, StmtId, StringInterner, TreeArena,
};

/// An arena plus the interner its names live in.
#[derive(Default)]
pub struct TreeBuilder {
    pub arena: TreeArena,
    pub interner: StringInterner,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    // Expressions

    pub fn expr(&mut self, kind: ExprKind) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, Span::DUMMY))
    }

    pub fn num(&mut self, value: f64) -> ExprId {
        self.expr(ExprKind::Literal(Literal::number(value)))
    }

    pub fn str(&mut self, value: &str) -> ExprId {
        let name = self.name(value);
        self.expr(ExprKind::Literal(Literal::Str(name)))
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.expr(ExprKind::Literal(Literal::Bool(value)))
    }

    pub fn null(&mut self) -> ExprId {
        self.expr(ExprKind::Literal(Literal::Null))
    }

    pub fn undefined(&mut self) -> ExprId {
        self.expr(ExprKind::Literal(Literal::Undefined))
    }

    pub fn ident(&mut self, name: &str) -> ExprId {
        let name = self.name(name);
        self.expr(ExprKind::Ident(name))
    }

    pub fn member(&mut self, object: ExprId, property: &str) -> ExprId {
        let property = self.name(property);
        self.expr(ExprKind::Member { object, property })
    }

    pub fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.expr(ExprKind::Binary { op, left, right })
    }

    pub fn and(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.expr(ExprKind::Logical {
            op: LogicalOp::And,
            left,
            right,
        })
    }

    pub fn assign(&mut self, target: &str, value: ExprId) -> ExprId {
        let target = self.name(target);
        self.expr(ExprKind::Assign { target, value })
    }

    /// `callee(args...)` for a named callee.
    pub fn call(&mut self, callee: &str, args: &[ExprId]) -> ExprId {
        let callee = self.ident(callee);
        let args = self.arena.alloc_expr_list(args.iter().copied());
        self.expr(ExprKind::Call { callee, args })
    }

    pub fn array(&mut self, items: &[ExprId]) -> ExprId {
        let items = self.arena.alloc_expr_list(items.iter().copied());
        self.expr(ExprKind::Array(items))
    }

    pub fn object(&mut self, fields: &[(&str, ExprId)]) -> ExprId {
        let fields: Vec<ObjectField> = fields
            .iter()
            .map(|&(key, value)| ObjectField {
                key: self.name(key),
                value,
            })
            .collect();
        let fields = self.arena.alloc_fields(fields);
        self.expr(ExprKind::Object(fields))
    }

    // Statements

    pub fn stmt(&mut self, kind: StmtKind) -> StmtId {
        self.arena.alloc_stmt(Stmt::new(kind, Span::DUMMY))
    }

    pub fn expr_stmt(&mut self, expr: ExprId) -> StmtId {
        self.stmt(StmtKind::Expr(expr))
    }

    /// `emit(value);`
    pub fn emit_stmt(&mut self, value: ExprId) -> StmtId {
        let call = self.call("emit", &[value]);
        self.expr_stmt(call)
    }

    /// `emit(name);`
    pub fn emit_ident(&mut self, name: &str) -> StmtId {
        let value = self.ident(name);
        self.emit_stmt(value)
    }

    pub fn let_stmt(&mut self, name: &str, init: Option<ExprId>) -> StmtId {
        let name = self.name(name);
        self.stmt(StmtKind::Let {
            name,
            init,
            mutable: true,
        })
    }

    pub fn block(&mut self, stmts: &[StmtId]) -> StmtId {
        let stmts = self.arena.alloc_stmt_list(stmts.iter().copied());
        self.stmt(StmtKind::Block(stmts))
    }

    pub fn if_stmt(
        &mut self,
        test: ExprId,
        then_branch: StmtId,
        else_branch: Option<StmtId>,
    ) -> StmtId {
        self.stmt(StmtKind::If {
            test,
            then_branch,
            else_branch,
        })
    }

    pub fn labeled(&mut self, label: &str, body: StmtId) -> StmtId {
        let label = self.name(label);
        self.stmt(StmtKind::Labeled { label, body })
    }

    pub fn break_stmt(&mut self, label: Option<&str>) -> StmtId {
        let label = label.map(|label| self.name(label));
        self.stmt(StmtKind::Break { label })
    }

    pub fn clause(&self, pattern: PatternId, guard: Option<ExprId>, body: StmtId) -> Clause {
        Clause {
            pattern,
            guard,
            body,
            span: Span::DUMMY,
        }
    }

    pub fn match_stmt(&mut self, discriminant: ExprId, clauses: &[Clause]) -> StmtId {
        let clauses = self.arena.alloc_clauses(clauses.iter().copied());
        self.stmt(StmtKind::Match {
            discriminant,
            clauses,
        })
    }

    // Patterns

    pub fn pattern(&mut self, kind: PatternKind, span: Span) -> PatternId {
        self.arena.alloc_pattern(Pattern::new(kind, span))
    }

    pub fn p_num(&mut self, value: f64) -> PatternId {
        self.pattern(PatternKind::Literal(Literal::number(value)), Span::DUMMY)
    }

    pub fn p_str(&mut self, value: &str) -> PatternId {
        let name = self.name(value);
        self.pattern(PatternKind::Literal(Literal::Str(name)), Span::DUMMY)
    }

    pub fn p_lit(&mut self, literal: Literal) -> PatternId {
        self.pattern(PatternKind::Literal(literal), Span::DUMMY)
    }

    pub fn p_bind(&mut self, name: &str) -> PatternId {
        let name = self.name(name);
        self.pattern(PatternKind::Binding(name), Span::DUMMY)
    }

    pub fn p_obj(&mut self, properties: &[ObjectProperty]) -> PatternId {
        let properties = self.arena.alloc_properties(properties.iter().copied());
        self.pattern(PatternKind::Object(properties), Span::DUMMY)
    }

    pub fn p_arr(&mut self, elements: &[PatternId]) -> PatternId {
        let elements = self.arena.alloc_pattern_list(elements.iter().copied());
        self.pattern(PatternKind::Array(elements), Span::DUMMY)
    }

    pub fn p_rest(&mut self, inner: PatternId) -> PatternId {
        self.pattern(PatternKind::Rest(inner), Span::DUMMY)
    }

    pub fn p_regexp(&mut self, pattern: &str, flags: &str) -> PatternId {
        let pattern = self.name(pattern);
        let flags = self.name(flags);
        self.pattern(PatternKind::RegExp { pattern, flags }, Span::DUMMY)
    }

    // Object pattern properties

    /// `{ key }`
    pub fn prop(&self, key: &str) -> ObjectProperty {
        ObjectProperty {
            key: self.name(key),
            pattern: None,
            default: None,
            optional: false,
            span: Span::DUMMY,
        }
    }

    /// `{ key: pattern }`
    pub fn prop_pat(&self, key: &str, pattern: PatternId) -> ObjectProperty {
        ObjectProperty {
            pattern: Some(pattern),
            ..self.prop(key)
        }
    }

    /// `{ key = default }`
    pub fn prop_default(&self, key: &str, default: ExprId) -> ObjectProperty {
        ObjectProperty {
            default: Some(default),
            ..self.prop(key)
        }
    }

    /// `{ key?: pattern }`, or `{ key? }` without a pattern.
    pub fn prop_optional(&self, key: &str, pattern: Option<PatternId>) -> ObjectProperty {
        ObjectProperty {
            pattern,
            optional: true,
            ..self.prop(key)
        }
    }
}
