//! Node construction shorthands for generated code.
//!
//! Every node built here carries [`Span::DUMMY`]: generated tests and
//! declarations have no source text of their own.

use case_ir::ast::{Expr, ExprKind, Literal, Stmt, StmtKind};
use case_ir::{BinaryOp, ExprId, LogicalOp, Name, Span, StmtId, UnaryOp};

use crate::lower::Lowerer;

impl Lowerer<'_> {
    // Expressions

    pub(crate) fn expr(&mut self, kind: ExprKind) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, Span::DUMMY))
    }

    pub(crate) fn ident(&mut self, name: Name) -> ExprId {
        self.expr(ExprKind::Ident(name))
    }

    pub(crate) fn literal(&mut self, literal: Literal) -> ExprId {
        self.expr(ExprKind::Literal(literal))
    }

    pub(crate) fn bool_lit(&mut self, value: bool) -> ExprId {
        self.literal(Literal::Bool(value))
    }

    pub(crate) fn undefined(&mut self) -> ExprId {
        self.literal(Literal::Undefined)
    }

    pub(crate) fn binary(&mut self, op: BinaryOp, left: ExprId, right: ExprId) -> ExprId {
        self.expr(ExprKind::Binary { op, left, right })
    }

    /// `name === literal`
    pub(crate) fn is_literal(&mut self, name: Name, literal: Literal) -> ExprId {
        let value = self.ident(name);
        let literal = self.literal(literal);
        self.binary(BinaryOp::StrictEq, value, literal)
    }

    /// `name !== literal`
    pub(crate) fn is_not_literal(&mut self, name: Name, literal: Literal) -> ExprId {
        let value = self.ident(name);
        let literal = self.literal(literal);
        self.binary(BinaryOp::StrictNotEq, value, literal)
    }

    pub(crate) fn and(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.expr(ExprKind::Logical {
            op: LogicalOp::And,
            left,
            right,
        })
    }

    pub(crate) fn or(&mut self, left: ExprId, right: ExprId) -> ExprId {
        self.expr(ExprKind::Logical {
            op: LogicalOp::Or,
            left,
            right,
        })
    }

    pub(crate) fn not(&mut self, operand: ExprId) -> ExprId {
        self.expr(ExprKind::Unary {
            op: UnaryOp::Not,
            operand,
        })
    }

    pub(crate) fn assign(&mut self, target: Name, value: ExprId) -> ExprId {
        self.expr(ExprKind::Assign { target, value })
    }

    pub(crate) fn sequence(&mut self, items: &[ExprId]) -> ExprId {
        let items = self.arena.alloc_expr_list(items.iter().copied());
        self.expr(ExprKind::Sequence(items))
    }

    /// `(target = value, true)`: a binding step inside a test chain.
    pub(crate) fn bind_step(&mut self, target: Name, value: ExprId) -> ExprId {
        let assign = self.assign(target, value);
        let done = self.bool_lit(true);
        self.sequence(&[assign, done])
    }

    pub(crate) fn member(&mut self, object: Name, property: Name) -> ExprId {
        let object = self.ident(object);
        self.expr(ExprKind::Member { object, property })
    }

    pub(crate) fn index(&mut self, object: Name, index: usize) -> ExprId {
        let object = self.ident(object);
        let index = self.number(index);
        self.expr(ExprKind::Index { object, index })
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "pattern element counts are far below 2^52"
    )]
    pub(crate) fn number(&mut self, value: usize) -> ExprId {
        self.literal(Literal::number(value as f64))
    }

    pub(crate) fn method_call(&mut self, receiver: Name, method: Name, args: &[ExprId]) -> ExprId {
        let receiver = self.ident(receiver);
        let args = self.arena.alloc_expr_list(args.iter().copied());
        self.expr(ExprKind::MethodCall {
            receiver,
            method,
            args,
        })
    }

    /// `Array.isArray(name)`
    pub(crate) fn is_array(&mut self, name: Name) -> ExprId {
        let callee = self.member(self.vocab.array, self.vocab.is_array);
        let arg = self.ident(name);
        let args = self.arena.alloc_expr_list([arg]);
        self.expr(ExprKind::Call { callee, args })
    }

    /// Fold `tests` with `&&`, left to right. An empty list is `true`.
    pub(crate) fn and_all(&mut self, tests: &[ExprId]) -> ExprId {
        match tests.split_first() {
            None => self.bool_lit(true),
            Some((&first, rest)) => rest
                .iter()
                .fold(first, |acc, &test| self.and(acc, test)),
        }
    }

    // Statements

    pub(crate) fn stmt(&mut self, kind: StmtKind) -> StmtId {
        self.arena.alloc_stmt(Stmt::new(kind, Span::DUMMY))
    }

    pub(crate) fn block(&mut self, stmts: &[StmtId]) -> StmtId {
        let range = self.arena.alloc_stmt_list(stmts.iter().copied());
        self.stmt(StmtKind::Block(range))
    }

    pub(crate) fn if_stmt(
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

    pub(crate) fn break_to(&mut self, label: Name) -> StmtId {
        self.stmt(StmtKind::Break { label: Some(label) })
    }

    pub(crate) fn labeled(&mut self, label: Name, body: StmtId) -> StmtId {
        self.stmt(StmtKind::Labeled { label, body })
    }
}
