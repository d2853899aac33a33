//! Shared helpers for unit tests: lowering shorthands and a compact
//! source-like rendering of trees for structural assertions.

use std::fmt::Write;

use case_eval::{TreeBuilder, Value};
use case_ir::ast::{ExprKind, Literal, StmtKind};
use case_ir::{ExprId, LogicalOp, StmtId, StringInterner, TreeArena, UnaryOp};

use crate::{lower_module, LowerOptions, LowerResult, LowerStats};

/// Lower every match statement under `root`.
///
/// Set `RUST_LOG=case_lower=trace` to see the pass's tracing output.
pub(crate) fn lower(
    b: &mut TreeBuilder,
    root: StmtId,
    options: &LowerOptions,
) -> LowerResult<LowerStats> {
    crate::init_tracing();
    lower_module(&mut b.arena, &b.interner, root, options)
}

/// Lower `root`, run it, and return what it emitted.
pub(crate) fn lower_and_run(
    b: &mut TreeBuilder,
    root: StmtId,
    options: &LowerOptions,
) -> Vec<Value> {
    if let Err(error) = lower(b, root, options) {
        panic!("lowering failed: {error}");
    }
    match case_eval::run(&b.arena, &b.interner, root) {
        Ok(values) => values,
        Err(error) => panic!("evaluation failed: {error}\n{}", render(b, root)),
    }
}

/// Render the statement at `root`.
pub(crate) fn render(b: &TreeBuilder, root: StmtId) -> String {
    let mut out = String::new();
    Printer {
        arena: &b.arena,
        interner: &b.interner,
        out: &mut out,
    }
    .stmt(root);
    out
}

/// Render the expression at `id`.
pub(crate) fn render_expr(b: &TreeBuilder, id: ExprId) -> String {
    let mut out = String::new();
    Printer {
        arena: &b.arena,
        interner: &b.interner,
        out: &mut out,
    }
    .expr(id);
    out
}

struct Printer<'a> {
    arena: &'a TreeArena,
    interner: &'a StringInterner,
    out: &'a mut String,
}

impl Printer<'_> {
    fn push(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn name(&mut self, name: case_ir::Name) {
        let s = self.interner.lookup(name);
        self.push(s);
    }

    fn stmt(&mut self, id: StmtId) {
        match self.arena.stmt(id).kind {
            StmtKind::Expr(expr) => {
                self.expr(expr);
                self.push(";");
            }
            StmtKind::Let {
                name,
                init,
                mutable,
            } => {
                self.push(if mutable { "let " } else { "const " });
                self.name(name);
                if let Some(init) = init {
                    self.push(" = ");
                    self.expr(init);
                }
                self.push(";");
            }
            StmtKind::If {
                test,
                then_branch,
                else_branch,
            } => {
                self.push("if (");
                self.expr(test);
                self.push(") ");
                self.stmt(then_branch);
                if let Some(else_branch) = else_branch {
                    self.push(" else ");
                    self.stmt(else_branch);
                }
            }
            StmtKind::Block(stmts) => {
                let stmts = self.arena.get_stmt_list(stmts);
                if stmts.is_empty() {
                    self.push("{}");
                    return;
                }
                self.push("{");
                for &stmt in stmts {
                    self.push(" ");
                    self.stmt(stmt);
                }
                self.push(" }");
            }
            StmtKind::Labeled { label, body } => {
                self.name(label);
                self.push(": ");
                self.stmt(body);
            }
            StmtKind::Break { label } => {
                self.push("break");
                if let Some(label) = label {
                    self.push(" ");
                    self.name(label);
                }
                self.push(";");
            }
            StmtKind::Match {
                discriminant,
                clauses,
            } => {
                self.push("case (");
                self.expr(discriminant);
                let _ = write!(self.out, ") {{ {} clauses }}", clauses.len());
            }
        }
    }

    fn list(&mut self, ids: &[ExprId]) {
        for (i, &id) in ids.iter().enumerate() {
            if i > 0 {
                self.push(", ");
            }
            self.expr(id);
        }
    }

    fn logical_operand(&mut self, op: LogicalOp, id: ExprId) {
        match self.arena.expr(id).kind {
            ExprKind::Logical { op: inner, .. } if inner != op => self.parenthesized(id),
            ExprKind::Assign { .. } => self.parenthesized(id),
            _ => self.expr(id),
        }
    }

    fn parenthesized(&mut self, id: ExprId) {
        self.push("(");
        self.expr(id);
        self.push(")");
    }

    fn expr(&mut self, id: ExprId) {
        match self.arena.expr(id).kind {
            ExprKind::Literal(literal) => match literal {
                Literal::Number(bits) => {
                    let _ = write!(self.out, "{}", f64::from_bits(bits));
                }
                Literal::Str(name) => {
                    let _ = write!(self.out, "{:?}", self.interner.lookup(name));
                }
                Literal::Bool(b) => {
                    let _ = write!(self.out, "{b}");
                }
                Literal::Null => self.push("null"),
                Literal::Undefined => self.push("undefined"),
            },
            ExprKind::Ident(name) => self.name(name),
            ExprKind::Member { object, property } => {
                self.expr(object);
                self.push(".");
                self.name(property);
            }
            ExprKind::Index { object, index } => {
                self.expr(object);
                self.push("[");
                self.expr(index);
                self.push("]");
            }
            ExprKind::Call { callee, args } => {
                self.expr(callee);
                self.push("(");
                self.list(self.arena.get_expr_list(args));
                self.push(")");
            }
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => {
                self.expr(receiver);
                self.push(".");
                self.name(method);
                self.push("(");
                self.list(self.arena.get_expr_list(args));
                self.push(")");
            }
            ExprKind::Unary { op, operand } => match op {
                UnaryOp::Not => {
                    self.push("!(");
                    self.expr(operand);
                    self.push(")");
                }
                UnaryOp::Neg => {
                    self.push("-");
                    self.expr(operand);
                }
                UnaryOp::TypeOf => {
                    self.push("typeof ");
                    self.expr(operand);
                }
            },
            ExprKind::Binary { op, left, right } => {
                self.expr(left);
                let _ = write!(self.out, " {} ", op.as_symbol());
                self.expr(right);
            }
            ExprKind::Logical { op, left, right } => {
                self.logical_operand(op, left);
                self.push(match op {
                    LogicalOp::And => " && ",
                    LogicalOp::Or => " || ",
                });
                self.logical_operand(op, right);
            }
            ExprKind::Assign { target, value } => {
                self.name(target);
                self.push(" = ");
                self.expr(value);
            }
            ExprKind::Sequence(items) => {
                self.push("(");
                self.list(self.arena.get_expr_list(items));
                self.push(")");
            }
            ExprKind::Array(items) => {
                self.push("[");
                self.list(self.arena.get_expr_list(items));
                self.push("]");
            }
            ExprKind::Object(fields) => {
                self.push("{");
                for (i, field) in self.arena.get_fields(fields).iter().enumerate() {
                    self.push(if i > 0 { ", " } else { " " });
                    self.name(field.key);
                    self.push(": ");
                    self.expr(field.value);
                }
                self.push(" }");
            }
        }
    }
}
