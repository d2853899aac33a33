//! Tree-walking interpreter.
//!
//! Runs statement trees built from the host vocabulary. Control transfer is
//! explicit: every statement yields a [`Completion`], and `break` travels
//! outward as `Completion::Break` until a matching label absorbs it.
//!
//! Builtins are resolved by name:
//! - `emit(v)` appends `v` to the output
//! - `Array.isArray(v)`
//! - `v.length` on arrays and strings
//! - `v.slice(n)` on arrays

use case_ir::ast::{ExprKind, Literal, StmtKind};
use case_ir::stack::ensure_sufficient_stack;
use case_ir::{BinaryOp, ExprId, LogicalOp, Name, StmtId, StringInterner, TreeArena, UnaryOp};

use crate::environment::{AssignError, Environment, Mutability};
use crate::errors::{EvalError, EvalResult};
use crate::value::Value;

/// How a statement finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    Normal,
    /// `break` or `break label`, still looking for its target.
    Break(Option<Name>),
}

/// Names the interpreter gives special meaning to.
struct Builtins {
    emit: Name,
    array: Name,
    is_array: Name,
    length: Name,
    slice: Name,
}

pub struct Interpreter<'a> {
    arena: &'a TreeArena,
    interner: &'a StringInterner,
    env: Environment,
    builtins: Builtins,
    output: Vec<Value>,
}

impl<'a> Interpreter<'a> {
    pub fn new(arena: &'a TreeArena, interner: &'a StringInterner) -> Self {
        Interpreter {
            arena,
            interner,
            env: Environment::new(),
            builtins: Builtins {
                emit: interner.intern("emit"),
                array: interner.intern("Array"),
                is_array: interner.intern("isArray"),
                length: interner.intern("length"),
                slice: interner.intern("slice"),
            },
            output: Vec::new(),
        }
    }

    /// Values passed to `emit`, in call order.
    pub fn output(&self) -> &[Value] {
        &self.output
    }

    pub fn into_output(self) -> Vec<Value> {
        self.output
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    // Statements

    pub fn exec(&mut self, id: StmtId) -> EvalResult<Completion> {
        ensure_sufficient_stack(|| self.exec_inner(id))
    }

    fn exec_inner(&mut self, id: StmtId) -> EvalResult<Completion> {
        match self.arena.stmt(id).kind {
            StmtKind::Expr(expr) => {
                self.eval(expr)?;
                Ok(Completion::Normal)
            }
            StmtKind::Let {
                name,
                init,
                mutable,
            } => {
                let value = match init {
                    Some(init) => self.eval(init)?,
                    None => Value::Undefined,
                };
                let mutability = if mutable {
                    Mutability::Mutable
                } else {
                    Mutability::Immutable
                };
                self.env.define(name, value, mutability);
                Ok(Completion::Normal)
            }
            StmtKind::If {
                test,
                then_branch,
                else_branch,
            } => {
                if self.eval(test)?.is_truthy() {
                    self.exec(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.exec(else_branch)
                } else {
                    Ok(Completion::Normal)
                }
            }
            StmtKind::Block(stmts) => {
                self.env.push_scope();
                let result = self.exec_list(self.arena.get_stmt_list(stmts));
                self.env.pop_scope();
                result
            }
            StmtKind::Labeled { label, body } => match self.exec(body)? {
                Completion::Break(Some(target)) if target == label => Ok(Completion::Normal),
                other => Ok(other),
            },
            StmtKind::Break { label } => Ok(Completion::Break(label)),
            StmtKind::Match { .. } => Err(EvalError::UnresolvedMatch),
        }
    }

    fn exec_list(&mut self, stmts: &[StmtId]) -> EvalResult<Completion> {
        for &stmt in stmts {
            if let brk @ Completion::Break(_) = self.exec(stmt)? {
                return Ok(brk);
            }
        }
        Ok(Completion::Normal)
    }

    // Expressions

    pub fn eval(&mut self, id: ExprId) -> EvalResult<Value> {
        ensure_sufficient_stack(|| self.eval_inner(id))
    }

    fn eval_inner(&mut self, id: ExprId) -> EvalResult<Value> {
        match self.arena.expr(id).kind {
            ExprKind::Literal(literal) => Ok(self.literal(literal)),
            ExprKind::Ident(name) => {
                self.env
                    .lookup(name)
                    .ok_or_else(|| EvalError::UndefinedVariable {
                        name: self.interner.lookup(name).to_owned(),
                    })
            }
            ExprKind::Member { object, property } => {
                let object = self.eval(object)?;
                self.property(&object, property)
            }
            ExprKind::Index { object, index } => {
                let object = self.eval(object)?;
                let index = self.eval(index)?;
                self.index(&object, &index)
            }
            ExprKind::Call { callee, args } => self.call(callee, self.arena.get_expr_list(args)),
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => {
                let receiver = self.eval(receiver)?;
                let args = self.eval_list(self.arena.get_expr_list(args))?;
                self.method_call(&receiver, method, &args)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.eval(operand)?;
                unary(op, &operand)
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                self.binary(op, &left, &right)
            }
            ExprKind::Logical { op, left, right } => {
                let left = self.eval(left)?;
                let decided = match op {
                    LogicalOp::And => !left.is_truthy(),
                    LogicalOp::Or => left.is_truthy(),
                };
                if decided {
                    Ok(left)
                } else {
                    self.eval(right)
                }
            }
            ExprKind::Assign { target, value } => {
                let value = self.eval(value)?;
                self.env
                    .assign(target, value.clone())
                    .map_err(|error| self.assign_error(error, target))?;
                Ok(value)
            }
            ExprKind::Sequence(items) => {
                let mut last = Value::Undefined;
                for &item in self.arena.get_expr_list(items) {
                    last = self.eval(item)?;
                }
                Ok(last)
            }
            ExprKind::Array(items) => Ok(Value::array(
                self.eval_list(self.arena.get_expr_list(items))?,
            )),
            ExprKind::Object(fields) => {
                let mut values = Vec::with_capacity(fields.len());
                for field in self.arena.get_fields(fields) {
                    values.push((field.key, self.eval(field.value)?));
                }
                Ok(Value::object(values))
            }
        }
    }

    fn eval_list(&mut self, ids: &[ExprId]) -> EvalResult<Vec<Value>> {
        ids.iter().map(|&id| self.eval(id)).collect()
    }

    fn literal(&self, literal: Literal) -> Value {
        match literal {
            Literal::Number(bits) => Value::Number(f64::from_bits(bits)),
            Literal::Str(name) => Value::str(self.interner.lookup(name)),
            Literal::Bool(b) => Value::Bool(b),
            Literal::Null => Value::Null,
            Literal::Undefined => Value::Undefined,
        }
    }

    fn assign_error(&self, error: AssignError, target: Name) -> EvalError {
        let name = self.interner.lookup(target).to_owned();
        match error {
            AssignError::Undefined => EvalError::UndefinedVariable { name },
            AssignError::Immutable => EvalError::AssignToConstant { name },
        }
    }

    fn property(&self, object: &Value, property: Name) -> EvalResult<Value> {
        match object {
            Value::Undefined | Value::Null => Err(EvalError::PropertyOfNullish {
                property: self.interner.lookup(property).to_owned(),
                target: nullish_name(object),
            }),
            Value::Array(items) if property == self.builtins.length => Ok(length(items.len())),
            Value::Str(s) if property == self.builtins.length => Ok(length(s.chars().count())),
            Value::Object(_) => Ok(object.get(property).cloned().unwrap_or(Value::Undefined)),
            _ => Ok(Value::Undefined),
        }
    }

    fn index(&self, object: &Value, index: &Value) -> EvalResult<Value> {
        match (object, index) {
            (Value::Undefined | Value::Null, _) => Err(EvalError::PropertyOfNullish {
                property: format!("{index:?}"),
                target: nullish_name(object),
            }),
            (Value::Array(items), Value::Number(n)) => Ok(to_index(*n)
                .and_then(|i| items.get(i))
                .cloned()
                .unwrap_or(Value::Undefined)),
            (Value::Object(_), Value::Str(key)) => {
                let key = self.interner.intern(key);
                Ok(object.get(key).cloned().unwrap_or(Value::Undefined))
            }
            _ => Ok(Value::Undefined),
        }
    }

    fn call(&mut self, callee: ExprId, args: &[ExprId]) -> EvalResult<Value> {
        match self.arena.expr(callee).kind {
            ExprKind::Ident(name) if name == self.builtins.emit => {
                let args = self.eval_list(args)?;
                tracing::trace!(count = args.len(), "emit");
                self.output.extend(args);
                Ok(Value::Undefined)
            }
            ExprKind::Member { object, property }
                if property == self.builtins.is_array
                    && self.arena.expr(object).kind == ExprKind::Ident(self.builtins.array) =>
            {
                let args = self.eval_list(args)?;
                Ok(Value::Bool(matches!(args.first(), Some(Value::Array(_)))))
            }
            _ => {
                let callee = self.eval(callee)?;
                Err(EvalError::NotCallable {
                    what: callee.type_of().to_owned(),
                })
            }
        }
    }

    fn method_call(&self, receiver: &Value, method: Name, args: &[Value]) -> EvalResult<Value> {
        match receiver {
            Value::Array(items) if method == self.builtins.slice => {
                let start = match args.first() {
                    Some(Value::Number(n)) => to_index(*n).unwrap_or(0),
                    _ => 0,
                };
                Ok(Value::array(
                    items.get(start..).unwrap_or_default().iter().cloned(),
                ))
            }
            Value::Undefined | Value::Null => Err(EvalError::PropertyOfNullish {
                property: self.interner.lookup(method).to_owned(),
                target: nullish_name(receiver),
            }),
            _ => Err(EvalError::NotCallable {
                what: format!("{}.{}", receiver.type_of(), self.interner.lookup(method)),
            }),
        }
    }

    fn binary(&self, op: BinaryOp, left: &Value, right: &Value) -> EvalResult<Value> {
        let mismatch = || EvalError::TypeMismatch {
            op: op.as_symbol(),
            left: left.type_of(),
            right: right.type_of(),
        };
        match op {
            BinaryOp::StrictEq => Ok(Value::Bool(left.strict_eq(right))),
            BinaryOp::StrictNotEq => Ok(Value::Bool(!left.strict_eq(right))),
            BinaryOp::In => match (left, right) {
                (Value::Str(key), Value::Object(_)) => {
                    Ok(Value::Bool(right.get(self.interner.intern(key)).is_some()))
                }
                // Own keys of an array: its indices and `length`.
                (Value::Str(key), Value::Array(items)) => Ok(Value::Bool(
                    &**key == "length" || array_index(key).is_some_and(|i| i < items.len()),
                )),
                _ => Err(mismatch()),
            },
            BinaryOp::Add => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::Str(a), Value::Str(b)) => Ok(Value::str(&format!("{a}{b}"))),
                _ => Err(mismatch()),
            },
            BinaryOp::Sub
            | BinaryOp::Mul
            | BinaryOp::Lt
            | BinaryOp::LtEq
            | BinaryOp::Gt
            | BinaryOp::GtEq => {
                let (Value::Number(a), Value::Number(b)) = (left, right) else {
                    return Err(mismatch());
                };
                Ok(match op {
                    BinaryOp::Sub => Value::Number(a - b),
                    BinaryOp::Mul => Value::Number(a * b),
                    BinaryOp::Lt => Value::Bool(a < b),
                    BinaryOp::LtEq => Value::Bool(a <= b),
                    BinaryOp::Gt => Value::Bool(a > b),
                    _ => Value::Bool(a >= b),
                })
            }
        }
    }
}

fn unary(op: UnaryOp, operand: &Value) -> EvalResult<Value> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::TypeOf => Ok(Value::str(operand.type_of())),
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            _ => Err(EvalError::TypeMismatch {
                op: op.as_symbol(),
                left: operand.type_of(),
                right: "nothing",
            }),
        },
    }
}

#[expect(
    clippy::cast_precision_loss,
    reason = "lengths of test values are far below 2^52"
)]
fn length(len: usize) -> Value {
    Value::Number(len as f64)
}

/// A non-negative integral number as an index.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "checked non-negative and integral first"
)]
fn to_index(n: f64) -> Option<usize> {
    (n >= 0.0 && n.fract() == 0.0).then(|| n as usize)
}

/// A canonical array index key: `"0"`, `"1"`, ... but not `"01"` or `"-1"`.
fn array_index(key: &str) -> Option<usize> {
    let index: usize = key.parse().ok()?;
    (index.to_string() == key).then_some(index)
}

fn nullish_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        _ => "undefined",
    }
}
