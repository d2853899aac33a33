use pretty_assertions::assert_eq;

use super::*;
use crate::ast::{ExprKind, Literal, PatternKind, StmtKind};
use crate::{Name, Span};

fn num(arena: &mut TreeArena, value: f64) -> ExprId {
    arena.alloc_expr(Expr::new(
        ExprKind::Literal(Literal::number(value)),
        Span::DUMMY,
    ))
}

#[test]
fn ids_are_dense_per_node_family() {
    let mut arena = TreeArena::new();
    let a = num(&mut arena, 1.0);
    let b = num(&mut arena, 2.0);
    let s = arena.alloc_stmt(Stmt::new(StmtKind::Expr(a), Span::DUMMY));
    let p = arena.alloc_pattern(Pattern::new(
        PatternKind::Binding(Name::from_raw(3)),
        Span::DUMMY,
    ));

    assert_eq!((a.raw(), b.raw()), (0, 1));
    assert_eq!(s.raw(), 0);
    assert_eq!(p.raw(), 0);
    assert_eq!(arena.expr_count(), 2);
    assert_eq!(arena.stmt_count(), 1);
}

#[test]
fn lists_round_trip_through_ranges() {
    let mut arena = TreeArena::new();
    let items: Vec<_> = (0..3).map(|i| num(&mut arena, f64::from(i))).collect();

    let first = arena.alloc_expr_list(items.iter().copied());
    let empty = arena.alloc_expr_list(std::iter::empty());
    let second = arena.alloc_expr_list([items[2]]);

    assert_eq!(arena.get_expr_list(first), items.as_slice());
    assert!(empty.is_empty());
    assert!(arena.get_expr_list(empty).is_empty());
    assert_eq!(arena.get_expr_list(second), &[items[2]]);
}

#[test]
fn stmt_mut_replaces_in_place() {
    let mut arena = TreeArena::new();
    let value = num(&mut arena, 5.0);
    let stmt = arena.alloc_stmt(Stmt::new(StmtKind::Expr(value), Span::new(0, 1)));

    let body = arena.alloc_stmt_list([]);
    arena.stmt_mut(stmt).kind = StmtKind::Block(body);

    assert_eq!(arena.stmt(stmt).kind, StmtKind::Block(body));
    assert_eq!(arena.stmt(stmt).span, Span::new(0, 1));
}
