use case_eval::{TreeBuilder, Value};
use case_ir::BinaryOp;
use pretty_assertions::assert_eq;

use super::*;
use crate::options::LowerOptions;
use crate::test_helpers::{lower, lower_and_run, render};

/// `case (v) { when 1 -> emit("one"); when x if x > 10 -> emit(x) }`
fn two_clauses(b: &mut TreeBuilder) -> StmtId {
    let disc = b.ident("v");
    let one = b.p_num(1.0);
    let text = b.str("one");
    let body1 = b.emit_stmt(text);
    let x = b.p_bind("x");
    let gx = b.ident("x");
    let ten = b.num(10.0);
    let guard = b.binary(BinaryOp::Gt, gx, ten);
    let body2 = b.emit_ident("x");
    let clauses = [b.clause(one, None, body1), b.clause(x, Some(guard), body2)];
    b.match_stmt(disc, &clauses)
}

#[test]
fn if_else_chain_shape() {
    let mut b = TreeBuilder::new();
    let root = two_clauses(&mut b);
    assert!(lower(&mut b, root, &LowerOptions::default()).is_ok());

    assert_eq!(
        render(&b, root),
        "{ const _caseVal = v; let _x = undefined; \
         if (_caseVal === 1) emit(\"one\"); \
         else if ((_x = _caseVal, true) && _x > 10) emit(_x); }"
    );
}

#[test]
fn labeled_blocks_shape() {
    let mut b = TreeBuilder::new();
    let root = two_clauses(&mut b);
    let options = LowerOptions::default().with_chain(ChainShape::LabeledBlocks);
    assert!(lower(&mut b, root, &options).is_ok());

    assert_eq!(
        render(&b, root),
        "{ const _caseVal = v; let _x = undefined; _case: { \
         _case2: { if (!(_caseVal === 1)) break _case2; emit(\"one\"); break _case; } \
         _case3: { if (!((_x = _caseVal, true) && _x > 10)) break _case3; emit(_x); break _case; } \
         } }"
    );
}

#[test]
fn no_clauses_means_no_chain() {
    let mut b = TreeBuilder::new();
    let disc = b.ident("v");
    let root = b.match_stmt(disc, &[]);
    assert!(lower(&mut b, root, &LowerOptions::default()).is_ok());

    assert_eq!(render(&b, root), "{ const _caseVal = v; }");
}

#[test]
fn both_shapes_pick_the_same_clause() {
    for shape in [ChainShape::IfElse, ChainShape::LabeledBlocks] {
        for (input, expected) in [
            (1.0, Value::str("one")),
            (42.0, Value::Number(42.0)),
        ] {
            let mut b = TreeBuilder::new();
            let value = b.num(input);
            let decl = b.let_stmt("v", Some(value));
            let matched = two_clauses(&mut b);
            let after = b.str("after");
            let after = b.emit_stmt(after);
            let root = b.block(&[decl, matched, after]);

            let options = LowerOptions::default().with_chain(shape);
            assert_eq!(
                lower_and_run(&mut b, root, &options),
                vec![expected, Value::str("after")],
                "{shape:?} with {input}"
            );
        }
    }
}

#[test]
fn falling_through_every_clause_runs_nothing() {
    for shape in [ChainShape::IfElse, ChainShape::LabeledBlocks] {
        let mut b = TreeBuilder::new();
        let value = b.num(5.0);
        let decl = b.let_stmt("v", Some(value));
        let matched = two_clauses(&mut b);
        let root = b.block(&[decl, matched]);

        let options = LowerOptions::default().with_chain(shape);
        assert_eq!(lower_and_run(&mut b, root, &options), vec![], "{shape:?}");
    }
}
