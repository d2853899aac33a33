//! Property-based tests for match lowering.
//!
//! Random clause lists are lowered, run on the reference evaluator and
//! compared against a direct model of first-match semantics:
//! 1. Order: the first clause whose pattern and guard both pass is taken
//! 2. Single execution: at most one body runs
//! 3. Guard short-circuit: a guard runs only after its pattern matched
//! 4. Both chain shapes behave identically
//! 5. Lowering equal trees yields equal trees
//! 6. A misplaced rest element fails without touching the tree

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::doc_markdown,
    clippy::uninlined_format_args,
    clippy::cast_precision_loss,
    reason = "Proptest macros generate code with these patterns"
)]

use case_eval::{TreeBuilder, Value};
use case_ir::ast::ExprKind;
use case_ir::{BinaryOp, ExprId, PatternId, StmtId};
use case_lower::{lower_module, ChainShape, LowerErrorKind, LowerOptions};
use proptest::prelude::*;

const SHAPES: [ChainShape; 2] = [ChainShape::IfElse, ChainShape::LabeledBlocks];

// -- Scalar clauses --

#[derive(Clone, Debug)]
enum Shape {
    Literal(u8),
    Bind,
    Wildcard,
}

#[derive(Clone, Debug)]
struct ClauseSpec {
    shape: Shape,
    /// Passes when the discriminant is greater than this.
    guard: Option<u8>,
}

fn clause_strategy() -> impl Strategy<Value = ClauseSpec> {
    let shape = prop_oneof![
        3 => (0u8..4).prop_map(Shape::Literal),
        2 => Just(Shape::Bind),
        1 => Just(Shape::Wildcard),
    ];
    (shape, proptest::option::of(0u8..4)).prop_map(|(shape, guard)| ClauseSpec { shape, guard })
}

/// What the lowered program should emit for discriminant `d`.
fn model(clauses: &[ClauseSpec], d: u8) -> Vec<Value> {
    let mut out = Vec::new();
    for (i, clause) in clauses.iter().enumerate() {
        if let Shape::Literal(k) = clause.shape {
            if k != d {
                continue;
            }
        }
        if let Some(k) = clause.guard {
            out.push(Value::Number((100 + i) as f64));
            if d <= k {
                continue;
            }
        }
        out.push(Value::Number(i as f64));
        if let Shape::Bind = clause.shape {
            out.push(Value::Number(f64::from(d)));
        }
        break;
    }
    out
}

/// `(emit(100 + i), subject > k)`
fn noisy_guard(b: &mut TreeBuilder, i: usize, subject: &str, k: u8) -> ExprId {
    let marker = b.num((100 + i) as f64);
    let noise = b.call("emit", &[marker]);
    let subject = b.ident(subject);
    let bound = b.num(f64::from(k));
    let test = b.binary(BinaryOp::Gt, subject, bound);
    let items = b.arena.alloc_expr_list([noise, test]);
    b.expr(ExprKind::Sequence(items))
}

/// `{ let d = <d>; case (d) { ... } emit("end"); }`
fn build_scalar(b: &mut TreeBuilder, clauses: &[ClauseSpec], d: u8) -> StmtId {
    let value = b.num(f64::from(d));
    let decl = b.let_stmt("d", Some(value));

    let mut built = Vec::with_capacity(clauses.len());
    for (i, clause) in clauses.iter().enumerate() {
        let (pattern, subject) = match clause.shape {
            Shape::Literal(k) => (b.p_num(f64::from(k)), "d"),
            Shape::Bind => (b.p_bind("x"), "x"),
            Shape::Wildcard => (b.p_bind("_"), "d"),
        };
        let guard = clause.guard.map(|k| noisy_guard(b, i, subject, k));
        let index = b.num(i as f64);
        let mut body = vec![b.emit_stmt(index)];
        if let Shape::Bind = clause.shape {
            body.push(b.emit_ident("x"));
        }
        let body = b.block(&body);
        built.push(b.clause(pattern, guard, body));
    }

    let subject = b.ident("d");
    let matched = b.match_stmt(subject, &built);
    let end = b.str("end");
    let end = b.emit_stmt(end);
    b.block(&[decl, matched, end])
}

fn run_scalar(clauses: &[ClauseSpec], d: u8, shape: ChainShape) -> Vec<Value> {
    case_lower::init_tracing();
    let mut b = TreeBuilder::new();
    let root = build_scalar(&mut b, clauses, d);
    let options = LowerOptions::default().with_chain(shape);
    lower_module(&mut b.arena, &b.interner, root, &options).expect("lowering succeeds");
    case_eval::run(&b.arena, &b.interner, root).expect("lowered tree runs")
}

// -- Array patterns --

#[derive(Clone, Debug)]
enum Element {
    Literal(u8),
    Bind,
    Wildcard,
}

#[derive(Clone, Debug)]
struct ArraySpec {
    elements: Vec<Element>,
    rest: bool,
}

fn array_strategy() -> impl Strategy<Value = ArraySpec> {
    let element = prop_oneof![
        (0u8..3).prop_map(Element::Literal),
        Just(Element::Bind),
        Just(Element::Wildcard),
    ];
    (prop::collection::vec(element, 0..4), any::<bool>())
        .prop_map(|(elements, rest)| ArraySpec { elements, rest })
}

/// Bound element values followed by the rest array, or `None` on no match.
fn array_model(spec: &ArraySpec, input: &[u8]) -> Option<Vec<Value>> {
    let n = spec.elements.len();
    if input.len() < n || (!spec.rest && input.len() != n) {
        return None;
    }
    let mut bound = Vec::new();
    for (element, &value) in spec.elements.iter().zip(input) {
        match element {
            Element::Literal(k) if *k != value => return None,
            Element::Literal(_) | Element::Wildcard => {}
            Element::Bind => bound.push(Value::Number(f64::from(value))),
        }
    }
    if spec.rest {
        bound.push(Value::array(
            input[n..].iter().map(|&v| Value::Number(f64::from(v))),
        ));
    }
    Some(bound)
}

/// `case (<input>) { when [..] -> emit([bound..., rest]); when _ -> emit("miss") }`
fn build_array(b: &mut TreeBuilder, spec: &ArraySpec, input: &[u8]) -> StmtId {
    let items: Vec<ExprId> = input.iter().map(|&v| b.num(f64::from(v))).collect();
    let disc = b.array(&items);

    let mut elements: Vec<PatternId> = Vec::new();
    let mut bound: Vec<ExprId> = Vec::new();
    for (i, element) in spec.elements.iter().enumerate() {
        elements.push(match element {
            Element::Literal(k) => b.p_num(f64::from(*k)),
            Element::Wildcard => b.p_bind("_"),
            Element::Bind => {
                let name = format!("e{i}");
                bound.push(b.ident(&name));
                b.p_bind(&name)
            }
        });
    }
    if spec.rest {
        let tail = b.p_bind("tail");
        elements.push(b.p_rest(tail));
        bound.push(b.ident("tail"));
    }
    let pattern = b.p_arr(&elements);
    let payload = b.array(&bound);
    let hit = b.emit_stmt(payload);

    let wild = b.p_bind("_");
    let miss = b.str("miss");
    let miss = b.emit_stmt(miss);

    let clauses = [b.clause(pattern, None, hit), b.clause(wild, None, miss)];
    b.match_stmt(disc, &clauses)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn first_passing_clause_wins(
        clauses in prop::collection::vec(clause_strategy(), 0..6),
        d in 0u8..4,
    ) {
        let mut expected = model(&clauses, d);
        expected.push(Value::str("end"));

        for shape in SHAPES {
            prop_assert_eq!(run_scalar(&clauses, d, shape), expected.clone(), "{:?}", shape);
        }
    }

    #[test]
    fn array_patterns_follow_the_model(
        spec in array_strategy(),
        input in prop::collection::vec(0u8..3, 0..5),
    ) {
        let expected = match array_model(&spec, &input) {
            Some(bound) => Value::array(bound),
            None => Value::str("miss"),
        };

        for shape in SHAPES {
            let mut b = TreeBuilder::new();
            let root = build_array(&mut b, &spec, &input);
            let options = LowerOptions::default().with_chain(shape);
            lower_module(&mut b.arena, &b.interner, root, &options).expect("lowering succeeds");
            let out = case_eval::run(&b.arena, &b.interner, root).expect("lowered tree runs");
            prop_assert_eq!(out, vec![expected.clone()], "{:?}", shape);
        }
    }

    #[test]
    fn lowering_is_deterministic(
        clauses in prop::collection::vec(clause_strategy(), 0..6),
        d in 0u8..4,
    ) {
        for shape in SHAPES {
            let options = LowerOptions::default().with_chain(shape);
            let lowered: Vec<String> = (0..2)
                .map(|_| {
                    let mut b = TreeBuilder::new();
                    let root = build_scalar(&mut b, &clauses, d);
                    lower_module(&mut b.arena, &b.interner, root, &options)
                        .expect("lowering succeeds");
                    format!("{:?}", b.arena)
                })
                .collect();
            prop_assert_eq!(&lowered[0], &lowered[1]);
        }
    }

    #[test]
    fn misplaced_rest_never_rewrites(
        before in 0usize..3,
        after in 1usize..3,
    ) {
        let mut b = TreeBuilder::new();
        let mut elements = Vec::new();
        for i in 0..before {
            elements.push(b.p_bind(&format!("a{i}")));
        }
        let tail = b.p_bind("tail");
        elements.push(b.p_rest(tail));
        for i in 0..after {
            elements.push(b.p_bind(&format!("b{i}")));
        }
        let pattern = b.p_arr(&elements);
        let disc = b.ident("d");
        let body = b.block(&[]);
        let clause = b.clause(pattern, None, body);
        let root = b.match_stmt(disc, &[clause]);
        let snapshot = format!("{:?}", b.arena);

        let error = lower_module(&mut b.arena, &b.interner, root, &LowerOptions::default())
            .expect_err("rest before the end is rejected");
        prop_assert_eq!(
            error.kind,
            LowerErrorKind::OrderConstraint { position: before, len: before + after + 1 }
        );
        prop_assert_eq!(format!("{:?}", b.arena), snapshot);
    }
}
