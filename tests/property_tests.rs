//! Property tests for the arithmetic identities the puzzles rely on.

use mind_logic::affine::{probe, Chain, Classification, Operation, Operator, EPSILON};
use mind_logic::builder::BuilderValidator;
use mind_logic::core::{EngineConfig, GeneratorConfig, PuzzleRng};
use mind_logic::generator::{DynamicLevel, LevelGenerator};
use mind_logic::puzzles::{Bounds, PuzzleCatalog, PuzzleId, DEFAULT_SYMBOLS};
use mind_logic::search::{BinarySearchController, Query};
use mind_logic::session::{Outcome, Scratch, SessionEngine};
use proptest::prelude::*;

/// Operations whose slope factor stays in [1/2, 2] in magnitude, so the
/// slope of a short chain never drops below the probe's tolerance.
fn arb_operation() -> impl Strategy<Value = Operation> {
    let scale = prop_oneof![-2.0f64..=-0.5, 0.5f64..=2.0];
    prop_oneof![
        (-100.0f64..100.0).prop_map(Operation::add),
        (-100.0f64..100.0).prop_map(Operation::sub),
        scale.clone().prop_map(Operation::mul),
        scale.prop_map(Operation::div),
    ]
}

fn arb_chain() -> impl Strategy<Value = Vec<Operation>> {
    prop::collection::vec(arb_operation(), 0..6)
}

/// Slope and intercept of a chain without subtract-original steps.
fn slope_intercept(ops: &[Operation]) -> (f64, f64) {
    ops.iter().fold((1.0, 0.0), |(m, k), op| match op.operator {
        Operator::Add => (m, k + op.operand),
        Operator::Sub => (m, k - op.operand),
        Operator::Mul => (m * op.operand, k * op.operand),
        Operator::Div => (m / op.operand, k / op.operand),
        Operator::SubtractOriginal => (m - op.operand, k),
    })
}

proptest! {
    #[test]
    fn prop_affine_cancellation(a in 1i64..=30, b in 2i64..=10, x in -10_000i64..10_000) {
        prop_assert_eq!((x + a) * b - b * x, a * b);

        let level = DynamicLevel::new(a, b);
        prop_assert_eq!(level.chain().evaluate(x as f64).unwrap(), level.answer());
    }

    #[test]
    fn prop_digit_sum_is_multiple_of_nine(n in 10u32..=99) {
        let (a, b) = (n / 10, n % 10);
        let landed = n - (a + b);
        prop_assert_eq!(landed % 9, 0);
        prop_assert!(landed <= 81);
    }

    #[test]
    fn prop_symbol_grid_lands_on_target(seed in any::<u64>(), n in 10usize..=99) {
        let grid = LevelGenerator::default().generate_symbol_grid(&DEFAULT_SYMBOLS, &mut PuzzleRng::new(seed)).unwrap();
        let landed = n - (n / 10 + n % 10);
        prop_assert_eq!(grid.symbol_at(landed), Some(grid.target()));
    }

    #[test]
    fn prop_probe_detects_nonzero_slope(ops in arb_chain()) {
        let chain: Chain = ops.iter().copied().collect();
        let (m, _) = slope_intercept(&ops);

        match probe(|x| chain.evaluate(x)).unwrap() {
            Classification::Variant { slope } => prop_assert!((slope - m).abs() < 1e-6 * m.abs().max(1.0)),
            other => prop_assert!(false, "expected variant, got {:?}", other),
        }
    }

    #[test]
    fn prop_probe_detects_zero_slope(ops in arb_chain()) {
        let (m, k) = slope_intercept(&ops);
        let chain: Chain = ops.iter().copied().chain([Operation::subtract_original(m)]).collect();

        match probe(|x| chain.evaluate(x)).unwrap() {
            Classification::Invariant { constant } => prop_assert!((constant - k).abs() < EPSILON),
            other => prop_assert!(false, "expected invariant, got {:?}", other),
        }
    }

    #[test]
    fn prop_binary_search_converges(secret in 1i64..=100) {
        let bounds = Bounds::new(1, 100);
        let mut search = BinarySearchController::new(bounds);
        let found = loop {
            match search.query() {
                Query::Ask { mid } => search.answer(secret > mid),
                Query::Resolved(value) => break value,
            }
        };
        prop_assert_eq!(found, secret);
        prop_assert!(search.rounds() <= BinarySearchController::max_rounds(bounds));
    }

    #[test]
    fn prop_dynamic_session_reveals_product(seed in any::<u64>()) {
        let config = EngineConfig::default()
            .with_seed(seed)
            .with_generator(GeneratorConfig::default().with_a_range(1, 30).with_b_range(2, 10));
        let mut engine = SessionEngine::new(config);
        let dynamic = PuzzleCatalog::builtin().get(PuzzleId::new(5)).unwrap().clone();

        let mut session = engine.start(&dynamic);
        while !session.is_finished() {
            engine.advance(&mut session).unwrap();
        }
        let Scratch::Dynamic { a, b } = session.scratch() else {
            panic!("dynamic session without coefficients");
        };
        let product = (a * b) as f64;
        prop_assert_eq!(session.outcome(), Some(&Outcome::Number(product)));
    }

    #[test]
    fn prop_builder_round_trip(ops in arb_chain(), secret in -1000.0f64..1000.0) {
        let (m, _) = slope_intercept(&ops);
        let mut builder = BuilderValidator::new();
        let closing = Operation::subtract_original(m);
        for op in ops.iter().chain(std::iter::once(&closing)) {
            builder.append_operation(op.operator, op.operand).unwrap();
        }

        let constant = builder.current_status().constant().unwrap();
        prop_assert!((builder.chain().evaluate(secret).unwrap() - constant).abs() < EPSILON);

        let puzzle = builder.promote().unwrap();
        let mut engine = SessionEngine::new(EngineConfig::default());
        let mut session = engine.start(&puzzle);
        while !session.is_finished() {
            engine.advance(&mut session).unwrap();
        }
        prop_assert_eq!(session.outcome(), Some(&Outcome::Number(constant)));
    }
}
