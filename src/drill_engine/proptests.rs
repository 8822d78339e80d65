//! Property-based tests for sampling, fraction arithmetic and the evaluator.

use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::drill_engine::{
    evaluator::{calculate_fraction, gcd, reduce_fraction, round_decimal, safe_eval},
    families::{decimal, integer},
    models::{Answer, DecimalSpec, Formula, IntegerSpec, OperationKind, Operator},
    sampling::shuffle,
};

fn operator() -> impl Strategy<Value = Operator> {
    prop_oneof![
        Just(Operator::Add),
        Just(Operator::Sub),
        Just(Operator::Mul),
        Just(Operator::Div),
    ]
}

proptest! {
    #[test]
    fn shuffle_is_a_permutation(items in prop::collection::vec(any::<u16>(), 0..64), seed in any::<u64>()) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut shuffled = items.clone();
        shuffle(&mut shuffled, &mut rng);
        prop_assert_eq!(shuffled.len(), items.len());

        let mut a = items.clone();
        let mut b = shuffled;
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn gcd_divides_both(a in 0i64..10_000, b in 1i64..10_000) {
        let g = gcd(a, b);
        prop_assert!(g > 0);
        prop_assert_eq!(a % g, 0);
        prop_assert_eq!(b % g, 0);
    }

    #[test]
    fn reduction_is_idempotent_and_coprime(num in -5_000i64..5_000, denom in 1i64..5_000) {
        let once = reduce_fraction(num, denom);
        let twice = reduce_fraction(once.numerator, once.denominator);
        prop_assert_eq!(once, twice);
        prop_assert_eq!(gcd(once.numerator.abs(), once.denominator.abs()), 1);
        // Same rational value.
        prop_assert_eq!(once.numerator * denom, num * once.denominator);
    }

    #[test]
    fn fraction_results_match_cross_multiplication(
        n1 in 1i64..12, d1 in 2i64..12, n2 in 1i64..12, d2 in 2i64..12, op in operator()
    ) {
        let r = calculate_fraction(n1, d1, op, n2, d2).expect("non-zero operands");
        // r == n1/d1 op n2/d2  <=>  r.num * (d1 * d2 [* n2 for div]) == r.den * raw numerator
        let (raw_num, raw_den) = match op {
            Operator::Add => (n1 * d2 + n2 * d1, d1 * d2),
            Operator::Sub => (n1 * d2 - n2 * d1, d1 * d2),
            Operator::Mul => (n1 * n2, d1 * d2),
            Operator::Div => (n1 * d2, d1 * n2),
        };
        prop_assert_eq!(r.numerator * raw_den, raw_num * r.denominator);
    }

    #[test]
    fn evaluator_agrees_with_integer_answers(
        min in 0i64..20, span in 0i64..15, amount in 0usize..30, seed in any::<u64>(), op in operator()
    ) {
        let kind = match op {
            Operator::Add => OperationKind::Sum,
            Operator::Sub => OperationKind::Sub,
            Operator::Mul => OperationKind::Mul,
            Operator::Div => OperationKind::Div,
        };
        let mut rng = StdRng::seed_from_u64(seed);
        let spec = IntegerSpec { min, max: min + span, amount };
        let problems = integer::generate(&mut rng, kind, spec);
        prop_assert!(problems.len() <= amount);
        for p in problems {
            let Answer::Integer(expected) = p.answer else {
                return Err(TestCaseError::fail("integer problem without integer answer"));
            };
            prop_assert_eq!(safe_eval(&p.formula_ascii()), Some(expected as f64));
            if let Formula::Integer { a, b, .. } = p.formula {
                match op {
                    Operator::Sub => prop_assert!(a > b),
                    Operator::Div => prop_assert!(b != 0 && a % b == 0 && a != b),
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn decimal_division_round_trips(seed in any::<u64>(), places in 1u32..=3, amount in 1usize..12) {
        let step = 10f64.powi(-(places as i32));
        let spec = DecimalSpec { decimal_places: places, min: step, max: 10.0 - step, amount };
        let mut rng = StdRng::seed_from_u64(seed);
        for p in decimal::generate_div(&mut rng, spec) {
            let (Formula::Decimal { a, b, .. }, Answer::Decimal(q)) = (p.formula, p.answer) else {
                return Err(TestCaseError::fail("decimal division with unexpected shape"));
            };
            prop_assert_eq!(round_decimal(a / b, places), q);
        }
    }
}
