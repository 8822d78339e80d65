use rand::Rng;

use crate::drill_engine::{
    evaluator::calculate_fraction,
    models::{Answer, Formula, FractionSpec, OperationKind, Operator, Problem, Fraction},
    sampling::take_random,
};

/// Same-denominator pairs `n1/d + n2/d` with proper numerators.
fn same_denominator_sums(max_denominator: i64) -> Vec<(Fraction, Fraction)> {
    let mut pool = Vec::new();
    for d in 2..=max_denominator {
        for n1 in 1..d {
            for n2 in 1..d {
                // Always holds for proper fractions; bounds the sum below 2.
                if n1 + n2 < d * 2 {
                    pool.push((Fraction::new(n1, d), Fraction::new(n2, d)));
                }
            }
        }
    }
    pool
}

/// Same-denominator pairs `n1/d - n2/d` with `n1 > n2`.
fn same_denominator_differences(max_denominator: i64) -> Vec<(Fraction, Fraction)> {
    let mut pool = Vec::new();
    for d in 2..=max_denominator {
        for n1 in 2..d {
            for n2 in 1..n1 {
                pool.push((Fraction::new(n1, d), Fraction::new(n2, d)));
            }
        }
    }
    pool
}

/// Every pair of proper fractions with denominators in `[2, max_denominator]`.
fn proper_fraction_pairs(max_denominator: i64) -> Vec<(Fraction, Fraction)> {
    let proper: Vec<Fraction> = (2..=max_denominator)
        .flat_map(|d| (1..d).map(move |n| Fraction::new(n, d)))
        .collect();
    proper
        .iter()
        .flat_map(|&a| proper.iter().map(move |&b| (a, b)))
        .collect()
}

/// Full candidate pool for one fraction operator.
pub fn candidates(op: Operator, max_denominator: i64) -> Vec<(Fraction, Fraction)> {
    match op {
        Operator::Add => same_denominator_sums(max_denominator),
        Operator::Sub => same_denominator_differences(max_denominator),
        Operator::Mul | Operator::Div => proper_fraction_pairs(max_denominator),
    }
}

pub fn generate<R: Rng>(rng: &mut R, kind: OperationKind, spec: FractionSpec) -> Vec<Problem> {
    let op = kind.operator();
    let pool = candidates(op, spec.max_denominator);

    take_random(pool, spec.amount, rng)
        .into_iter()
        .filter_map(|(a, b)| {
            // Generated denominators and numerators are never zero.
            let answer = calculate_fraction(a.numerator, a.denominator, op, b.numerator, b.denominator).ok()?;
            Some(Problem {
                operation: kind,
                formula: Formula::Fraction { a, op, b },
                answer: Answer::Fraction(answer),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::evaluator::gcd;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn pool_sizes_match_the_enumeration() {
        // d = 2..=4 → (1 + 4 + 9) same-denominator sums
        assert_eq!(candidates(Operator::Add, 4).len(), 14);
        // d = 3 → 1 pair, d = 4 → 3 pairs
        assert_eq!(candidates(Operator::Sub, 4).len(), 4);
        // 1 + 2 + 3 proper fractions, squared
        assert_eq!(candidates(Operator::Mul, 4).len(), 36);
        assert_eq!(candidates(Operator::Div, 4).len(), 36);
    }

    #[test]
    fn differences_share_a_denominator_and_stay_positive() {
        for (a, b) in candidates(Operator::Sub, 8) {
            assert_eq!(a.denominator, b.denominator);
            assert!(a.numerator > b.numerator);
        }
    }

    #[test]
    fn operands_are_proper_fractions() {
        for op in [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div] {
            for (a, b) in candidates(op, 6) {
                for f in [a, b] {
                    assert!(f.denominator >= 2 && f.numerator >= 1 && f.numerator < f.denominator);
                }
            }
        }
    }

    #[test]
    fn answers_are_reduced() {
        let mut rng = StdRng::seed_from_u64(21);
        for kind in [
            OperationKind::FractionSum, OperationKind::FractionSub,
            OperationKind::FractionMul, OperationKind::FractionDiv,
        ] {
            let problems = generate(&mut rng, kind, FractionSpec { max_denominator: 8, amount: 10 });
            assert_eq!(problems.len(), 10);
            for p in problems {
                match p.answer {
                    Answer::Fraction(f) => {
                        assert!(f.denominator > 0);
                        assert_eq!(gcd(f.numerator.abs(), f.denominator), 1, "{f} not reduced");
                    }
                    other => panic!("unexpected answer {other:?}"),
                }
            }
        }
    }

    #[test]
    fn tiny_denominator_underfills() {
        let mut rng = StdRng::seed_from_u64(2);
        // With halves only, 1/2 + 1/2 is the single sum and no difference exists.
        let sums = generate(&mut rng, OperationKind::FractionSum, FractionSpec { max_denominator: 2, amount: 5 });
        assert_eq!(sums.len(), 1);
        assert_eq!(sums[0].answer, Answer::Fraction(Fraction::new(1, 1)));
        let subs = generate(&mut rng, OperationKind::FractionSub, FractionSpec { max_denominator: 2, amount: 5 });
        assert!(subs.is_empty());
    }
}
