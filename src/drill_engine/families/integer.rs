use rand::Rng;

use crate::drill_engine::{
    models::{Answer, Formula, IntegerSpec, OperationKind, Operator, Problem},
    sampling::take_random,
};

/// Validity filter applied to each `(a, b)` operand pair.
fn accepts(op: Operator, a: i64, b: i64) -> bool {
    match op {
        Operator::Add | Operator::Mul => true,
        // Strictly positive difference.
        Operator::Sub => a > b,
        // Whole quotient, never 1.
        Operator::Div => b != 0 && a % b == 0 && a != b,
    }
}

/// Every operand pair in `[min, max] x [min, max]` valid for `op`.
pub fn candidates(op: Operator, min: i64, max: i64) -> Vec<(i64, i64)> {
    (min..=max)
        .flat_map(|a| (min..=max).map(move |b| (a, b)))
        .filter(|&(a, b)| accepts(op, a, b))
        .collect()
}

fn answer(op: Operator, a: i64, b: i64) -> i64 {
    match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => a / b,
    }
}

pub fn generate<R: Rng>(rng: &mut R, kind: OperationKind, spec: IntegerSpec) -> Vec<Problem> {
    let op = kind.operator();
    let pool = candidates(op, spec.min, spec.max);

    take_random(pool, spec.amount, rng)
        .into_iter()
        .map(|(a, b)| Problem {
            operation: kind,
            formula: Formula::Integer { a, op, b },
            answer: Answer::Integer(answer(op, a, b)),
        })
        .collect()
}
