//! Decimal problems are sampled rather than enumerated: each generator draws
//! an oversized batch of random candidates, then shuffles and truncates.
//!
//! Division is built backwards from its answer (divisor x quotient), so every
//! quotient is a terminating decimal with the requested precision.

use rand::Rng;
use tracing::debug;

use crate::drill_engine::{
    evaluator::{round_decimal, DISPLAY_PRECISION},
    models::{
        Answer, DecimalMulSpec, DecimalSpec, Formula, OperationKind, OperationSpec, Operator, Problem,
    },
    sampling::{take_random, RngF64Ext},
};

/// Candidates drawn per requested problem for sum, difference and product.
pub const OVERSAMPLE: usize = 3;
/// Division rejects some draws, so it oversamples harder.
pub const DIV_OVERSAMPLE: usize = 5;
/// Divisors for decimal division are drawn from this range.
pub const DIVISOR_RANGE: std::ops::RangeInclusive<i64> = 2..=9;

/// Specs that fail validation produce an empty pool instead of panicking
/// in `gen_range` or overflowing the rounding scale.
fn unusable(kind: OperationKind, spec: OperationSpec) -> bool {
    match spec.invalid_reason() {
        Some(reason) => {
            debug!(target: "arith_drill_gen", %kind, %reason, "decimal spec unusable; no problems");
            true
        }
        None => false,
    }
}

fn operand<R: Rng>(rng: &mut R, min: f64, max: f64, places: u32) -> f64 {
    round_decimal(rng.gen_span(min, max), places)
}

fn problem(kind: OperationKind, a: f64, b: f64, places: u32, answer: f64) -> Problem {
    Problem {
        operation: kind,
        formula: Formula::Decimal { a, op: kind.operator(), b, places },
        answer: Answer::Decimal(answer),
    }
}

/// Forward answer for sum, difference and product, rounded to the operand
/// precision (never coarser than the display precision).
fn forward_answer(op: Operator, a: f64, b: f64, places: u32) -> f64 {
    let raw = match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => a / b,
    };
    round_decimal(raw, places.max(DISPLAY_PRECISION))
}

pub fn generate_sum<R: Rng>(rng: &mut R, spec: DecimalSpec) -> Vec<Problem> {
    if unusable(OperationKind::DecimalSum, OperationSpec::Decimal(spec)) {
        return Vec::new();
    }
    let places = spec.decimal_places;
    let pool: Vec<Problem> = (0..spec.amount * OVERSAMPLE)
        .map(|_| {
            let a = operand(rng, spec.min, spec.max, places);
            let b = operand(rng, spec.min, spec.max, places);
            problem(OperationKind::DecimalSum, a, b, places, forward_answer(Operator::Add, a, b, places))
        })
        .collect();
    take_random(pool, spec.amount, rng)
}

pub fn generate_sub<R: Rng>(rng: &mut R, spec: DecimalSpec) -> Vec<Problem> {
    if unusable(OperationKind::DecimalSub, OperationSpec::Decimal(spec)) {
        return Vec::new();
    }
    let places = spec.decimal_places;
    let pool: Vec<Problem> = (0..spec.amount * OVERSAMPLE)
        .map(|_| {
            let mut a = operand(rng, spec.min, spec.max, places);
            let mut b = operand(rng, spec.min, spec.max, places);
            if a < b {
                std::mem::swap(&mut a, &mut b);
            }
            problem(OperationKind::DecimalSub, a, b, places, forward_answer(Operator::Sub, a, b, places))
        })
        .collect();
    take_random(pool, spec.amount, rng)
}

pub fn generate_mul<R: Rng>(rng: &mut R, spec: DecimalMulSpec) -> Vec<Problem> {
    if unusable(OperationKind::DecimalMul, OperationSpec::DecimalMul(spec)) {
        return Vec::new();
    }
    let places = spec.decimal_places;
    let pool: Vec<Problem> = (0..spec.amount * OVERSAMPLE)
        .map(|_| {
            let a = operand(rng, spec.min, spec.max, places);
            let factor = rng.gen_range(spec.int_factor_min..=spec.int_factor_max) as f64;
            problem(OperationKind::DecimalMul, a, factor, places, forward_answer(Operator::Mul, a, factor, places))
        })
        .collect();
    take_random(pool, spec.amount, rng)
}

pub fn generate_div<R: Rng>(rng: &mut R, spec: DecimalSpec) -> Vec<Problem> {
    if unusable(OperationKind::DecimalDiv, OperationSpec::Decimal(spec)) {
        return Vec::new();
    }
    let places = spec.decimal_places;
    let ceiling = spec.max * 10.0;
    let mut pool = Vec::with_capacity(spec.amount * DIV_OVERSAMPLE);

    for _ in 0..spec.amount * DIV_OVERSAMPLE {
        let divisor = rng.gen_range(DIVISOR_RANGE) as f64;
        let quotient = operand(rng, spec.min, spec.max, places);
        let dividend = round_decimal(divisor * quotient, places + 1);

        if dividend > ceiling {
            continue;
        }
        // The drawn quotient is the answer; it is never recomputed by division.
        pool.push(problem(OperationKind::DecimalDiv, dividend, divisor, places, quotient));
    }
    take_random(pool, spec.amount, rng)
}
