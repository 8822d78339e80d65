//! Canonical answer arithmetic: gcd/reduction, decimal rounding, fraction
//! operations, and a strict `<number><operator><number>` evaluator.
//!
//! The evaluator is deliberately not an expression parser. Anything that does
//! not match the single-operator pattern is rejected.

use std::sync::OnceLock;

use num_integer::Integer;
use regex::Regex;

use crate::drill_engine::{
    error::EvalError,
    models::{Fraction, Operator},
};

/// Precision applied to non-integer evaluator results.
pub const DISPLAY_PRECISION: u32 = 2;

fn formula_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^([0-9.]+)([+\-*/])([0-9.]+)$").expect("formula pattern is a valid regex")
    })
}

/// Always non-negative; `gcd(a, 0) == |a|` and `gcd(0, 0) == 0`.
pub fn gcd(a: i64, b: i64) -> i64 {
    a.gcd(&b)
}

/// Divide numerator and denominator by `gcd(num, denom)`.
///
/// `0/0` has no divisor to remove and is returned as-is.
pub fn reduce_fraction(num: i64, denom: i64) -> Fraction {
    let g = gcd(num, denom);
    if g == 0 {
        return Fraction::new(num, denom);
    }
    Fraction::new(num / g, denom / g)
}

/// Round to `places` decimal places, halves away from zero.
pub fn round_decimal(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// `n1/d1 <op> n2/d2`, reduced.
pub fn calculate_fraction(n1: i64, d1: i64, op: Operator, n2: i64, d2: i64) -> Result<Fraction, EvalError> {
    let (num, denom) = match op {
        Operator::Add => (n1 * d2 + n2 * d1, d1 * d2),
        Operator::Sub => (n1 * d2 - n2 * d1, d1 * d2),
        Operator::Mul => (n1 * n2, d1 * d2),
        Operator::Div => (n1 * d2, d1 * n2),
    };
    if denom == 0 {
        return Err(EvalError::DivisionByZero);
    }
    Ok(reduce_fraction(num, denom))
}

/// Apply `op` to two numbers; non-integer results are rounded to
/// [`DISPLAY_PRECISION`] places.
pub fn evaluate(a: f64, op: Operator, b: f64) -> Result<f64, EvalError> {
    let result = match op {
        Operator::Add => a + b,
        Operator::Sub => a - b,
        Operator::Mul => a * b,
        Operator::Div => {
            if b == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            a / b
        }
    };
    if result.fract() != 0.0 {
        return Ok(round_decimal(result, DISPLAY_PRECISION));
    }
    Ok(result)
}

/// Evaluate a formula such as `"12+5"` or `"4.2/3"`.
pub fn try_eval(formula: &str) -> Result<f64, EvalError> {
    let invalid = || EvalError::InvalidFormulaShape(formula.to_string());

    let caps = formula_pattern().captures(formula).ok_or_else(invalid)?;
    let a: f64 = caps[1].parse().map_err(|_| invalid())?;
    let op = caps[2].chars().next().and_then(Operator::from_ascii).ok_or_else(invalid)?;
    let b: f64 = caps[3].parse().map_err(|_| invalid())?;

    evaluate(a, op, b)
}

/// [`try_eval`] with every error absorbed into `None`.
pub fn safe_eval(formula: &str) -> Option<f64> {
    try_eval(formula).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_eval_basic_operations() {
        assert_eq!(safe_eval("7+5"), Some(12.0));
        assert_eq!(safe_eval("9-4"), Some(5.0));
        assert_eq!(safe_eval("6*7"), Some(42.0));
        assert_eq!(safe_eval("8/2"), Some(4.0));
    }

    #[test]
    fn safe_eval_rejects_division_by_zero() {
        assert_eq!(safe_eval("8/0"), None);
        assert_eq!(try_eval("8/0"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn safe_eval_rejects_anything_but_one_operator() {
        for bad in ["abc", "", "7+", "+7", "1+2+3", "2**3", "7 + 5", "-3+1", "1.2.3+1", ".+1"] {
            assert_eq!(safe_eval(bad), None, "{bad:?} should be rejected");
        }
        assert!(matches!(try_eval("abc"), Err(EvalError::InvalidFormulaShape(_))));
    }

    #[test]
    fn safe_eval_rounds_non_integer_results() {
        assert_eq!(safe_eval("10/3"), Some(3.33));
        assert_eq!(safe_eval("0.1+0.2"), Some(0.3));
        assert_eq!(safe_eval("4.2/3"), Some(1.4));
        assert_eq!(safe_eval("2.5*4"), Some(10.0));
    }

    #[test]
    fn fraction_sum_is_reduced() {
        assert_eq!(calculate_fraction(1, 2, Operator::Add, 1, 3), Ok(Fraction::new(5, 6)));
        // 2/4 + 1/4 = 12/16 = 3/4
        assert_eq!(calculate_fraction(2, 4, Operator::Add, 1, 4), Ok(Fraction::new(3, 4)));
    }

    #[test]
    fn fraction_operations() {
        assert_eq!(calculate_fraction(3, 4, Operator::Sub, 1, 4), Ok(Fraction::new(1, 2)));
        assert_eq!(calculate_fraction(2, 3, Operator::Mul, 3, 4), Ok(Fraction::new(1, 2)));
        assert_eq!(calculate_fraction(1, 2, Operator::Div, 1, 4), Ok(Fraction::new(2, 1)));
        assert_eq!(calculate_fraction(1, 2, Operator::Div, 0, 4), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn gcd_and_reduction() {
        assert_eq!(gcd(12, 16), 4);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, 7), 7);
        assert_eq!(gcd(-12, 16), 4);
        assert_eq!(gcd(0, 0), 0);
        assert_eq!(reduce_fraction(12, 16), Fraction::new(3, 4));
        assert_eq!(reduce_fraction(-6, 8), Fraction::new(-3, 4));
        assert_eq!(reduce_fraction(0, 5), Fraction::new(0, 1));
        assert_eq!(reduce_fraction(0, 0), Fraction::new(0, 0));
    }

    #[test]
    fn round_decimal_rounds_half_away_from_zero() {
        assert_eq!(round_decimal(2.25, 1), 2.3);
        assert_eq!(round_decimal(-2.5, 0), -3.0);
        assert_eq!(round_decimal(3.14159, 2), 3.14);
    }
}
