//! Text rendering shared by the demo, the view adapter and tests.
//!
//! Problems carry numbers, not strings. These helpers produce the two textual
//! forms a problem has: the ASCII formula understood by
//! [`try_eval`](crate::drill_engine::evaluator::try_eval) (`"12+5"`) and the
//! display formula with full-width operator glyphs (`"12＋5"`).

use crate::drill_engine::models::{Formula, Fraction, Operator, Problem};

/// Full-width equals sign placed between a formula and its answer.
pub const EQUALS_GLYPH: char = '＝';

/// Shortest decimal text for `x`: `3.0` → `"3"`, `0.30` → `"0.3"`.
pub fn number_str(x: f64) -> String {
    // Display for f64 already omits trailing zeros and the point for whole values.
    format!("{}", x)
}

/// Replace ASCII operators with their full-width glyphs.
pub fn replace_operators(formula: &str) -> String {
    formula
        .chars()
        .map(|c| Operator::from_ascii(c).map_or(c, Operator::glyph))
        .collect()
}

fn operand_strs(formula: &Formula) -> (String, String) {
    match *formula {
        Formula::Integer { a, b, .. } => (a.to_string(), b.to_string()),
        Formula::Decimal { a, b, .. } => (number_str(a), number_str(b)),
        Formula::Fraction { a, b, .. } => (a.to_string(), b.to_string()),
    }
}

/// Stacked form of a fraction operand or answer: `(numerator, denominator)`,
/// or `None` when it renders as a plain integer.
pub fn stacked(f: Fraction) -> Option<(i64, i64)> {
    (!f.is_whole()).then_some((f.numerator, f.denominator))
}

impl Problem {
    /// ASCII formula, e.g. `"12+5"`, `"4.2/3"`, `"1/2+1/3"`.
    pub fn formula_ascii(&self) -> String {
        let (a, b) = operand_strs(&self.formula);
        format!("{}{}{}", a, self.formula.operator().ascii(), b)
    }

    /// Formula with full-width operator, e.g. `"12＋5"`, `"1/2×1/3"`.
    pub fn display_formula(&self) -> String {
        let (a, b) = operand_strs(&self.formula);
        format!("{}{}{}", a, self.formula.operator().glyph(), b)
    }

    /// `"12＋5＝17"`.
    pub fn display_with_answer(&self) -> String {
        format!("{}{}{}", self.display_formula(), EQUALS_GLYPH, self.answer)
    }
}
