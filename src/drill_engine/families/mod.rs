//! Problem generators grouped by number family.
//!
//! Every family turns one enabled operation spec into a shuffled, truncated
//! list of [`Problem`]s with precomputed answers. The assembler in
//! `generator.rs` dispatches here via [`generate`].

/// sum, sub, mul, div over an integer range (enumerated)
pub mod integer;
/// decimal sum, sub, mul, div (sampled)
pub mod decimal;
/// same-denominator sum/sub, independent-denominator mul/div (enumerated)
pub mod fraction;

use rand::Rng;
use tracing::{debug, warn};

use crate::drill_engine::models::{OperationKind, OperationSpec, Problem};

/// Generate the problems for one enabled operation.
///
/// A spec that fails [`OperationSpec::invalid_reason`] contributes nothing.
pub fn generate<R: Rng>(rng: &mut R, kind: OperationKind, spec: OperationSpec) -> Vec<Problem> {
    if let Some(reason) = spec.invalid_reason() {
        warn!(target: "arith_drill_gen", %kind, %reason, "invalid operation spec; skipped");
        return Vec::new();
    }
    let problems = match (kind, spec) {
        (OperationKind::Sum | OperationKind::Sub | OperationKind::Mul | OperationKind::Div,
         OperationSpec::Integer(s)) => integer::generate(rng, kind, s),

        (OperationKind::DecimalSum, OperationSpec::Decimal(s)) => decimal::generate_sum(rng, s),
        (OperationKind::DecimalSub, OperationSpec::Decimal(s)) => decimal::generate_sub(rng, s),
        (OperationKind::DecimalMul, OperationSpec::DecimalMul(s)) => decimal::generate_mul(rng, s),
        (OperationKind::DecimalDiv, OperationSpec::Decimal(s)) => decimal::generate_div(rng, s),

        (OperationKind::FractionSum
         | OperationKind::FractionSub
         | OperationKind::FractionMul
         | OperationKind::FractionDiv,
         OperationSpec::Fraction(s)) => fraction::generate(rng, kind, s),

        (kind, spec) => {
            debug!(target: "arith_drill_gen", %kind, ?spec, "spec does not match operation kind; skipped");
            Vec::new()
        }
    };

    debug!(
        target: "arith_drill_gen",
        %kind,
        requested = spec.amount(),
        generated = problems.len(),
        "operation pool sampled"
    );
    problems
}
