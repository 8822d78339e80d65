use rand::{rngs::StdRng, SeedableRng};
use rand::{Rng, RngCore};
use tracing::info;

use crate::drill_engine::{
    families,
    levels::LevelTable,
    models::{DifficultyProfile, DrillRequest, ProblemSet},
    sampling::shuffle,
};

/// Generate a problem-set ID such as `"PS-1A2B3C4D"`.
fn make_set_id(rng: &mut impl RngCore) -> String {
    format!("PS-{:08X}", rng.next_u32())
}

/// Seeded RNG for `Some(seed)`, entropy otherwise.
pub fn make_rng(rng_seed: Option<u64>) -> StdRng {
    match rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None       => StdRng::from_entropy(),
    }
}

/// Assemble one drill: sample every enabled operation, shuffle the union,
/// and keep at most `question_count` problems.
pub fn generate_problem_set<R: Rng>(profile: &DifficultyProfile, rng: &mut R) -> ProblemSet {
    let set_id = make_set_id(rng);

    let mut problems = Vec::with_capacity(profile.operations.total_amount());
    for (kind, spec) in profile.operations.enabled() {
        problems.extend(families::generate(rng, kind, spec));
    }

    shuffle(&mut problems, rng);
    problems.truncate(profile.question_count);

    info!(
        target: "arith_drill_gen",
        %set_id,
        profile = %profile.name,
        problems = problems.len(),
        "problem set generated"
    );

    ProblemSet {
        set_id,
        profile_name: profile.name.clone(),
        time_budget_seconds: profile.time_budget_seconds,
        problems,
    }
}

/// Resolve the requested level (unknown → default) and generate its drill.
pub fn generate_drill(request: DrillRequest, table: &LevelTable) -> ProblemSet {
    let mut rng = make_rng(request.rng_seed);
    generate_problem_set(table.resolve(request.level), &mut rng)
}
