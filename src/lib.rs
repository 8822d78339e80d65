//! # arith_drill_gen
//!
//! A fully offline, deterministic arithmetic drill generator.
//!
//! This library builds timed arithmetic drills for grade-school levels:
//! integer, decimal and fraction problems are generated per level, shuffled,
//! and paired with precomputed canonical answers. A small state machine drives
//! the drill (start, reveal answers one by one, time out, retry).
//!
//! ## How it works
//!
//! 1. Pick a [`DifficultyProfile`] from a [`LevelTable`] (built-in grades 3-6,
//!    or a TOML file). Unknown levels fall back to the default level.
//! 2. Call [`generate_problem_set`] (or [`generate_drill`] with a
//!    [`DrillRequest`]): every enabled operation samples its candidate pool,
//!    the union is shuffled and truncated to the level's question count.
//! 3. Feed the [`ProblemSet`] to a [`DrillState`] and drive it with
//!    [`DrillEvent`]s, or let a [`DrillSession`] do it for you.
//! 4. [`to_drill_view`] turns the state into JSON for any UI.
//!
//! ## Key features
//!
//! - **Deterministic**: pass `rng_seed: Some(u64)` to reproduce the exact same
//!   drill every time.
//! - **Exact answers**: fractions are reduced by gcd; decimal division is
//!   built from its quotient so the answer always terminates.
//! - **No general evaluator**: [`safe_eval`] accepts only
//!   `<number><operator><number>`.
//!
//! ## Quick start
//!
//! ```rust
//! use arith_drill_gen::{generate_drill, DrillRequest, DrillSession, LevelTable};
//!
//! let table = LevelTable::builtin();
//! let set = generate_drill(DrillRequest::new(5).with_seed(42), &table);
//! for p in set.iter().take(3) {
//!     println!("{} = {}", p.display_formula(), p.answer);
//! }
//!
//! let mut session = DrillSession::new(table, 4, Some(7));
//! session.advance(); // start
//! session.advance(); // reveal first answer
//! assert_eq!(session.state().cursor(), 1);
//! ```

pub mod drill_engine;
pub mod view_adapter;

// Convenience re-exports so callers can use `arith_drill_gen::generate_drill`
// directly without reaching into `drill_engine::`.
pub use drill_engine::{
    calculate_fraction, generate_drill, generate_problem_set, load_level_table_from_env,
    reduce_fraction, safe_eval, shuffle, transition, try_eval, Answer, ConfigError, Countdown,
    DifficultyProfile, DrillEvent, DrillPhase, DrillRequest, DrillSession, DrillState, EvalError,
    Formula, Fraction, LevelTable, OperationKind, Operations, Operator, Outcome, Problem,
    ProblemKind, ProblemSet, DEFAULT_LEVEL,
};
pub use view_adapter::to_drill_view;
