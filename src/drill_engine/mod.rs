//! Core drill engine: problem generation, answer arithmetic, level profiles,
//! and the reveal/progress state machine.
//!
//! ## Module overview
//!
//! | Module      | Purpose |
//! |-------------|---------|
//! | `models`    | Shared types: operators, fractions, specs, profiles, problems |
//! | `error`     | `EvalError` and `ConfigError` |
//! | `sampling`  | Fisher-Yates shuffle and shuffle-then-truncate sampling |
//! | `evaluator` | gcd, fraction reduction, decimal rounding, strict formula evaluator |
//! | `helpers`   | ASCII and full-width formula text |
//! | `families`  | Integer, decimal and fraction generators |
//! | `levels`    | Built-in grade profiles and the `LevelTable` lookup |
//! | `config`    | TOML level tables, `DRILL_LEVELS_PATH` loading |
//! | `generator` | `generate_problem_set()` / `generate_drill()` assembler |
//! | `session`   | Countdown, `DrillState` transitions, `DrillSession` controller |

pub mod config;
pub mod error;
pub mod evaluator;
pub mod families;
pub mod generator;
pub mod helpers;
pub mod levels;
pub mod models;
pub mod sampling;
pub mod session;

#[cfg(test)]
mod proptests;

// Re-export the public API surface so callers can use
// `drill_engine::generate_problem_set` without reaching into sub-modules.
pub use config::load_level_table_from_env;
pub use error::{ConfigError, EvalError};
pub use evaluator::{calculate_fraction, reduce_fraction, safe_eval, try_eval};
pub use generator::{generate_drill, generate_problem_set};
pub use levels::{LevelTable, DEFAULT_LEVEL};
pub use models::{
    Answer, DecimalMulSpec, DecimalSpec, DifficultyProfile, DrillRequest, Formula, Fraction,
    FractionSpec, IntegerSpec, OperationKind, OperationSpec, Operations, Operator, Problem,
    ProblemKind, ProblemSet, MAX_DECIMAL_PLACES,
};
pub use sampling::shuffle;
pub use session::{transition, Countdown, DrillEvent, DrillPhase, DrillSession, DrillState, Outcome};
