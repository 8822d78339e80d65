//! Grade-level profiles and the immutable table they are looked up in.
//!
//! | Level | Questions | Timer | Families |
//! |-------|-----------|-------|----------|
//! | 3 | 100 | 120 s | integers |
//! | 4 | 80  | 120 s | integers, decimal sum/sub (1 place) |
//! | 5 | 60  | 120 s | integers, decimal mul/div (1 place), fraction sum/sub |
//! | 6 | 50  | 120 s | integers, decimal mul/div (2 places), fraction mul/div |

use std::collections::BTreeMap;

use tracing::warn;

use crate::drill_engine::{
    error::ConfigError,
    models::{
        DecimalMulSpec, DecimalSpec, DifficultyProfile, FractionSpec, IntegerSpec, Operations,
    },
};

/// Level used when a requested key is unknown.
pub const DEFAULT_LEVEL: u32 = 3;

fn int(min: i64, max: i64, amount: usize) -> Option<IntegerSpec> {
    Some(IntegerSpec { min, max, amount })
}

fn dec(decimal_places: u32, min: f64, max: f64, amount: usize) -> Option<DecimalSpec> {
    Some(DecimalSpec { decimal_places, min, max, amount })
}

fn frac(max_denominator: i64, amount: usize) -> Option<FractionSpec> {
    Some(FractionSpec { max_denominator, amount })
}

fn grade_3() -> DifficultyProfile {
    DifficultyProfile {
        name: "Grade 3".to_string(),
        question_count: 100,
        time_budget_seconds: 120,
        operations: Operations {
            sum: int(1, 30, 34),
            sub: int(1, 30, 34),
            mul: int(2, 9, 22),
            div: int(2, 81, 10),
            ..Operations::default()
        },
    }
}

fn grade_4() -> DifficultyProfile {
    DifficultyProfile {
        name: "Grade 4".to_string(),
        question_count: 80,
        time_budget_seconds: 120,
        operations: Operations {
            sum: int(10, 200, 20),
            sub: int(10, 200, 20),
            mul: int(2, 12, 15),
            div: int(2, 100, 10),
            decimal_sum: dec(1, 0.1, 9.9, 8),
            decimal_sub: dec(1, 0.1, 9.9, 7),
            ..Operations::default()
        },
    }
}

fn grade_5() -> DifficultyProfile {
    DifficultyProfile {
        name: "Grade 5".to_string(),
        question_count: 60,
        time_budget_seconds: 120,
        operations: Operations {
            sum: int(10, 100, 10),
            sub: int(10, 100, 10),
            mul: int(2, 12, 8),
            div: int(2, 100, 8),
            decimal_mul: Some(DecimalMulSpec {
                decimal_places: 1, min: 0.1, max: 9.9,
                int_factor_min: 2, int_factor_max: 9, amount: 8,
            }),
            decimal_div: dec(1, 0.1, 9.9, 6),
            fraction_sum: frac(8, 5),
            fraction_sub: frac(8, 5),
            ..Operations::default()
        },
    }
}

fn grade_6() -> DifficultyProfile {
    DifficultyProfile {
        name: "Grade 6".to_string(),
        question_count: 50,
        time_budget_seconds: 120,
        operations: Operations {
            sum: int(10, 100, 6),
            sub: int(10, 100, 6),
            mul: int(2, 12, 6),
            div: int(2, 100, 6),
            decimal_mul: Some(DecimalMulSpec {
                decimal_places: 2, min: 0.01, max: 9.99,
                int_factor_min: 2, int_factor_max: 9, amount: 6,
            }),
            decimal_div: dec(2, 0.01, 9.99, 5),
            fraction_mul: frac(6, 8),
            fraction_div: frac(6, 7),
            ..Operations::default()
        },
    }
}

impl DifficultyProfile {
    /// Check the per-operation invariants; `level` only labels the error.
    pub fn validate(&self, level: u32) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidProfile { level, reason };

        if self.question_count == 0 {
            return Err(invalid("question_count must be at least 1".into()));
        }
        for (kind, spec) in self.operations.enabled() {
            if let Some(reason) = spec.invalid_reason() {
                return Err(invalid(format!("{kind}: {reason}")));
            }
        }
        Ok(())
    }
}

/// Immutable mapping from level key to profile, with a guaranteed default.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelTable {
    default_level: u32,
    levels: BTreeMap<u32, DifficultyProfile>,
}

impl LevelTable {
    /// Validate every profile and the presence of `default_level`.
    pub fn new(default_level: u32, levels: BTreeMap<u32, DifficultyProfile>) -> Result<Self, ConfigError> {
        for (&level, profile) in &levels {
            profile.validate(level)?;
        }
        if !levels.contains_key(&default_level) {
            return Err(ConfigError::MissingDefaultLevel(default_level));
        }
        Ok(LevelTable { default_level, levels })
    }

    /// The four grade levels (3-6) of the classic drill page.
    pub fn builtin() -> Self {
        let levels = BTreeMap::from([
            (3, grade_3()),
            (4, grade_4()),
            (5, grade_5()),
            (6, grade_6()),
        ]);
        LevelTable { default_level: DEFAULT_LEVEL, levels }
    }

    pub fn default_level(&self) -> u32 {
        self.default_level
    }

    pub fn contains(&self, level: u32) -> bool {
        self.levels.contains_key(&level)
    }

    pub fn get(&self, level: u32) -> Option<&DifficultyProfile> {
        self.levels.get(&level)
    }

    /// Level keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = u32> + '_ {
        self.levels.keys().copied()
    }

    /// `level` if known, otherwise the default level.
    pub fn resolve_key(&self, level: u32) -> u32 {
        if self.contains(level) {
            level
        } else {
            warn!(target: "arith_drill_gen", level, fallback = self.default_level, "unknown level; using default");
            self.default_level
        }
    }

    /// Profile for `level`, falling back to the default profile.
    pub fn resolve(&self, level: u32) -> &DifficultyProfile {
        // The default level is present by construction.
        &self.levels[&self.resolve_key(level)]
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        LevelTable::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::models::MAX_DECIMAL_PLACES;

    #[test]
    fn builtin_levels_are_valid() {
        let table = LevelTable::builtin();
        assert_eq!(table.keys().collect::<Vec<_>>(), vec![3, 4, 5, 6]);
        for level in table.keys() {
            let profile = table.get(level).expect("level present");
            profile.validate(level).expect("builtin profile valid");
        }
    }

    #[test]
    fn unknown_level_falls_back_to_default() {
        let table = LevelTable::builtin();
        let fallback = table.resolve(99);
        let default = table.resolve(DEFAULT_LEVEL);
        assert_eq!(fallback.question_count, default.question_count);
        assert_eq!(fallback.time_budget_seconds, default.time_budget_seconds);
        assert_eq!(fallback.question_count, 100);
        assert_eq!(fallback.time_budget_seconds, 120);
        assert_eq!(table.resolve_key(99), 3);
        assert_eq!(table.resolve_key(5), 5);
    }

    #[test]
    fn builtin_question_counts() {
        let table = LevelTable::builtin();
        let counts: Vec<usize> = table.keys().map(|k| table.resolve(k).question_count).collect();
        assert_eq!(counts, vec![100, 80, 60, 50]);
    }

    #[test]
    fn validation_rejects_bad_specs() {
        let mut profile = grade_3();
        profile.operations.sum = int(10, 1, 5);
        assert!(matches!(profile.validate(3), Err(ConfigError::InvalidProfile { level: 3, .. })));

        let mut profile = grade_5();
        profile.operations.fraction_sum = frac(1, 5);
        assert!(profile.validate(5).is_err());

        let mut profile = grade_4();
        profile.operations.decimal_sum = dec(0, 0.1, 9.9, 5);
        assert!(profile.validate(4).is_err());

        let mut profile = grade_4();
        profile.operations.decimal_sub = dec(400, 0.1, 9.9, 5);
        assert!(matches!(profile.validate(4), Err(ConfigError::InvalidProfile { level: 4, .. })));

        let mut profile = grade_5();
        if let Some(mul) = profile.operations.decimal_mul.as_mut() {
            mul.int_factor_min = 9;
            mul.int_factor_max = 2;
        }
        assert!(profile.validate(5).is_err());

        let mut profile = grade_3();
        profile.question_count = 0;
        assert!(profile.validate(3).is_err());
    }

    #[test]
    fn decimal_places_cap_is_inclusive() {
        let mut profile = grade_4();
        profile.operations.decimal_sum = dec(MAX_DECIMAL_PLACES, 0.1, 9.9, 5);
        assert!(profile.validate(4).is_ok());
        profile.operations.decimal_sum = dec(MAX_DECIMAL_PLACES + 1, 0.1, 9.9, 5);
        assert!(profile.validate(4).is_err());
    }

    #[test]
    fn table_requires_its_default_level() {
        let levels = BTreeMap::from([(4, grade_4())]);
        assert!(matches!(LevelTable::new(3, levels), Err(ConfigError::MissingDefaultLevel(3))));
    }
}
