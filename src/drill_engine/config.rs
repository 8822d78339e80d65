//! Loading a level table from TOML.
//!
//! Expected schema (every operation table is optional; omitted = disabled):
//!
//! ```toml
//! default_level = 3
//!
//! [levels.3]
//! name = "Grade 3"
//! question_count = 100
//! time_budget_seconds = 120
//!
//! [levels.3.operations.sum]
//! min = 1
//! max = 30
//! amount = 34
//!
//! [levels.3.operations.decimal_mul]
//! decimal_places = 1
//! min = 0.1
//! max = 9.9
//! int_factor_min = 2
//! int_factor_max = 9
//! amount = 8
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{error, info};

use crate::drill_engine::{
    error::ConfigError,
    levels::{LevelTable, DEFAULT_LEVEL},
    models::DifficultyProfile,
};

/// Environment variable naming a TOML level table.
pub const LEVELS_PATH_ENV: &str = "DRILL_LEVELS_PATH";

fn default_level() -> u32 {
    DEFAULT_LEVEL
}

/// TOML table keys are strings; they are parsed into level numbers after
/// deserialization.
#[derive(Debug, Deserialize)]
struct RawLevelTable {
    #[serde(default = "default_level")]
    default_level: u32,
    levels: BTreeMap<String, DifficultyProfile>,
}

impl LevelTable {
    /// Parse and validate a level table from TOML text.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let raw: RawLevelTable = toml::from_str(s)?;
        let mut levels = BTreeMap::new();
        for (key, profile) in raw.levels {
            let level = key
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidLevelKey(key.clone()))?;
            // "3", " 3" and "03" are distinct TOML keys but the same level.
            if levels.insert(level, profile).is_some() {
                return Err(ConfigError::DuplicateLevel(level));
            }
        }
        LevelTable::new(raw.default_level, levels)
    }

    /// Read and parse a TOML level table from `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        LevelTable::from_toml_str(&text)
    }
}

/// Load the table named by `DRILL_LEVELS_PATH`. Falls back to
/// [`LevelTable::builtin`] when the variable is unset or the file is unusable.
pub fn load_level_table_from_env() -> LevelTable {
    let Ok(path) = std::env::var(LEVELS_PATH_ENV) else {
        return LevelTable::builtin();
    };
    match LevelTable::from_path(&path) {
        Ok(table) => {
            info!(target: "arith_drill_gen", %path, levels = table.keys().count(), "Loaded level config (TOML)");
            table
        }
        Err(e) => {
            error!(target: "arith_drill_gen", %path, error = %e, "Failed to load level config; using built-in levels");
            LevelTable::builtin()
        }
    }
}
