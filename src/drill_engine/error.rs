use thiserror::Error;

/// Errors from the restricted formula evaluator and fraction arithmetic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("formula is not of the form <number><operator><number>: {0:?}")]
    InvalidFormulaShape(String),

    #[error("division by zero")]
    DivisionByZero,
}

/// Errors raised while loading or validating a level table.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read level config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse level config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("level key {0:?} is not a non-negative integer")]
    InvalidLevelKey(String),

    #[error("level {0} is defined more than once")]
    DuplicateLevel(u32),

    #[error("invalid profile for level {level}: {reason}")]
    InvalidProfile { level: u32, reason: String },

    #[error("default level {0} is not defined")]
    MissingDefaultLevel(u32),
}
