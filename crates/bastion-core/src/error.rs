//! Error types for commands, configuration loading, and progress files.

use thiserror::Error;

use crate::enums::UnitKind;

/// Rejection returned by the command interface.
///
/// Every variant is an expected, recoverable condition; callers decide
/// whether to surface it or ignore it.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CommandError {
    #[error("insufficient funds: need {required:.0}, have {available:.0}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("{0} is not unlocked in this stage")]
    ArchetypeLocked(UnitKind),

    #[error("ability on cooldown for {remaining_secs:.1}s")]
    AbilityOnCooldown { remaining_secs: f64 },

    #[error("ability is disabled in this stage")]
    AbilityDisabled,

    /// The target point or handle is no longer valid.
    #[error("invalid target")]
    InvalidTarget,

    #[error("match is already decided")]
    MatchFinished,
}

/// Failure while loading or validating a stage configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown unit archetype '{0}'")]
    UnknownArchetype(String),

    #[error("failed to parse stage config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid stage config: {0}")]
    Invalid(String),

    #[error("no built-in stage {0}")]
    UnknownStage(u32),
}

/// Failure while reading or writing the progress record.
#[derive(Debug, Error)]
pub enum ProgressError {
    #[error("progress file i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("progress file is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
