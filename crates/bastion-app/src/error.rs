//! Errors surfaced by the runner.

use thiserror::Error;

use bastion_core::error::{ConfigError, ProgressError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Progress(#[from] ProgressError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stage {0} is locked; win the previous stage first")]
    StageLocked(u32),

    #[error("failed to encode report: {0}")]
    Report(#[from] serde_json::Error),
}
