//! Stage selection and campaign bookkeeping around a single match.

use std::fs;
use std::path::Path;

use tracing::info;

use bastion_core::config::StageConfig;
use bastion_core::progress::{self, Progress};

use crate::error::AppError;
use crate::game_loop::MatchReport;

/// Where the stage comes from.
#[derive(Debug, Clone)]
pub enum StageSource<'a> {
    Builtin(u32),
    File(&'a Path),
}

/// Resolve the stage to play. Built-in stages must be unlocked in
/// `progress` when one is supplied; custom files are always playable.
pub fn resolve_stage(
    source: &StageSource<'_>,
    progress: Option<&Progress>,
) -> Result<StageConfig, AppError> {
    match source {
        StageSource::Builtin(id) => {
            if let Some(progress) = progress {
                if !progress.is_unlocked(*id) {
                    return Err(AppError::StageLocked(*id));
                }
            }
            Ok(StageConfig::builtin(*id)?)
        }
        StageSource::File(path) => {
            let json = fs::read_to_string(path)?;
            Ok(StageConfig::from_json(&json)?)
        }
    }
}

pub fn load_progress(path: &Path) -> Result<Progress, AppError> {
    Ok(progress::load_from_file(path)?)
}

/// Fold a finished match into the progress file and write it back.
pub fn record_result(
    path: &Path,
    mut progress: Progress,
    report: &MatchReport,
) -> Result<Progress, AppError> {
    if progress.record(report.stage, report.home_stars) {
        info!(
            stage = report.stage,
            stars = report.home_stars,
            total = progress.total_stars(),
            "progress updated"
        );
        progress::save_to_file(path, &progress)?;
    }
    Ok(progress)
}
