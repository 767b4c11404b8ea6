//! Persisted campaign progress: which stages are open and their best stars.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::BUILTIN_STAGE_COUNT;
use crate::constants::{THREE_STAR_HEALTH, TWO_STAR_HEALTH};
use crate::error::ProgressError;

/// Star rating for a finished match.
///
/// A win earns 1-3 stars depending on how much of the player's base
/// survived. A loss earns nothing.
pub fn star_rating(won: bool, base_health_fraction: f64) -> u8 {
    if !won {
        return 0;
    }
    if base_health_fraction >= THREE_STAR_HEALTH {
        3
    } else if base_health_fraction >= TWO_STAR_HEALTH {
        2
    } else {
        1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progress {
    pub unlocked: BTreeSet<u32>,
    pub best_stars: BTreeMap<u32, u8>,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            unlocked: BTreeSet::from([1]),
            best_stars: BTreeMap::new(),
        }
    }
}

impl Progress {
    pub fn is_unlocked(&self, stage: u32) -> bool {
        self.unlocked.contains(&stage)
    }

    pub fn stars(&self, stage: u32) -> u8 {
        self.best_stars.get(&stage).copied().unwrap_or(0)
    }

    /// Record a result. Keeps the best rating; a win opens the next stage.
    /// Returns true if anything changed.
    pub fn record(&mut self, stage: u32, stars: u8) -> bool {
        let stars = stars.min(3);
        let mut changed = false;

        if stars > self.stars(stage) {
            self.best_stars.insert(stage, stars);
            changed = true;
        }
        if stars > 0 && stage < BUILTIN_STAGE_COUNT {
            changed |= self.unlocked.insert(stage + 1);
        }
        changed
    }

    pub fn total_stars(&self) -> u32 {
        self.best_stars.values().map(|&s| s as u32).sum()
    }
}

pub fn save_to_file(path: &Path, progress: &Progress) -> Result<(), ProgressError> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let json = serde_json::to_string_pretty(progress)?;
    fs::write(path, json)?;
    Ok(())
}

/// Load progress, treating a missing file as a fresh campaign.
pub fn load_from_file(path: &Path) -> Result<Progress, ProgressError> {
    match fs::read_to_string(path) {
        Ok(json) => Ok(serde_json::from_str(&json)?),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Progress::default()),
        Err(err) => Err(err.into()),
    }
}
