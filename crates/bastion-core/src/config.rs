//! Stage configuration: per-stage economy, unlocks, and ability settings.
//!
//! Built-in stages cover the campaign. Custom stages can be loaded from
//! JSON; archetype names are validated at load time so a bad unlock list
//! never reaches the simulation.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::enums::UnitKind;
use crate::error::ConfigError;
use crate::types::PerSide;

/// Number of built-in stages.
pub const BUILTIN_STAGE_COUNT: u32 = 3;

/// Base turret settings. Both sides get an identical turret.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurretConfig {
    pub damage: f64,
    /// Shots per second.
    pub rate: f64,
    /// Lane distance from the base.
    pub range: f64,
}

/// Area strike ability settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaStrikeConfig {
    pub cost: f64,
    /// Damage at the strike center.
    pub damage: f64,
    pub radius: f64,
    pub cooldown_secs: f64,
}

/// Everything that varies between stages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageConfig {
    pub id: u32,
    pub name: String,
    pub starting_currency: PerSide<f64>,
    pub starting_base_health: PerSide<f64>,
    pub currency_per_sec: PerSide<f64>,
    pub unlocked: Vec<UnitKind>,
    /// `None` disables base turrets.
    pub turret: Option<TurretConfig>,
    /// `None` disables the area strike for both sides.
    pub area_strike: Option<AreaStrikeConfig>,
    /// Base interval between agent decision cycles (seconds).
    pub agent_interval_secs: f64,
}

/// On-disk form of a stage. Unlocks are names until validated.
#[derive(Debug, Deserialize)]
struct StageFile {
    id: u32,
    name: String,
    starting_currency: PerSide<f64>,
    starting_base_health: PerSide<f64>,
    currency_per_sec: PerSide<f64>,
    unlocked: Vec<String>,
    #[serde(default)]
    turret: Option<TurretConfig>,
    #[serde(default)]
    area_strike: Option<AreaStrikeConfig>,
    agent_interval_secs: f64,
}

impl TryFrom<StageFile> for StageConfig {
    type Error = ConfigError;

    fn try_from(file: StageFile) -> Result<Self, Self::Error> {
        let unlocked = file
            .unlocked
            .iter()
            .map(|name| UnitKind::from_str(name))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StageConfig {
            id: file.id,
            name: file.name,
            starting_currency: file.starting_currency,
            starting_base_health: file.starting_base_health,
            currency_per_sec: file.currency_per_sec,
            unlocked,
            turret: file.turret,
            area_strike: file.area_strike,
            agent_interval_secs: file.agent_interval_secs,
        })
    }
}

impl Default for StageConfig {
    fn default() -> Self {
        border_skirmish()
    }
}

impl StageConfig {
    /// Look up a built-in stage by id (1-based).
    pub fn builtin(id: u32) -> Result<Self, ConfigError> {
        match id {
            1 => Ok(border_skirmish()),
            2 => Ok(river_crossing()),
            3 => Ok(siege_of_the_keep()),
            other => Err(ConfigError::UnknownStage(other)),
        }
    }

    /// Parse and validate a stage from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: StageFile = serde_json::from_str(json)?;
        let config = StageConfig::try_from(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn is_unlocked(&self, kind: UnitKind) -> bool {
        self.unlocked.contains(&kind)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.unlocked.is_empty() {
            return Err(ConfigError::Invalid("no archetypes unlocked".into()));
        }
        for (label, pair) in [
            ("starting_base_health", self.starting_base_health),
            ("currency_per_sec", self.currency_per_sec),
        ] {
            if !(pair.home > 0.0 && pair.away > 0.0) {
                return Err(ConfigError::Invalid(format!("{label} must be positive")));
            }
        }
        if !(self.starting_currency.home >= 0.0 && self.starting_currency.away >= 0.0) {
            return Err(ConfigError::Invalid(
                "starting_currency must not be negative".into(),
            ));
        }
        if !(self.agent_interval_secs > 0.0) {
            return Err(ConfigError::Invalid(
                "agent_interval_secs must be positive".into(),
            ));
        }
        if let Some(turret) = &self.turret {
            if !(turret.rate > 0.0 && turret.range > 0.0 && turret.damage >= 0.0) {
                return Err(ConfigError::Invalid(
                    "turret needs positive rate and range".into(),
                ));
            }
        }
        if let Some(strike) = &self.area_strike {
            if !(strike.radius > 0.0 && strike.cost >= 0.0 && strike.cooldown_secs >= 0.0) {
                return Err(ConfigError::Invalid(
                    "area strike needs a positive radius".into(),
                ));
            }
        }
        Ok(())
    }
}

/// Stage 1: spearmen and archers only, no base defenses.
fn border_skirmish() -> StageConfig {
    StageConfig {
        id: 1,
        name: "Border Skirmish".into(),
        starting_currency: PerSide::splat(100.0),
        starting_base_health: PerSide::splat(1000.0),
        currency_per_sec: PerSide::splat(15.0),
        unlocked: vec![UnitKind::Spearman, UnitKind::Archer],
        turret: None,
        area_strike: None,
        agent_interval_secs: 0.4,
    }
}

/// Stage 2: full infantry roster and base turrets.
fn river_crossing() -> StageConfig {
    StageConfig {
        id: 2,
        name: "River Crossing".into(),
        starting_currency: PerSide::splat(100.0),
        starting_base_health: PerSide::splat(1000.0),
        currency_per_sec: PerSide::new(15.0, 16.0),
        unlocked: vec![
            UnitKind::Spearman,
            UnitKind::Archer,
            UnitKind::Musketeer,
            UnitKind::Shieldbearer,
        ],
        turret: Some(TurretConfig {
            damage: 20.0,
            rate: 0.5,
            range: 250.0,
        }),
        area_strike: None,
        agent_interval_secs: 0.3,
    }
}

/// Stage 3: tanks, stronger turrets, and area strikes. The away base is sturdier.
fn siege_of_the_keep() -> StageConfig {
    StageConfig {
        id: 3,
        name: "Siege of the Keep".into(),
        starting_currency: PerSide::splat(150.0),
        starting_base_health: PerSide::new(1000.0, 1200.0),
        currency_per_sec: PerSide::new(15.0, 17.0),
        unlocked: UnitKind::ALL.to_vec(),
        turret: Some(TurretConfig {
            damage: 25.0,
            rate: 0.7,
            range: 300.0,
        }),
        area_strike: Some(AreaStrikeConfig {
            cost: 150.0,
            damage: 80.0,
            radius: 100.0,
            cooldown_secs: 20.0,
        }),
        agent_interval_secs: 0.2,
    }
}
