//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components. Components that hold
//! entity handles live in the simulation crate.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::UnitId;

/// Identity of a unit: who it is and who it fights for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitBody {
    pub id: UnitId,
    pub kind: UnitKind,
    pub side: Side,
}

/// Hit points. `current` is clamped at zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f64,
    pub max: f64,
}

/// Lifecycle flag plus the death-window timer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Life {
    pub state: LifeState,
    /// Seconds spent in `Dying`.
    pub dying_secs: f64,
}

/// Attack timing and the last visible stance.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AttackClock {
    /// Seconds until the next attack is allowed; <= 0 means ready.
    pub cooldown_secs: f64,
    pub stance: Stance,
}

/// A called-in area strike.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AreaStrike {
    /// Side that called the strike; damage lands on the opponent.
    pub side: Side,
    pub target_x: f64,
    pub radius: f64,
    pub damage: f64,
    pub phase: StrikePhase,
    /// Seconds spent in the current phase.
    pub phase_secs: f64,
}
