//! Match snapshot: the complete visible state handed to a renderer.
//!
//! Snapshots are read-only copies. Mutating one has no effect on the match.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{LaneGeometry, PerSide, Position, SimTime, UnitId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub time: SimTime,
    pub stage: u32,
    pub outcome: MatchOutcome,
    pub lane: LaneGeometry,
    pub sides: PerSide<SideView>,
    pub units: Vec<UnitView>,
    pub projectiles: Vec<ProjectileView>,
    pub strikes: Vec<StrikeView>,
}

/// Per-side economy and base status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SideView {
    pub currency: f64,
    pub base_health: f64,
    pub base_max_health: f64,
    /// Seconds until the area strike is usable again.
    pub strike_cooldown: f64,
    pub turret_cooldown: f64,
    /// Pending spawns, head first.
    pub queued: Vec<UnitKind>,
    /// `None` for human-controlled sides.
    pub agent_mode: Option<AgentMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub side: Side,
    pub kind: UnitKind,
    pub position: Position,
    pub health: f64,
    pub max_health: f64,
    pub life: LifeState,
    pub stance: Stance,
    /// Unit this one is fighting, as resolved on the last tick.
    pub target: Option<UnitId>,
    /// 0.0 while alive, rising to 1.0 at the end of the death window.
    pub death_progress: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub side: Side,
    pub position: Position,
    pub targets_base: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrikeView {
    pub side: Side,
    pub target_x: f64,
    pub radius: f64,
    pub phase: StrikePhase,
    /// Fraction of the current phase elapsed (0.0 - 1.0).
    pub phase_progress: f64,
}
