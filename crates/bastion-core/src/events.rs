//! Events emitted by the simulation for rendering, audio feedback, and
//! match reports.
//!
//! Events are cosmetic. Nothing in the simulation reads them back.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::UnitId;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchEvent {
    UnitSpawned { id: UnitId, side: Side, kind: UnitKind },
    UnitKilled { id: UnitId, side: Side, kind: UnitKind, x: f64 },
    /// Melee blow landed; spark at the target.
    MeleeHit { x: f64, y: f64 },
    /// A unit or turret fired a projectile.
    ShotFired { side: Side, x: f64 },
    /// A base took damage.
    BaseHit { side: Side, damage: f64 },
    /// A queued unit was discarded because it is locked in this stage.
    SpawnDropped { side: Side, kind: UnitKind },
    StrikeCalled { side: Side, target_x: f64 },
    StrikeDetonated { side: Side, target_x: f64, units_hit: u32 },
    MatchEnded { outcome: MatchOutcome },
    /// A planning agent finished a decision cycle. `queued` may be empty.
    AgentDecided {
        side: Side,
        rule: AgentRule,
        mode: AgentMode,
        queued: Vec<UnitKind>,
    },
    PlanStarted { side: Side, kind: UnitKind, count: u32 },
    PlanEnded {
        side: Side,
        kind: UnitKind,
        count: u32,
        outcome: PlanOutcome,
    },
}
