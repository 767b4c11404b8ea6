//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which base a unit, projectile, or ability belongs to.
///
/// `Home` sits at the left end of the lane and marches right,
/// `Away` sits at the right end and marches left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    /// Both sides, in processing order.
    pub const BOTH: [Side; 2] = [Side::Home, Side::Away];

    pub fn opponent(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }

    /// Marching direction along the lane axis (+1 right, -1 left).
    pub fn direction(self) -> f64 {
        match self {
            Side::Home => 1.0,
            Side::Away => -1.0,
        }
    }
}

/// Unit archetype name. Stats live in [`crate::catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Spearman,
    Archer,
    Musketeer,
    Shieldbearer,
    Tank,
}

/// Battlefield role, used by the planning agent for composition counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Frontline fighters that escort ranged units.
    Melee,
    /// Line shooters that need escorts.
    Ranged,
    /// Heavy support; neither escorted nor counted as a line shooter.
    Heavy,
}

/// Unit lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    #[default]
    Alive,
    /// Health reached zero. Still rendered for the death window, never targeted.
    Dying,
    /// Death window elapsed; despawned by cleanup.
    Removed,
}

/// What a unit did on its last update, for animation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Advancing,
    Engaging,
}

/// Area strike lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrikePhase {
    /// Incoming; purely timed, no damage yet.
    #[default]
    Approaching,
    /// Damage has been applied; explosion still visible.
    Detonating,
    Finished,
}

/// Match result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    #[default]
    Ongoing,
    HomeWon,
    AwayWon,
}

impl MatchOutcome {
    pub fn winner(self) -> Option<Side> {
        match self {
            MatchOutcome::Ongoing => None,
            MatchOutcome::HomeWon => Some(Side::Home),
            MatchOutcome::AwayWon => Some(Side::Away),
        }
    }
}

/// Planning agent mode, exposed in snapshots for debugging overlays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum AgentMode {
    #[default]
    Idle,
    EmergencyDefense,
    SustainedDefense,
    Saving { kind: UnitKind, count: u32 },
    ReactiveBuild,
}

/// Rules of the planning agent's decision table, in table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgentRule {
    Emergency,
    Defense,
    SavingPlan,
    EscortRanged,
    Opening,
    RangedShortage,
    FrontlineBalance,
    Reinforce,
}

/// How a saving plan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PlanOutcome {
    /// The full order was bought with escorts.
    Executed,
    /// Conditions soured; part of the order was bought.
    Salvaged,
    /// Dropped without buying anything.
    Abandoned,
}
