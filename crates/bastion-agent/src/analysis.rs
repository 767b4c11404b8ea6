//! Battlefield analysis: army composition, threat distance, relative power.

use bastion_core::config::AreaStrikeConfig;
use bastion_core::enums::{Role, Side, UnitKind};

use crate::tuning::AgentTuning;

/// One alive unit as the agent sees it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSample {
    pub side: Side,
    pub kind: UnitKind,
    pub x: f64,
    pub health: f64,
}

/// Everything the agent may read, built by the simulation at the start of
/// the agent step. Only alive units are listed.
#[derive(Debug, Clone, PartialEq)]
pub struct BattlefieldView {
    /// The side the agent plays.
    pub side: Side,
    pub currency: f64,
    pub own_base_x: f64,
    pub opposing_base_x: f64,
    pub lane_width: f64,
    pub units: Vec<UnitSample>,
    /// Pending spawns in the agent's queue.
    pub queue_len: usize,
    pub unlocked: Vec<UnitKind>,
    /// `None` when the stage disables strikes.
    pub area_strike: Option<AreaStrikeConfig>,
    pub strike_cooldown: f64,
}

impl BattlefieldView {
    pub fn opposing_units(&self) -> impl Iterator<Item = &UnitSample> + '_ {
        self.units.iter().filter(move |u| u.side != self.side)
    }
}

/// Per-kind headcount plus totals for one side.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArmyCounts {
    pub by_kind: [u32; 5],
    pub total: u32,
    pub total_health: f64,
    /// Sum of damage x attack rate.
    pub total_dps: f64,
}

impl ArmyCounts {
    fn add(&mut self, sample: &UnitSample) {
        let arch = sample.kind.archetype();
        self.by_kind[sample.kind.index()] += 1;
        self.total += 1;
        self.total_health += sample.health;
        self.total_dps += arch.dps();
    }

    pub fn count(&self, kind: UnitKind) -> u32 {
        self.by_kind[kind.index()]
    }

    pub fn count_role(&self, role: Role) -> u32 {
        UnitKind::ALL
            .iter()
            .filter(|kind| kind.role() == role)
            .map(|&kind| self.count(kind))
            .sum()
    }

    /// Line shooters. Heavy units are not counted.
    pub fn ranged(&self) -> u32 {
        self.count_role(Role::Ranged)
    }

    /// Frontline fighters. Heavy units are not counted.
    pub fn melee(&self) -> u32 {
        self.count_role(Role::Melee)
    }

    pub fn power(&self, dps_weight: f64) -> f64 {
        self.total_health + dps_weight * self.total_dps
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BattlefieldAnalysis {
    pub own: ArmyCounts,
    pub opposing: ArmyCounts,
    /// Closest opposing unit to the agent's base; infinite when there is none.
    pub threat_distance: f64,
    /// Own power over opposing power (denominator floored at 1).
    pub power_ratio: f64,
    pub can_afford_to_save: bool,
    pub needs_defense: bool,
}

pub fn analyze(view: &BattlefieldView, tuning: &AgentTuning) -> BattlefieldAnalysis {
    let mut own = ArmyCounts::default();
    let mut opposing = ArmyCounts::default();
    let mut threat_distance = f64::INFINITY;

    for sample in &view.units {
        if sample.side == view.side {
            own.add(sample);
        } else {
            opposing.add(sample);
            threat_distance = threat_distance.min((view.own_base_x - sample.x).abs());
        }
    }

    let power_ratio =
        own.power(tuning.dps_weight) / opposing.power(tuning.dps_weight).max(1.0);

    BattlefieldAnalysis {
        own,
        opposing,
        threat_distance,
        power_ratio,
        can_afford_to_save: threat_distance > tuning.save_distance
            && power_ratio >= tuning.save_power_ratio,
        needs_defense: threat_distance < tuning.defense_distance
            || power_ratio < tuning.defense_power_ratio,
    }
}
