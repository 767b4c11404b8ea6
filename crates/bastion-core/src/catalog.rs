//! Static unit catalog: one immutable stat block per archetype.

use std::fmt;
use std::str::FromStr;

use crate::enums::{Role, UnitKind};
use crate::error::ConfigError;

/// Stat block for a unit archetype.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitArchetype {
    pub kind: UnitKind,
    pub cost: f64,
    pub max_health: f64,
    pub damage: f64,
    pub attacks_per_sec: f64,
    /// Pixels per second along the lane.
    pub move_speed: f64,
    pub attack_range: f64,
    pub detect_range: f64,
    pub is_ranged: bool,
    /// Pixels per second; zero for melee archetypes.
    pub projectile_speed: f64,
    pub width: f64,
    pub height: f64,
    pub role: Role,
}

impl UnitArchetype {
    /// Seconds between attacks.
    pub fn attack_interval(&self) -> f64 {
        1.0 / self.attacks_per_sec
    }

    /// Damage-per-second proxy used in power estimates.
    pub fn dps(&self) -> f64 {
        self.damage * self.attacks_per_sec
    }
}

pub const SPEARMAN: UnitArchetype = UnitArchetype {
    kind: UnitKind::Spearman,
    cost: 50.0,
    max_health: 80.0,
    damage: 15.0,
    attacks_per_sec: 1.0,
    move_speed: 60.0,
    attack_range: 40.0,
    detect_range: 150.0,
    is_ranged: false,
    projectile_speed: 0.0,
    width: 30.0,
    height: 50.0,
    role: Role::Melee,
};

pub const ARCHER: UnitArchetype = UnitArchetype {
    kind: UnitKind::Archer,
    cost: 75.0,
    max_health: 50.0,
    damage: 20.0,
    attacks_per_sec: 0.8,
    move_speed: 50.0,
    attack_range: 200.0,
    detect_range: 250.0,
    is_ranged: true,
    projectile_speed: 400.0,
    width: 25.0,
    height: 45.0,
    role: Role::Ranged,
};

pub const MUSKETEER: UnitArchetype = UnitArchetype {
    kind: UnitKind::Musketeer,
    cost: 120.0,
    max_health: 40.0,
    damage: 45.0,
    attacks_per_sec: 0.5,
    move_speed: 40.0,
    attack_range: 300.0,
    detect_range: 350.0,
    is_ranged: true,
    projectile_speed: 600.0,
    width: 25.0,
    height: 48.0,
    role: Role::Ranged,
};

pub const SHIELDBEARER: UnitArchetype = UnitArchetype {
    kind: UnitKind::Shieldbearer,
    cost: 100.0,
    max_health: 400.0,
    damage: 10.0,
    attacks_per_sec: 0.7,
    move_speed: 35.0,
    attack_range: 35.0,
    detect_range: 120.0,
    is_ranged: false,
    projectile_speed: 0.0,
    width: 35.0,
    height: 55.0,
    role: Role::Melee,
};

pub const TANK: UnitArchetype = UnitArchetype {
    kind: UnitKind::Tank,
    cost: 250.0,
    max_health: 600.0,
    damage: 60.0,
    attacks_per_sec: 0.4,
    move_speed: 25.0,
    attack_range: 250.0,
    detect_range: 300.0,
    is_ranged: true,
    projectile_speed: 500.0,
    width: 60.0,
    height: 45.0,
    role: Role::Heavy,
};

impl UnitKind {
    /// Every archetype, in catalog order.
    pub const ALL: [UnitKind; 5] = [
        UnitKind::Spearman,
        UnitKind::Archer,
        UnitKind::Musketeer,
        UnitKind::Shieldbearer,
        UnitKind::Tank,
    ];

    pub fn archetype(self) -> &'static UnitArchetype {
        match self {
            UnitKind::Spearman => &SPEARMAN,
            UnitKind::Archer => &ARCHER,
            UnitKind::Musketeer => &MUSKETEER,
            UnitKind::Shieldbearer => &SHIELDBEARER,
            UnitKind::Tank => &TANK,
        }
    }

    pub fn cost(self) -> f64 {
        self.archetype().cost
    }

    pub fn role(self) -> Role {
        self.archetype().role
    }

    /// Dense index for per-kind count arrays.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitKind::Spearman => "spearman",
            UnitKind::Archer => "archer",
            UnitKind::Musketeer => "musketeer",
            UnitKind::Shieldbearer => "shieldbearer",
            UnitKind::Tank => "tank",
        }
    }

    /// Cheapest melee archetype; the agent's emergency purchase.
    pub fn cheapest_melee() -> UnitKind {
        let mut best = UnitKind::Spearman;
        for kind in UnitKind::ALL {
            if kind.role() == Role::Melee && kind.cost() < best.cost() {
                best = kind;
            }
        }
        best
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for UnitKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownArchetype(s.to_string()))
    }
}
