//! Entity spawn factories.
//!
//! Creates unit, projectile, and area strike entities with their
//! component bundles. Callers handle costs and validation.

use hecs::{Entity, World};

use bastion_core::components::*;
use bastion_core::enums::{Side, StrikePhase, UnitKind};
use bastion_core::types::{LaneGeometry, Position, UnitId};

use crate::combat::{Shot, ShotAim, Targeting};

/// Spawn a unit of `kind` in front of `side`'s base.
pub fn spawn_unit(
    world: &mut World,
    lane: &LaneGeometry,
    id: UnitId,
    side: Side,
    kind: UnitKind,
) -> Entity {
    let arch = kind.archetype();
    world.spawn((
        UnitBody { id, kind, side },
        Position::new(lane.spawn_x(side), lane.ground_y),
        Health {
            current: arch.max_health,
            max: arch.max_health,
        },
        Life::default(),
        AttackClock::default(),
        Targeting::default(),
    ))
}

/// Spawn a homing projectile at `from`.
pub fn spawn_shot(
    world: &mut World,
    from: Position,
    side: Side,
    aim: ShotAim,
    damage: f64,
    speed: f64,
) -> Entity {
    world.spawn((
        from,
        Shot {
            side,
            aim,
            damage,
            speed,
            spent: false,
        },
    ))
}

/// Spawn an incoming area strike.
pub fn spawn_strike(
    world: &mut World,
    side: Side,
    target_x: f64,
    radius: f64,
    damage: f64,
) -> Entity {
    world.spawn((AreaStrike {
        side,
        target_x,
        radius,
        damage,
        phase: StrikePhase::Approaching,
        phase_secs: 0.0,
    },))
}
