//! Sim-local combat components and damage application.
//!
//! These components hold hecs entity handles, so they live here rather
//! than in the core crate. Handles are never trusted: every use checks
//! that the entity still exists and is alive.

use hecs::{Entity, World};

use bastion_core::components::{Health, Life, UnitBody};
use bastion_core::enums::{LifeState, Side};
use bastion_core::error::CommandError;
use bastion_core::events::MatchEvent;
use bastion_core::types::{PerSide, Position};

use crate::side::SideState;

/// The unit's current target, re-resolved every tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct Targeting {
    pub target: Option<Entity>,
}

/// What a projectile is flying at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShotAim {
    Unit(Entity),
    Base(Side),
}

/// Homing projectile.
#[derive(Debug, Clone, Copy)]
pub struct Shot {
    /// Side that fired it.
    pub side: Side,
    pub aim: ShotAim,
    pub damage: f64,
    pub speed: f64,
    /// Hit or fizzled; removed by cleanup.
    pub spent: bool,
}

/// Deal damage to a live unit. Returns `Ok(true)` if the blow killed it.
///
/// Stale or dead handles are rejected with `InvalidTarget` and nothing
/// happens.
pub fn damage_unit(
    world: &mut World,
    entity: Entity,
    amount: f64,
    events: &mut Vec<MatchEvent>,
) -> Result<bool, CommandError> {
    let mut query = world
        .query_one::<(&UnitBody, &Position, &mut Health, &mut Life)>(entity)
        .map_err(|_| CommandError::InvalidTarget)?;
    let (body, pos, health, life) = query.get().ok_or(CommandError::InvalidTarget)?;

    if life.state != LifeState::Alive {
        return Err(CommandError::InvalidTarget);
    }

    health.current = (health.current - amount.max(0.0)).max(0.0);
    if health.current > 0.0 {
        return Ok(false);
    }

    life.state = LifeState::Dying;
    life.dying_secs = 0.0;
    events.push(MatchEvent::UnitKilled {
        id: body.id,
        side: body.side,
        kind: body.kind,
        x: pos.x,
    });
    Ok(true)
}

/// Deal damage to `side`'s base, clamped at zero.
pub fn damage_base(
    sides: &mut PerSide<SideState>,
    side: Side,
    amount: f64,
    events: &mut Vec<MatchEvent>,
) {
    let state = &mut sides[side];
    if state.base_destroyed() {
        return;
    }
    state.base_health = (state.base_health - amount.max(0.0)).max(0.0);
    events.push(MatchEvent::BaseHit {
        side,
        damage: amount,
    });
}

/// Nearest alive unit of `side` within `reach` of `x`. Ties go to the
/// lowest unit id.
pub fn nearest_alive(world: &World, side: Side, x: f64, reach: f64) -> Option<(Entity, f64)> {
    let mut best: Option<(Entity, f64, u32)> = None;
    let mut query = world.query::<(&UnitBody, &Position, &Life)>();
    for (entity, (body, pos, life)) in query.iter() {
        if body.side != side || life.state != LifeState::Alive {
            continue;
        }
        let dist = (pos.x - x).abs();
        if dist > reach {
            continue;
        }
        let closer = match best {
            None => true,
            Some((_, best_dist, best_id)) => {
                dist < best_dist || (dist == best_dist && body.id.0 < best_id)
            }
        };
        if closer {
            best = Some((entity, dist, body.id.0));
        }
    }
    best.map(|(entity, dist, _)| (entity, dist))
}
