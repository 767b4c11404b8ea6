//! Area strike system: calling strikes, phase timing, and the one-time
//! falloff damage pass on detonation.

use hecs::{Entity, World};
use tracing::info;

use bastion_core::components::{AreaStrike, Life, UnitBody};
use bastion_core::config::StageConfig;
use bastion_core::constants::*;
use bastion_core::enums::{LifeState, Side, StrikePhase};
use bastion_core::error::CommandError;
use bastion_core::events::MatchEvent;
use bastion_core::types::{LaneGeometry, PerSide, Position};

use crate::combat;
use crate::side::SideState;
use crate::world_setup;

/// Damage dealt at lane distance `dx` from the strike center.
pub fn falloff_damage(damage: f64, radius: f64, dx: f64) -> f64 {
    if radius <= 0.0 {
        return damage;
    }
    damage * (1.0 - STRIKE_EDGE_FALLOFF * (dx.abs() / radius))
}

/// Validate and call a strike for `side` at `target_x`. Deducts the cost
/// and starts the cooldown on success.
pub fn call(
    world: &mut World,
    sides: &mut PerSide<SideState>,
    stage: &StageConfig,
    lane: &LaneGeometry,
    events: &mut Vec<MatchEvent>,
    side: Side,
    target_x: f64,
) -> Result<(), CommandError> {
    let config = stage.area_strike.ok_or(CommandError::AbilityDisabled)?;
    let state = &mut sides[side];

    if state.strike_cooldown > 0.0 {
        return Err(CommandError::AbilityOnCooldown {
            remaining_secs: state.strike_cooldown,
        });
    }
    if !lane.contains(target_x) {
        return Err(CommandError::InvalidTarget);
    }
    if !state.can_afford(config.cost) {
        return Err(CommandError::InsufficientFunds {
            required: config.cost,
            available: state.currency,
        });
    }

    state.currency -= config.cost;
    state.strike_cooldown = config.cooldown_secs;
    world_setup::spawn_strike(world, side, target_x, config.radius, config.damage);

    info!(?side, target_x, "area strike called");
    events.push(MatchEvent::StrikeCalled { side, target_x });
    Ok(())
}

/// Advance strike phases. Damage lands once, on the switch to `Detonating`.
pub fn run(world: &mut World, events: &mut Vec<MatchEvent>, dt: f64) {
    let mut detonations: Vec<AreaStrike> = Vec::new();

    for (_entity, strike) in world.query_mut::<&mut AreaStrike>() {
        strike.phase_secs += dt;
        match strike.phase {
            StrikePhase::Approaching if strike.phase_secs >= STRIKE_APPROACH_SECS => {
                strike.phase = StrikePhase::Detonating;
                strike.phase_secs = 0.0;
                detonations.push(*strike);
            }
            StrikePhase::Detonating if strike.phase_secs >= STRIKE_DETONATION_SECS => {
                strike.phase = StrikePhase::Finished;
            }
            _ => {}
        }
    }

    for strike in detonations {
        let units_hit = detonate(world, &strike, events);
        events.push(MatchEvent::StrikeDetonated {
            side: strike.side,
            target_x: strike.target_x,
            units_hit,
        });
    }
}

/// Apply falloff damage to every alive opposing unit in the radius.
fn detonate(world: &mut World, strike: &AreaStrike, events: &mut Vec<MatchEvent>) -> u32 {
    let victim_side = strike.side.opponent();

    let mut victims: Vec<(u32, Entity, f64)> = world
        .query::<(&UnitBody, &Position, &Life)>()
        .iter()
        .filter(|(_, (body, pos, life))| {
            body.side == victim_side
                && life.state == LifeState::Alive
                && (pos.x - strike.target_x).abs() <= strike.radius
        })
        .map(|(entity, (body, pos, _))| (body.id.0, entity, pos.x - strike.target_x))
        .collect();
    victims.sort_by_key(|&(id, _, _)| id);

    let mut hit = 0;
    for (_, entity, dx) in victims {
        let damage = falloff_damage(strike.damage, strike.radius, dx);
        if combat::damage_unit(world, entity, damage, events).is_ok() {
            hit += 1;
        }
    }
    hit
}
