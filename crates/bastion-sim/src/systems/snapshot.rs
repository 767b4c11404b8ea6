//! Snapshot system: builds a complete `MatchSnapshot` from the world.
//!
//! This system is read-only. It never modifies the world.

use hecs::{Entity, World};

use bastion_agent::planner::Planner;
use bastion_core::components::*;
use bastion_core::constants::*;
use bastion_core::enums::*;
use bastion_core::state::*;
use bastion_core::types::{LaneGeometry, PerSide, Position, SimTime, UnitId};

use crate::combat::{Shot, ShotAim, Targeting};
use crate::side::SideState;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    stage: u32,
    outcome: MatchOutcome,
    lane: &LaneGeometry,
    sides: &PerSide<SideState>,
    planners: &PerSide<Option<Planner>>,
) -> MatchSnapshot {
    MatchSnapshot {
        time: *time,
        stage,
        outcome,
        lane: *lane,
        sides: PerSide::new(
            build_side(&sides.home, planners.home.as_ref()),
            build_side(&sides.away, planners.away.as_ref()),
        ),
        units: build_units(world),
        projectiles: build_projectiles(world),
        strikes: build_strikes(world),
    }
}

fn build_side(state: &SideState, planner: Option<&Planner>) -> SideView {
    SideView {
        currency: state.currency,
        base_health: state.base_health,
        base_max_health: state.base_max_health,
        strike_cooldown: state.strike_cooldown,
        turret_cooldown: state.turret_cooldown,
        queued: state.queue.to_vec(),
        agent_mode: planner.map(Planner::mode),
    }
}

/// Units sorted by id.
fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(&UnitBody, &Position, &Health, &Life, &AttackClock, &Targeting)>()
        .iter()
        .map(|(_, (body, pos, health, life, clock, targeting))| {
            let arch = body.kind.archetype();
            let death_progress = match life.state {
                LifeState::Alive => 0.0,
                _ => (life.dying_secs / DEATH_WINDOW_SECS).clamp(0.0, 1.0),
            };
            UnitView {
                id: body.id,
                side: body.side,
                kind: body.kind,
                position: *pos,
                health: health.current,
                max_health: health.max,
                life: life.state,
                stance: clock.stance,
                target: targeting.target.and_then(|target| target_id(world, target)),
                death_progress,
                width: arch.width,
                height: arch.height,
            }
        })
        .collect();
    units.sort_by_key(|u| u.id);
    units
}

/// Id of a target handle that still points at a unit.
fn target_id(world: &World, target: Entity) -> Option<UnitId> {
    world.get::<&UnitBody>(target).ok().map(|body| body.id)
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    world
        .query::<(&Shot, &Position)>()
        .iter()
        .filter(|(_, (shot, _))| !shot.spent)
        .map(|(_, (shot, pos))| ProjectileView {
            side: shot.side,
            position: *pos,
            targets_base: matches!(shot.aim, ShotAim::Base(_)),
        })
        .collect()
}

fn build_strikes(world: &World) -> Vec<StrikeView> {
    world
        .query::<&AreaStrike>()
        .iter()
        .map(|(_, strike)| {
            let duration = match strike.phase {
                StrikePhase::Approaching => STRIKE_APPROACH_SECS,
                StrikePhase::Detonating => STRIKE_DETONATION_SECS,
                StrikePhase::Finished => 1.0,
            };
            StrikeView {
                side: strike.side,
                target_x: strike.target_x,
                radius: strike.radius,
                phase: strike.phase,
                phase_progress: (strike.phase_secs / duration).clamp(0.0, 1.0),
            }
        })
        .collect()
}
