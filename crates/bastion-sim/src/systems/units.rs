//! Unit behavior system: targeting, movement, and attacks.
//!
//! Units are processed one at a time in id order. Each unit reads the
//! world as left by the units before it, so a kill earlier in the pass
//! is visible to everyone after.

use hecs::{Entity, World};

use bastion_core::components::{AttackClock, Life, UnitBody};
use bastion_core::constants::*;
use bastion_core::enums::{LifeState, Stance};
use bastion_core::events::MatchEvent;
use bastion_core::types::{LaneGeometry, PerSide, Position};

use crate::combat::{self, ShotAim, Targeting};
use crate::side::SideState;
use crate::world_setup;

/// Copy of one unit's mutable state, written back after its turn.
struct UnitTurn {
    entity: Entity,
    body: UnitBody,
    pos: Position,
    life: Life,
    clock: AttackClock,
    target: Option<Entity>,
}

pub fn run(
    world: &mut World,
    sides: &mut PerSide<SideState>,
    lane: &LaneGeometry,
    events: &mut Vec<MatchEvent>,
    dt: f64,
) {
    let mut order: Vec<(u32, Entity)> = world
        .query::<&UnitBody>()
        .iter()
        .map(|(entity, body)| (body.id.0, entity))
        .collect();
    order.sort_unstable_by_key(|&(id, _)| id);

    for (_, entity) in order {
        let Some(mut turn) = load(world, entity) else {
            continue;
        };
        step(world, sides, lane, events, &mut turn, dt);
        store(world, &turn);
    }
}

fn load(world: &World, entity: Entity) -> Option<UnitTurn> {
    let mut query = world
        .query_one::<(&UnitBody, &Position, &Life, &AttackClock)>(entity)
        .ok()?;
    let (body, pos, life, clock) = query.get()?;
    Some(UnitTurn {
        entity,
        body: *body,
        pos: *pos,
        life: *life,
        clock: *clock,
        target: None,
    })
}

fn store(world: &mut World, turn: &UnitTurn) {
    if let Ok((pos, life, clock, targeting)) = world.query_one_mut::<(
        &mut Position,
        &mut Life,
        &mut AttackClock,
        &mut Targeting,
    )>(turn.entity)
    {
        *pos = turn.pos;
        *life = turn.life;
        *clock = turn.clock;
        targeting.target = turn.target;
    }
}

fn step(
    world: &mut World,
    sides: &mut PerSide<SideState>,
    lane: &LaneGeometry,
    events: &mut Vec<MatchEvent>,
    turn: &mut UnitTurn,
    dt: f64,
) {
    match turn.life.state {
        LifeState::Removed => return,
        LifeState::Dying => {
            turn.life.dying_secs += dt;
            if turn.life.dying_secs >= DEATH_WINDOW_SECS {
                turn.life.state = LifeState::Removed;
            }
            return;
        }
        LifeState::Alive => {}
    }

    let arch = turn.body.kind.archetype();
    let side = turn.body.side;

    if turn.clock.cooldown_secs > 0.0 {
        turn.clock.cooldown_secs -= dt;
    }

    turn.target = combat::nearest_alive(world, side.opponent(), turn.pos.x, arch.detect_range)
        .map(|(entity, _)| entity);

    if let Some(target) = turn.target {
        let Ok(target_pos) = world.get::<&Position>(target).map(|p| *p) else {
            turn.target = None;
            return;
        };
        let dist = turn.pos.lane_distance(&target_pos);

        if dist <= arch.attack_range {
            turn.clock.stance = Stance::Engaging;
            if turn.clock.cooldown_secs <= 0.0 {
                turn.clock.cooldown_secs = arch.attack_interval();
                attack_unit(world, events, turn, target, target_pos);
            }
        } else {
            turn.clock.stance = Stance::Advancing;
            let dir = if target_pos.x > turn.pos.x { 1.0 } else { -1.0 };
            turn.pos.x += dir * arch.move_speed * dt;
        }
        return;
    }

    let enemy = side.opponent();
    let dist_to_base = (lane.base_x(enemy) - turn.pos.x).abs();
    let in_base_range = (arch.is_ranged && dist_to_base <= arch.attack_range)
        || dist_to_base <= MELEE_BASE_CONTACT;

    if in_base_range {
        turn.clock.stance = Stance::Engaging;
        if turn.clock.cooldown_secs <= 0.0 {
            turn.clock.cooldown_secs = arch.attack_interval();
            if arch.is_ranged {
                world_setup::spawn_shot(
                    world,
                    muzzle(turn),
                    side,
                    ShotAim::Base(enemy),
                    arch.damage,
                    arch.projectile_speed,
                );
                events.push(MatchEvent::ShotFired {
                    side,
                    x: turn.pos.x,
                });
            } else {
                combat::damage_base(sides, enemy, arch.damage, events);
            }
        }
    } else {
        turn.clock.stance = Stance::Advancing;
        turn.pos.x += side.direction() * arch.move_speed * dt;
    }
}

fn attack_unit(
    world: &mut World,
    events: &mut Vec<MatchEvent>,
    turn: &UnitTurn,
    target: Entity,
    target_pos: Position,
) {
    let arch = turn.body.kind.archetype();
    if arch.is_ranged {
        world_setup::spawn_shot(
            world,
            muzzle(turn),
            turn.body.side,
            ShotAim::Unit(target),
            arch.damage,
            arch.projectile_speed,
        );
        events.push(MatchEvent::ShotFired {
            side: turn.body.side,
            x: turn.pos.x,
        });
        return;
    }

    let target_height = world
        .get::<&UnitBody>(target)
        .map(|body| body.kind.archetype().height)
        .unwrap_or(0.0);
    if combat::damage_unit(world, target, arch.damage, events).is_ok() {
        events.push(MatchEvent::MeleeHit {
            x: target_pos.x,
            y: target_pos.y - target_height / 2.0,
        });
    }
}

/// Projectiles leave from the unit's center.
fn muzzle(turn: &UnitTurn) -> Position {
    let height = turn.body.kind.archetype().height;
    Position::new(turn.pos.x, turn.pos.y - height / 2.0)
}
