//! Projectile system: homing flight and impact.

use glam::DVec2;
use hecs::{Entity, World};

use bastion_core::components::{Life, UnitBody};
use bastion_core::constants::*;
use bastion_core::enums::LifeState;
use bastion_core::events::MatchEvent;
use bastion_core::types::{LaneGeometry, PerSide, Position};

use crate::combat::{self, Shot, ShotAim};
use crate::side::SideState;

/// Where a projectile is heading, or `None` if its unit target is gone.
fn aim_point(world: &World, lane: &LaneGeometry, aim: ShotAim) -> Option<(DVec2, f64)> {
    match aim {
        ShotAim::Base(side) => {
            let p = lane.base_point(side);
            Some((DVec2::new(p.x, p.y), PROJECTILE_BASE_HIT_RADIUS))
        }
        ShotAim::Unit(entity) => {
            let mut query = world
                .query_one::<(&UnitBody, &Position, &Life)>(entity)
                .ok()?;
            let (body, pos, life) = query.get()?;
            if life.state != LifeState::Alive {
                return None;
            }
            let center = pos.y - body.kind.archetype().height / 2.0;
            Some((DVec2::new(pos.x, center), PROJECTILE_UNIT_HIT_RADIUS))
        }
    }
}

pub fn run(
    world: &mut World,
    sides: &mut PerSide<SideState>,
    lane: &LaneGeometry,
    events: &mut Vec<MatchEvent>,
    dt: f64,
) {
    // Collect first: impacts mutate other entities.
    let shots: Vec<(Entity, Shot, Position)> = world
        .query::<(&Shot, &Position)>()
        .iter()
        .filter(|(_, (shot, _))| !shot.spent)
        .map(|(entity, (shot, pos))| (entity, *shot, *pos))
        .collect();

    for (entity, shot, pos) in shots {
        let here = DVec2::new(pos.x, pos.y);
        let mut next = here;
        let mut spent = false;

        match aim_point(world, lane, shot.aim) {
            None => spent = true,
            Some((target, hit_radius)) => {
                let to_target = target - here;
                let distance = to_target.length();
                // A step that reaches the target counts as an impact.
                if distance < hit_radius || shot.speed * dt >= distance {
                    spent = true;
                    match shot.aim {
                        ShotAim::Unit(victim) => {
                            let _ = combat::damage_unit(world, victim, shot.damage, events);
                        }
                        ShotAim::Base(side) => {
                            combat::damage_base(sides, side, shot.damage, events);
                        }
                    }
                } else {
                    next = here + to_target.normalize_or_zero() * shot.speed * dt;
                }
            }
        }

        if let Ok((flying, position)) = world.query_one_mut::<(&mut Shot, &mut Position)>(entity)
        {
            flying.spent = spent;
            *position = Position::new(next.x, next.y);
        }
    }
}
