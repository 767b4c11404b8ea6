//! Base turret system.

use hecs::World;
use tracing::trace;

use bastion_core::config::StageConfig;
use bastion_core::constants::TURRET_PROJECTILE_SPEED;
use bastion_core::enums::Side;
use bastion_core::events::MatchEvent;
use bastion_core::types::{LaneGeometry, PerSide};

use crate::combat::{self, ShotAim};
use crate::side::SideState;
use crate::world_setup;

/// Count down each turret; on expiry fire at the nearest opposing unit
/// in range. With nothing in range the turret stays ready.
pub fn run(
    world: &mut World,
    sides: &mut PerSide<SideState>,
    stage: &StageConfig,
    lane: &LaneGeometry,
    events: &mut Vec<MatchEvent>,
    dt: f64,
) {
    let Some(turret) = stage.turret else {
        return;
    };

    for side in Side::BOTH {
        let state = &mut sides[side];
        state.turret_cooldown = (state.turret_cooldown - dt).max(0.0);
        if state.turret_cooldown > 0.0 {
            continue;
        }

        let base_x = lane.base_x(side);
        let Some((target, dist)) =
            combat::nearest_alive(world, side.opponent(), base_x, turret.range)
        else {
            continue;
        };

        world_setup::spawn_shot(
            world,
            lane.base_point(side),
            side,
            ShotAim::Unit(target),
            turret.damage,
            TURRET_PROJECTILE_SPEED,
        );
        state.turret_cooldown = 1.0 / turret.rate;
        trace!(?side, dist, "turret fired");
        events.push(MatchEvent::ShotFired { side, x: base_x });
    }
}
