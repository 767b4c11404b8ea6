//! Cleanup system: despawns spent projectiles, finished strikes, and
//! removed corpses.

use hecs::{Entity, World};

use bastion_core::components::{AreaStrike, Life};
use bastion_core::enums::{LifeState, StrikePhase};

use crate::combat::Shot;

/// Uses a pre-allocated buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();

    for (entity, shot) in world.query_mut::<&Shot>() {
        if shot.spent {
            despawn_buffer.push(entity);
        }
    }

    for (entity, strike) in world.query_mut::<&AreaStrike>() {
        if strike.phase == StrikePhase::Finished {
            despawn_buffer.push(entity);
        }
    }

    for (entity, life) in world.query_mut::<&Life>() {
        if life.state == LifeState::Removed {
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
