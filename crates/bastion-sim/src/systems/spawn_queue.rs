//! Spawn queue system plus the shared unit purchase path.

use hecs::World;
use tracing::debug;

use bastion_core::config::StageConfig;
use bastion_core::enums::{Side, UnitKind};
use bastion_core::error::CommandError;
use bastion_core::events::MatchEvent;
use bastion_core::types::{LaneGeometry, PerSide, UnitId};

use crate::side::SideState;
use crate::world_setup;

/// Buy and deploy a unit. Used by direct commands and the queue drain.
#[allow(clippy::too_many_arguments)]
pub fn purchase(
    world: &mut World,
    sides: &mut PerSide<SideState>,
    stage: &StageConfig,
    lane: &LaneGeometry,
    next_unit_id: &mut u32,
    events: &mut Vec<MatchEvent>,
    side: Side,
    kind: UnitKind,
) -> Result<UnitId, CommandError> {
    if !stage.is_unlocked(kind) {
        return Err(CommandError::ArchetypeLocked(kind));
    }
    let state = &mut sides[side];
    let cost = kind.cost();
    if !state.can_afford(cost) {
        return Err(CommandError::InsufficientFunds {
            required: cost,
            available: state.currency,
        });
    }
    state.currency -= cost;

    let id = UnitId(*next_unit_id);
    *next_unit_id += 1;
    world_setup::spawn_unit(world, lane, id, side, kind);
    events.push(MatchEvent::UnitSpawned { id, side, kind });
    Ok(id)
}

/// Look at each side's queue head: drop it if locked, deploy it if
/// affordable, otherwise leave it waiting.
pub fn run(
    world: &mut World,
    sides: &mut PerSide<SideState>,
    stage: &StageConfig,
    lane: &LaneGeometry,
    next_unit_id: &mut u32,
    events: &mut Vec<MatchEvent>,
) {
    for side in Side::BOTH {
        let Some(kind) = sides[side].queue.front() else {
            continue;
        };

        if !stage.is_unlocked(kind) {
            sides[side].queue.pop_front();
            debug!(?side, %kind, "dropped locked spawn");
            events.push(MatchEvent::SpawnDropped { side, kind });
            continue;
        }

        if purchase(world, sides, stage, lane, next_unit_id, events, side, kind).is_ok() {
            sides[side].queue.pop_front();
        }
    }
}
