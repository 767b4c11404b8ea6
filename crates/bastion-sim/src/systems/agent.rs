//! Agent system: runs each agent-controlled side's planner and applies
//! its orders through the same paths a human controller uses.

use hecs::World;

use bastion_agent::analysis::{BattlefieldView, UnitSample};
use bastion_agent::draws::DecisionDraws;
use bastion_agent::planner::{Planner, PlanTransition};
use bastion_agent::tuning::AgentTuning;
use bastion_core::components::{Health, Life, UnitBody};
use bastion_core::config::StageConfig;
use bastion_core::enums::{LifeState, Side};
use bastion_core::events::MatchEvent;
use bastion_core::types::{LaneGeometry, PerSide, Position};

use crate::side::SideState;
use crate::systems::area_strike;

/// Plain-data picture of the lane for `side`'s agent.
pub fn battlefield_view(
    world: &World,
    sides: &PerSide<SideState>,
    stage: &StageConfig,
    lane: &LaneGeometry,
    side: Side,
) -> BattlefieldView {
    let mut alive: Vec<(u32, UnitSample)> = world
        .query::<(&UnitBody, &Position, &Health, &Life)>()
        .iter()
        .filter(|(_, (_, _, _, life))| life.state == LifeState::Alive)
        .map(|(_, (body, pos, health, _))| {
            (
                body.id.0,
                UnitSample {
                    side: body.side,
                    kind: body.kind,
                    x: pos.x,
                    health: health.current,
                },
            )
        })
        .collect();
    alive.sort_by_key(|&(id, _)| id);

    let state = &sides[side];
    BattlefieldView {
        side,
        currency: state.currency,
        own_base_x: lane.base_x(side),
        opposing_base_x: lane.base_x(side.opponent()),
        lane_width: lane.width,
        units: alive.into_iter().map(|(_, sample)| sample).collect(),
        queue_len: state.queue.len(),
        unlocked: stage.unlocked.clone(),
        area_strike: stage.area_strike,
        strike_cooldown: state.strike_cooldown,
    }
}

#[allow(clippy::too_many_arguments)]
pub fn run(
    world: &mut World,
    sides: &mut PerSide<SideState>,
    planners: &mut PerSide<Option<Planner>>,
    stage: &StageConfig,
    lane: &LaneGeometry,
    tuning: &AgentTuning,
    draws: &mut dyn DecisionDraws,
    events: &mut Vec<MatchEvent>,
    dt: f64,
) {
    for side in Side::BOTH {
        let Some(planner) = planners[side].as_mut() else {
            continue;
        };

        let view = battlefield_view(world, sides, stage, lane, side);
        let orders = planner.update(dt, &view, tuning, draws);

        if let Some(note) = orders.decision {
            for transition in note.plan {
                events.push(match transition {
                    PlanTransition::Started(plan) => MatchEvent::PlanStarted {
                        side,
                        kind: plan.kind,
                        count: plan.count,
                    },
                    PlanTransition::Ended(plan, outcome) => MatchEvent::PlanEnded {
                        side,
                        kind: plan.kind,
                        count: plan.count,
                        outcome,
                    },
                });
            }
            events.push(MatchEvent::AgentDecided {
                side,
                rule: note.rule,
                mode: note.mode,
                queued: orders.enqueue.clone(),
            });
        }

        for kind in orders.enqueue {
            // Overflow drops the request.
            let _ = sides[side].queue.push(kind);
        }
        if let Some(target_x) = orders.strike_at {
            let _ = area_strike::call(world, sides, stage, lane, events, side, target_x);
        }
    }
}
