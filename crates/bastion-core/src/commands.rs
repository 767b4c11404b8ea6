//! Commands accepted by the simulation from a human controller or the agent.
//!
//! Both controllers go through the same entry points, so the agent has
//! no privileged access to the match.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::UnitId;

/// All possible controller actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum MatchCommand {
    /// Buy and deploy a unit immediately.
    SpawnUnit { side: Side, kind: UnitKind },
    /// Add a unit to the side's pending spawn queue.
    QueueUnit { side: Side, kind: UnitKind },
    /// Call an area strike on a lane coordinate.
    TriggerAreaStrike { side: Side, target_x: f64 },
}

/// Successful result of a command.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum CommandAck {
    Spawned(UnitId),
    Queued,
    /// The queue was full; the request was dropped.
    QueueFull,
    StrikeCalled,
}
