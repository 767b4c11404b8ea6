//! ECS systems that operate on the match world each advance.
//!
//! Systems are free functions over `&mut World` (or `&World` for
//! read-only) plus whatever match state they need. They own no state.

pub mod agent;
pub mod area_strike;
pub mod cleanup;
pub mod economy;
pub mod projectiles;
pub mod snapshot;
pub mod spawn_queue;
pub mod turret;
pub mod units;
