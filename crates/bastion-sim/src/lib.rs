//! Simulation engine for BASTION.
//!
//! Owns the hecs ECS world, both sides' economies and spawn queues, and
//! the planning agents. Advances the lane battle by variable time steps
//! and produces `MatchSnapshot`s for renderers.

pub mod combat;
pub mod engine;
pub mod side;
pub mod systems;
pub mod world_setup;

pub use bastion_core as core;
pub use engine::{Controller, MatchConfig, MatchEngine};
