//! Opponent planning agent for BASTION.
//!
//! Reads a plain-data picture of the battlefield, runs an ordered decision
//! table on a jittered cadence, and returns spawn and area strike orders.
//! No ECS dependency; randomness is injected through [`draws::DecisionDraws`].

pub mod analysis;
pub mod draws;
pub mod planner;
pub mod rules;
pub mod strike;
pub mod tuning;

pub use bastion_core as core;

#[cfg(test)]
mod tests;
