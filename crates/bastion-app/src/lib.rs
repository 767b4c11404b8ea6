//! BASTION headless runner.
//!
//! Wires the simulation to a fixed-step game loop, a line-oriented JSON
//! command channel for a human-controlled side, and the campaign
//! progress file.

pub mod error;
pub mod game_loop;
pub mod session;

pub use bastion_core as core;
