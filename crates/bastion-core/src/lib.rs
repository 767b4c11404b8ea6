//! Core types and definitions for the BASTION lane battle.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the unit catalog, components, commands, snapshots, events, stage
//! configuration, and the persisted progress record.
//! It has no dependency on the ECS or on any random source.

pub mod catalog;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod progress;
pub mod state;
pub mod types;
