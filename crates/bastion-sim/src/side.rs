//! Per-side match state: economy, base, ability timers, spawn queue.

use std::collections::VecDeque;

use bastion_core::config::StageConfig;
use bastion_core::enums::{Side, UnitKind};

/// Bounded FIFO of pending spawns. Pushing into a full queue drops the request.
#[derive(Debug, Clone)]
pub struct SpawnQueue {
    items: VecDeque<UnitKind>,
    capacity: usize,
}

impl SpawnQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns false if the queue is full.
    pub fn push(&mut self, kind: UnitKind) -> bool {
        if self.items.len() >= self.capacity {
            return false;
        }
        self.items.push_back(kind);
        true
    }

    pub fn front(&self) -> Option<UnitKind> {
        self.items.front().copied()
    }

    pub fn pop_front(&mut self) -> Option<UnitKind> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn to_vec(&self) -> Vec<UnitKind> {
        self.items.iter().copied().collect()
    }
}

#[derive(Debug, Clone)]
pub struct SideState {
    pub currency: f64,
    pub base_health: f64,
    pub base_max_health: f64,
    /// Seconds until the area strike can be called again.
    pub strike_cooldown: f64,
    /// Seconds until the base turret may fire.
    pub turret_cooldown: f64,
    pub queue: SpawnQueue,
}

impl SideState {
    /// Fresh state for `side` at the start of a stage.
    pub fn for_stage(stage: &StageConfig, side: Side, queue_capacity: usize) -> Self {
        let base = stage.starting_base_health[side];
        Self {
            currency: stage.starting_currency[side],
            base_health: base,
            base_max_health: base,
            strike_cooldown: 0.0,
            turret_cooldown: 0.0,
            queue: SpawnQueue::new(queue_capacity),
        }
    }

    pub fn can_afford(&self, cost: f64) -> bool {
        self.currency >= cost
    }

    pub fn base_destroyed(&self) -> bool {
        self.base_health <= 0.0
    }
}
