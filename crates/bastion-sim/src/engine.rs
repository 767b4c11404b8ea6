//! Match engine: the core of the game.
//!
//! `MatchEngine` owns the hecs ECS world, both sides' state, and the
//! planning agents. It accepts controller commands, advances the battle,
//! and produces `MatchSnapshot`s. Completely headless, enabling
//! deterministic testing.

use hecs::{Entity, World};
use tracing::info;

use bastion_agent::draws::{DecisionDraws, SeededDraws};
use bastion_agent::planner::Planner;
use bastion_agent::tuning::AgentTuning;
use bastion_core::commands::{CommandAck, MatchCommand};
use bastion_core::config::StageConfig;
use bastion_core::constants::MAX_DELTA_SECS;
use bastion_core::enums::{MatchOutcome, Side, UnitKind};
use bastion_core::error::CommandError;
use bastion_core::events::MatchEvent;
use bastion_core::state::MatchSnapshot;
use bastion_core::types::{LaneGeometry, PerSide, SimTime, UnitId};

use crate::side::SideState;
use crate::systems;

/// Who drives a side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Controller {
    /// Commands arrive from outside the engine.
    #[default]
    Human,
    /// The built-in planning agent.
    Agent,
}

/// Configuration for starting a new match.
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Seed for the agents' draws. Same seed = same match.
    pub seed: u64,
    pub stage: StageConfig,
    pub lane: LaneGeometry,
    pub tuning: AgentTuning,
    pub home: Controller,
    pub away: Controller,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            stage: StageConfig::default(),
            lane: LaneGeometry::default(),
            tuning: AgentTuning::default(),
            home: Controller::Human,
            away: Controller::Agent,
        }
    }
}

impl MatchConfig {
    pub fn controller(&self, side: Side) -> Controller {
        match side {
            Side::Home => self.home,
            Side::Away => self.away,
        }
    }
}

/// The match engine. Owns the ECS world and all match state.
pub struct MatchEngine {
    world: World,
    config: MatchConfig,
    time: SimTime,
    outcome: MatchOutcome,
    sides: PerSide<SideState>,
    planners: PerSide<Option<Planner>>,
    draws: Box<dyn DecisionDraws>,
    /// Set when the draws came from `config.seed` and should be re-seeded on restart.
    reseed: bool,
    next_unit_id: u32,
    events: Vec<MatchEvent>,
    despawn_buffer: Vec<Entity>,
}

impl MatchEngine {
    /// Create a match whose agents draw from a ChaCha8 stream seeded by `config.seed`.
    pub fn new(config: MatchConfig) -> Self {
        let draws = Box::new(SeededDraws::new(config.seed));
        let mut engine = Self::with_draws(config, draws);
        engine.reseed = true;
        engine
    }

    /// Create a match with an injected draw source.
    pub fn with_draws(config: MatchConfig, draws: Box<dyn DecisionDraws>) -> Self {
        let sides = build_sides(&config);
        let planners = build_planners(&config);
        Self {
            world: World::new(),
            config,
            time: SimTime::default(),
            outcome: MatchOutcome::Ongoing,
            sides,
            planners,
            draws,
            reseed: false,
            next_unit_id: 0,
            events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Advance the match by `dt` seconds (clamped to `MAX_DELTA_SECS`).
    ///
    /// Non-positive or non-finite steps, and steps after the match is
    /// decided, change nothing.
    pub fn advance(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 || self.outcome != MatchOutcome::Ongoing {
            return;
        }
        let dt = dt.min(MAX_DELTA_SECS);
        self.run_systems(dt);
        self.time.advance(dt);
        self.check_outcome();
    }

    /// Buy and deploy a unit for `side` right now.
    pub fn spawn_unit(&mut self, side: Side, kind: UnitKind) -> Result<UnitId, CommandError> {
        self.ensure_ongoing()?;
        systems::spawn_queue::purchase(
            &mut self.world,
            &mut self.sides,
            &self.config.stage,
            &self.config.lane,
            &mut self.next_unit_id,
            &mut self.events,
            side,
            kind,
        )
    }

    /// Call an area strike for `side` centered on lane coordinate `target_x`.
    pub fn trigger_area_strike(&mut self, side: Side, target_x: f64) -> Result<(), CommandError> {
        self.ensure_ongoing()?;
        systems::area_strike::call(
            &mut self.world,
            &mut self.sides,
            &self.config.stage,
            &self.config.lane,
            &mut self.events,
            side,
            target_x,
        )
    }

    /// Add a unit to `side`'s spawn queue. Returns false if the queue is
    /// full or the match is over.
    pub fn enqueue_spawn(&mut self, side: Side, kind: UnitKind) -> bool {
        if self.outcome != MatchOutcome::Ongoing {
            return false;
        }
        self.sides[side].queue.push(kind)
    }

    /// Apply a serialized controller command.
    pub fn apply(&mut self, command: MatchCommand) -> Result<CommandAck, CommandError> {
        match command {
            MatchCommand::SpawnUnit { side, kind } => {
                self.spawn_unit(side, kind).map(CommandAck::Spawned)
            }
            MatchCommand::QueueUnit { side, kind } => {
                self.ensure_ongoing()?;
                if self.enqueue_spawn(side, kind) {
                    Ok(CommandAck::Queued)
                } else {
                    Ok(CommandAck::QueueFull)
                }
            }
            MatchCommand::TriggerAreaStrike { side, target_x } => self
                .trigger_area_strike(side, target_x)
                .map(|()| CommandAck::StrikeCalled),
        }
    }

    /// Drain feedback events emitted since the last call.
    pub fn take_events(&mut self) -> Vec<MatchEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.config.stage.id,
            self.outcome,
            &self.config.lane,
            &self.sides,
            &self.planners,
        )
    }

    /// Reset the world, both sides, the agents, the outcome, and the clock.
    pub fn restart(&mut self) {
        self.world.clear();
        self.sides = build_sides(&self.config);
        self.planners = build_planners(&self.config);
        if self.reseed {
            self.draws = Box::new(SeededDraws::new(self.config.seed));
        }
        self.time = SimTime::default();
        self.outcome = MatchOutcome::Ongoing;
        self.next_unit_id = 0;
        self.events.clear();
        self.despawn_buffer.clear();
        info!(stage = self.config.stage.id, "match restarted");
    }

    /// Switch to another stage and restart.
    pub fn restart_with_stage(&mut self, stage: StageConfig) {
        self.config.stage = stage;
        self.restart();
    }

    pub fn outcome(&self) -> MatchOutcome {
        self.outcome
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn stage(&self) -> &StageConfig {
        &self.config.stage
    }

    pub fn side(&self, side: Side) -> &SideState {
        &self.sides[side]
    }

    pub fn planner(&self, side: Side) -> Option<&Planner> {
        self.planners[side].as_ref()
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable side state for test setups.
    #[cfg(test)]
    pub fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side]
    }

    /// Mutable world access for test setups.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn ensure_ongoing(&self) -> Result<(), CommandError> {
        if self.outcome == MatchOutcome::Ongoing {
            Ok(())
        } else {
            Err(CommandError::MatchFinished)
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let stage = &self.config.stage;
        let lane = &self.config.lane;

        // 1. Income and ability cooldowns
        systems::economy::run(&mut self.sides, stage, dt);
        // 2. Planning agents
        systems::agent::run(
            &mut self.world,
            &mut self.sides,
            &mut self.planners,
            stage,
            lane,
            &self.config.tuning,
            self.draws.as_mut(),
            &mut self.events,
            dt,
        );
        // 3. Spawn queues
        systems::spawn_queue::run(
            &mut self.world,
            &mut self.sides,
            stage,
            lane,
            &mut self.next_unit_id,
            &mut self.events,
        );
        // 4. Base turrets
        systems::turret::run(&mut self.world, &mut self.sides, stage, lane, &mut self.events, dt);
        // 5. Units
        systems::units::run(&mut self.world, &mut self.sides, lane, &mut self.events, dt);
        // 6. Projectiles
        systems::projectiles::run(&mut self.world, &mut self.sides, lane, &mut self.events, dt);
        // 7. Area strikes
        systems::area_strike::run(&mut self.world, &mut self.events, dt);
        // 8. Cleanup
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }

    // 9. Termination
    fn check_outcome(&mut self) {
        let outcome = if self.sides.home.base_destroyed() {
            MatchOutcome::AwayWon
        } else if self.sides.away.base_destroyed() {
            MatchOutcome::HomeWon
        } else {
            return;
        };
        self.outcome = outcome;
        self.events.push(MatchEvent::MatchEnded { outcome });
        info!(?outcome, elapsed = self.time.elapsed_secs, "match decided");
    }
}

fn build_sides(config: &MatchConfig) -> PerSide<SideState> {
    let capacity = config.tuning.queue_capacity;
    PerSide::new(
        SideState::for_stage(&config.stage, Side::Home, capacity),
        SideState::for_stage(&config.stage, Side::Away, capacity),
    )
}

fn build_planners(config: &MatchConfig) -> PerSide<Option<Planner>> {
    let planner_for = |side: Side| match config.controller(side) {
        Controller::Agent => Some(Planner::new(config.stage.agent_interval_secs)),
        Controller::Human => None,
    };
    PerSide::new(planner_for(Side::Home), planner_for(Side::Away))
}
