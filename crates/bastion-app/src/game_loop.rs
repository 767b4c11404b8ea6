//! Game loop: steps the engine at a fixed rate until the match is decided
//! or the time limit runs out.
//!
//! Human commands arrive over an `mpsc` channel and are applied at tick
//! boundaries. With `realtime` set the loop sleeps to hold the nominal
//! tick rate; otherwise it runs as fast as it can.

use std::collections::BTreeMap;
use std::io::BufRead;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, warn};

use bastion_core::commands::MatchCommand;
use bastion_core::constants::{DT, TICK_RATE};
use bastion_core::enums::{AgentRule, MatchOutcome, PlanOutcome, Side, UnitKind};
use bastion_core::events::MatchEvent;
use bastion_core::progress::star_rating;
use bastion_core::types::PerSide;
use bastion_sim::MatchEngine;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Messages into the loop.
#[derive(Debug, Clone, PartialEq)]
pub enum LoopCommand {
    Match(MatchCommand),
    Shutdown,
}

#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Stop after this much simulated time even if nobody has won.
    pub max_secs: f64,
    /// Pace ticks to wall-clock time.
    pub realtime: bool,
    /// Keep every agent decision and plan event in `MatchReport::agent_log`.
    pub record_agent_log: bool,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            max_secs: 600.0,
            realtime: false,
            record_agent_log: false,
        }
    }
}

/// What one side's planning agent did over the match.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentSummary {
    /// Decision cycles run.
    pub decisions: u32,
    /// How often each rule won a cycle.
    pub rules: BTreeMap<AgentRule, u32>,
    pub plans_started: u32,
    pub plans_ended: BTreeMap<PlanOutcome, u32>,
}

/// A timestamped agent event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentLogEntry {
    pub elapsed_secs: f64,
    pub event: MatchEvent,
}

/// Summary of a finished (or timed-out) match.
#[derive(Debug, Clone, Serialize)]
pub struct MatchReport {
    pub stage: u32,
    pub outcome: MatchOutcome,
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub base_health: PerSide<f64>,
    pub units_spawned: PerSide<u32>,
    pub spawns_by_kind: PerSide<BTreeMap<UnitKind, u32>>,
    pub units_lost: PerSide<u32>,
    pub strikes_called: PerSide<u32>,
    /// Empty for human-controlled sides.
    pub agents: PerSide<AgentSummary>,
    /// Stars earned by the home side.
    pub home_stars: u8,
    /// Filled only when `LoopOptions::record_agent_log` is set.
    #[serde(skip)]
    pub agent_log: Vec<AgentLogEntry>,
}

impl MatchReport {
    fn new(stage: u32) -> Self {
        Self {
            stage,
            outcome: MatchOutcome::Ongoing,
            ticks: 0,
            elapsed_secs: 0.0,
            base_health: PerSide::default(),
            units_spawned: PerSide::default(),
            spawns_by_kind: PerSide::default(),
            units_lost: PerSide::default(),
            strikes_called: PerSide::default(),
            agents: PerSide::default(),
            home_stars: 0,
            agent_log: Vec::new(),
        }
    }

    /// Fold one event into the totals. Returns true for agent events.
    fn tally(&mut self, event: &MatchEvent) -> bool {
        match event {
            MatchEvent::UnitSpawned { side, kind, .. } => {
                self.units_spawned[*side] += 1;
                *self.spawns_by_kind[*side].entry(*kind).or_default() += 1;
            }
            MatchEvent::UnitKilled { side, .. } => self.units_lost[*side] += 1,
            MatchEvent::StrikeCalled { side, .. } => self.strikes_called[*side] += 1,
            MatchEvent::AgentDecided { side, rule, .. } => {
                let agent = &mut self.agents[*side];
                agent.decisions += 1;
                *agent.rules.entry(*rule).or_default() += 1;
                return true;
            }
            MatchEvent::PlanStarted { side, .. } => {
                self.agents[*side].plans_started += 1;
                return true;
            }
            MatchEvent::PlanEnded { side, outcome, .. } => {
                *self.agents[*side].plans_ended.entry(*outcome).or_default() += 1;
                return true;
            }
            _ => {}
        }
        false
    }
}

/// Run the loop. Returns when the match is decided, the time limit is
/// reached, or a `Shutdown` arrives.
pub fn run_match(
    engine: &mut MatchEngine,
    options: &LoopOptions,
    commands: &mpsc::Receiver<LoopCommand>,
) -> MatchReport {
    let mut report = MatchReport::new(engine.stage().id);
    let mut next_tick_time = Instant::now();
    let mut accepting = true;

    while engine.outcome() == MatchOutcome::Ongoing && engine.time().elapsed_secs < options.max_secs
    {
        // 1. Drain pending commands
        while accepting {
            match commands.try_recv() {
                Ok(LoopCommand::Match(command)) => {
                    if let Err(err) = engine.apply(command.clone()) {
                        warn!(?command, %err, "command rejected");
                    }
                }
                Ok(LoopCommand::Shutdown) => return finish(engine, report),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => accepting = false,
            }
        }

        // 2. Advance one tick
        engine.advance(DT);

        // 3. Tally feedback
        let elapsed_secs = engine.time().elapsed_secs;
        for event in engine.take_events() {
            if report.tally(&event) && options.record_agent_log {
                report.agent_log.push(AgentLogEntry { elapsed_secs, event });
            }
        }

        // 4. Hold the tick rate
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind; reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }

    finish(engine, report)
}

fn finish(engine: &MatchEngine, mut report: MatchReport) -> MatchReport {
    let time = engine.time();
    report.outcome = engine.outcome();
    report.ticks = time.tick;
    report.elapsed_secs = time.elapsed_secs;
    for side in Side::BOTH {
        report.base_health[side] = engine.side(side).base_health;
    }
    let home = engine.side(Side::Home);
    let fraction = if home.base_max_health > 0.0 {
        home.base_health / home.base_max_health
    } else {
        0.0
    };
    report.home_stars = star_rating(report.outcome == MatchOutcome::HomeWon, fraction);
    debug!(outcome = ?report.outcome, ticks = report.ticks, "loop finished");
    report
}

/// Parse one line of the command protocol. Blank lines yield `None`.
pub fn parse_command_line(line: &str) -> Option<Result<MatchCommand, serde_json::Error>> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    Some(serde_json::from_str(line))
}

/// Forward JSON commands from `reader`, one per line, into a channel.
///
/// Runs on its own thread. Malformed lines are logged and skipped; the
/// channel closes at end of input.
pub fn spawn_command_reader<R>(reader: R) -> std::io::Result<mpsc::Receiver<LoopCommand>>
where
    R: BufRead + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    std::thread::Builder::new()
        .name("bastion-commands".into())
        .spawn(move || {
            for line in reader.lines() {
                let Ok(line) = line else {
                    break;
                };
                match parse_command_line(&line) {
                    None => {}
                    Some(Ok(command)) => {
                        if tx.send(LoopCommand::Match(command)).is_err() {
                            break;
                        }
                    }
                    Some(Err(err)) => warn!(%err, line = %line, "ignoring malformed command"),
                }
            }
        })?;
    Ok(rx)
}
