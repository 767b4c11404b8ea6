//! Planning agent: decision cadence, saving plans, and orders.

use bastion_core::enums::{AgentMode, PlanOutcome, UnitKind};
use tracing::debug;

use crate::analysis::{analyze, BattlefieldView};
use crate::draws::DecisionDraws;
use crate::rules::{decide, DecisionContext, PlanChange, Rule, SavingPlan};
use crate::strike;
use crate::tuning::AgentTuning;

/// What the agent wants the simulation to do this tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AgentOrders {
    /// Kinds to push onto the side's spawn queue, in order.
    pub enqueue: Vec<UnitKind>,
    /// Lane position for an area strike.
    pub strike_at: Option<f64>,
    /// Set on ticks that ran a decision cycle.
    pub decision: Option<DecisionNote>,
}

/// A saving-plan lifecycle change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanTransition {
    Started(SavingPlan),
    Ended(SavingPlan, PlanOutcome),
}

/// What one decision cycle concluded, minus the spawns.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionNote {
    pub rule: Rule,
    pub mode: AgentMode,
    /// At most two: an abandoned plan followed by its replacement.
    pub plan: Vec<PlanTransition>,
}

/// Per-side agent state. Owned by the simulation engine.
#[derive(Debug, Clone)]
pub struct Planner {
    decision_cooldown: f64,
    base_interval: f64,
    plan: Option<SavingPlan>,
    mode: AgentMode,
    last_rule: Option<Rule>,
}

impl Planner {
    /// `base_interval` is the stage's seconds between decision cycles.
    pub fn new(base_interval: f64) -> Self {
        Self {
            decision_cooldown: 0.0,
            base_interval,
            plan: None,
            mode: AgentMode::Idle,
            last_rule: None,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.base_interval);
    }

    pub fn mode(&self) -> AgentMode {
        self.mode
    }

    pub fn plan(&self) -> Option<SavingPlan> {
        self.plan
    }

    pub fn last_rule(&self) -> Option<Rule> {
        self.last_rule
    }

    pub fn decision_cooldown(&self) -> f64 {
        self.decision_cooldown
    }

    /// Advance the agent by `dt`. Runs a decision cycle when the cadence
    /// allows it and checks for an area strike every tick.
    pub fn update(
        &mut self,
        dt: f64,
        view: &BattlefieldView,
        tuning: &AgentTuning,
        draws: &mut dyn DecisionDraws,
    ) -> AgentOrders {
        let mut orders = AgentOrders::default();

        self.decision_cooldown -= dt;
        // An idle queue with money in the bank should not wait out the interval.
        if view.queue_len == 0 && view.currency >= UnitKind::cheapest_melee().cost() {
            self.decision_cooldown = 0.0;
        }

        if self.decision_cooldown <= 0.0 {
            let luck = draws.next_uniform();
            let (enqueue, note) = self.decision_cycle(view, tuning, luck);
            orders.enqueue = enqueue;
            orders.decision = Some(note);
            let jitter = draws.next_uniform();
            self.decision_cooldown = self.base_interval + tuning.interval_jitter_secs * jitter;
        }

        orders.strike_at = strike::choose_target(view, tuning);
        orders
    }

    fn decision_cycle(
        &mut self,
        view: &BattlefieldView,
        tuning: &AgentTuning,
        luck: f64,
    ) -> (Vec<UnitKind>, DecisionNote) {
        let analysis = analyze(view, tuning);
        let ctx = DecisionContext {
            analysis: &analysis,
            currency: view.currency,
            luck,
            plan: self.plan,
            unlocked: &view.unlocked,
            tuning,
        };
        let decision = decide(&ctx);
        let mut transitions = Vec::new();

        match decision.plan {
            PlanChange::Keep => {}
            PlanChange::Start(plan) => {
                if let Some(old) = self.plan.replace(plan) {
                    transitions.push(PlanTransition::Ended(old, PlanOutcome::Abandoned));
                }
                debug!(side = ?view.side, kind = %plan.kind, count = plan.count, "saving plan started");
                transitions.push(PlanTransition::Started(plan));
            }
            PlanChange::Clear(outcome) => {
                if let Some(plan) = self.plan.take() {
                    debug!(
                        side = ?view.side,
                        kind = %plan.kind,
                        count = plan.count,
                        rule = ?decision.rule,
                        ?outcome,
                        "saving plan ended"
                    );
                    transitions.push(PlanTransition::Ended(plan, outcome));
                }
            }
        }

        debug!(
            side = ?view.side,
            rule = ?decision.rule,
            mode = ?decision.mode,
            queued = ?decision.enqueue,
            currency = view.currency,
            threat = analysis.threat_distance,
            ratio = analysis.power_ratio,
            "agent decision"
        );

        self.mode = decision.mode;
        self.last_rule = Some(decision.rule);
        let note = DecisionNote {
            rule: decision.rule,
            mode: decision.mode,
            plan: transitions,
        };
        (decision.enqueue, note)
    }
}
