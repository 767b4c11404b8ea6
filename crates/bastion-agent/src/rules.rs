//! The agent's ordered decision table.
//!
//! Each rule is a guard over a [`DecisionContext`]. Rules are tried in
//! table order and the first one that acts wins. A rule may instead drop
//! the active saving plan and let evaluation continue further down.
//! Pure functions over plain data; all randomness arrives as `luck`.

use bastion_core::enums::{AgentMode, PlanOutcome, UnitKind};

use crate::analysis::BattlefieldAnalysis;
use crate::tuning::AgentTuning;

/// Rule names, in table order. Shared with the event stream.
pub use bastion_core::enums::AgentRule as Rule;

/// Accumulate currency until `count` units of `kind` can be bought at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SavingPlan {
    pub kind: UnitKind,
    pub count: u32,
}

impl SavingPlan {
    pub fn total_cost(&self) -> f64 {
        self.kind.cost() * self.count as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanChange {
    Keep,
    Start(SavingPlan),
    /// Drop the active plan, if any, for the given reason.
    Clear(PlanOutcome),
}

/// What a rule wants done. An empty `enqueue` means wait.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub mode: AgentMode,
    pub plan: PlanChange,
    pub enqueue: Vec<UnitKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Rule does not apply; try the next one.
    Pass,
    /// Abandon the saving plan and keep evaluating.
    DropPlan,
    Act(Action),
}

/// The outcome of one decision cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct Decision {
    pub rule: Rule,
    pub mode: AgentMode,
    pub plan: PlanChange,
    pub enqueue: Vec<UnitKind>,
}

/// Inputs to one decision cycle.
#[derive(Debug, Clone, Copy)]
pub struct DecisionContext<'a> {
    pub analysis: &'a BattlefieldAnalysis,
    pub currency: f64,
    /// The single uniform draw shared by every probabilistic guard this cycle.
    pub luck: f64,
    pub plan: Option<SavingPlan>,
    pub unlocked: &'a [UnitKind],
    pub tuning: &'a AgentTuning,
}

impl DecisionContext<'_> {
    pub fn is_unlocked(&self, kind: UnitKind) -> bool {
        self.unlocked.contains(&kind)
    }

    /// Unlocked and affordable right now.
    pub fn can_buy(&self, kind: UnitKind) -> bool {
        self.is_unlocked(kind) && self.currency >= kind.cost()
    }

    fn own_count(&self, kind: UnitKind) -> u32 {
        self.analysis.own.count(kind)
    }
}

pub type RuleFn = fn(&DecisionContext) -> Verdict;

pub const DECISION_TABLE: &[(Rule, RuleFn)] = &[
    (Rule::Emergency, emergency),
    (Rule::Defense, defense),
    (Rule::SavingPlan, saving_plan),
    (Rule::EscortRanged, escort_ranged),
    (Rule::Opening, opening),
    (Rule::RangedShortage, ranged_shortage),
    (Rule::FrontlineBalance, frontline_balance),
    (Rule::Reinforce, reinforce),
];

/// Run the table and return the first decision that acts.
pub fn decide(ctx: &DecisionContext) -> Decision {
    let mut ctx = *ctx;
    let mut dropped = false;

    for &(rule, guard) in DECISION_TABLE {
        match guard(&ctx) {
            Verdict::Pass => {}
            Verdict::DropPlan => {
                ctx.plan = None;
                dropped = true;
            }
            Verdict::Act(action) => {
                let plan = match action.plan {
                    PlanChange::Keep if dropped => PlanChange::Clear(PlanOutcome::Abandoned),
                    other => other,
                };
                return Decision {
                    rule,
                    mode: action.mode,
                    plan,
                    enqueue: action.enqueue,
                };
            }
        }
    }

    // Reinforce always acts, so this is only reached with a custom table.
    Decision {
        rule: Rule::Reinforce,
        mode: AgentMode::Idle,
        plan: if dropped {
            PlanChange::Clear(PlanOutcome::Abandoned)
        } else {
            PlanChange::Keep
        },
        enqueue: Vec::new(),
    }
}

fn build(enqueue: Vec<UnitKind>) -> Verdict {
    Verdict::Act(Action {
        mode: AgentMode::ReactiveBuild,
        plan: PlanChange::Keep,
        enqueue,
    })
}

fn start_plan(kind: UnitKind, count: u32) -> Verdict {
    let plan = SavingPlan { kind, count };
    Verdict::Act(Action {
        mode: AgentMode::Saving { kind, count },
        plan: PlanChange::Start(plan),
        enqueue: Vec::new(),
    })
}

fn emergency(ctx: &DecisionContext) -> Verdict {
    if ctx.analysis.threat_distance >= ctx.tuning.emergency_distance {
        return Verdict::Pass;
    }
    let melee = UnitKind::cheapest_melee();
    let enqueue = if ctx.can_buy(melee) { vec![melee] } else { Vec::new() };
    Verdict::Act(Action {
        mode: AgentMode::EmergencyDefense,
        plan: PlanChange::Clear(PlanOutcome::Abandoned),
        enqueue,
    })
}

fn defense(ctx: &DecisionContext) -> Verdict {
    if !ctx.analysis.needs_defense {
        return Verdict::Pass;
    }
    let mut enqueue = Vec::new();
    if ctx.can_buy(UnitKind::Spearman) {
        if ctx.luck < 0.2
            && ctx.can_buy(UnitKind::Shieldbearer)
            && ctx.own_count(UnitKind::Shieldbearer) < 2
        {
            enqueue.push(UnitKind::Shieldbearer);
        } else {
            enqueue.push(UnitKind::Spearman);
        }
    }
    Verdict::Act(Action {
        mode: AgentMode::SustainedDefense,
        plan: PlanChange::Clear(PlanOutcome::Abandoned),
        enqueue,
    })
}

fn saving_plan(ctx: &DecisionContext) -> Verdict {
    let Some(plan) = ctx.plan else {
        return Verdict::Pass;
    };

    if ctx.analysis.can_afford_to_save {
        if ctx.currency >= plan.total_cost() {
            let escorts = 2.max(plan.count + 1);
            let mut enqueue = vec![plan.kind; plan.count as usize];
            enqueue.extend(std::iter::repeat(UnitKind::Spearman).take(escorts as usize));
            return Verdict::Act(Action {
                mode: AgentMode::ReactiveBuild,
                plan: PlanChange::Clear(PlanOutcome::Executed),
                enqueue,
            });
        }
        return Verdict::Act(Action {
            mode: AgentMode::Saving {
                kind: plan.kind,
                count: plan.count,
            },
            plan: PlanChange::Keep,
            enqueue: Vec::new(),
        });
    }

    // Conditions soured: salvage what the bank allows, or give up.
    if ctx.can_buy(plan.kind) {
        let mut enqueue = vec![plan.kind];
        if ctx.currency >= 2.0 * UnitKind::Spearman.cost() {
            enqueue.extend([UnitKind::Spearman, UnitKind::Spearman]);
        }
        return Verdict::Act(Action {
            mode: AgentMode::ReactiveBuild,
            plan: PlanChange::Clear(PlanOutcome::Salvaged),
            enqueue,
        });
    }
    Verdict::DropPlan
}

fn escort_ranged(ctx: &DecisionContext) -> Verdict {
    let musketeers = ctx.own_count(UnitKind::Musketeer);
    if musketeers > 0
        && ctx.analysis.own.melee() < 2 * musketeers
        && ctx.can_buy(UnitKind::Spearman)
    {
        return build(vec![UnitKind::Spearman]);
    }
    Verdict::Pass
}

fn opening(ctx: &DecisionContext) -> Verdict {
    if ctx.analysis.own.total > 0 {
        return Verdict::Pass;
    }
    let can_plan = ctx.is_unlocked(UnitKind::Musketeer);

    if can_plan && ctx.luck < 0.4 {
        start_plan(UnitKind::Musketeer, 2)
    } else if ctx.luck < 0.7 || !can_plan {
        if ctx.can_buy(UnitKind::Spearman) {
            build(vec![UnitKind::Spearman])
        } else {
            build(Vec::new())
        }
    } else {
        start_plan(UnitKind::Musketeer, 3)
    }
}

fn ranged_shortage(ctx: &DecisionContext) -> Verdict {
    let own = &ctx.analysis.own;
    if own.ranged() >= 2 {
        return Verdict::Pass;
    }

    if ctx.analysis.can_afford_to_save
        && ctx.currency < 2.0 * UnitKind::Musketeer.cost()
        && ctx.is_unlocked(UnitKind::Musketeer)
    {
        return start_plan(UnitKind::Musketeer, 2);
    }
    if ctx.luck < 0.2 && ctx.can_buy(UnitKind::Tank) {
        return build(vec![UnitKind::Tank, UnitKind::Spearman]);
    }
    if ctx.can_buy(UnitKind::Musketeer) {
        return build(vec![
            UnitKind::Musketeer,
            UnitKind::Spearman,
            UnitKind::Spearman,
        ]);
    }
    if ctx.luck < 0.3 && ctx.can_buy(UnitKind::Archer) {
        return build(vec![UnitKind::Archer]);
    }
    if ctx.can_buy(UnitKind::Spearman) {
        return build(vec![UnitKind::Spearman]);
    }
    Verdict::Pass
}

fn frontline_balance(ctx: &DecisionContext) -> Verdict {
    let own = &ctx.analysis.own;
    if own.melee() >= 2 * own.ranged() {
        return Verdict::Pass;
    }
    if ctx.luck < 0.25
        && ctx.can_buy(UnitKind::Shieldbearer)
        && ctx.own_count(UnitKind::Shieldbearer) < 2
    {
        return build(vec![UnitKind::Shieldbearer]);
    }
    if ctx.can_buy(UnitKind::Spearman) {
        return build(vec![UnitKind::Spearman]);
    }
    Verdict::Pass
}

fn reinforce(ctx: &DecisionContext) -> Verdict {
    let own = &ctx.analysis.own;
    let luck = ctx.luck;

    if luck < 0.2
        && ctx.analysis.can_afford_to_save
        && own.ranged() < 4
        && ctx.is_unlocked(UnitKind::Musketeer)
    {
        return start_plan(UnitKind::Musketeer, 2);
    }
    if luck < 0.4 && ctx.can_buy(UnitKind::Musketeer) && own.ranged() < 4 {
        return build(vec![UnitKind::Musketeer, UnitKind::Spearman]);
    }
    if luck < 0.15 && ctx.can_buy(UnitKind::Archer) && own.count(UnitKind::Archer) < 2 {
        return build(vec![UnitKind::Archer]);
    }
    if luck < 0.15
        && ctx.can_buy(UnitKind::Shieldbearer)
        && own.count(UnitKind::Shieldbearer) < 2
    {
        return build(vec![UnitKind::Shieldbearer]);
    }
    if ctx.can_buy(UnitKind::Spearman) {
        return build(vec![UnitKind::Spearman]);
    }
    Verdict::Act(Action {
        mode: AgentMode::Idle,
        plan: PlanChange::Keep,
        enqueue: Vec::new(),
    })
}
