#[cfg(test)]
mod tests {
    use bastion_core::config::AreaStrikeConfig;
    use bastion_core::enums::{AgentMode, PlanOutcome, Role, Side, UnitKind};

    use crate::analysis::{analyze, BattlefieldAnalysis, BattlefieldView, UnitSample};
    use crate::draws::{DecisionDraws, ScriptedDraws, SeededDraws};
    use crate::planner::{PlanTransition, Planner};
    use crate::rules::{decide, DecisionContext, PlanChange, Rule, SavingPlan};
    use crate::strike::choose_target;
    use crate::tuning::AgentTuning;

    const HOME_BASE: f64 = 80.0;
    const AWAY_BASE: f64 = 1200.0;

    fn sample(side: Side, kind: UnitKind, x: f64) -> UnitSample {
        UnitSample {
            side,
            kind,
            x,
            health: kind.archetype().max_health,
        }
    }

    /// View for an agent playing the away side.
    fn away_view(currency: f64, units: Vec<UnitSample>) -> BattlefieldView {
        BattlefieldView {
            side: Side::Away,
            currency,
            own_base_x: AWAY_BASE,
            opposing_base_x: HOME_BASE,
            lane_width: 1280.0,
            units,
            queue_len: 0,
            unlocked: UnitKind::ALL.to_vec(),
            area_strike: None,
            strike_cooldown: 0.0,
        }
    }

    fn strike_config() -> AreaStrikeConfig {
        AreaStrikeConfig {
            cost: 150.0,
            damage: 80.0,
            radius: 100.0,
            cooldown_secs: 20.0,
        }
    }

    /// A calm battlefield: strong own army, no threats nearby.
    fn calm_units() -> Vec<UnitSample> {
        vec![
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1010.0),
            sample(Side::Away, UnitKind::Archer, 1050.0),
            sample(Side::Away, UnitKind::Archer, 1060.0),
            sample(Side::Home, UnitKind::Spearman, 300.0),
        ]
    }

    fn context<'a>(
        analysis: &'a BattlefieldAnalysis,
        currency: f64,
        luck: f64,
        plan: Option<SavingPlan>,
        tuning: &'a AgentTuning,
    ) -> DecisionContext<'a> {
        DecisionContext {
            analysis,
            currency,
            luck,
            plan,
            unlocked: &UnitKind::ALL,
            tuning,
        }
    }

    const TWO_MUSKETEERS: SavingPlan = SavingPlan {
        kind: UnitKind::Musketeer,
        count: 2,
    };

    // ---- Analysis ----

    #[test]
    fn test_analysis_counts_and_threat() {
        let tuning = AgentTuning::default();
        let view = away_view(0.0, calm_units());
        let analysis = analyze(&view, &tuning);

        assert_eq!(analysis.own.total, 4);
        assert_eq!(analysis.own.melee(), 2);
        assert_eq!(analysis.own.ranged(), 2);
        assert_eq!(analysis.opposing.total, 1);
        assert_eq!(analysis.threat_distance, 900.0);
        assert!(analysis.power_ratio > 1.0);
        assert!(analysis.can_afford_to_save);
        assert!(!analysis.needs_defense);
    }

    #[test]
    fn test_analysis_empty_field() {
        let tuning = AgentTuning::default();
        let analysis = analyze(&away_view(100.0, Vec::new()), &tuning);
        assert!(analysis.threat_distance.is_infinite());
        // No army means no power, so the agent starts out defensive.
        assert_eq!(analysis.power_ratio, 0.0);
        assert!(analysis.needs_defense);
    }

    #[test]
    fn test_tank_counts_as_neither_ranged_nor_melee() {
        let tuning = AgentTuning::default();
        let view = away_view(0.0, vec![sample(Side::Away, UnitKind::Tank, 1100.0)]);
        let analysis = analyze(&view, &tuning);
        assert_eq!(analysis.own.total, 1);
        assert_eq!(analysis.own.ranged(), 0);
        assert_eq!(analysis.own.melee(), 0);
        assert_eq!(analysis.own.count_role(Role::Heavy), 1);
    }

    #[test]
    fn test_role_counts_follow_catalog() {
        let tuning = AgentTuning::default();
        let units = UnitKind::ALL
            .iter()
            .map(|&kind| sample(Side::Away, kind, 1100.0))
            .collect();
        let analysis = analyze(&away_view(0.0, units), &tuning);
        // Archer + musketeer, spearman + shieldbearer.
        assert_eq!(analysis.own.ranged(), 2);
        assert_eq!(analysis.own.melee(), 2);
        assert_eq!(
            analysis.own.ranged() + analysis.own.melee() + analysis.own.count_role(Role::Heavy),
            analysis.own.total
        );
    }

    // ---- Decision table ----

    #[test]
    fn test_emergency_overrides_saving_plan() {
        let tuning = AgentTuning::default();
        let mut units = calm_units();
        units.push(sample(Side::Home, UnitKind::Spearman, AWAY_BASE - 150.0));
        let analysis = analyze(&away_view(0.0, units), &tuning);
        assert_eq!(analysis.threat_distance, 150.0);

        let ctx = context(&analysis, 400.0, 0.5, Some(TWO_MUSKETEERS), &tuning);
        let decision = decide(&ctx);
        assert_eq!(decision.rule, Rule::Emergency);
        assert_eq!(decision.mode, AgentMode::EmergencyDefense);
        assert_eq!(decision.plan, PlanChange::Clear(PlanOutcome::Abandoned));
        assert_eq!(decision.enqueue, vec![UnitKind::Spearman]);
    }

    #[test]
    fn test_emergency_waits_when_broke() {
        let tuning = AgentTuning::default();
        let units = vec![sample(Side::Home, UnitKind::Spearman, AWAY_BASE - 100.0)];
        let analysis = analyze(&away_view(0.0, units), &tuning);
        let decision = decide(&context(&analysis, 49.0, 0.5, None, &tuning));
        assert_eq!(decision.rule, Rule::Emergency);
        assert!(decision.enqueue.is_empty());
    }

    #[test]
    fn test_defense_prefers_shieldbearer_on_low_luck() {
        let tuning = AgentTuning::default();
        let units = vec![sample(Side::Home, UnitKind::Spearman, AWAY_BASE - 300.0)];
        let analysis = analyze(&away_view(0.0, units), &tuning);

        let low = decide(&context(&analysis, 150.0, 0.1, None, &tuning));
        assert_eq!(low.rule, Rule::Defense);
        assert_eq!(low.mode, AgentMode::SustainedDefense);
        assert_eq!(low.enqueue, vec![UnitKind::Shieldbearer]);

        let high = decide(&context(&analysis, 150.0, 0.5, None, &tuning));
        assert_eq!(high.enqueue, vec![UnitKind::Spearman]);

        // Shieldbearer unaffordable: fall back to a spearman.
        let poor = decide(&context(&analysis, 60.0, 0.1, None, &tuning));
        assert_eq!(poor.enqueue, vec![UnitKind::Spearman]);
    }

    #[test]
    fn test_saving_plan_executes_with_escorts() {
        let tuning = AgentTuning::default();
        let analysis = analyze(&away_view(0.0, calm_units()), &tuning);

        let decision = decide(&context(&analysis, 240.0, 0.9, Some(TWO_MUSKETEERS), &tuning));
        assert_eq!(decision.rule, Rule::SavingPlan);
        assert_eq!(decision.plan, PlanChange::Clear(PlanOutcome::Executed));
        assert_eq!(
            decision.enqueue,
            vec![
                UnitKind::Musketeer,
                UnitKind::Musketeer,
                UnitKind::Spearman,
                UnitKind::Spearman,
                UnitKind::Spearman,
            ]
        );
    }

    #[test]
    fn test_saving_plan_keeps_waiting() {
        let tuning = AgentTuning::default();
        let analysis = analyze(&away_view(0.0, calm_units()), &tuning);
        let decision = decide(&context(&analysis, 200.0, 0.9, Some(TWO_MUSKETEERS), &tuning));
        assert_eq!(decision.rule, Rule::SavingPlan);
        assert_eq!(decision.plan, PlanChange::Keep);
        assert_eq!(
            decision.mode,
            AgentMode::Saving {
                kind: UnitKind::Musketeer,
                count: 2
            }
        );
        assert!(decision.enqueue.is_empty());
    }

    #[test]
    fn test_saving_plan_salvage_on_abort() {
        let tuning = AgentTuning::default();
        let mut units = calm_units();
        // Threat at 380: no defense needed, but no longer safe to save.
        units.push(sample(Side::Home, UnitKind::Spearman, AWAY_BASE - 380.0));
        let analysis = analyze(&away_view(0.0, units), &tuning);
        assert!(!analysis.can_afford_to_save);
        assert!(!analysis.needs_defense);

        let decision = decide(&context(&analysis, 130.0, 0.9, Some(TWO_MUSKETEERS), &tuning));
        assert_eq!(decision.rule, Rule::SavingPlan);
        assert_eq!(decision.plan, PlanChange::Clear(PlanOutcome::Salvaged));
        assert_eq!(
            decision.enqueue,
            vec![UnitKind::Musketeer, UnitKind::Spearman, UnitKind::Spearman]
        );
    }

    #[test]
    fn test_saving_plan_abort_without_funds_continues_down_table() {
        let tuning = AgentTuning::default();
        let mut units = calm_units();
        units.push(sample(Side::Home, UnitKind::Spearman, AWAY_BASE - 380.0));
        let analysis = analyze(&away_view(0.0, units), &tuning);

        let decision = decide(&context(&analysis, 60.0, 0.9, Some(TWO_MUSKETEERS), &tuning));
        // Plan dropped, then the frontline rule buys a spearman.
        assert_eq!(decision.rule, Rule::FrontlineBalance);
        assert_eq!(decision.plan, PlanChange::Clear(PlanOutcome::Abandoned));
        assert_eq!(decision.enqueue, vec![UnitKind::Spearman]);
    }

    #[test]
    fn test_escort_for_musketeers() {
        let tuning = AgentTuning::default();
        let units = vec![
            sample(Side::Away, UnitKind::Musketeer, 1100.0),
            sample(Side::Away, UnitKind::Musketeer, 1100.0),
            sample(Side::Away, UnitKind::Spearman, 1050.0),
            sample(Side::Home, UnitKind::Spearman, 200.0),
        ];
        let analysis = analyze(&away_view(0.0, units), &tuning);
        let decision = decide(&context(&analysis, 60.0, 0.9, None, &tuning));
        assert_eq!(decision.rule, Rule::EscortRanged);
        assert_eq!(decision.enqueue, vec![UnitKind::Spearman]);
    }

    #[test]
    fn test_opening_branches_on_luck() {
        // The opening is reachable only when the power floor lets an empty army through.
        let tuning = AgentTuning {
            defense_power_ratio: 0.0,
            save_power_ratio: 0.0,
            ..Default::default()
        };
        let analysis = analyze(&away_view(0.0, Vec::new()), &tuning);
        assert!(!analysis.needs_defense);

        let greedy_two = decide(&context(&analysis, 100.0, 0.1, None, &tuning));
        assert_eq!(greedy_two.rule, Rule::Opening);
        assert_eq!(greedy_two.plan, PlanChange::Start(TWO_MUSKETEERS));

        let rush = decide(&context(&analysis, 100.0, 0.5, None, &tuning));
        assert_eq!(rush.enqueue, vec![UnitKind::Spearman]);

        let greedy_three = decide(&context(&analysis, 100.0, 0.9, None, &tuning));
        assert_eq!(
            greedy_three.plan,
            PlanChange::Start(SavingPlan {
                kind: UnitKind::Musketeer,
                count: 3
            })
        );
    }

    #[test]
    fn test_opening_without_musketeers_never_plans() {
        let tuning = AgentTuning {
            defense_power_ratio: 0.0,
            ..Default::default()
        };
        let analysis = analyze(&away_view(0.0, Vec::new()), &tuning);
        let ctx = DecisionContext {
            unlocked: &[UnitKind::Spearman, UnitKind::Archer],
            ..context(&analysis, 100.0, 0.9, None, &tuning)
        };
        let decision = decide(&ctx);
        assert_eq!(decision.rule, Rule::Opening);
        assert_eq!(decision.plan, PlanChange::Keep);
        assert_eq!(decision.enqueue, vec![UnitKind::Spearman]);
    }

    #[test]
    fn test_ranged_shortage_buys_musketeer_with_escorts() {
        let tuning = AgentTuning::default();
        let units = vec![
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Home, UnitKind::Spearman, AWAY_BASE - 380.0),
        ];
        let analysis = analyze(&away_view(0.0, units), &tuning);
        assert!(!analysis.can_afford_to_save);

        let decision = decide(&context(&analysis, 130.0, 0.9, None, &tuning));
        assert_eq!(decision.rule, Rule::RangedShortage);
        assert_eq!(
            decision.enqueue,
            vec![UnitKind::Musketeer, UnitKind::Spearman, UnitKind::Spearman]
        );

        let tank = decide(&context(&analysis, 260.0, 0.1, None, &tuning));
        assert_eq!(tank.enqueue, vec![UnitKind::Tank, UnitKind::Spearman]);
    }

    #[test]
    fn test_ranged_shortage_starts_plan_when_safe() {
        let tuning = AgentTuning::default();
        let units = vec![
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
        ];
        let analysis = analyze(&away_view(0.0, units), &tuning);
        assert!(analysis.can_afford_to_save);

        let decision = decide(&context(&analysis, 100.0, 0.9, None, &tuning));
        assert_eq!(decision.rule, Rule::RangedShortage);
        assert_eq!(decision.plan, PlanChange::Start(TWO_MUSKETEERS));
    }

    #[test]
    fn test_reinforce_idles_when_broke() {
        let tuning = AgentTuning::default();
        let units = vec![
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Archer, 1050.0),
            sample(Side::Away, UnitKind::Archer, 1050.0),
        ];
        let analysis = analyze(&away_view(0.0, units), &tuning);
        let decision = decide(&context(&analysis, 10.0, 0.9, None, &tuning));
        assert_eq!(decision.rule, Rule::Reinforce);
        assert_eq!(decision.mode, AgentMode::Idle);
        assert!(decision.enqueue.is_empty());
    }

    /// One row of a branch table: battlefield, bank, draw, and the expected pick.
    struct BranchCase {
        label: &'static str,
        units: Vec<UnitSample>,
        currency: f64,
        luck: f64,
        rule: Rule,
        enqueue: Vec<UnitKind>,
        plan: PlanChange,
    }

    fn run_cases(cases: Vec<BranchCase>) {
        let tuning = AgentTuning::default();
        for case in cases {
            let analysis = analyze(&away_view(0.0, case.units), &tuning);
            let decision = decide(&context(&analysis, case.currency, case.luck, None, &tuning));
            assert_eq!(decision.rule, case.rule, "{}", case.label);
            assert_eq!(decision.enqueue, case.enqueue, "{}", case.label);
            assert_eq!(decision.plan, case.plan, "{}", case.label);
        }
    }

    /// Balanced army: four spearmen, an archer, a musketeer.
    fn mixed_army(threat_x: f64) -> Vec<UnitSample> {
        vec![
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Archer, 1050.0),
            sample(Side::Away, UnitKind::Musketeer, 1060.0),
            sample(Side::Home, UnitKind::Spearman, threat_x),
        ]
    }

    /// Four spearmen and two archers.
    fn archer_army(threat_x: f64) -> Vec<UnitSample> {
        vec![
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Archer, 1050.0),
            sample(Side::Away, UnitKind::Archer, 1050.0),
            sample(Side::Home, UnitKind::Spearman, threat_x),
        ]
    }

    // Far threat: safe to save. Threat at 380: not safe, but no defense.
    const FAR: f64 = 300.0;
    const NEAR: f64 = AWAY_BASE - 380.0;

    #[test]
    fn test_reinforce_branches() {
        let musketeer_pair = vec![UnitKind::Musketeer, UnitKind::Spearman];
        run_cases(vec![
            BranchCase {
                label: "plan below 0.2 when safe",
                units: mixed_army(FAR),
                currency: 200.0,
                luck: 0.19,
                rule: Rule::Reinforce,
                enqueue: Vec::new(),
                plan: PlanChange::Start(TWO_MUSKETEERS),
            },
            BranchCase {
                label: "musketeer at exactly 0.2",
                units: mixed_army(FAR),
                currency: 200.0,
                luck: 0.2,
                rule: Rule::Reinforce,
                enqueue: musketeer_pair.clone(),
                plan: PlanChange::Keep,
            },
            BranchCase {
                label: "musketeer just below 0.4",
                units: mixed_army(FAR),
                currency: 200.0,
                luck: 0.39,
                rule: Rule::Reinforce,
                enqueue: musketeer_pair.clone(),
                plan: PlanChange::Keep,
            },
            BranchCase {
                label: "spearman at exactly 0.4",
                units: mixed_army(FAR),
                currency: 200.0,
                luck: 0.4,
                rule: Rule::Reinforce,
                enqueue: vec![UnitKind::Spearman],
                plan: PlanChange::Keep,
            },
            BranchCase {
                label: "archer when musketeer unaffordable",
                units: mixed_army(NEAR),
                currency: 100.0,
                luck: 0.14,
                rule: Rule::Reinforce,
                enqueue: vec![UnitKind::Archer],
                plan: PlanChange::Keep,
            },
            BranchCase {
                label: "no archer at exactly 0.15",
                units: mixed_army(NEAR),
                currency: 100.0,
                luck: 0.15,
                rule: Rule::Reinforce,
                enqueue: vec![UnitKind::Spearman],
                plan: PlanChange::Keep,
            },
            BranchCase {
                label: "shieldbearer when archers are full",
                units: archer_army(NEAR),
                currency: 110.0,
                luck: 0.1,
                rule: Rule::Reinforce,
                enqueue: vec![UnitKind::Shieldbearer],
                plan: PlanChange::Keep,
            },
            BranchCase {
                label: "default spearman",
                units: archer_army(NEAR),
                currency: 60.0,
                luck: 0.5,
                rule: Rule::Reinforce,
                enqueue: vec![UnitKind::Spearman],
                plan: PlanChange::Keep,
            },
        ]);
    }

    #[test]
    fn test_one_draw_serves_every_guard() {
        // Luck 0.1 would pass the archer guard too, but the musketeer
        // guard comes first and sees the same draw.
        let tuning = AgentTuning::default();
        let analysis = analyze(&away_view(0.0, mixed_army(NEAR)), &tuning);
        assert!(!analysis.can_afford_to_save);

        let decision = decide(&context(&analysis, 200.0, 0.1, None, &tuning));
        assert_eq!(decision.rule, Rule::Reinforce);
        assert_eq!(decision.enqueue, vec![UnitKind::Musketeer, UnitKind::Spearman]);
    }

    #[test]
    fn test_ranged_shortage_branches() {
        let thin_line = || {
            vec![
                sample(Side::Away, UnitKind::Spearman, 1000.0),
                sample(Side::Away, UnitKind::Spearman, 1000.0),
                sample(Side::Away, UnitKind::Archer, 1050.0),
                sample(Side::Home, UnitKind::Spearman, NEAR),
            ]
        };
        run_cases(vec![
            BranchCase {
                label: "archer below 0.3",
                units: thin_line(),
                currency: 100.0,
                luck: 0.29,
                rule: Rule::RangedShortage,
                enqueue: vec![UnitKind::Archer],
                plan: PlanChange::Keep,
            },
            BranchCase {
                label: "archer even under the tank guard when the tank is unaffordable",
                units: thin_line(),
                currency: 100.0,
                luck: 0.1,
                rule: Rule::RangedShortage,
                enqueue: vec![UnitKind::Archer],
                plan: PlanChange::Keep,
            },
            BranchCase {
                label: "spearman at exactly 0.3",
                units: thin_line(),
                currency: 100.0,
                luck: 0.3,
                rule: Rule::RangedShortage,
                enqueue: vec![UnitKind::Spearman],
                plan: PlanChange::Keep,
            },
        ]);
    }

    #[test]
    fn test_frontline_balance_branches() {
        let exposed = || {
            vec![
                sample(Side::Away, UnitKind::Spearman, 1000.0),
                sample(Side::Away, UnitKind::Archer, 1050.0),
                sample(Side::Away, UnitKind::Archer, 1050.0),
                sample(Side::Home, UnitKind::Spearman, FAR),
            ]
        };
        run_cases(vec![
            BranchCase {
                label: "shieldbearer below 0.25",
                units: exposed(),
                currency: 100.0,
                luck: 0.24,
                rule: Rule::FrontlineBalance,
                enqueue: vec![UnitKind::Shieldbearer],
                plan: PlanChange::Keep,
            },
            BranchCase {
                label: "spearman at exactly 0.25",
                units: exposed(),
                currency: 100.0,
                luck: 0.25,
                rule: Rule::FrontlineBalance,
                enqueue: vec![UnitKind::Spearman],
                plan: PlanChange::Keep,
            },
            BranchCase {
                label: "spearman when the shieldbearer is unaffordable",
                units: exposed(),
                currency: 90.0,
                luck: 0.1,
                rule: Rule::FrontlineBalance,
                enqueue: vec![UnitKind::Spearman],
                plan: PlanChange::Keep,
            },
        ]);
    }

    // ---- Area strike ----

    #[test]
    fn test_strike_picks_densest_cluster() {
        let tuning = AgentTuning::default();
        let mut view = away_view(200.0, vec![
            sample(Side::Home, UnitKind::Spearman, 500.0),
            sample(Side::Home, UnitKind::Spearman, 510.0),
            sample(Side::Home, UnitKind::Archer, 520.0),
            sample(Side::Home, UnitKind::Archer, 200.0),
        ]);
        view.area_strike = Some(strike_config());

        // First candidate covering all three clustered units.
        let target = choose_target(&view, &tuning).unwrap();
        assert_eq!(target, 450.0);
    }

    #[test]
    fn test_strike_needs_three_opposing_units() {
        let tuning = AgentTuning::default();
        let mut view = away_view(200.0, vec![
            sample(Side::Home, UnitKind::Spearman, 500.0),
            sample(Side::Home, UnitKind::Spearman, 510.0),
        ]);
        view.area_strike = Some(strike_config());
        assert_eq!(choose_target(&view, &tuning), None);
    }

    #[test]
    fn test_strike_needs_cluster_not_just_headcount() {
        let tuning = AgentTuning::default();
        let mut view = away_view(200.0, vec![
            sample(Side::Home, UnitKind::Spearman, 200.0),
            sample(Side::Home, UnitKind::Spearman, 500.0),
            sample(Side::Home, UnitKind::Spearman, 800.0),
        ]);
        view.area_strike = Some(strike_config());
        assert_eq!(choose_target(&view, &tuning), None);
    }

    #[test]
    fn test_strike_respects_cooldown_funds_and_stage() {
        let tuning = AgentTuning::default();
        let units = vec![
            sample(Side::Home, UnitKind::Spearman, 500.0),
            sample(Side::Home, UnitKind::Spearman, 500.0),
            sample(Side::Home, UnitKind::Spearman, 500.0),
        ];
        let mut view = away_view(200.0, units);
        assert_eq!(choose_target(&view, &tuning), None, "disabled in stage");

        view.area_strike = Some(strike_config());
        view.strike_cooldown = 3.0;
        assert_eq!(choose_target(&view, &tuning), None, "cooling down");

        view.strike_cooldown = 0.0;
        view.currency = 149.0;
        assert_eq!(choose_target(&view, &tuning), None, "too poor");

        view.currency = 150.0;
        assert!(choose_target(&view, &tuning).is_some());
    }

    #[test]
    fn test_strike_grid_mirrors_for_home_agent() {
        let tuning = AgentTuning::default();
        let mut view = away_view(200.0, vec![
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
        ]);
        view.side = Side::Home;
        view.own_base_x = HOME_BASE;
        view.opposing_base_x = AWAY_BASE;
        view.area_strike = Some(strike_config());

        let target = choose_target(&view, &tuning).unwrap();
        assert_eq!(target, AWAY_BASE - 120.0);
    }

    // ---- Planner cadence ----

    #[test]
    fn test_planner_decides_then_waits_for_interval() {
        let tuning = AgentTuning::default();
        let mut planner = Planner::new(0.2);
        let mut draws = ScriptedDraws::new([0.9, 0.5]);
        let mut view = away_view(60.0, Vec::new());

        let orders = planner.update(0.016, &view, &tuning, &mut draws);
        assert_eq!(orders.enqueue, vec![UnitKind::Spearman]);
        assert_eq!(planner.last_rule(), Some(Rule::Defense));
        // Interval plus half of the jitter range.
        assert!((planner.decision_cooldown() - 0.25).abs() < 1e-9);

        // Queue is busy: no forced decision.
        view.queue_len = 1;
        let orders = planner.update(0.1, &view, &tuning, &mut draws);
        assert!(orders.enqueue.is_empty());
        assert!(planner.decision_cooldown() > 0.0);
    }

    #[test]
    fn test_planner_forces_decision_on_idle_queue() {
        let tuning = AgentTuning::default();
        let mut planner = Planner::new(0.2);
        let mut draws = ScriptedDraws::constant(0.9);
        let view = away_view(60.0, Vec::new());

        planner.update(0.016, &view, &tuning, &mut draws);
        assert!(planner.decision_cooldown() > 0.0);
        // Empty queue and enough for a spearman: decide again immediately.
        let orders = planner.update(0.016, &view, &tuning, &mut draws);
        assert_eq!(orders.enqueue, vec![UnitKind::Spearman]);
    }

    #[test]
    fn test_planner_tracks_and_clears_plan() {
        let tuning = AgentTuning::default();
        let mut planner = Planner::new(0.2);
        let mut draws = ScriptedDraws::constant(0.9);
        let mut view = away_view(100.0, vec![
            sample(Side::Away, UnitKind::Spearman, 1000.0),
            sample(Side::Away, UnitKind::Spearman, 1000.0),
        ]);
        view.queue_len = 1;

        let orders = planner.update(0.016, &view, &tuning, &mut draws);
        assert_eq!(planner.plan(), Some(TWO_MUSKETEERS));
        assert!(matches!(planner.mode(), AgentMode::Saving { .. }));
        let note = orders.decision.unwrap();
        assert_eq!(note.rule, Rule::RangedShortage);
        assert_eq!(note.plan, vec![PlanTransition::Started(TWO_MUSKETEERS)]);

        // Mid-interval: no cycle, no note.
        let orders = planner.update(0.016, &view, &tuning, &mut draws);
        assert!(orders.decision.is_none());

        // A raider shows up next to the base.
        view.units.push(sample(Side::Home, UnitKind::Spearman, AWAY_BASE - 100.0));
        let orders = planner.update(1.0, &view, &tuning, &mut draws);
        assert_eq!(planner.plan(), None);
        assert_eq!(planner.mode(), AgentMode::EmergencyDefense);
        assert_eq!(
            orders.decision.unwrap().plan,
            vec![PlanTransition::Ended(TWO_MUSKETEERS, PlanOutcome::Abandoned)]
        );

        planner.reset();
        assert_eq!(planner.mode(), AgentMode::Idle);
        assert_eq!(planner.last_rule(), None);
    }

    #[test]
    fn test_planner_orders_strike_every_tick() {
        let tuning = AgentTuning::default();
        let mut planner = Planner::new(0.2);
        let mut draws = ScriptedDraws::constant(0.9);
        let mut view = away_view(200.0, vec![
            sample(Side::Home, UnitKind::Spearman, 500.0),
            sample(Side::Home, UnitKind::Spearman, 500.0),
            sample(Side::Home, UnitKind::Spearman, 500.0),
        ]);
        view.queue_len = 3;
        view.area_strike = Some(strike_config());

        planner.update(0.016, &view, &tuning, &mut draws);
        // Mid-interval, still ordered.
        let orders = planner.update(0.016, &view, &tuning, &mut draws);
        assert!(orders.enqueue.is_empty());
        assert!(orders.strike_at.is_some());
    }

    // ---- Draws ----

    #[test]
    fn test_scripted_draws_repeat_last() {
        let mut draws = ScriptedDraws::new([0.1, 0.7]);
        assert_eq!(draws.next_uniform(), 0.1);
        assert_eq!(draws.next_uniform(), 0.7);
        assert_eq!(draws.next_uniform(), 0.7);
        assert_eq!(ScriptedDraws::default().next_uniform(), 0.0);
    }

    #[test]
    fn test_seeded_draws_deterministic() {
        let mut a = SeededDraws::new(7);
        let mut b = SeededDraws::new(7);
        for _ in 0..100 {
            let x = a.next_uniform();
            assert_eq!(x, b.next_uniform());
            assert!((0.0..1.0).contains(&x));
        }
    }
}
