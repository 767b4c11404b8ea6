//! Area strike targeting.

use crate::analysis::BattlefieldView;
use crate::tuning::AgentTuning;

/// Pick a strike point, or `None` if the strike is unavailable or no
/// candidate covers enough opposing units.
///
/// Candidates run from `strike_grid_offset` in front of the opposing base
/// toward the agent's own base in `strike_grid_step` increments, up to
/// `strike_grid_reach` of the lane width. The densest point wins; ties go
/// to the candidate closest to the opposing base.
pub fn choose_target(view: &BattlefieldView, tuning: &AgentTuning) -> Option<f64> {
    let strike = view.area_strike?;
    if view.strike_cooldown > 0.0 || view.currency < strike.cost {
        return None;
    }

    let enemies: Vec<f64> = view.opposing_units().map(|u| u.x).collect();
    let min_cluster = tuning.strike_min_cluster.max(1) as usize;
    if enemies.len() < min_cluster || tuning.strike_grid_step <= 0.0 {
        return None;
    }

    let inward = if view.own_base_x >= view.opposing_base_x {
        1.0
    } else {
        -1.0
    };
    let reach = tuning.strike_grid_reach * view.lane_width;

    let mut best: Option<(f64, usize)> = None;
    let mut offset = tuning.strike_grid_offset;
    while offset <= reach {
        let x = view.opposing_base_x + inward * offset;
        let covered = enemies
            .iter()
            .filter(|&&ex| (ex - x).abs() <= strike.radius)
            .count();
        if best.map_or(true, |(_, most)| covered > most) {
            best = Some((x, covered));
        }
        offset += tuning.strike_grid_step;
    }

    best.filter(|&(_, covered)| covered >= min_cluster)
        .map(|(x, _)| x)
}
