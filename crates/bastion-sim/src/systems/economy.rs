//! Economy system: income and ability cooldowns.

use bastion_core::config::StageConfig;
use bastion_core::enums::Side;
use bastion_core::types::PerSide;

use crate::side::SideState;

pub fn run(sides: &mut PerSide<SideState>, stage: &StageConfig, dt: f64) {
    for side in Side::BOTH {
        let state = &mut sides[side];
        state.currency += stage.currency_per_sec[side] * dt;
        state.strike_cooldown = (state.strike_cooldown - dt).max(0.0);
    }
}
