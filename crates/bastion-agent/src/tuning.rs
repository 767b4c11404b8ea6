//! Agent thresholds.

use bastion_core::constants::SPAWN_QUEUE_CAPACITY;

/// Thresholds and grid settings for the planning agent.
///
/// Distances are lane distances in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentTuning {
    /// Threat closer than this triggers emergency defense.
    pub emergency_distance: f64,
    /// Threat closer than this means the agent must defend.
    pub defense_distance: f64,
    /// Threat must be farther than this before the agent saves up.
    pub save_distance: f64,
    /// Power ratio needed to keep saving.
    pub save_power_ratio: f64,
    /// Below this power ratio the agent defends.
    pub defense_power_ratio: f64,
    /// Weight of damage-per-second in the power estimate.
    pub dps_weight: f64,
    /// Upper bound of the random extra delay between decisions (seconds).
    pub interval_jitter_secs: f64,
    /// Pending spawn slots per side.
    pub queue_capacity: usize,
    /// First strike candidate, measured from the opposing base.
    pub strike_grid_offset: f64,
    pub strike_grid_step: f64,
    /// Last strike candidate as a fraction of lane width from the opposing base.
    pub strike_grid_reach: f64,
    /// Fewest opposing units worth a strike.
    pub strike_min_cluster: u32,
}

impl Default for AgentTuning {
    fn default() -> Self {
        Self {
            emergency_distance: 200.0,
            defense_distance: 350.0,
            save_distance: 400.0,
            save_power_ratio: 0.6,
            defense_power_ratio: 0.5,
            dps_weight: 10.0,
            interval_jitter_secs: 0.1,
            queue_capacity: SPAWN_QUEUE_CAPACITY,
            strike_grid_offset: 120.0,
            strike_grid_step: 50.0,
            strike_grid_reach: 0.7,
            strike_min_cluster: 3,
        }
    }
}
