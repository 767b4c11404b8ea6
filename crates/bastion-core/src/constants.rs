//! Simulation constants and tuning parameters.

/// Nominal tick rate for fixed-step drivers (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per nominal tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Largest step `advance` will integrate; longer frames are clamped.
pub const MAX_DELTA_SECS: f64 = 0.1;

// --- Lane geometry ---

/// Default lane width (pixels).
pub const LANE_WIDTH: f64 = 1280.0;

/// Default viewport height (pixels).
pub const LANE_HEIGHT: f64 = 720.0;

/// Distance from each lane edge to its base.
pub const BASE_INSET: f64 = 80.0;

/// Ground line as a fraction of viewport height.
pub const GROUND_FRACTION: f64 = 0.75;

/// Units appear this far in front of their base.
pub const SPAWN_OFFSET: f64 = 80.0;

/// Height above ground of the base aim point / turret muzzle.
pub const BASE_AIM_HEIGHT: f64 = 60.0;

// --- Units ---

/// How long a dead unit stays visible before removal (seconds).
pub const DEATH_WINDOW_SECS: f64 = 0.5;

/// Distance at which any unit can strike the enemy base.
pub const MELEE_BASE_CONTACT: f64 = 60.0;

// --- Projectiles ---

/// Impact distance for unit-seeking projectiles.
pub const PROJECTILE_UNIT_HIT_RADIUS: f64 = 15.0;

/// Impact distance for base-seeking projectiles.
pub const PROJECTILE_BASE_HIT_RADIUS: f64 = 20.0;

/// Turret shot speed (pixels/second).
pub const TURRET_PROJECTILE_SPEED: f64 = 500.0;

// --- Area strike ---

/// Delay between calling a strike and its detonation.
pub const STRIKE_APPROACH_SECS: f64 = 1.0;

/// How long the detonation stays on screen.
pub const STRIKE_DETONATION_SECS: f64 = 0.5;

/// Damage multiplier at the edge of the strike radius.
pub const STRIKE_EDGE_FALLOFF: f64 = 0.5;

// --- Spawn queue ---

/// Maximum pending spawns per side.
pub const SPAWN_QUEUE_CAPACITY: usize = 15;

// --- Progress ---

/// Base health fraction required for three stars.
pub const THREE_STAR_HEALTH: f64 = 0.8;

/// Base health fraction required for two stars.
pub const TWO_STAR_HEALTH: f64 = 0.5;
