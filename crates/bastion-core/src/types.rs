//! Fundamental geometric and simulation types.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::Side;

/// Position on the battlefield. `x` is the lane axis; `y` grows downward
/// (screen convention) and only matters for projectile flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Lane-axis distance. Unit-to-unit range checks use this.
    pub fn lane_distance(&self, other: &Position) -> f64 {
        (other.x - self.x).abs()
    }
}

/// Stable unit identifier, assigned in spawn order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of non-empty advances.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Lane layout: where the bases stand and where the ground is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaneGeometry {
    pub width: f64,
    pub home_base_x: f64,
    pub away_base_x: f64,
    pub ground_y: f64,
}

impl Default for LaneGeometry {
    fn default() -> Self {
        Self::with_width(LANE_WIDTH, LANE_HEIGHT)
    }
}

impl LaneGeometry {
    /// Lay out a lane for a viewport, bases inset from both edges.
    pub fn with_width(width: f64, height: f64) -> Self {
        Self {
            width,
            home_base_x: BASE_INSET,
            away_base_x: width - BASE_INSET,
            ground_y: height * GROUND_FRACTION,
        }
    }

    pub fn base_x(&self, side: Side) -> f64 {
        match side {
            Side::Home => self.home_base_x,
            Side::Away => self.away_base_x,
        }
    }

    /// Where freshly spawned units of `side` appear.
    pub fn spawn_x(&self, side: Side) -> f64 {
        self.base_x(side) + side.direction() * SPAWN_OFFSET
    }

    /// Aim point on a base for projectiles and turret muzzles.
    pub fn base_point(&self, side: Side) -> Position {
        Position::new(self.base_x(side), self.ground_y - BASE_AIM_HEIGHT)
    }

    pub fn contains(&self, x: f64) -> bool {
        x.is_finite() && (0.0..=self.width).contains(&x)
    }
}

/// A pair of values, one per side.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerSide<T> {
    pub home: T,
    pub away: T,
}

impl<T> PerSide<T> {
    pub fn new(home: T, away: T) -> Self {
        Self { home, away }
    }

    pub fn get(&self, side: Side) -> &T {
        match side {
            Side::Home => &self.home,
            Side::Away => &self.away,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Home => &mut self.home,
            Side::Away => &mut self.away,
        }
    }
}

impl<T: Clone> PerSide<T> {
    pub fn splat(value: T) -> Self {
        Self {
            home: value.clone(),
            away: value,
        }
    }
}

impl<T> Index<Side> for PerSide<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        self.get(side)
    }
}

impl<T> IndexMut<Side> for PerSide<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        self.get_mut(side)
    }
}
