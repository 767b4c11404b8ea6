//! Injected uniform draws for the agent.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Source of uniform values in [0, 1).
pub trait DecisionDraws {
    fn next_uniform(&mut self) -> f64;
}

/// Seeded ChaCha8 stream. Same seed, same decisions.
#[derive(Debug, Clone)]
pub struct SeededDraws {
    rng: ChaCha8Rng,
}

impl SeededDraws {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl DecisionDraws for SeededDraws {
    fn next_uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed sequence, then keeps returning the last value.
///
/// An empty script yields 0.0 forever.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    values: VecDeque<f64>,
    last: f64,
}

impl ScriptedDraws {
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            values: values.into_iter().collect(),
            last: 0.0,
        }
    }

    /// A script that always returns `value`.
    pub fn constant(value: f64) -> Self {
        Self::new([value])
    }
}

impl DecisionDraws for ScriptedDraws {
    fn next_uniform(&mut self) -> f64 {
        if let Some(value) = self.values.pop_front() {
            self.last = value;
        }
        self.last
    }
}
