//! Derived population statistics.
//!
//! External game systems (achievements, leaderboards) consume
//! [`SimulationStats`] snapshots each tick; they never mutate engine state.

use serde::{Deserialize, Serialize};

/// Read-only statistics snapshot, recomputed every tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimulationStats {
    /// Live organism count.
    pub population: usize,
    /// Accepted births since the last reset (offspring generation counter).
    pub generation: u32,
    /// Births applied since the last reset.
    pub total_births: usize,
    /// Deaths applied since the last reset.
    pub total_deaths: usize,
    /// Mean age of the live population.
    pub average_age: f32,
    /// Age of the oldest live organism.
    pub oldest_age: f32,
    /// Tick time accumulated while running; frozen while paused.
    pub elapsed_time: f32,
    /// Births over the most recent one-second window.
    pub births_per_sec: f32,
    /// Deaths over the most recent one-second window.
    pub deaths_per_sec: f32,
}

/// Rolling one-second event counter for the per-second birth/death rates.
#[derive(Debug, Clone, Default)]
pub struct RateCounter {
    window_events: usize,
    window_elapsed: f32,
    rate: f32,
}

impl RateCounter {
    /// Records `count` events in the current window.
    pub fn record(&mut self, count: usize) {
        self.window_events += count;
    }

    /// Advances the window clock, rolling the rate over each full second.
    pub fn advance(&mut self, dt: f32) {
        self.window_elapsed += dt;
        if self.window_elapsed >= 1.0 {
            self.rate = self.window_events as f32 / self.window_elapsed;
            self.window_events = 0;
            self.window_elapsed = 0.0;
        }
    }

    /// Events per second over the last completed window.
    pub fn rate(&self) -> f32 {
        self.rate
    }

    /// Clears the window and the published rate.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
