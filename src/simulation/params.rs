//! Simulation parameters and canvas bounds.

use serde::{Deserialize, Serialize};

use super::error::SimulationError;

/// Lower bound for the speed multiplier control.
pub const MIN_SPEED: f32 = 1.0;
/// Upper bound for the speed multiplier control.
pub const MAX_SPEED: f32 = 10.0;
/// Lower bound for the population cap control.
pub const MIN_MAX_POPULATION: usize = 1;
/// Upper bound for the population cap control.
pub const MAX_MAX_POPULATION: usize = 5000;

/// Canvas dimensions the simulation runs inside.
///
/// Positions are clamped so every organism's circle stays fully on canvas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bounds {
    /// Canvas width in pixels.
    pub width: f32,
    /// Canvas height in pixels.
    pub height: f32,
}

impl Bounds {
    /// Clamps an x coordinate so a circle of `radius` stays inside.
    pub fn clamp_x(&self, x: f32, radius: f32) -> f32 {
        x.clamp(radius, (self.width - radius).max(radius))
    }

    /// Clamps a y coordinate so a circle of `radius` stays inside.
    pub fn clamp_y(&self, y: f32, radius: f32) -> f32 {
        y.clamp(radius, (self.height - radius).max(radius))
    }
}

/// Tunable parameters that control simulation behavior.
///
/// The probability scale factors were empirical tuning values in the
/// original product; they are parameters here rather than constants so
/// tests and presets can pin them explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Params {
    /// Hard population cap, enforced at the end of every tick.
    pub max_population: usize,
    /// Converts a type's `growth_rate` into a per-tick probability.
    pub reproduction_scale: f32,
    /// Converts a type's `death_rate` into a per-tick probability.
    pub death_scale: f32,
    /// Minimum age (tick units) before an organism may reproduce.
    pub min_reproduction_age: f32,
    /// Maximum offspring placement offset from the parent, in pixels.
    pub offspring_offset: f32,
    /// Random-walk magnitude in pixels per tick unit.
    pub walk_speed: f32,
    /// Organisms seeded when `start()` is called on an empty canvas.
    pub seed_count: usize,
    /// Organism instances pre-filled into the pool at startup.
    pub pool_prefill: usize,
    /// Population size at which the store refreshes its columnar mirror.
    pub columnar_threshold: usize,
    /// Radius of the local crowding query, in pixels.
    pub crowd_radius: f32,
    /// Neighbor count at which reproduction is fully suppressed.
    pub crowd_limit: usize,
    /// Opacity floor for the age fade so old organisms stay visible.
    pub min_opacity: f32,
    /// Fixed RNG seed; `None` seeds from the operating system.
    pub rng_seed: Option<u64>,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            max_population: 1000,
            reproduction_scale: 0.01,
            death_scale: 0.005,
            min_reproduction_age: 5.0,
            offspring_offset: 10.0,
            walk_speed: 2.0,
            seed_count: 10,
            pool_prefill: 256,
            columnar_threshold: 100,
            crowd_radius: 24.0,
            crowd_limit: 8,
            min_opacity: 0.35,
            rng_seed: None,
        }
    }
}

impl Params {
    /// Validates ranges that the control surface also enforces.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !(MIN_MAX_POPULATION..=MAX_MAX_POPULATION).contains(&self.max_population) {
            return Err(SimulationError::PopulationOutOfRange(self.max_population));
        }
        if !self.reproduction_scale.is_finite() || self.reproduction_scale < 0.0 {
            return Err(SimulationError::InvalidConfig(
                "reproduction_scale must be non-negative",
            ));
        }
        if !self.death_scale.is_finite() || self.death_scale < 0.0 {
            return Err(SimulationError::InvalidConfig(
                "death_scale must be non-negative",
            ));
        }
        if self.crowd_limit == 0 {
            return Err(SimulationError::InvalidConfig(
                "crowd_limit must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.min_opacity) {
            return Err(SimulationError::InvalidConfig("min_opacity outside [0, 1]"));
        }
        Ok(())
    }

    /// Loads parameters from a JSON file.
    pub fn load_from_file(path: &str) -> Result<Self, SimulationError> {
        let json = std::fs::read_to_string(path)?;
        let params: Self = serde_json::from_str(&json)?;
        params.validate()?;
        Ok(params)
    }

    /// Saves parameters to a JSON file.
    pub fn save_to_file(&self, path: &str) -> Result<(), SimulationError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
