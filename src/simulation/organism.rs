//! Organism entity state and per-tick decision logic.
//!
//! An organism owns only its own state: movement and aging mutate `self`,
//! while the reproduce/die decisions are pure predicates whose results the
//! engine collects and applies after the whole population has been visited.

use std::sync::Arc;

use rand::Rng;

use super::organism_type::OrganismType;
use super::params::{Bounds, Params};

/// A single live organism.
///
/// Instances are owned by the population store while alive and recycled
/// through the [`OrganismPool`](super::pool::OrganismPool) on death, so the
/// fields are plain values that `initialize` fully resets.
#[derive(Debug, Clone)]
pub struct Organism {
    /// X position in canvas pixels, clamped to bounds every update.
    pub x: f32,
    /// Y position in canvas pixels, clamped to bounds every update.
    pub y: f32,
    /// Accumulated tick time; monotonically increasing while alive.
    pub age: f32,
    /// Shared species record. Not owned; never mutated.
    pub kind: Arc<OrganismType>,
    /// One-shot reproduction gate. Set by [`Self::reproduce`], cleared only
    /// by [`Self::initialize`] when the instance leaves the pool.
    pub reproduced: bool,
}

impl Organism {
    /// Creates a dormant instance for the pool.
    ///
    /// Pool instances carry whatever type they last had; `initialize` is
    /// the only path back into the live population.
    pub(crate) fn dormant(kind: Arc<OrganismType>) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            age: 0.0,
            kind,
            reproduced: false,
        }
    }

    /// Resets all fields for (re)entry into the live population.
    ///
    /// Clears any stale `reproduced` state left over from a previous life
    /// and clamps the position into bounds.
    pub fn initialize(&mut self, x: f32, y: f32, kind: Arc<OrganismType>, bounds: Bounds) {
        let radius = kind.size;
        self.x = bounds.clamp_x(x, radius);
        self.y = bounds.clamp_y(y, radius);
        self.age = 0.0;
        self.kind = kind;
        self.reproduced = false;
    }

    /// Advances age and applies a bounded random walk, then clamps the
    /// position so the body circle stays fully on canvas.
    pub fn update(&mut self, dt: f32, bounds: Bounds, walk_speed: f32, rng: &mut impl Rng) {
        self.age += dt;

        let step = walk_speed * dt;
        self.x += rng.random_range(-1.0..=1.0_f32) * step;
        self.y += rng.random_range(-1.0..=1.0_f32) * step;

        let radius = self.kind.size;
        self.x = bounds.clamp_x(self.x, radius);
        self.y = bounds.clamp_y(self.y, radius);
    }

    /// One independent random draw deciding reproduction this tick.
    ///
    /// `growth_modifier` folds in environmental factors and local crowding;
    /// at 0.0 reproduction is fully suppressed.
    pub fn can_reproduce(&self, params: &Params, growth_modifier: f32, rng: &mut impl Rng) -> bool {
        if self.age <= params.min_reproduction_age || self.reproduced {
            return false;
        }
        let probability = self.kind.growth_rate * params.reproduction_scale * growth_modifier;
        rng.random::<f32>() < probability
    }

    /// One independent random draw deciding death this tick.
    ///
    /// Age death is deterministic: past `max_age` this returns `true`
    /// regardless of the attrition draw.
    pub fn should_die(&self, params: &Params, death_modifier: f32, rng: &mut impl Rng) -> bool {
        if self.age > self.kind.max_age {
            return true;
        }
        let probability = self.kind.death_rate * params.death_scale * death_modifier;
        rng.random::<f32>() < probability
    }

    /// Marks the parent as having reproduced and returns the offspring
    /// position: a random offset within `offspring_offset` pixels, clamped
    /// into bounds. Adding the child to the store is the engine's job.
    pub fn reproduce(&mut self, params: &Params, bounds: Bounds, rng: &mut impl Rng) -> (f32, f32) {
        self.reproduced = true;

        let offset = params.offspring_offset;
        let radius = self.kind.size;
        let x = self.x + rng.random_range(-offset..=offset);
        let y = self.y + rng.random_range(-offset..=offset);
        (bounds.clamp_x(x, radius), bounds.clamp_y(y, radius))
    }

    /// Guard against corrupted per-organism state.
    ///
    /// The engine skips (but keeps) organisms that fail this check for the
    /// current tick, logging the anomaly instead of aborting the pass.
    pub fn is_coherent(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.age.is_finite() && self.age >= 0.0
    }
}
