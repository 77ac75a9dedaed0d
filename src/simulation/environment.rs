//! Global environmental modifiers.

use serde::{Deserialize, Serialize};

/// Externally configurable environmental factors, each in `[0, 1]`.
///
/// The engine multiplies reproduction and death probabilities by the
/// modifiers derived here. All factors default to `0.5`, which yields
/// neutral (1.0) modifiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnvironmentalFactors {
    /// Ambient temperature; growth falls off away from the 0.5 optimum.
    pub temperature: f32,
    /// Resource abundance; more resources favor growth.
    pub resources: f32,
    /// Free space; more space favors growth.
    pub space: f32,
    /// Toxin level; raises death pressure, lowers growth.
    pub toxicity: f32,
    /// Acidity; growth falls off away from the 0.5 optimum.
    pub ph: f32,
}

impl Default for EnvironmentalFactors {
    fn default() -> Self {
        Self {
            temperature: 0.5,
            resources: 0.5,
            space: 0.5,
            toxicity: 0.5,
            ph: 0.5,
        }
    }
}

impl EnvironmentalFactors {
    /// Returns a copy with every factor clamped into `[0, 1]`.
    pub fn clamped(self) -> Self {
        Self {
            temperature: self.temperature.clamp(0.0, 1.0),
            resources: self.resources.clamp(0.0, 1.0),
            space: self.space.clamp(0.0, 1.0),
            toxicity: self.toxicity.clamp(0.0, 1.0),
            ph: self.ph.clamp(0.0, 1.0),
        }
    }

    /// Multiplier applied to reproduction probabilities.
    ///
    /// Exactly 1.0 at the neutral defaults. Abundant resources and space
    /// raise it up to 1.5x each, toxins lower it, and temperature/pH apply
    /// a band penalty centered on 0.5.
    pub fn growth_modifier(&self) -> f32 {
        let favorable = |v: f32| 0.5 + v;
        let hostile = |v: f32| 1.5 - v;
        let band = |v: f32| 1.0 - (v - 0.5).abs();

        favorable(self.resources)
            * favorable(self.space)
            * hostile(self.toxicity)
            * band(self.temperature)
            * band(self.ph)
    }

    /// Multiplier applied to stochastic death probabilities.
    ///
    /// Exactly 1.0 at the neutral defaults; scarcity, toxins, and
    /// off-optimum temperature or pH all raise attrition.
    pub fn death_modifier(&self) -> f32 {
        let band = |v: f32| 1.0 - (v - 0.5).abs();

        (0.5 + self.toxicity)
            * (1.5 - self.resources)
            * (2.0 - band(self.temperature))
            * (2.0 - band(self.ph))
    }
}
