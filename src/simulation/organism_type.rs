//! Species parameter records shared by many organisms.
//!
//! An [`OrganismType`] is immutable after construction; organisms hold it
//! behind an `Arc` so thousands of instances share one record and the
//! renderer can batch draw calls by type identity.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::SimulationError;

/// Immutable parameter record describing a species.
///
/// Rates are per-tick probability scales in `[0, 1]`; the actual per-tick
/// probabilities are `rate * scale` with the scales taken from
/// [`Params`](super::params::Params).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganismType {
    /// Display name, also used for batching diagnostics.
    pub name: String,
    /// Fill color as `#RRGGBB`.
    pub color: String,
    /// Body radius in pixels.
    pub size: f32,
    /// Reproduction probability scale in `[0, 1]`.
    pub growth_rate: f32,
    /// Stochastic death probability scale in `[0, 1]`.
    pub death_rate: f32,
    /// Deterministic death threshold in tick units.
    pub max_age: f32,
    /// Flavor text shown by the UI.
    pub description: String,
}

impl OrganismType {
    /// Validates the record and wraps it for sharing.
    pub fn shared(self) -> Result<Arc<Self>, SimulationError> {
        self.validate()?;
        Ok(Arc::new(self))
    }

    /// Checks rates, size, age, and color for validity.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.name.is_empty() {
            return Err(SimulationError::InvalidConfig("organism type needs a name"));
        }
        if !(0.0..=1.0).contains(&self.growth_rate) {
            return Err(SimulationError::InvalidConfig("growth_rate outside [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.death_rate) {
            return Err(SimulationError::InvalidConfig("death_rate outside [0, 1]"));
        }
        if !self.size.is_finite() || self.size <= 0.0 {
            return Err(SimulationError::InvalidConfig("size must be positive"));
        }
        if !self.max_age.is_finite() || self.max_age <= 0.0 {
            return Err(SimulationError::InvalidConfig("max_age must be positive"));
        }
        parse_hex_color(&self.color)?;
        Ok(())
    }

    /// Resolved RGB components of [`Self::color`].
    ///
    /// Valid for any type that passed [`Self::validate`], so callers that
    /// only hold validated types may treat a failure as unreachable.
    pub fn rgb(&self) -> Result<(u8, u8, u8), SimulationError> {
        parse_hex_color(&self.color)
    }

    /// Built-in species table, mirroring the unlockable roster of the
    /// original game: slow growers, fast bloomers, and a near-immortal
    /// extremophile.
    pub fn presets() -> Vec<Arc<Self>> {
        let table = vec![
            Self {
                name: "Coccus".into(),
                color: "#4ade80".into(),
                size: 4.0,
                growth_rate: 0.5,
                death_rate: 0.1,
                max_age: 100.0,
                description: "Balanced starter microbe.".into(),
            },
            Self {
                name: "Bacillus".into(),
                color: "#60a5fa".into(),
                size: 5.0,
                growth_rate: 0.8,
                death_rate: 0.3,
                max_age: 60.0,
                description: "Blooms fast, burns out fast.".into(),
            },
            Self {
                name: "Algae".into(),
                color: "#22c55e".into(),
                size: 6.0,
                growth_rate: 0.3,
                death_rate: 0.05,
                max_age: 200.0,
                description: "Slow photosynthetic grower.".into(),
            },
            Self {
                name: "Amoeba".into(),
                color: "#f472b6".into(),
                size: 8.0,
                growth_rate: 0.4,
                death_rate: 0.15,
                max_age: 120.0,
                description: "Large wanderer with middling odds.".into(),
            },
            Self {
                name: "Extremophile".into(),
                color: "#fbbf24".into(),
                size: 3.0,
                growth_rate: 0.1,
                death_rate: 0.01,
                max_age: 500.0,
                description: "Barely reproduces, barely dies.".into(),
            },
        ];

        table.into_iter().map(Arc::new).collect()
    }

    /// Loads custom type definitions from a JSON file, validating each.
    pub fn load_from_file(path: &str) -> Result<Vec<Arc<Self>>, SimulationError> {
        let json = std::fs::read_to_string(path)?;
        let types: Vec<Self> = serde_json::from_str(&json)?;
        types.into_iter().map(Self::shared).collect()
    }
}

/// Parses a `#RRGGBB` string into RGB components.
pub fn parse_hex_color(color: &str) -> Result<(u8, u8, u8), SimulationError> {
    let invalid = || SimulationError::InvalidColor(color.to_string());
    let hex = color.strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
    Ok((r, g, b))
}

/// `true` when both handles point at the same shared type record.
///
/// Batching and per-type statistics group by identity, not by field equality:
/// two separately loaded records with equal fields are distinct species.
pub fn same_type(a: &Arc<OrganismType>, b: &Arc<OrganismType>) -> bool {
    Arc::ptr_eq(a, b)
}
