//! # Petri - Organism Population Simulation
//!
//! A real-time cellular/organism population simulation: place organisms on
//! a canvas, watch them wander, reproduce, age, and die, with the
//! population capped and re-rendered every frame.
//!
//! ## Features
//!
//! - Two-pass tick algorithm (evaluate all, then apply all)
//! - Species defined as immutable shared parameter records
//! - KD-tree spatial index for local crowding checks
//! - Object pool recycling organism instances at high churn
//! - Environmental factors biasing reproduction and death
//! - Deterministic replay from a fixed RNG seed
//! - Batched-by-type rendering with macroquad and an egui control panel
//!
//! ## Core Modules
//!
//! - [`simulation::engine`] - State machine and per-tick update
//! - [`simulation::organism`] - Entity state and decision logic
//! - [`simulation::population`] - The live organism store
//! - [`simulation::pool`] - Organism instance recycling
//! - [`simulation::spatial`] - Neighbor queries
//! - [`simulation::scheduler`] - Cooperative frame pacing

/// Core simulation logic and data structures.
pub mod simulation {
    /// Simulation engine: state machine and two-pass tick.
    pub mod engine;
    /// Global environmental modifiers.
    pub mod environment;
    /// Error taxonomy for construction, control, and tick faults.
    pub mod error;
    /// Organism entity state and per-tick decisions.
    pub mod organism;
    /// Immutable species parameter records.
    pub mod organism_type;
    /// Tunable parameters and canvas bounds.
    pub mod params;
    /// Object pool for organism instances.
    pub mod pool;
    /// The authoritative store of live organisms.
    pub mod population;
    /// Deterministic RNG construction.
    pub mod rng;
    /// Cooperative frame pacing.
    pub mod scheduler;
    /// Spatial index for bounded neighbor queries.
    pub mod spatial;
    /// Derived population statistics.
    pub mod stats;
}

/// Rendering of the population, grid, and placement overlays.
pub mod graphics;
/// egui control panel and stats plots.
pub mod ui;
