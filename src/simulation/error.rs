//! Error taxonomy for the simulation core.
//!
//! Construction and control-surface failures propagate synchronously to the
//! caller. Per-organism anomalies inside a tick are logged and skipped instead
//! of being raised (see the engine), while apply-phase inconsistencies surface
//! as [`SimulationError::TickFault`] and halt further ticking.

use thiserror::Error;

/// Errors emitted by the simulation core.
#[derive(Debug, Error)]
pub enum SimulationError {
    /// Configuration values that cannot be used (zero-sized canvas, invalid
    /// organism type parameters, bad pool sizing).
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// Speed multiplier outside the accepted control range (1-10).
    #[error("speed multiplier {0} outside 1-10")]
    SpeedOutOfRange(f32),

    /// Population cap outside the accepted control range (1-5000).
    #[error("max population {0} outside 1-5000")]
    PopulationOutOfRange(usize),

    /// A color string that does not parse as `#RRGGBB`.
    #[error("invalid color {0:?}: expected #RRGGBB")]
    InvalidColor(String),

    /// The apply phase left the population store in an inconsistent state.
    /// The engine enters its faulted state and refuses further ticks.
    #[error("tick fault: {0}")]
    TickFault(&'static str),

    /// Failure reading or writing a parameter file.
    #[error("parameter file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Failure parsing a parameter file.
    #[error("parameter file parse failed: {0}")]
    Parse(#[from] serde_json::Error),
}
