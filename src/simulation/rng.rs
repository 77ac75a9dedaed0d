//! Deterministic random-number construction.
//!
//! Every stochastic decision in the simulation (random walks, reproduction
//! draws, attrition draws, offspring offsets) flows through a single `StdRng`
//! owned by the engine, so a fixed seed replays the exact same run.

use rand::SeedableRng;
use rand::rngs::StdRng;

/// Creates the engine RNG.
///
/// With `Some(seed)` the stream is fully deterministic; with `None` the RNG
/// is seeded from the operating system.
pub fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
