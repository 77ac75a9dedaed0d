//! Frame pacing for the cooperative update/draw loop.
//!
//! The host's per-frame callback drives the loop; this type decides which
//! frames do simulation work. Elapsed time accumulates across skipped
//! frames and is handed over in full when a tick finally runs, so frame
//! skipping on slow devices changes granularity but not simulated time.

/// Target frame interval for a 60 Hz cadence, in seconds.
pub const DEFAULT_MIN_FRAME_INTERVAL: f32 = 1.0 / 60.0;

/// Cooperative frame pacer.
#[derive(Debug)]
pub struct Scheduler {
    min_frame_interval: f32,
    accumulated: f32,
    active: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_FRAME_INTERVAL)
    }
}

impl Scheduler {
    /// Creates a pacer that runs at most once per `min_frame_interval`
    /// seconds. Non-positive intervals run every frame.
    pub fn new(min_frame_interval: f32) -> Self {
        Self {
            min_frame_interval: min_frame_interval.max(0.0),
            accumulated: 0.0,
            active: true,
        }
    }

    /// Reports one host frame with `elapsed` seconds since the previous
    /// one. Returns `Some(dt)` when a tick should run with that delta, or
    /// `None` when this frame only re-arms.
    ///
    /// After [`Self::stop`] this always returns `None`.
    pub fn frame(&mut self, elapsed: f32) -> Option<f32> {
        if !self.active {
            return None;
        }
        self.accumulated += elapsed.max(0.0);
        if self.accumulated < self.min_frame_interval {
            return None;
        }
        let dt = self.accumulated;
        self.accumulated = 0.0;
        Some(dt)
    }

    /// Definitively stops the pacer: no tick may run afterwards, and time
    /// accumulated toward the next tick is discarded rather than carried
    /// into a later resume.
    pub fn stop(&mut self) {
        self.active = false;
        self.accumulated = 0.0;
    }

    /// Re-arms a stopped pacer with a clean accumulator.
    pub fn resume(&mut self) {
        self.active = true;
        self.accumulated = 0.0;
    }

    /// `true` while the pacer may still schedule ticks.
    pub fn is_active(&self) -> bool {
        self.active
    }
}
