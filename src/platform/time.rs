//! Monotonic time source for frame deltas

use std::time::Instant;

/// Measures wall-clock time between consecutive frames.
///
/// Only the difference between two instants is ever turned into `f32`, so the
/// delta keeps its precision however long the game has been running.
#[derive(Debug, Clone, Copy)]
pub struct FrameTimer {
    last: Instant,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Make the next delta start from now (e.g. when the loop begins)
    pub fn restart(&mut self) {
        self.last = Instant::now();
    }

    /// Seconds since the previous call (or `restart`), never negative
    pub fn delta(&mut self) -> f32 {
        self.delta_at(Instant::now())
    }

    /// Seconds between the previous frame and `now`
    pub fn delta_at(&mut self, now: Instant) -> f32 {
        let delta = now.saturating_duration_since(self.last).as_secs_f32();
        self.last = now.max(self.last);
        delta
    }
}
