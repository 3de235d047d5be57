//! Stage timing helper for the orchestrator.

use std::time::Instant;

/// Measures successive pipeline stages against one running clock.
pub(crate) struct StageClock {
    started: Instant,
    last: Instant,
}

impl StageClock {
    pub fn start() -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last: now,
        }
    }

    /// Milliseconds since the previous lap.
    pub fn lap(&mut self) -> u64 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last).as_millis() as u64;
        self.last = now;
        elapsed
    }

    /// Milliseconds since the clock started.
    pub fn total(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }
}
