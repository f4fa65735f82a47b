//! Host-driven timers
//!
//! The controller never sleeps. The host advances timers with its frame
//! delta, the same way a fixed-timestep accumulator drains frame time.

use serde::{Deserialize, Serialize};

/// Guard against pathological frame deltas firing a timer thousands of times
pub const MAX_FIRINGS_PER_ADVANCE: u32 = 8;

/// A repeating timer with a fixed period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatingTimer {
    period: f32,
    accumulator: f32,
    running: bool,
}

impl RepeatingTimer {
    /// Create a stopped timer
    pub fn new(period: f32) -> Self {
        Self {
            period: period.max(f32::EPSILON),
            accumulator: 0.0,
            running: false,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Start (or restart) from zero elapsed time
    pub fn start(&mut self) {
        self.accumulator = 0.0;
        self.running = true;
    }

    /// Stop the timer; stopping a stopped timer is a no-op
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    /// Advance by `dt` seconds and return how many times the timer fired
    pub fn advance(&mut self, dt: f32) -> u32 {
        if !self.running || !(dt > 0.0) {
            return 0;
        }

        self.accumulator += dt;
        let mut fired = 0;
        while self.accumulator >= self.period && fired < MAX_FIRINGS_PER_ADVANCE {
            self.accumulator -= self.period;
            fired += 1;
        }
        if fired == MAX_FIRINGS_PER_ADVANCE {
            // Drop the backlog instead of spiralling
            self.accumulator = self.accumulator.min(self.period);
        }
        fired
    }
}
