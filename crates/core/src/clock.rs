//! Fixed-step simulation clock

use crate::core_types::Seconds;
use serde::{Deserialize, Serialize};

/// Default integration step
pub const DEFAULT_TIME_DELTA: Seconds = Seconds::new(0.01);

/// Counts ticks against a fixed time delta.
///
/// The delta is set at construction and never changes mid-run; all
/// physics in a tick sees the same dt. Pausing or cancelling a run is
/// only meaningful between ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationClock {
    time_delta: Seconds,
    ticks: u64,
}

impl SimulationClock {
    /// Create a clock with the given step size
    #[must_use]
    pub fn new(time_delta: Seconds) -> Self {
        Self {
            time_delta,
            ticks: 0,
        }
    }

    /// Step size per tick
    #[must_use]
    pub fn time_delta(&self) -> Seconds {
        self.time_delta
    }

    /// Number of completed ticks
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time elapsed so far
    #[must_use]
    pub fn elapsed(&self) -> Seconds {
        self.time_delta * self.ticks as f64
    }

    /// Record one completed tick
    pub fn advance(&mut self) {
        self.ticks += 1;
    }
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_DELTA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn elapsed_is_ticks_times_delta() {
        let mut clock = SimulationClock::default();
        for _ in 0..250 {
            clock.advance();
        }
        assert_eq!(clock.ticks(), 250);
        assert_relative_eq!(*clock.elapsed(), 2.5);
    }
}
