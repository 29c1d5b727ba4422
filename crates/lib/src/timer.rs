//! Periodic timer driven by elapsed time instead of a native event source.
//!
//! Frame-based hosts (egui) and async hosts (tokio) both report how much time has passed;
//! the timer turns that into a count of whole periods that are due.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PeriodicTimer {
    period: Duration,
    carry: Duration,
    running: bool,
}

impl PeriodicTimer {
    /// Started timer. A zero period is clamped to one millisecond.
    pub fn start(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_millis(1)),
            carry: Duration::ZERO,
            running: true,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.carry = Duration::ZERO;
    }

    /// Time until the next period fires, or None when stopped.
    pub fn until_next(&self) -> Option<Duration> {
        self.running.then(|| self.period - self.carry)
    }

    /// Add elapsed time and return how many periods fired.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        let total = self.carry + elapsed;
        let fired = total.as_nanos() / self.period.as_nanos();
        let consumed = self.period.as_nanos() * fired;
        self.carry = Duration::from_nanos((total.as_nanos() - consumed) as u64);
        u32::try_from(fired).unwrap_or(u32::MAX)
    }
}
