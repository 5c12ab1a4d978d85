// SPDX-License-Identifier: PMPL-1.0-or-later

//! Constant-rate pacing. No jitter, no back-off: runs must be reproducible.

use std::thread;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    initial: Duration,
    per_op: Duration,
}

impl Pacer {
    pub fn new(initial: Duration, per_op: Duration) -> Self {
        Self { initial, per_op }
    }

    /// Separates enumeration I/O from the burst in an observer's timeline.
    pub fn settle(&self) {
        sleep_nonzero(self.initial);
    }

    /// Called once after every file, whatever its outcome.
    pub fn pace(&self) {
        sleep_nonzero(self.per_op);
    }

    /// Nominal operations per second, ignoring the cost of the I/O itself.
    pub fn nominal_rate(&self) -> Option<f64> {
        if self.per_op.is_zero() {
            None
        } else {
            Some(1.0 / self.per_op.as_secs_f64())
        }
    }
}

fn sleep_nonzero(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn default_delay_is_fifty_ops_per_second() {
        let pacer = Pacer::new(Duration::ZERO, Duration::from_millis(20));
        let rate = pacer.nominal_rate().expect("non-zero delay has a rate");
        assert!((rate - 50.0).abs() < 1e-9);
        assert_eq!(Pacer::new(Duration::ZERO, Duration::ZERO).nominal_rate(), None);
    }

    #[test]
    fn pace_waits_at_least_the_delay() {
        let pacer = Pacer::new(Duration::ZERO, Duration::from_millis(5));
        let start = Instant::now();
        pacer.pace();
        pacer.pace();
        assert!(start.elapsed() >= Duration::from_millis(10));
    }
}
