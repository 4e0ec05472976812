//! Per-role contention and traffic counters
//!
//! Failures on a hop are otherwise silent (the consumer just sees no
//! version advance), so each role keeps counters a deployment can wire to
//! a diagnostic output.

/// Counters kept by a producer, consumer or broker role.
///
/// Plain values, read by copy; roles are single-owner so no atomics are
/// needed here.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ContentionStats {
    /// Lock acquisitions attempted.
    pub attempts: u64,
    /// Acquisitions that hit the wait bound.
    pub contended: u64,
    /// Polls that returned fresh data (consumer side).
    pub fresh: u64,
    /// Polls that found no version advance (consumer side).
    pub stale: u64,
    /// Current run of back-to-back contended acquires.
    pub consecutive_contended: u32,
}

impl ContentionStats {
    /// Record a successful acquisition, resetting the contention streak.
    pub(crate) fn record_acquired(&mut self) {
        self.attempts += 1;
        self.consecutive_contended = 0;
    }

    /// Record a contended acquisition. Returns the current streak length.
    pub(crate) fn record_contended(&mut self) -> u32 {
        self.attempts += 1;
        self.contended += 1;
        self.consecutive_contended += 1;
        self.consecutive_contended
    }

    /// Record a poll outcome.
    pub(crate) fn record_poll(&mut self, was_fresh: bool) {
        if was_fresh {
            self.fresh += 1;
        } else {
            self.stale += 1;
        }
    }

    /// Fraction of acquisition attempts that were contended.
    pub fn contention_ratio(&self) -> f64 {
        if self.attempts == 0 {
            return 0.0;
        }
        self.contended as f64 / self.attempts as f64
    }
}
