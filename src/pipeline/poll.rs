//! Bounded readiness poll
//!
//! Repeatedly runs a lightweight probe up to a fixed number of attempts with
//! a fixed sleep between them. No backoff, no jitter; the only cancellation
//! is the shared interrupt flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use thiserror::Error;

/// Ways the poll can end without the probe succeeding
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PollError {
    /// Every attempt was used without a reachable response
    #[error("service not ready after {0} attempts")]
    Exhausted(u32),

    /// The interrupt flag was set while waiting
    #[error("interrupted while waiting for readiness")]
    Interrupted,
}

/// Fixed-bound, fixed-interval retry loop
#[derive(Debug, Clone, Copy)]
pub struct ReadinessPoll {
    max_attempts: u32,
    interval: Duration,
}

impl ReadinessPoll {
    /// Create a poll with the given bound and inter-attempt delay
    #[must_use]
    pub const fn new(max_attempts: u32, interval: Duration) -> Self {
        Self {
            max_attempts,
            interval,
        }
    }

    /// Attempt bound
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Run the probe until it succeeds or the bound is exhausted
    ///
    /// Attempts are numbered `1..=max_attempts` and the current attempt is
    /// passed to the probe (for progress reporting). Returns the attempt on
    /// which the probe first succeeded. The interrupt flag is consulted
    /// before every probe; a bound of zero exhausts immediately without
    /// probing. No sleep happens after the final attempt.
    pub fn run<F>(
        &self,
        mut probe: F,
        interrupt: &AtomicBool,
    ) -> Result<u32, PollError>
    where
        F: FnMut(u32) -> bool,
    {
        for attempt in 1..=self.max_attempts {
            if interrupt.load(Ordering::SeqCst) {
                return Err(PollError::Interrupted);
            }
            if probe(attempt) {
                return Ok(attempt);
            }
            if attempt < self.max_attempts {
                thread::sleep(self.interval);
            }
        }
        Err(PollError::Exhausted(self.max_attempts))
    }
}
