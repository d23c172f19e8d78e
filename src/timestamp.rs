use std::time::{Duration, SystemTime};
use libc::{clock_gettime, timespec, CLOCK_MONOTONIC};

pub fn monotonic_ns() -> u128 {
    unsafe {
        let mut ts: timespec = std::mem::zeroed();
        if clock_gettime(CLOCK_MONOTONIC, &mut ts) == 0 {
            (ts.tv_sec as u128) * 1_000_000_000 + (ts.tv_nsec as u128)
        } else {
            // fallback
            SystemTime::now()
                .duration_since(SystemTime::UNIX_EPOCH)
                .unwrap_or_else(|_| Duration::from_secs(0))
                .as_nanos()
        }
    }
}

/// Measures one reachability check.
#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    start_ns: u128,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self { start_ns: monotonic_ns() }
    }

    pub fn elapsed(&self) -> Duration {
        let ns = monotonic_ns().saturating_sub(self.start_ns);
        Duration::from_nanos(ns.min(u64::MAX as u128) as u64)
    }

    /// Time left until `budget` has passed since `start`, zero once exceeded.
    pub fn remaining(&self, budget: Duration) -> Duration {
        budget.saturating_sub(self.elapsed())
    }
}
