use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use shared_types::Tick;

use crate::ports::GameClock;

/// Clock driven by the caller.
///
/// Used where the engine pushes its tick count in, and in tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start: Tick) -> Self {
        Self {
            now: AtomicU64::new(start),
        }
    }

    pub fn set(&self, tick: Tick) {
        self.now.store(tick, Ordering::SeqCst);
    }

    /// Move the clock forward by `ticks`.
    pub fn advance(&self, ticks: Tick) {
        self.now.fetch_add(ticks, Ordering::SeqCst);
    }
}

impl GameClock for ManualClock {
    fn now(&self) -> Tick {
        self.now.load(Ordering::SeqCst)
    }
}

/// Milliseconds since the clock was created.
#[derive(Debug)]
pub struct MonotonicClock {
    started: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            started: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl GameClock for MonotonicClock {
    fn now(&self) -> Tick {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(10);
        assert_eq!(clock.now(), 10);
        clock.advance(90);
        assert_eq!(clock.now(), 100);
        clock.set(5);
        assert_eq!(clock.now(), 5);
    }

    #[test]
    fn test_monotonic_clock_never_decreases() {
        let clock = MonotonicClock::new();
        let first = clock.now();
        assert!(clock.now() >= first);
    }
}
