//! Restartable one-shot timer driven by explicit clock readings.
//!
//! The timer never reads the clock itself. Owners pass `now` in, which keeps
//! the state machines built on top of it deterministic under test.

use std::time::{Duration, Instant};

/// Arms a single pending payload that is handed back once its deadline passes.
///
/// Scheduling again before the deadline replaces both the payload and the
/// deadline, so only the trailing call within a quiet window survives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryTimer<T> {
    armed: Option<Armed<T>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Armed<T> {
    fire_at: Instant,
    payload: T,
}

impl<T> Default for QueryTimer<T> {
    fn default() -> Self {
        Self { armed: None }
    }
}

impl<T> QueryTimer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arms the timer to fire `delay` after `now`, discarding any earlier arming.
    pub fn schedule(&mut self, now: Instant, delay: Duration, payload: T) {
        self.armed = Some(Armed {
            fire_at: now + delay,
            payload,
        });
    }

    /// Disarms the timer. Returns the discarded payload, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.armed.take().map(|armed| armed.payload)
    }

    /// Returns the payload once `now` has reached the deadline, disarming the timer.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match &self.armed {
            Some(armed) if now >= armed.fire_at => self.cancel(),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.armed.is_some()
    }

    pub fn fire_at(&self) -> Option<Instant> {
        self.armed.as_ref().map(|armed| armed.fire_at)
    }

    pub fn payload(&self) -> Option<&T> {
        self.armed.as_ref().map(|armed| &armed.payload)
    }
}

#[cfg(test)]
mod tests {
    use super::QueryTimer;
    use std::time::{Duration, Instant};

    const QUIET: Duration = Duration::from_millis(500);

    #[test]
    fn fires_once_after_delay() {
        let start = Instant::now();
        let mut timer = QueryTimer::new();
        timer.schedule(start, QUIET, "a");

        assert_eq!(timer.poll(start + Duration::from_millis(499)), None);
        assert_eq!(timer.poll(start + QUIET), Some("a"));
        assert_eq!(timer.poll(start + QUIET * 2), None);
        assert!(!timer.is_pending());
    }

    #[test]
    fn rescheduling_restarts_the_countdown() {
        let start = Instant::now();
        let mut timer = QueryTimer::new();
        timer.schedule(start, QUIET, "first");
        let later = start + Duration::from_millis(300);
        timer.schedule(later, QUIET, "second");

        assert_eq!(timer.poll(start + QUIET), None);
        assert_eq!(timer.fire_at(), Some(later + QUIET));
        assert_eq!(timer.poll(later + QUIET), Some("second"));
    }

    #[test]
    fn cancel_is_harmless_when_idle_or_fired() {
        let start = Instant::now();
        let mut timer: QueryTimer<u8> = QueryTimer::new();
        assert_eq!(timer.cancel(), None);

        timer.schedule(start, QUIET, 1);
        assert_eq!(timer.poll(start + QUIET), Some(1));
        assert_eq!(timer.cancel(), None);

        timer.schedule(start, QUIET, 2);
        assert_eq!(timer.cancel(), Some(2));
        assert_eq!(timer.poll(start + QUIET), None);
    }
}
