use std::time::{Duration, Instant};

use crate::{QueryTimer, RequestToken};

pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchPhase {
    #[default]
    Idle,
    Debouncing,
    InFlight(RequestToken),
}

/// Result of letting time pass on the search controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFire {
    /// Nothing is due yet.
    Pending,
    /// The quiet period elapsed on a blank term; nothing to fetch.
    Blank,
    /// The quiet period elapsed; the trimmed term should be fetched.
    Ready(String),
}

/// Debounces free-text input into at most one search per quiet period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchController {
    timer: QueryTimer<String>,
    quiet_period: Duration,
    phase: SearchPhase,
    term: String,
}

impl Default for SearchController {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}

impl SearchController {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            timer: QueryTimer::new(),
            quiet_period,
            phase: SearchPhase::Idle,
            term: String::new(),
        }
    }

    pub fn phase(&self) -> &SearchPhase {
        &self.phase
    }

    /// The latest raw input, as typed.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// When the pending debounce will fire, if one is armed.
    pub fn deadline(&self) -> Option<Instant> {
        self.timer.fire_at()
    }

    /// Records a keystroke and restarts the quiet period from `now`.
    ///
    /// Valid in every phase; an in-flight search is left to finish and is
    /// later dropped as stale.
    pub fn on_input(&mut self, term: impl Into<String>, now: Instant) {
        let term = term.into();
        self.timer.schedule(now, self.quiet_period, term.clone());
        self.term = term;
        self.phase = SearchPhase::Debouncing;
    }

    pub fn poll(&mut self, now: Instant) -> SearchFire {
        let Some(term) = self.timer.poll(now) else {
            return SearchFire::Pending;
        };
        let trimmed = term.trim();
        if trimmed.is_empty() {
            self.phase = SearchPhase::Idle;
            SearchFire::Blank
        } else {
            SearchFire::Ready(trimmed.to_string())
        }
    }

    /// Called by the dispatcher once a token was issued for a `Ready` term.
    pub fn mark_in_flight(&mut self, token: RequestToken) {
        self.phase = SearchPhase::InFlight(token);
    }

    /// Returns to `Idle` if `token` is the search currently in flight.
    pub fn on_response(&mut self, token: RequestToken) {
        if self.phase == SearchPhase::InFlight(token) {
            self.phase = SearchPhase::Idle;
        }
    }

    /// Drops any pending debounce and forgets a search still in flight.
    ///
    /// Used when a category fetch supersedes the search; the superseded
    /// response may never arrive, so the controller cannot wait for it.
    pub fn reset(&mut self) {
        self.timer.cancel();
        self.phase = SearchPhase::Idle;
    }
}
