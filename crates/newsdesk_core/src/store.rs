use newsdesk_logging::news_debug;

use crate::{ContentItem, Failure, RequestToken};

/// What happens to the displayed items when a new request starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshPolicy {
    /// Keep showing the previous items until the new ones arrive.
    #[default]
    KeepStale,
    /// Blank the list as soon as a request starts.
    ClearOnBegin,
}

/// Whether an apply call matched the most recently issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Current,
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultState {
    pub items: Vec<ContentItem>,
    pub loading: bool,
    pub error: Option<Failure>,
    pub last_token: Option<RequestToken>,
}

/// Holds the session's result state.
///
/// Only a completion carrying `last_token` may change `items` or `error`;
/// anything older is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultStore {
    state: ResultState,
    policy: RefreshPolicy,
}

impl ResultStore {
    pub fn new(policy: RefreshPolicy) -> Self {
        Self {
            state: ResultState::default(),
            policy,
        }
    }

    pub fn state(&self) -> &ResultState {
        &self.state
    }

    pub fn policy(&self) -> RefreshPolicy {
        self.policy
    }

    pub fn begin_request(&mut self, token: RequestToken) {
        self.state.loading = true;
        self.state.last_token = Some(token);
        if self.policy == RefreshPolicy::ClearOnBegin {
            self.state.items.clear();
        }
    }

    pub fn apply_result(&mut self, token: RequestToken, items: Vec<ContentItem>) -> Applied {
        if !self.is_current(token) {
            news_debug!("Discarding stale result for {} ({} items)", token, items.len());
            return Applied::Stale;
        }
        self.state.items = items;
        self.state.loading = false;
        self.state.error = None;
        Applied::Current
    }

    pub fn apply_failure(&mut self, token: RequestToken, failure: Failure) -> Applied {
        if !self.is_current(token) {
            news_debug!("Discarding stale failure for {}: {}", token, failure);
            return Applied::Stale;
        }
        self.state.error = Some(failure);
        self.state.loading = false;
        Applied::Current
    }

    /// Ends the current request without touching items or error.
    pub fn apply_cancel(&mut self, token: RequestToken) -> Applied {
        if !self.is_current(token) {
            return Applied::Stale;
        }
        self.state.loading = false;
        Applied::Current
    }

    /// Ends the current request and retires its token, so that a late
    /// completion for it is dropped as stale.
    pub fn abandon(&mut self, token: RequestToken) -> Applied {
        if !self.is_current(token) {
            return Applied::Stale;
        }
        self.state.loading = false;
        self.state.last_token = None;
        Applied::Current
    }

    fn is_current(&self, token: RequestToken) -> bool {
        self.state.last_token == Some(token)
    }
}
