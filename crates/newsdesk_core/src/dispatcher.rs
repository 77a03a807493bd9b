use std::time::{Duration, Instant};

use newsdesk_logging::news_info;

use crate::search::DEFAULT_QUIET_PERIOD;
use crate::view_model::NewsViewModel;
use crate::{
    CategoryController, Effect, QueryDescriptor, RefreshPolicy, RequestToken, ResultStore,
    SearchController, Selection,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatcherConfig {
    pub selection: Selection,
    pub quiet_period: Duration,
    pub refresh_policy: RefreshPolicy,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            selection: Selection::default(),
            quiet_period: DEFAULT_QUIET_PERIOD,
            refresh_policy: RefreshPolicy::default(),
        }
    }
}

/// Composition root of the query pipeline.
///
/// Both controllers draw tokens from the same counter, so the store's
/// `last_token` always names the most recently issued request no matter which
/// controller issued it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatcher {
    next_token: RequestToken,
    store: ResultStore,
    search: SearchController,
    category: CategoryController,
    last_query: Option<QueryDescriptor>,
    shown_query: Option<QueryDescriptor>,
    dirty: bool,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(DispatcherConfig::default())
    }
}

impl Dispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            next_token: RequestToken::FIRST,
            store: ResultStore::new(config.refresh_policy),
            search: SearchController::new(config.quiet_period),
            category: CategoryController::new(config.selection),
            last_query: None,
            shown_query: None,
            dirty: false,
        }
    }

    pub fn view(&self) -> NewsViewModel {
        NewsViewModel::build(self)
    }

    pub fn store(&self) -> &ResultStore {
        &self.store
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    pub fn category(&self) -> &CategoryController {
        &self.category
    }

    /// The descriptor of the most recently issued request.
    pub fn last_query(&self) -> Option<&QueryDescriptor> {
        self.last_query.as_ref()
    }

    /// The descriptor whose articles are currently held by the store.
    pub fn shown_query(&self) -> Option<&QueryDescriptor> {
        self.shown_query.as_ref()
    }

    /// Earliest instant at which a `Tick` can change anything.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.search.deadline()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn store_mut(&mut self) -> &mut ResultStore {
        &mut self.store
    }

    pub(crate) fn search_mut(&mut self) -> &mut SearchController {
        &mut self.search
    }

    /// Records that the most recently issued request just delivered articles.
    pub(crate) fn mark_shown(&mut self) {
        self.shown_query = self.last_query.clone();
    }

    pub(crate) fn category_mut(&mut self) -> &mut CategoryController {
        &mut self.category
    }

    /// Assigns a fresh token to `descriptor` and marks the store as loading.
    pub(crate) fn issue(&mut self, descriptor: QueryDescriptor) -> (RequestToken, Vec<Effect>) {
        let token = self.next_token;
        self.next_token = token.next();
        news_info!("Issuing {} for {}", token, descriptor);

        if !matches!(descriptor, QueryDescriptor::Search { .. }) {
            self.search.reset();
        }
        self.store.begin_request(token);
        self.last_query = Some(descriptor.clone());
        self.dirty = true;

        let mut effects = Vec::with_capacity(2);
        if token > RequestToken::FIRST {
            effects.push(Effect::CancelSuperseded { before: token });
        }
        effects.push(Effect::Fetch { token, descriptor });
        (token, effects)
    }

    /// Abandons a search that is still loading after the input went blank.
    pub(crate) fn abandon_search(&mut self) -> Vec<Effect> {
        let state = self.store.state();
        let (true, Some(token), Some(QueryDescriptor::Search { .. })) =
            (state.loading, state.last_token, self.last_query.as_ref())
        else {
            return Vec::new();
        };
        news_info!("Abandoning search {}", token);
        self.store.abandon(token);
        self.dirty = true;
        vec![Effect::CancelSuperseded {
            before: self.next_token,
        }]
    }
}
