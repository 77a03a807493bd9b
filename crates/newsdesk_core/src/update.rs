use newsdesk_logging::{news_debug, news_warn};

use crate::search::SearchFire;
use crate::{Applied, Completion, Dispatcher, Effect, FetchOutcome, Msg, QueryDescriptor};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: Dispatcher, msg: Msg) -> (Dispatcher, Vec<Effect>) {
    let effects = match msg {
        Msg::Activated => match state.category_mut().activate() {
            Some(descriptor) => state.issue(descriptor).1,
            None => Vec::new(),
        },
        // Issuing a category fetch also drops any pending or in-flight search.
        Msg::CategoryChanged(category) => match state.category_mut().select_category(category) {
            Some(descriptor) => state.issue(descriptor).1,
            None => Vec::new(),
        },
        Msg::CountryChanged(country) => match state.category_mut().select_country(country) {
            Some(descriptor) => state.issue(descriptor).1,
            None => Vec::new(),
        },
        Msg::SearchInput { term, at } => {
            state.search_mut().on_input(term, at);
            state.mark_dirty();
            Vec::new()
        }
        Msg::Tick(now) => match state.search_mut().poll(now) {
            SearchFire::Pending => Vec::new(),
            SearchFire::Blank => {
                news_debug!("Debounce fired on a blank term; nothing to fetch");
                state.mark_dirty();
                state.abandon_search()
            }
            SearchFire::Ready(term) => {
                let (token, effects) = state.issue(QueryDescriptor::search(term));
                state.search_mut().mark_in_flight(token);
                effects
            }
        },
        Msg::FetchCompleted(completion) => {
            apply_completion(&mut state, completion);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_completion(state: &mut Dispatcher, completion: Completion) {
    let Completion { token, outcome } = completion;
    state.search_mut().on_response(token);

    let applied = match outcome {
        FetchOutcome::Articles(items) => {
            let applied = state.store_mut().apply_result(token, items);
            if applied == Applied::Current {
                state.mark_shown();
            }
            applied
        }
        FetchOutcome::Failed(failure) => {
            news_warn!("Request {} failed: {}", token, failure);
            state.store_mut().apply_failure(token, failure)
        }
        FetchOutcome::Skipped => state.store_mut().apply_cancel(token),
    };

    if applied == Applied::Current {
        state.mark_dirty();
    }
}
