//! Newsdesk core: the query-dispatch state machine.
//!
//! Everything here is pure. Time enters through [`Msg::Tick`] and
//! [`Msg::SearchInput`], network results through [`Msg::FetchCompleted`], and
//! requests leave as [`Effect`]s for the engine to execute.
mod article;
mod category;
mod dispatcher;
mod effect;
mod msg;
mod query;
mod search;
mod store;
mod timer;
mod update;
mod view_model;

pub use article::{Completion, ContentItem, Failure, FailureKind, FetchOutcome};
pub use category::CategoryController;
pub use dispatcher::{Dispatcher, DispatcherConfig};
pub use effect::Effect;
pub use msg::Msg;
pub use query::{Category, CountryCode, QueryDescriptor, RequestToken, Selection, SelectionError};
pub use search::{SearchController, SearchFire, SearchPhase, DEFAULT_QUIET_PERIOD};
pub use store::{Applied, RefreshPolicy, ResultState, ResultStore};
pub use timer::QueryTimer;
pub use update::update;
pub use view_model::{ArticleCardView, NewsViewModel, SUMMARY_LIMIT};
