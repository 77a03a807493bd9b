use std::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The view was mounted; fires the default category fetch.
    Activated,
    /// User picked a category from the selector.
    CategoryChanged(crate::Category),
    /// User picked a country.
    CountryChanged(crate::CountryCode),
    /// User edited the search box.
    SearchInput { term: String, at: Instant },
    /// Clock tick used to fire due debounce timers.
    Tick(Instant),
    /// Gateway completion, stale or not.
    FetchCompleted(crate::Completion),
    /// Fallback for placeholder wiring.
    NoOp,
}
