use crate::search::SearchPhase;
use crate::{ContentItem, Dispatcher, Failure, QueryDescriptor, Selection};

/// Descriptions longer than this many characters are cut and suffixed with `...`.
pub const SUMMARY_LIMIT: usize = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsViewModel {
    pub heading: String,
    pub selection: Selection,
    pub search_term: String,
    pub debouncing: bool,
    pub loading: bool,
    pub error: Option<Failure>,
    pub cards: Vec<ArticleCardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCardView {
    pub title: String,
    pub source: String,
    pub author: String,
    pub summary: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub published_on: String,
}

impl NewsViewModel {
    pub(crate) fn build(state: &Dispatcher) -> Self {
        let result = state.store().state();
        let selection = state.category().selection().clone();
        Self {
            heading: heading(state.shown_query(), &selection),
            search_term: state.search().term().to_string(),
            debouncing: *state.search().phase() == SearchPhase::Debouncing,
            loading: result.loading,
            error: result.error.clone(),
            cards: result.items.iter().map(ArticleCardView::from_item).collect(),
            selection,
        }
    }
}

impl ArticleCardView {
    pub fn from_item(item: &ContentItem) -> Self {
        Self {
            title: item.title.clone(),
            source: item.source.clone(),
            author: item.author.clone().unwrap_or_else(|| "Unknown".to_string()),
            summary: item.description.as_deref().map(summarize),
            url: item.url.clone(),
            image_url: item.image_url.clone(),
            published_on: item.published_at.format("%Y-%m-%d").to_string(),
        }
    }
}

/// Names the query behind the articles on screen, not the one still loading.
fn heading(shown_query: Option<&QueryDescriptor>, selection: &Selection) -> String {
    match shown_query {
        Some(QueryDescriptor::Search { term }) => format!("Search: \"{term}\""),
        Some(QueryDescriptor::Category { category, .. }) => format!("{} News", category.label()),
        None => format!("{} News", selection.category.label()),
    }
}

fn summarize(description: &str) -> String {
    match description.char_indices().nth(SUMMARY_LIMIT) {
        Some((cut, _)) => format!("{}...", &description[..cut]),
        None => description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    fn item(description: Option<&str>, author: Option<&str>) -> ContentItem {
        ContentItem {
            source: "Reuters".to_string(),
            author: author.map(str::to_string),
            title: "Markets rally".to_string(),
            description: description.map(str::to_string),
            url: "https://example.com/markets".to_string(),
            image_url: None,
            published_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        }
    }

    #[test]
    fn long_description_is_truncated_on_char_boundary() {
        let long = "é".repeat(SUMMARY_LIMIT + 5);
        let card = ArticleCardView::from_item(&item(Some(&long), None));
        let summary = card.summary.unwrap();
        assert!(summary.ends_with("..."));
        assert_eq!(summary.chars().count(), SUMMARY_LIMIT + 3);
    }

    #[test]
    fn short_description_and_missing_author() {
        let card = ArticleCardView::from_item(&item(Some("Short."), None));
        assert_eq!(card.summary.as_deref(), Some("Short."));
        assert_eq!(card.author, "Unknown");
        assert_eq!(card.published_on, "2023-11-14");
    }

    #[test]
    fn heading_names_shown_query_or_selection() {
        let selection = Selection::new("us".parse().unwrap(), crate::Category::Health);
        assert_eq!(heading(None, &selection), "Health News");
        assert_eq!(
            heading(Some(&QueryDescriptor::search("storm")), &selection),
            "Search: \"storm\""
        );
    }

    #[test]
    fn exact_limit_is_not_truncated() {
        let exact = "a".repeat(SUMMARY_LIMIT);
        let card = ArticleCardView::from_item(&item(Some(&exact), Some("Ana")));
        assert_eq!(card.summary.as_deref(), Some(exact.as_str()));
        assert_eq!(card.author, "Ana");
    }
}
