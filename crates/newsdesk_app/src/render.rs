use std::fmt::Write;

use newsdesk_core::{ArticleCardView, FailureKind, NewsViewModel};

/// Renders the view model as plain text for the terminal.
pub fn render(view: &NewsViewModel) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "=== {} [{} / {}] ===",
        view.heading,
        view.selection.country,
        view.selection.category.label()
    );

    if view.debouncing {
        let _ = writeln!(out, "Searching for \"{}\"...", view.search_term.trim());
    }
    if view.loading {
        let _ = writeln!(out, "Loading News...");
    }
    if let Some(failure) = &view.error {
        let _ = writeln!(out, "! {}: {}", error_label(&failure.kind), failure.message);
    }

    if view.cards.is_empty() && !view.loading {
        let _ = writeln!(out, "(no articles)");
    }
    for (index, card) in view.cards.iter().enumerate() {
        render_card(&mut out, index + 1, card);
    }
    out
}

fn render_card(out: &mut String, number: usize, card: &ArticleCardView) {
    let _ = writeln!(out, "{number:>3}. {}", card.title);
    let _ = writeln!(
        out,
        "     {} | By {} | {}",
        card.source, card.author, card.published_on
    );
    if let Some(summary) = &card.summary {
        let _ = writeln!(out, "     {summary}");
    }
    let _ = writeln!(out, "     {}", card.url);
}

fn error_label(kind: &FailureKind) -> &'static str {
    match kind {
        FailureKind::Network => "Network error",
        FailureKind::Api { .. } => "News API error",
        FailureKind::Parse => "Unexpected response",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_core::{Failure, Selection};

    fn view() -> NewsViewModel {
        NewsViewModel {
            heading: "General News".to_string(),
            selection: Selection::default(),
            search_term: String::new(),
            debouncing: false,
            loading: false,
            error: None,
            cards: Vec::new(),
        }
    }

    fn card() -> ArticleCardView {
        ArticleCardView {
            title: "Rates held".to_string(),
            source: "Bloomberg".to_string(),
            author: "Unknown".to_string(),
            summary: Some("The central bank...".to_string()),
            url: "https://example.com/rates".to_string(),
            image_url: None,
            published_on: "2024-06-12".to_string(),
        }
    }

    #[test]
    fn empty_view_says_so() {
        let text = render(&view());
        assert!(text.starts_with("=== General News [us / General] ==="));
        assert!(text.contains("(no articles)"));
    }

    #[test]
    fn error_and_cards_are_both_shown() {
        let mut view = view();
        view.cards = vec![card()];
        view.error = Some(Failure::network("connection refused"));

        let text = render(&view);
        assert!(text.contains("! Network error: connection refused"));
        assert!(text.contains("  1. Rates held"));
        assert!(text.contains("Bloomberg | By Unknown | 2024-06-12"));
        assert!(!text.contains("(no articles)"));
    }

    #[test]
    fn loading_banner() {
        let mut view = view();
        view.loading = true;
        let text = render(&view);
        assert!(text.contains("Loading News..."));
        assert!(!text.contains("(no articles)"));
    }
}
