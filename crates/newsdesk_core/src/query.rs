use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Sequence number assigned when a request is issued.
///
/// Tokens only ever grow, so comparing two of them tells which request the
/// user asked for last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub const FIRST: RequestToken = RequestToken(1);

    pub fn value(self) -> u64 {
        self.0
    }

    pub(crate) fn next(self) -> RequestToken {
        RequestToken(self.0 + 1)
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("country code must be two ASCII letters, got {0:?}")]
    InvalidCountry(String),
    #[error("unknown category {0:?}")]
    UnknownCategory(String),
}

/// ISO 3166 alpha-2 code, stored lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CountryCode(String);

impl CountryCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CountryCode {
    fn default() -> Self {
        CountryCode("us".to_string())
    }
}

impl FromStr for CountryCode {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            Ok(CountryCode(trimmed.to_ascii_lowercase()))
        } else {
            Err(SelectionError::InvalidCountry(raw.to_string()))
        }
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Category {
    Business,
    Entertainment,
    #[default]
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    /// Query-string form expected by the upstream API.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Business => "Business",
            Category::Entertainment => "Entertainment",
            Category::General => "General",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::Sports => "Sports",
            Category::Technology => "Technology",
        }
    }
}

impl FromStr for Category {
    type Err = SelectionError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| SelectionError::UnknownCategory(raw.to_string()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The (country, category) pair driving top-headlines requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub country: CountryCode,
    pub category: Category,
}

impl Selection {
    pub fn new(country: CountryCode, category: Category) -> Self {
        Self { country, category }
    }
}

/// What to fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryDescriptor {
    Category {
        country: CountryCode,
        category: Category,
    },
    Search {
        term: String,
    },
}

impl QueryDescriptor {
    pub fn for_selection(selection: &Selection) -> Self {
        QueryDescriptor::Category {
            country: selection.country.clone(),
            category: selection.category,
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        QueryDescriptor::Search { term: term.into() }
    }

    /// A search whose term is empty after trimming must never reach the network.
    pub fn is_blank_search(&self) -> bool {
        matches!(self, QueryDescriptor::Search { term } if term.trim().is_empty())
    }
}

impl fmt::Display for QueryDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryDescriptor::Category { country, category } => {
                write!(f, "top-headlines({country}, {category})")
            }
            QueryDescriptor::Search { term } => write!(f, "search({term:?})"),
        }
    }
}
