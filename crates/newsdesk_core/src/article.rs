use std::fmt;

use chrono::{DateTime, Utc};

use crate::RequestToken;

/// A normalized article as produced by the gateway.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub source: String,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Transport failure, connection refused, or timeout.
    Network,
    /// Upstream answered with a non-success status or an error envelope.
    Api { status: u16, code: Option<String> },
    /// The body did not have the expected shape.
    Parse,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Api {
                status,
                code: Some(code),
            } => write!(f, "api error {status} ({code})"),
            FailureKind::Api { status, code: None } => write!(f, "api error {status}"),
            FailureKind::Parse => write!(f, "parse error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub message: String,
}

impl Failure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Network, message)
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(FailureKind::Parse, message)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Articles(Vec<ContentItem>),
    Failed(Failure),
    /// Nothing was sent, e.g. a blank search term.
    Skipped,
}

/// A gateway result tagged with the token it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub token: RequestToken,
    pub outcome: FetchOutcome,
}

impl Completion {
    pub fn new(token: RequestToken, outcome: FetchOutcome) -> Self {
        Self { token, outcome }
    }
}
