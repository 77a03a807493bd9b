use std::fmt;
use std::time::Duration;

use newsdesk_core::{Failure, FailureKind, QueryDescriptor};
use url::Url;

const API_KEY_PARAM: &str = "apiKey";

#[derive(Clone)]
pub struct GatewaySettings {
    pub base_url: Url,
    pub api_key: String,
    pub user_agent: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_bytes: u64,
}

impl GatewaySettings {
    pub fn new(base_url: Url, api_key: impl Into<String>) -> Self {
        Self {
            base_url,
            api_key: api_key.into(),
            user_agent: concat!("newsdesk/", env!("CARGO_PKG_VERSION")).to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(15),
            max_bytes: 5 * 1024 * 1024,
        }
    }
}

// Hand-written so the key never ends up in a log line.
impl fmt::Debug for GatewaySettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewaySettings")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &"<redacted>")
            .field("user_agent", &self.user_agent)
            .field("connect_timeout", &self.connect_timeout)
            .field("request_timeout", &self.request_timeout)
            .field("max_bytes", &self.max_bytes)
            .finish()
    }
}

/// Builds the upstream URL for `descriptor`.
///
/// Search terms are trimmed. The base URL may carry a path prefix; endpoint
/// paths are resolved below it.
pub fn request_url(
    base: &Url,
    descriptor: &QueryDescriptor,
    api_key: &str,
) -> Result<Url, Failure> {
    let mut base = base.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let endpoint = match descriptor {
        QueryDescriptor::Category { .. } => "v2/top-headlines",
        QueryDescriptor::Search { .. } => "v2/everything",
    };
    let mut url = base.join(endpoint).map_err(|err| {
        Failure::new(
            FailureKind::Network,
            format!("invalid base url {base}: {err}"),
        )
    })?;

    {
        let mut query = url.query_pairs_mut();
        match descriptor {
            QueryDescriptor::Category { country, category } => {
                query.append_pair("country", country.as_str());
                query.append_pair("category", category.as_str());
            }
            QueryDescriptor::Search { term } => {
                query.append_pair("q", term.trim());
            }
        }
        query.append_pair(API_KEY_PARAM, api_key);
    }
    Ok(url)
}

/// Renders `url` with the API key value masked, for logging.
pub fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == API_KEY_PARAM {
                "***".to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();
    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
