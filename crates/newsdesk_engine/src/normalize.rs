//! Maps upstream JSON bodies onto [`ContentItem`]s and [`Failure`]s.

use chrono::{DateTime, Utc};
use newsdesk_core::{ContentItem, Failure, FailureKind};
use newsdesk_logging::news_debug;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Envelope {
    status: String,
    #[serde(default)]
    articles: Vec<RawArticle>,
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArticle {
    source: RawSource,
    author: Option<String>,
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    url_to_image: Option<String>,
    published_at: String,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
}

/// Normalizes a successful (2xx) body.
///
/// Articles without a title or link cannot be shown and are dropped; any other
/// shape mismatch fails the whole payload.
pub fn articles_from_body(status: u16, body: &[u8]) -> Result<Vec<ContentItem>, Failure> {
    let envelope: Envelope = serde_json::from_slice(body)
        .map_err(|err| Failure::parse(format!("unexpected response body: {err}")))?;

    if envelope.status != "ok" {
        return Err(Failure::new(
            FailureKind::Api {
                status,
                code: envelope.code,
            },
            envelope
                .message
                .unwrap_or_else(|| format!("upstream status {:?}", envelope.status)),
        ));
    }

    let total = envelope.articles.len();
    let mut items = Vec::with_capacity(total);
    for raw in envelope.articles {
        if let Some(item) = normalize(raw)? {
            items.push(item);
        }
    }
    if items.len() != total {
        news_debug!("Dropped {} of {} articles lacking title or url", total - items.len(), total);
    }
    Ok(items)
}

/// Builds the failure for a non-success status, using the upstream error body when present.
pub fn failure_from_status(status: u16, reason: &str, body: &[u8]) -> Failure {
    let parsed: Option<ErrorBody> = serde_json::from_slice(body).ok();
    let (code, message) = match parsed {
        Some(ErrorBody { code, message }) => (code, message),
        None => (None, None),
    };
    Failure::new(
        FailureKind::Api { status, code },
        message.unwrap_or_else(|| format!("{status} {reason}")),
    )
}

fn normalize(raw: RawArticle) -> Result<Option<ContentItem>, Failure> {
    let (Some(title), Some(url)) = (non_blank(raw.title), non_blank(raw.url)) else {
        return Ok(None);
    };
    let published_at = DateTime::parse_from_rfc3339(&raw.published_at)
        .map_err(|err| {
            Failure::parse(format!("invalid publishedAt {:?}: {err}", raw.published_at))
        })?
        .with_timezone(&Utc);

    Ok(Some(ContentItem {
        source: non_blank(raw.source.name).unwrap_or_else(|| "Unknown".to_string()),
        author: non_blank(raw.author),
        title,
        description: non_blank(raw.description),
        url,
        image_url: non_blank(raw.url_to_image),
        published_at,
    }))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BODY: &str = r#"{
        "status": "ok",
        "totalResults": 2,
        "articles": [
            {
                "source": {"id": null, "name": "BBC News"},
                "author": "",
                "title": "Launch succeeds",
                "description": null,
                "url": "https://bbc.example/launch",
                "urlToImage": "https://bbc.example/launch.jpg",
                "publishedAt": "2024-05-01T12:30:00Z",
                "content": "ignored"
            },
            {
                "source": {"id": "x", "name": "X"},
                "author": "A",
                "title": null,
                "description": "d",
                "url": "https://x.example",
                "urlToImage": null,
                "publishedAt": "2024-05-01T12:30:00Z"
            }
        ]
    }"#;

    #[test]
    fn normalizes_and_drops_untitled() {
        let items = articles_from_body(200, BODY.as_bytes()).unwrap();
        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.source, "BBC News");
        assert_eq!(item.author, None);
        assert_eq!(item.description, None);
        assert_eq!(item.image_url.as_deref(), Some("https://bbc.example/launch.jpg"));
        assert_eq!(item.published_at.to_rfc3339(), "2024-05-01T12:30:00+00:00");
    }

    #[test]
    fn error_envelope_is_api_failure() {
        let body = br#"{"status":"error","code":"rateLimited","message":"Too many requests"}"#;
        let failure = articles_from_body(200, body).unwrap_err();
        assert_eq!(
            failure.kind,
            FailureKind::Api {
                status: 200,
                code: Some("rateLimited".to_string())
            }
        );
        assert_eq!(failure.message, "Too many requests");
    }

    #[test]
    fn malformed_body_is_parse_failure() {
        let failure = articles_from_body(200, b"<html>").unwrap_err();
        assert_eq!(failure.kind, FailureKind::Parse);

        let bad_date = br#"{"status":"ok","articles":[{"source":{"name":"S"},"title":"t","url":"u","publishedAt":"yesterday"}]}"#;
        assert_eq!(articles_from_body(200, bad_date).unwrap_err().kind, FailureKind::Parse);
    }

    #[test]
    fn status_failure_without_json_body() {
        let failure = failure_from_status(503, "Service Unavailable", b"down");
        assert_eq!(failure.kind, FailureKind::Api { status: 503, code: None });
        assert_eq!(failure.message, "503 Service Unavailable");
    }
}
