use futures_util::StreamExt;
use newsdesk_core::{Completion, Failure, FetchOutcome, QueryDescriptor, RequestToken};
use newsdesk_logging::{news_debug, news_info};
use reqwest::header::{CONTENT_TYPE, USER_AGENT};

use crate::endpoint::{redacted, request_url, GatewaySettings};
use crate::normalize::{articles_from_body, failure_from_status};
use crate::EngineError;

/// Executes one query against the upstream content API.
///
/// Implementations always return a [`Completion`] tagged with `token`;
/// transport problems become [`FetchOutcome::Failed`], never a panic.
#[async_trait::async_trait]
pub trait Gateway: Send + Sync {
    async fn execute(&self, token: RequestToken, descriptor: &QueryDescriptor) -> Completion;
}

#[derive(Debug, Clone)]
pub struct NewsApiGateway {
    settings: GatewaySettings,
    client: reqwest::Client,
}

impl NewsApiGateway {
    pub fn new(settings: GatewaySettings) -> Result<Self, EngineError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| EngineError::Client(err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &GatewaySettings {
        &self.settings
    }

    async fn fetch(&self, descriptor: &QueryDescriptor) -> Result<FetchOutcome, Failure> {
        let url = request_url(&self.settings.base_url, descriptor, &self.settings.api_key)?;
        news_debug!("GET {}", redacted(&url));

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, self.settings.user_agent.as_str())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, content_len));
            }
        }

        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = body.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(too_large(self.settings.max_bytes, next_len));
            }
            body.extend_from_slice(&chunk);
        }

        if !status.is_success() {
            return Err(failure_from_status(
                status.as_u16(),
                status.canonical_reason().unwrap_or("unknown status"),
                &body,
            ));
        }

        if let Some(ct) = content_type.as_deref() {
            if !is_json(ct) {
                return Err(Failure::parse(format!("unexpected content type {ct}")));
            }
        }

        let items = articles_from_body(status.as_u16(), &body)?;
        Ok(FetchOutcome::Articles(items))
    }
}

#[async_trait::async_trait]
impl Gateway for NewsApiGateway {
    async fn execute(&self, token: RequestToken, descriptor: &QueryDescriptor) -> Completion {
        if descriptor.is_blank_search() {
            news_debug!("Skipping blank search for {}", token);
            return Completion::new(token, FetchOutcome::Skipped);
        }

        let outcome = match self.fetch(descriptor).await {
            Ok(outcome) => outcome,
            Err(failure) => FetchOutcome::Failed(failure),
        };
        match &outcome {
            FetchOutcome::Articles(items) => {
                news_info!("{} {} returned {} articles", token, descriptor, items.len())
            }
            FetchOutcome::Failed(failure) => {
                news_info!("{} {} failed: {}", token, descriptor, failure)
            }
            FetchOutcome::Skipped => {}
        }
        Completion::new(token, outcome)
    }
}

fn is_json(content_type: &str) -> bool {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim();
    mime.eq_ignore_ascii_case("application/json")
}

fn too_large(max_bytes: u64, actual: u64) -> Failure {
    Failure::parse(format!(
        "response too large (max {max_bytes} bytes, got {actual})"
    ))
}

fn map_reqwest_error(err: reqwest::Error) -> Failure {
    // The request URL carries the API key.
    let err = err.without_url();
    if err.is_timeout() {
        return Failure::network(format!("request timed out: {err}"));
    }
    Failure::network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::is_json;

    #[test]
    fn json_content_type_accepts_parameters() {
        assert!(is_json("application/json; charset=utf-8"));
        assert!(is_json("Application/JSON"));
        assert!(!is_json("text/html"));
    }
}
