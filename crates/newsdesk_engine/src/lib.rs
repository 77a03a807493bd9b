//! Newsdesk engine: upstream API access and background effect execution.
mod endpoint;
mod engine;
mod gateway;
mod normalize;
mod types;

pub use endpoint::{redacted, request_url, GatewaySettings};
pub use engine::EngineHandle;
pub use gateway::{Gateway, NewsApiGateway};
pub use normalize::{articles_from_body, failure_from_status};
pub use types::{EngineError, EngineEvent};
