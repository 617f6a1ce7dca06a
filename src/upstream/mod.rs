//! Upstream prediction endpoint.
//!
//! One POST per conversation turn. Failures come back as values, not errors:
//! the reconciler decides what the user sees.

pub mod client;
pub mod request;

pub use client::HttpPredictionClient;
pub use request::PredictionRequest;

use async_trait::async_trait;
use serde_json::Value;

/// What came back from the endpoint, before any interpretation.
#[derive(Debug, Clone, PartialEq)]
pub enum RawUpstreamReply {
    /// Network failure or non-2xx status; the text carries status and body.
    TransportError(String),
    /// 2xx with a JSON body of unknown shape.
    Json(Value),
    /// 2xx whose body is not JSON.
    Unparseable(String),
}

impl RawUpstreamReply {
    /// Classify a received body: JSON when it parses, raw text otherwise.
    pub fn from_body(body: &str) -> Self {
        match serde_json::from_str(body) {
            Ok(value) => RawUpstreamReply::Json(value),
            Err(_) => RawUpstreamReply::Unparseable(body.to_string()),
        }
    }

    pub fn is_transport_error(&self) -> bool {
        matches!(self, RawUpstreamReply::TransportError(_))
    }
}

/// Sends a single prediction request. Implementations never retry.
#[async_trait]
pub trait PredictionClient: Send + Sync {
    fn name(&self) -> &str;

    async fn predict(&self, request: &PredictionRequest) -> RawUpstreamReply;
}
