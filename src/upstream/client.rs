use super::{PredictionClient, PredictionRequest, RawUpstreamReply};
use crate::config::UpstreamConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Prediction client for a hosted HTTP endpoint.
pub struct HttpPredictionClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl HttpPredictionClient {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key,
        })
    }

    /// Build a client from config. Errors when no endpoint is configured.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .clone()
            .context("No prediction endpoint configured")?;
        Self::new(
            endpoint,
            config.resolve_api_key(),
            Duration::from_secs(config.timeout_secs),
            Duration::from_secs(config.connect_timeout_secs),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PredictionClient for HttpPredictionClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn predict(&self, request: &PredictionRequest) -> RawUpstreamReply {
        let mut builder = self.client.post(&self.endpoint).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        debug!(endpoint = %self.endpoint, files = request.evidence_files.len(), "sending prediction request");
        let response = match builder.send().await {
            Ok(response) => response,
            Err(e) => return RawUpstreamReply::TransportError(format!("Request failed: {e}")),
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return RawUpstreamReply::TransportError(format!(
                    "Failed to read response body (HTTP {}): {e}",
                    status.as_u16()
                ))
            }
        };

        info!(status = status.as_u16(), bytes = body.len(), "prediction reply received");
        if !status.is_success() {
            return RawUpstreamReply::TransportError(format!(
                "HTTP {}: {}",
                status.as_u16(),
                body.trim()
            ));
        }
        RawUpstreamReply::from_body(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/predict")
    }

    fn client(endpoint: String, api_key: Option<&str>) -> HttpPredictionClient {
        HttpPredictionClient::new(
            endpoint,
            api_key.map(str::to_string),
            Duration::from_secs(5),
            Duration::from_secs(2),
        )
        .unwrap()
    }

    fn request() -> PredictionRequest {
        PredictionRequest::for_turn("what is volatility?", None)
    }

    #[tokio::test]
    async fn posts_json_and_parses_json_reply() {
        let router = Router::new().route(
            "/predict",
            post(|Json(body): Json<Value>| async move {
                Json(json!({ "text": format!("echo: {}", body["question"].as_str().unwrap_or("")) }))
            }),
        );
        let reply = client(serve(router).await, None).predict(&request()).await;
        assert_eq!(reply, RawUpstreamReply::Json(json!({"text": "echo: what is volatility?"})));
    }

    #[tokio::test]
    async fn sends_bearer_key_when_configured() {
        let router = Router::new().route(
            "/predict",
            post(|headers: HeaderMap| async move {
                let auth = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("")
                    .to_string();
                Json(json!({ "text": auth }))
            }),
        );
        let reply = client(serve(router).await, Some("secret")).predict(&request()).await;
        assert_eq!(reply, RawUpstreamReply::Json(json!({"text": "Bearer secret"})));
    }

    #[tokio::test]
    async fn non_success_status_is_a_transport_error_with_body() {
        let router = Router::new().route(
            "/predict",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "Predictions limit exceeded") }),
        );
        let reply = client(serve(router).await, None).predict(&request()).await;
        assert_eq!(
            reply,
            RawUpstreamReply::TransportError("HTTP 429: Predictions limit exceeded".to_string())
        );
    }

    #[tokio::test]
    async fn non_json_success_body_is_unparseable() {
        let router = Router::new().route("/predict", post(|| async { "all good" }));
        let reply = client(serve(router).await, None).predict(&request()).await;
        assert_eq!(reply, RawUpstreamReply::Unparseable("all good".to_string()));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let reply = client(format!("http://{addr}/predict"), None).predict(&request()).await;
        assert!(reply.is_transport_error());
    }

    #[test]
    fn from_config_requires_endpoint() {
        let config = UpstreamConfig::default();
        assert!(HttpPredictionClient::from_config(&config).is_err());

        let config = UpstreamConfig {
            endpoint: Some("http://localhost:3000/api/v1/prediction/flow".to_string()),
            ..UpstreamConfig::default()
        };
        let client = HttpPredictionClient::from_config(&config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3000/api/v1/prediction/flow");
        assert_eq!(client.name(), "http");
    }
}
