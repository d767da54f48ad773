// reqwest-backed transport

use crate::error::TransportError;
use crate::transport::Transport;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

/// HTTP transport (direct reqwest, no SDK)
#[derive(Clone)]
pub struct HttpTransport {
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http_client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { http_client })
    }

    /// Wrap an existing client (shares its connection pool)
    pub fn with_client(http_client: reqwest::Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn probe(&self, url: &str, timeout: Duration) -> Result<(), TransportError> {
        let response = self
            .http_client
            .request(Method::OPTIONS, url)
            .timeout(timeout)
            .send()
            .await?;

        tracing::debug!(url, status = %response.status(), "Relay probe answered");
        Ok(())
    }

    async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<Value, TransportError> {
        let mut request = self.http_client.post(url).json(body);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body: error_text,
            });
        }

        let text = response.text().await?;
        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(url, error = %e, "Completion response is not JSON");
                Ok(Value::Null)
            }
        }
    }
}
