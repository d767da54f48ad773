pub mod http;
pub mod selector;

pub use http::HttpTransport;
pub use selector::TransportSelector;

use crate::error::TransportError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// Network seam used by the selector and the completion client
#[async_trait]
pub trait Transport: Send + Sync {
    /// Zero-body preflight. Any HTTP response counts as reachable.
    async fn probe(&self, url: &str, timeout: Duration) -> Result<(), TransportError>;

    /// POST a JSON body and return the parsed JSON response.
    ///
    /// Non-success statuses are errors. A success body that is not JSON comes
    /// back as `Value::Null` so callers can treat it as a malformed reply.
    async fn post_json(
        &self,
        url: &str,
        bearer: Option<&str>,
        body: &Value,
    ) -> Result<Value, TransportError>;
}
