use anyhow::Context;
use std::sync::Arc;
use std::time::Duration;

use crate::config::RelayConfig;

/// Shared application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RelayConfig>,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: RelayConfig) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self {
            config: Arc::new(config),
            http_client,
        })
    }
}
