use std::sync::Arc;
use anyhow::{anyhow, Context, Result};

use relaychat_llm::ChatClient;
use relaychat_persist::SessionStore;

use crate::config::SessionConfig;
use crate::controller::SessionController;
use crate::extract::{NameExtractor, PatternNameExtractor};
use crate::sink::OutputSink;

/// Builder for constructing a SessionController with optional components
pub struct SessionControllerBuilder {
    client: Option<Arc<dyn ChatClient>>,
    store: Option<SessionStore>,
    extractor: Option<Arc<dyn NameExtractor>>,
    sink: Option<Arc<dyn OutputSink>>,
    config: SessionConfig,
}

impl SessionControllerBuilder {
    pub fn new() -> Self {
        Self {
            client: None,
            store: None,
            extractor: None,
            sink: None,
            config: SessionConfig::default(),
        }
    }

    /// Set the chat client
    pub fn client(mut self, client: Arc<dyn ChatClient>) -> Self {
        self.client = Some(client);
        self
    }

    /// Set where the session is persisted
    pub fn store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the default pattern-based name extractor
    pub fn name_extractor(mut self, extractor: Arc<dyn NameExtractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    /// Set where rendering events go
    pub fn sink(mut self, sink: Arc<dyn OutputSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the SessionController
    pub fn build(self) -> Result<SessionController> {
        let client = self.client.ok_or_else(|| anyhow!("chat client is required"))?;
        let store = self.store.ok_or_else(|| anyhow!("session store is required"))?;
        let sink = self.sink.ok_or_else(|| anyhow!("output sink is required"))?;
        let extractor = match self.extractor {
            Some(extractor) => extractor,
            None => Arc::new(
                PatternNameExtractor::new().context("Failed to compile name patterns")?,
            ),
        };

        if self.config.history_limit == 0 {
            anyhow::bail!("history_limit must be at least 1");
        }

        Ok(SessionController::new(
            client,
            store,
            extractor,
            sink,
            self.config,
        ))
    }
}

impl Default for SessionControllerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
