// Completion client that routes each request through the transport selector

use crate::config::{Route, TransportSettings};
use crate::error::{Result, TransportError};
use crate::response::extract_assistant_text;
use crate::traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse};
use crate::transport::{HttpTransport, Transport, TransportSelector};
use crate::types::Message;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

pub struct CompletionClient {
    selector: TransportSelector,
    transport: Arc<dyn Transport>,
    model: String,
    max_tokens: u32,
}

impl CompletionClient {
    /// Build a client over the default HTTP transport
    pub fn new(settings: &TransportSettings) -> std::result::Result<Self, TransportError> {
        let transport = Arc::new(HttpTransport::new()?);
        Ok(Self::with_transport(settings, transport))
    }

    pub fn with_transport(settings: &TransportSettings, transport: Arc<dyn Transport>) -> Self {
        Self {
            selector: TransportSelector::from_settings(settings),
            transport,
            model: settings.model.clone(),
            max_tokens: settings.max_tokens,
        }
    }

    pub fn selector(&self) -> &TransportSelector {
        &self.selector
    }

    /// Relay form is `{messages}`; the relay owns model and token cap.
    /// Direct form is `{model, messages, max_tokens}`.
    fn build_payload(&self, route: &Route, messages: &[Message], options: &ChatOptions) -> Value {
        if route.is_relay() {
            return json!({ "messages": messages });
        }

        json!({
            "model": options.model.as_deref().unwrap_or(&self.model),
            "messages": messages,
            "max_tokens": options.max_tokens.unwrap_or(self.max_tokens),
        })
    }
}

#[async_trait]
impl ChatClient for CompletionClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let route = self.selector.select(self.transport.as_ref()).await?;
        let payload = self.build_payload(&route, &request.messages, &request.options);

        tracing::debug!(
            relay = route.is_relay(),
            messages = request.messages.len(),
            "Sending completion request"
        );

        let raw = self
            .transport
            .post_json(route.url(), route.bearer(), &payload)
            .await?;

        Ok(ChatResponse {
            content: extract_assistant_text(&raw),
            raw,
        })
    }

    fn is_configured(&self) -> bool {
        self.selector.is_configured()
    }
}
