use serde::{Deserialize, Serialize};

pub const DEFAULT_GREETING: &str = "👋 Hello! How can I help you today?";
pub const DEFAULT_FALLBACK_REPLY: &str = "Sorry, I couldn't get a reply. Please try again.";
pub const DEFAULT_THINKING_LABEL: &str = "AI is typing…";
pub const DEFAULT_HISTORY_LIMIT: usize = 20;
pub const DEFAULT_BANNER_MESSAGE: &str =
    "The chat service is not configured yet. Set a relay URL or an API key to start chatting.";

/// Placeholder in the persona template replaced with the personalization sentence
pub const USER_CONTEXT_PLACEHOLDER: &str = "<user_context>";

pub const DEFAULT_PERSONA_TEMPLATE: &str = "You are a helpful L'Oréal beauty assistant. \
Only answer questions about L'Oréal products, skincare, haircare, makeup, fragrance, \
and beauty routines or recommendations. If a question is unrelated to these topics, \
politely explain that you can only help with beauty questions.<user_context>";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_greeting")]
    pub greeting: String,
    #[serde(default = "default_persona_template")]
    pub persona_template: String,
    /// Turns sent with each request, most recent last
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
    #[serde(default = "default_thinking_label")]
    pub thinking_label: String,
    #[serde(default = "default_banner_message")]
    pub banner_message: String,
}

fn default_greeting() -> String {
    DEFAULT_GREETING.to_string()
}

fn default_persona_template() -> String {
    DEFAULT_PERSONA_TEMPLATE.to_string()
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_fallback_reply() -> String {
    DEFAULT_FALLBACK_REPLY.to_string()
}

fn default_thinking_label() -> String {
    DEFAULT_THINKING_LABEL.to_string()
}

fn default_banner_message() -> String {
    DEFAULT_BANNER_MESSAGE.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            greeting: default_greeting(),
            persona_template: default_persona_template(),
            history_limit: default_history_limit(),
            fallback_reply: default_fallback_reply(),
            thinking_label: default_thinking_label(),
            banner_message: default_banner_message(),
        }
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }

    pub fn with_persona_template(mut self, template: impl Into<String>) -> Self {
        self.persona_template = template.into();
        self
    }

    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    pub fn with_fallback_reply(mut self, reply: impl Into<String>) -> Self {
        self.fallback_reply = reply.into();
        self
    }
}
