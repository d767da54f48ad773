// Endpoint configuration for the completion transport.
// Settings are resolved once per process into an EndpointConfig.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub const DEFAULT_DIRECT_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Relay URL shipped in templates; treated as "not configured"
pub const RELAY_URL_PLACEHOLDER: &str = "https://your-relay.workers.dev";
pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_MAX_TOKENS: u32 = 300;
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3_000;

/// Bearer credential. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Raw transport settings as loaded from config files and the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransportSettings {
    #[serde(default)]
    pub relay_url: Option<String>,
    #[serde(default = "default_direct_url")]
    pub direct_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Secret (from ENV only)
    #[serde(skip)]
    pub api_key: Option<ApiKey>,
}

fn default_direct_url() -> String {
    DEFAULT_DIRECT_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_probe_timeout_ms() -> u64 {
    DEFAULT_PROBE_TIMEOUT_MS
}

impl Default for TransportSettings {
    fn default() -> Self {
        Self {
            relay_url: None,
            direct_url: default_direct_url(),
            model: default_model(),
            max_tokens: default_max_tokens(),
            probe_timeout_ms: default_probe_timeout_ms(),
            api_key: None,
        }
    }
}

impl TransportSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_relay_url(mut self, url: impl Into<String>) -> Self {
        self.relay_url = Some(url.into());
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(ApiKey::new(key));
        self
    }

    pub fn with_direct_url(mut self, url: impl Into<String>) -> Self {
        self.direct_url = url.into();
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// Which endpoint the client talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointConfig {
    /// Call the completion service with a local credential
    Direct { url: String, api_key: ApiKey },
    /// Call a relay that injects the credential server-side
    Relay { url: String },
    Unconfigured,
}

impl EndpointConfig {
    /// A credential always wins; a relay URL counts only if it is not the placeholder
    pub fn resolve(settings: &TransportSettings) -> Self {
        if let Some(key) = settings.api_key.as_ref().map(|k| k.expose().trim()) {
            if !key.is_empty() {
                return EndpointConfig::Direct {
                    url: settings.direct_url.clone(),
                    api_key: ApiKey::new(key),
                };
            }
        }

        match settings.relay_url.as_deref().map(str::trim) {
            Some(url) if !url.is_empty() && url != RELAY_URL_PLACEHOLDER => {
                EndpointConfig::Relay {
                    url: url.to_string(),
                }
            }
            _ => EndpointConfig::Unconfigured,
        }
    }

    pub fn is_configured(&self) -> bool {
        !matches!(self, EndpointConfig::Unconfigured)
    }
}

/// Endpoint chosen for a single send
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Direct { url: String, api_key: ApiKey },
    Relay { url: String },
}

impl Route {
    pub fn url(&self) -> &str {
        match self {
            Route::Direct { url, .. } | Route::Relay { url } => url,
        }
    }

    pub fn bearer(&self) -> Option<&str> {
        match self {
            Route::Direct { api_key, .. } => Some(api_key.expose()),
            Route::Relay { .. } => None,
        }
    }

    pub fn is_relay(&self) -> bool {
        matches!(self, Route::Relay { .. })
    }
}
