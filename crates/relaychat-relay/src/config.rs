use config::{Config as ConfigLoader, ConfigError, Environment, File};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.openai.com/v1/chat/completions";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub logging: LoggingConfig,

    // Secret (from ENV only)
    #[serde(skip)]
    pub openai_api_key: Option<UpstreamKey>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// `"*"` allows any origin
    pub origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: vec!["*".to_string()],
        }
    }
}

/// The completion service the relay forwards to. Model and token cap are fixed
/// here; callers cannot override them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            model: "gpt-4o".to_string(),
            max_tokens: 300,
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Server-held credential. Never printed.
#[derive(Clone)]
pub struct UpstreamKey(String);

impl UpstreamKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for UpstreamKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("UpstreamKey(***)")
    }
}

impl RelayConfig {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (`RELAY_SERVER__PORT`, `RELAY_UPSTREAM__MODEL`, ...)
    ///
    /// A missing `OPENAI_API_KEY` is not an error here; requests are refused instead.
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("RELAY")
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("cors.origins")
                    .try_parsing(true),
            );

        let mut cfg: RelayConfig = builder.build()?.try_deserialize()?;
        cfg.openai_api_key = api_key_from_env();
        Ok(cfg)
    }

    /// Load config from a specific path (useful for testing)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let builder = ConfigLoader::builder().add_source(File::from(path.as_ref()));
        builder.build()?.try_deserialize()
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.openai_api_key = Some(UpstreamKey::new(key));
        self
    }

    pub fn upstream_configured(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

fn api_key_from_env() -> Option<UpstreamKey> {
    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|key| !key.trim().is_empty())
        .map(UpstreamKey::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [server]
            host = "127.0.0.1"
            port = 3000

            [cors]
            origins = ["http://localhost:3000"]

            [upstream]
            url = "http://localhost:9000/v1/chat/completions"
            model = "gpt-4o-mini"
            max_tokens = 150
            timeout_secs = 10

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: RelayConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.upstream.model, "gpt-4o-mini");
        assert_eq!(config.upstream.max_tokens, 150);
        assert_eq!(config.cors.origins, vec!["http://localhost:3000"]);
        assert!(!config.upstream_configured());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: RelayConfig = toml::from_str("[server]\nport = 9999\n").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9999);
        assert_eq!(config.upstream.url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream.model, "gpt-4o");
        assert_eq!(config.upstream.max_tokens, 300);
        assert_eq!(config.cors.origins, vec!["*"]);
    }

    #[test]
    fn test_api_key_is_redacted() {
        let config = RelayConfig::default().with_api_key("sk-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("sk-secret"));
        assert!(config.upstream_configured());
    }
}
