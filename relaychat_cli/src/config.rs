use config::{Config as ConfigLoader, ConfigError, Environment, File};
use relaychat::{SessionConfig, TransportSettings};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub transport: TransportSettings,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".relaychat/session.json"),
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
            level: "warn".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl ClientConfig {
    /// Load configuration from TOML files and environment variables
    ///
    /// Hierarchy (weakest to strongest):
    /// 1. config/default.toml
    /// 2. config/{ENV}.toml (if ENV is set)
    /// 3. Environment variables (`RELAYCHAT_TRANSPORT__RELAY_URL`, ...)
    ///
    /// `OPENAI_API_KEY` is only ever read from the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let env = std::env::var("ENV").unwrap_or_else(|_| "dev".to_string());

        let builder = ConfigLoader::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("RELAYCHAT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let mut cfg: ClientConfig = builder.build()?.try_deserialize()?;

        if let Some(key) = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
        {
            cfg.transport = cfg.transport.with_api_key(key);
        }

        Ok(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_structure() {
        let toml = r#"
            [transport]
            relay_url = "https://chat-relay.example.com"
            probe_timeout_ms = 1500

            [storage]
            path = "/tmp/chat.json"

            [session]
            history_limit = 8

            [logging]
            level = "debug"
            format = "json"
        "#;

        let config: ClientConfig = toml::from_str(toml).unwrap();
        assert_eq!(
            config.transport.relay_url.as_deref(),
            Some("https://chat-relay.example.com")
        );
        assert_eq!(config.transport.probe_timeout_ms, 1500);
        assert_eq!(config.transport.model, "gpt-4o");
        assert_eq!(config.storage.path, PathBuf::from("/tmp/chat.json"));
        assert_eq!(config.session.history_limit, 8);
        assert!(config.transport.api_key.is_none());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ClientConfig = toml::from_str("").unwrap();
        assert_eq!(config.transport.relay_url, None);
        assert_eq!(config.transport.max_tokens, 300);
        assert_eq!(config.session.history_limit, 20);
        assert_eq!(config.logging.level, "warn");
    }
}
