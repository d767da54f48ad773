use crate::config::{EndpointConfig, Route, TransportSettings};
use crate::error::ConfigurationError;
use crate::transport::Transport;
use std::time::Duration;

/// Picks the route for each send: direct, relay (after a reachability probe), or reject.
#[derive(Debug, Clone)]
pub struct TransportSelector {
    endpoint: EndpointConfig,
    probe_timeout: Duration,
}

impl TransportSelector {
    pub fn new(endpoint: EndpointConfig, probe_timeout: Duration) -> Self {
        Self {
            endpoint,
            probe_timeout,
        }
    }

    pub fn from_settings(settings: &TransportSettings) -> Self {
        Self::new(EndpointConfig::resolve(settings), settings.probe_timeout())
    }

    pub fn endpoint(&self) -> &EndpointConfig {
        &self.endpoint
    }

    pub fn is_configured(&self) -> bool {
        self.endpoint.is_configured()
    }

    /// Resolve the route for one attempt. The relay is re-probed every time.
    pub async fn select(&self, transport: &dyn Transport) -> Result<Route, ConfigurationError> {
        match &self.endpoint {
            EndpointConfig::Direct { url, api_key } => Ok(Route::Direct {
                url: url.clone(),
                api_key: api_key.clone(),
            }),
            EndpointConfig::Relay { url } => {
                match transport.probe(url, self.probe_timeout).await {
                    Ok(()) => Ok(Route::Relay { url: url.clone() }),
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "Relay probe failed");
                        Err(ConfigurationError::Unreachable {
                            url: url.clone(),
                            reason: e.to_string(),
                        })
                    }
                }
            }
            EndpointConfig::Unconfigured => Err(ConfigurationError::Unset),
        }
    }
}
