use thiserror::Error;

/// The transport cannot be used until someone fixes the configuration
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("no relay URL or API key is configured")]
    Unset,

    #[error("relay at {url} is unreachable: {reason}")]
    Unreachable { url: String, reason: String },
}

/// The completion call itself failed
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("completion service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("failed to build HTTP client: {0}")]
    Client(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("transport error: {0}")]
    Transport(#[from] TransportError),
}

pub type Result<T> = std::result::Result<T, ChatError>;
