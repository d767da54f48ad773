pub mod client;
pub mod config;
pub mod error;
pub mod response;
pub mod traits;
pub mod transport;
pub mod types;

pub use client::CompletionClient;
pub use config::{
    ApiKey, EndpointConfig, Route, TransportSettings, DEFAULT_DIRECT_URL, DEFAULT_MAX_TOKENS,
    DEFAULT_MODEL, RELAY_URL_PLACEHOLDER,
};
pub use error::{ChatError, ConfigurationError, TransportError};
pub use response::extract_assistant_text;
pub use traits::{ChatClient, ChatOptions, ChatRequest, ChatResponse};
pub use transport::{HttpTransport, Transport, TransportSelector};
pub use types::Message;
