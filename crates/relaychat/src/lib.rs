//! # Relaychat
//!
//! A conversational chat client that keeps a persisted session, personalizes
//! replies with the user's name, and talks to a completion service either
//! directly or through a relay that holds the API key server-side.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use relaychat::prelude::*;
//! use std::sync::Arc;
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = TransportSettings::new().with_relay_url("https://chat-relay.example.com");
//!     let client = Arc::new(CompletionClient::new(&settings)?);
//!     let store = SessionStore::new(Arc::new(FileStore::open("session.json").await?));
//!
//!     let (tx, mut events) = mpsc::unbounded_channel::<ChatEvent>();
//!     let controller = SessionController::builder()
//!         .client(client)
//!         .store(store)
//!         .sink(Arc::new(tx))
//!         .build()?;
//!
//!     controller.initialize().await?;
//!     controller.submit("Hi, I'm Casey").await?;
//!
//!     while let Ok(event) = events.try_recv() {
//!         if let ChatEvent::Turn { turn } = event {
//!             println!("{}: {}", turn.role.as_str(), turn.content);
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`relaychat-types`**: turns, sessions, render events, turn phases
//! - **`relaychat-llm`**: transport selection and the completion client
//! - **`relaychat-persist`**: key-value stores and the persisted session layout
//! - **`relaychat-session`**: the session controller and its strategies
//!
//! The relay server lives in the separate `relaychat-relay` binary crate.

pub mod prelude;

pub use relaychat_types::{ChatEvent, Role, Session, Turn, TurnPhase};

pub use relaychat_llm::{
    ChatClient, ChatError, ChatOptions, ChatRequest, ChatResponse, CompletionClient,
    ConfigurationError, EndpointConfig, HttpTransport, Message, Route, Transport,
    TransportError, TransportSelector, TransportSettings,
};

pub use relaychat_persist::{FileStore, KeyValueStore, MemoryStore, PersistError, SessionStore};

pub use relaychat_session::{
    NameExtractor, OutputSink, PatternNameExtractor, SessionConfig, SessionController,
    SessionControllerBuilder, SessionError, TurnOutcome,
};
