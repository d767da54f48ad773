//! Prelude module for convenient imports
//!
//! ```rust
//! use relaychat::prelude::*;
//! ```

pub use crate::{
    ChatClient, ChatEvent, ChatError, CompletionClient, FileStore, MemoryStore, Message,
    NameExtractor, OutputSink, Role, Session, SessionConfig, SessionController, SessionError,
    SessionStore, TransportSettings, Turn, TurnOutcome, TurnPhase,
};
