pub mod builder;
pub mod config;
pub mod controller;
pub mod extract;
pub mod prompt;
pub mod sink;

pub use builder::SessionControllerBuilder;
pub use config::SessionConfig;
pub use controller::{SessionController, SessionError, TurnOutcome};
pub use extract::{NameExtractor, PatternNameExtractor};
pub use sink::OutputSink;

// Re-export key types from relaychat-types
pub use relaychat_types::{ChatEvent, Role, Session, Turn, TurnPhase};
