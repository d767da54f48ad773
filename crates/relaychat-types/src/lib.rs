pub mod events;
pub mod session;
pub mod state;

pub use events::ChatEvent;
pub use session::{Role, Session, Turn};
pub use state::TurnPhase;
