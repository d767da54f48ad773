use serde::{Deserialize, Serialize};

use crate::session::Turn;

/// Rendering instructions emitted by the session controller to an output sink
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChatEvent {
    /// Drop everything currently rendered
    Cleared,

    /// Render a turn from the conversation history
    Turn { turn: Turn },

    /// Show or remove the transient "in progress" indicator
    Thinking {
        active: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        label: Option<String>,
    },

    /// User-visible message that is not part of the persisted history
    Notice { message: String },

    /// The question currently being answered, or `None` to clear the display
    LatestQuestion {
        #[serde(skip_serializing_if = "Option::is_none")]
        text: Option<String>,
    },

    /// Enable or disable user input
    InputEnabled { enabled: bool },

    /// Transport is not configured and the banner has not been dismissed
    ConfigBanner { message: String },
}

impl ChatEvent {
    pub fn turn(turn: Turn) -> Self {
        Self::Turn { turn }
    }

    pub fn notice(message: impl Into<String>) -> Self {
        Self::Notice {
            message: message.into(),
        }
    }
}
