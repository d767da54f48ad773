use serde::{Deserialize, Serialize};

/// Where the controller is in the lifecycle of a single chat turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnPhase {
    #[default]
    Idle,
    Composing,
    AwaitingResponse,
    Settled,
    Failed,
}

impl TurnPhase {
    /// True while a turn owns the controller and new submissions must wait
    pub fn is_in_flight(&self) -> bool {
        matches!(self, TurnPhase::Composing | TurnPhase::AwaitingResponse)
    }
}
