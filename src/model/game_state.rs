use serde::{Deserialize, Serialize};

use crate::model::event_result::Outcome;
use crate::model::grid::{Grid, Position};
use crate::model::guard::Guard;
use crate::model::message::Message;
use crate::model::narrative_event::NarrativeEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Library,
    Temple,
}

/// Which answer, if any, the game is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "state", content = "event", rename_all = "snake_case")]
pub enum PromptState {
    #[default]
    Idle,
    AwaitingText(NarrativeEvent),
    AwaitingChoice(NarrativeEvent),
}

impl PromptState {
    pub fn is_pending(&self) -> bool {
        !matches!(self, PromptState::Idle)
    }
}

/// A full copy of the game state sent to the UI.
/// This is READ-ONLY outside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub phase: Phase,
    pub character: Position,
    pub guards: Vec<Guard>,
    pub grid: Grid,

    /// Text currently in the message region.
    pub message: String,
    pub prompt: PromptState,
    pub outcome: Option<Outcome>,

    /// Guard ticks processed since the temple was entered.
    pub ticks: u64,
    pub history: Vec<Message>,
}

impl GameSnapshot {
    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }
}
