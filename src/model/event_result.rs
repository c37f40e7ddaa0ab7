use serde::{Deserialize, Serialize};

use crate::model::narrative_event::NarrativeEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatCause {
    WrongAnswer,
    DeclinedTemple,
    CaughtByGuard,
}

/// How a finished game ended. Every game ends in exactly one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", content = "cause", rename_all = "snake_case")]
pub enum Outcome {
    Victory,
    Defeat(DefeatCause),
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Outcome::Victory => "Congratulations! You found the legendary treasure!",
            Outcome::Defeat(DefeatCause::WrongAnswer) => "Wrong answer.\nMission failed.",
            Outcome::Defeat(DefeatCause::DeclinedTemple) => "Mission failed.",
            Outcome::Defeat(DefeatCause::CaughtByGuard) => {
                "Oh no! You ran into a temple guard!\nMission failed."
            }
        }
    }
}

/// What answering a narrative prompt leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventResolution {
    /// Ask another question.
    FollowUp(NarrativeEvent),
    /// Move on to the temple map.
    EnterTemple,
    /// The game is over.
    Finished(Outcome),
}
