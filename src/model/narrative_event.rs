use serde::{Deserialize, Serialize};

/// A scripted prompt-and-branch interaction tied to a map location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NarrativeEvent {
    /// First clue in the library; expects a free-text answer.
    LibraryClue,
    /// Follow-up to a solved library clue; expects yes/no.
    EnterTemple,
    /// The chest on the temple map; expects a free-text answer.
    TreasureChest,
}

impl NarrativeEvent {
    pub fn short_name(&self) -> &'static str {
        match self {
            NarrativeEvent::LibraryClue => "LibraryClue",
            NarrativeEvent::EnterTemple => "EnterTemple",
            NarrativeEvent::TreasureChest => "TreasureChest",
        }
    }

    pub fn prompt(&self) -> &'static str {
        match self {
            NarrativeEvent::LibraryClue => {
                "You found the first clue in the ancient library...\nWrite the English word for treasure."
            }
            NarrativeEvent::EnterTemple => {
                "Decoded! The treasure lies in an ancient temple...\nEnter the temple?"
            }
            NarrativeEvent::TreasureChest => {
                "You found a mysterious chest...\nTo open it, answer: how many guards are in the temple?"
            }
        }
    }
}
