use log::debug;

use crate::model::event_result::{DefeatCause, EventResolution, Outcome};
use crate::model::narrative_event::NarrativeEvent;

/// Answer that unlocks the library clue, compared case-insensitively.
pub const LIBRARY_ANSWER: &str = "treasure";
/// Answer that opens the chest, compared exactly.
pub const CHEST_ANSWER: &str = "3";

/// Resolve a free-text answer to `event`. The answer is expected to be
/// trimmed already.
pub fn apply_text_answer(event: NarrativeEvent, answer: &str) -> EventResolution {
    match event {
        NarrativeEvent::LibraryClue => {
            if answer.to_lowercase() == LIBRARY_ANSWER {
                EventResolution::FollowUp(NarrativeEvent::EnterTemple)
            } else {
                EventResolution::Finished(Outcome::Defeat(DefeatCause::WrongAnswer))
            }
        }

        NarrativeEvent::TreasureChest => {
            if answer == CHEST_ANSWER {
                EventResolution::Finished(Outcome::Victory)
            } else {
                EventResolution::Finished(Outcome::Defeat(DefeatCause::WrongAnswer))
            }
        }

        // Yes/no question; text never resolves it, so ask again.
        NarrativeEvent::EnterTemple => {
            debug!("text answer ignored for yes/no event EnterTemple");
            EventResolution::FollowUp(NarrativeEvent::EnterTemple)
        }
    }
}

/// Resolve a yes/no answer to `event`.
pub fn apply_choice(event: NarrativeEvent, yes: bool) -> EventResolution {
    match event {
        NarrativeEvent::EnterTemple if yes => EventResolution::EnterTemple,
        NarrativeEvent::EnterTemple => {
            EventResolution::Finished(Outcome::Defeat(DefeatCause::DeclinedTemple))
        }
        NarrativeEvent::LibraryClue | NarrativeEvent::TreasureChest => {
            debug!("choice ignored for text event {}", event.short_name());
            EventResolution::FollowUp(event)
        }
    }
}
