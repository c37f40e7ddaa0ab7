pub mod event_result;
pub mod game_state;
pub mod grid;
pub mod guard;
pub mod message;
pub mod narrative_event;
