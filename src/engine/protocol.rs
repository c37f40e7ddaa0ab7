use crate::model::game_state::GameSnapshot;
use crate::model::grid::Direction;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCommand {
    Move(Direction),
    SubmitAnswer(String),
    Choose(bool),
    /// Sent by the guard ticker once per second.
    GuardTick,
    Restart,
    Shutdown,
}

#[derive(Debug, Clone)]
pub enum EngineResponse {
    Snapshot(GameSnapshot),
}
