use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum Message {
    /// Story text shown in the message region.
    Narrator(String),
    /// Something the player typed or chose.
    Player(String),
    /// Outcome notices (victory, defeat, restart).
    System(String),
}

impl Message {
    pub fn text(&self) -> &str {
        match self {
            Message::Narrator(t) | Message::Player(t) | Message::System(t) => t,
        }
    }
}
