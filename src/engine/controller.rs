use log::{debug, info, trace};
use rand::Rng;

use crate::engine::apply_event::{apply_choice, apply_text_answer};
use crate::model::event_result::{DefeatCause, EventResolution, Outcome};
use crate::model::game_state::{GameSnapshot, Phase, PromptState};
use crate::model::grid::{CellTag, Direction, Grid, Position};
use crate::model::guard::Guard;
use crate::model::message::Message;
use crate::model::narrative_event::NarrativeEvent;

pub const LIBRARY_POS: Position = Position::new(6, 14);
pub const ACTIVITY_ROOM_POS: Position = Position::new(14, 5);
pub const TREASURE_POS: Position = Position::new(9, 9);

const ACTIVITY_ROOM_MESSAGE: &str = "This is the activity room. There are no clues to decode here.";
const ENTER_TEMPLE_MESSAGE: &str = "You chose to enter the temple. The adventure continues!";

/// Owns the whole game session and applies every rule of the game.
///
/// All mutation goes through the methods below; the engine thread is the
/// only caller, so no locking is involved.
pub struct GameController<R: Rng> {
    rng: R,

    phase: Phase,
    grid: Grid,
    character: Position,
    guards: Vec<Guard>,

    message: String,
    prompt: PromptState,
    outcome: Option<Outcome>,

    ticks: u64,
    history: Vec<Message>,
}

impl<R: Rng> GameController<R> {
    pub fn new(rng: R) -> Self {
        let mut controller = Self {
            rng,
            phase: Phase::Library,
            grid: Grid::default(),
            character: Position::ORIGIN,
            guards: Guard::starting_squad(),
            message: String::new(),
            prompt: PromptState::Idle,
            outcome: None,
            ticks: 0,
            history: Vec::new(),
        };
        controller.initialize_map(Phase::Library);
        controller
    }

    /* =========================
       Accessors
       ========================= */

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn character(&self) -> Position {
        self.character
    }

    pub fn guards(&self) -> &[Guard] {
        &self.guards
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn prompt(&self) -> PromptState {
        self.prompt
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// True while guards should be moving: temple map, game still running.
    pub fn guards_active(&self) -> bool {
        self.phase == Phase::Temple && !self.is_game_over()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            phase: self.phase,
            character: self.character,
            guards: self.guards.clone(),
            grid: self.grid.clone(),
            message: self.message.clone(),
            prompt: self.prompt,
            outcome: self.outcome,
            ticks: self.ticks,
            history: self.history.clone(),
        }
    }

    /* =========================
       Map
       ========================= */

    /// Rebuilds the map for `phase`, puts the character back at the origin
    /// and clears any finished outcome. The message region is left alone.
    pub fn initialize_map(&mut self, phase: Phase) {
        self.phase = phase;
        self.outcome = None;
        self.prompt = PromptState::Idle;
        self.grid.clear();

        match phase {
            Phase::Library => {
                self.grid.tag(LIBRARY_POS, CellTag::Library);
                self.grid.tag(ACTIVITY_ROOM_POS, CellTag::ActivityRoom);
            }
            Phase::Temple => {
                self.sync_guard_tags();
                self.grid.tag(TREASURE_POS, CellTag::Treasure);
                self.ticks = 0;
            }
        }

        self.character = Position::ORIGIN;
        info!("map initialized for {:?} phase", phase);
    }

    /// Starts a fresh session on the library map.
    pub fn restart(&mut self) {
        self.guards = Guard::starting_squad();
        self.ticks = 0;
        self.history.clear();
        self.message.clear();
        self.initialize_map(Phase::Library);
        self.history.push(Message::System("A new hunt begins.".into()));
    }

    /* =========================
       Player input
       ========================= */

    /// Moves the character one cell. Returns false if the input was ignored
    /// (game over, or a prompt is waiting for an answer).
    pub fn handle_movement(&mut self, direction: Direction) -> bool {
        if self.is_game_over() {
            debug!("movement {:?} ignored: game over", direction);
            return false;
        }
        if self.prompt.is_pending() {
            debug!("movement {:?} ignored: prompt pending", direction);
            return false;
        }

        self.character = self.character.step(direction);
        debug!(
            "character moved {:?} to ({}, {})",
            direction, self.character.x, self.character.y
        );

        self.check_position();
        true
    }

    /// Runs whatever the character's current cell triggers in this phase.
    pub fn check_position(&mut self) {
        match self.phase {
            Phase::Library => {
                if self.character == LIBRARY_POS {
                    self.open_prompt(NarrativeEvent::LibraryClue);
                } else if self.character == ACTIVITY_ROOM_POS {
                    self.message = ACTIVITY_ROOM_MESSAGE.to_string();
                } else {
                    self.message.clear();
                }
            }
            Phase::Temple => {
                // A guard on the chest cell wins over the chest.
                if self.caught_by_guard() {
                    self.finish(Outcome::Defeat(DefeatCause::CaughtByGuard));
                    return;
                }
                if self.character == TREASURE_POS {
                    self.open_prompt(NarrativeEvent::TreasureChest);
                }
            }
        }
    }

    /// Delivers submitted text to a pending text prompt. The text is trimmed
    /// as it is captured. Returns false if no text prompt was pending.
    pub fn submit_text(&mut self, raw: &str) -> bool {
        if self.is_game_over() {
            return false;
        }
        let PromptState::AwaitingText(event) = self.prompt else {
            debug!("text submitted with no text prompt pending");
            return false;
        };

        let answer = raw.trim();
        self.history.push(Message::Player(answer.to_string()));
        self.prompt = PromptState::Idle;

        let resolution = apply_text_answer(event, answer);
        debug!("{} answered: {:?}", event.short_name(), resolution);
        self.resolve(resolution);
        true
    }

    /// Delivers a yes/no click to a pending choice prompt.
    pub fn choose(&mut self, yes: bool) -> bool {
        if self.is_game_over() {
            return false;
        }
        let PromptState::AwaitingChoice(event) = self.prompt else {
            debug!("choice made with no choice prompt pending");
            return false;
        };

        let label = if yes { "Yes" } else { "No" };
        self.history.push(Message::Player(label.to_string()));
        self.prompt = PromptState::Idle;

        let resolution = apply_choice(event, yes);
        debug!("{} answered: {:?}", event.short_name(), resolution);
        self.resolve(resolution);
        true
    }

    /* =========================
       Guards
       ========================= */

    /// Moves every guard one random step, then checks each one against the
    /// character. All guards move even after one of them has caught the
    /// player. Returns false if guards are not active.
    pub fn guard_tick(&mut self) -> bool {
        if !self.guards_active() {
            return false;
        }
        self.ticks += 1;

        for i in 0..self.guards.len() {
            let direction = self.guards[i].wander(&mut self.rng);
            self.sync_guard_tags();
            trace!(
                "guard {} tried {:?}, now at ({}, {})",
                i,
                direction,
                self.guards[i].position.x,
                self.guards[i].position.y
            );

            if self.guards[i].position == self.character {
                self.finish(Outcome::Defeat(DefeatCause::CaughtByGuard));
            }
        }
        true
    }

    fn caught_by_guard(&self) -> bool {
        self.guards.iter().any(|g| g.position == self.character)
    }

    fn sync_guard_tags(&mut self) {
        self.grid.untag_all(CellTag::Guard);
        for guard in &self.guards {
            self.grid.tag(guard.position, CellTag::Guard);
        }
    }

    /* =========================
       Narrative
       ========================= */

    fn open_prompt(&mut self, event: NarrativeEvent) {
        self.prompt = match event {
            NarrativeEvent::EnterTemple => PromptState::AwaitingChoice(event),
            NarrativeEvent::LibraryClue | NarrativeEvent::TreasureChest => {
                PromptState::AwaitingText(event)
            }
        };
        self.message = event.prompt().to_string();
        self.history.push(Message::Narrator(self.message.clone()));
        info!("narrative event {} started", event.short_name());
    }

    fn resolve(&mut self, resolution: EventResolution) {
        match resolution {
            EventResolution::FollowUp(event) => self.open_prompt(event),
            EventResolution::EnterTemple => {
                self.message = ENTER_TEMPLE_MESSAGE.to_string();
                self.history.push(Message::Narrator(self.message.clone()));
                self.initialize_map(Phase::Temple);
            }
            EventResolution::Finished(outcome) => self.finish(outcome),
        }
    }

    /// Records the end of the game. The first outcome sticks.
    fn finish(&mut self, outcome: Outcome) {
        if self.outcome.is_some() {
            return;
        }
        self.outcome = Some(outcome);
        self.prompt = PromptState::Idle;
        self.message = outcome.message().to_string();
        self.history.push(Message::System(self.message.clone()));
        info!("game over: {:?}", outcome);
    }

    #[cfg(test)]
    pub(crate) fn place_guards(&mut self, positions: &[Position]) {
        self.guards = positions.iter().copied().map(Guard::new).collect();
        if self.phase == Phase::Temple {
            self.sync_guard_tags();
        }
    }
}
