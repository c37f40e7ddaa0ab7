use anyhow::Context;
use eframe::egui;
use log::{error, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use crate::engine::engine::EngineHandle;
use crate::engine::protocol::{EngineCommand, EngineResponse};
use crate::engine::ticker::GUARD_TICK_INTERVAL;
use crate::model::game_state::{GameSnapshot, PromptState};
use crate::model::grid::Direction;
use crate::ui::center_panel::draw_center_panel;
use crate::ui::left_panel::{draw_left_panel, draw_settings_window};
use crate::ui::right_panel::draw_right_panel;
use crate::ui::settings::UiSettings;
use crate::ui::settings_io;

/// Guards move once a second; polling faster keeps them smooth on screen.
const REPAINT_INTERVAL: Duration = Duration::from_millis(100);

const MOVE_KEYS: [(egui::Key, Direction); 4] = [
    (egui::Key::ArrowUp, Direction::Up),
    (egui::Key::ArrowDown, Direction::Down),
    (egui::Key::ArrowLeft, Direction::Left),
    (egui::Key::ArrowRight, Direction::Right),
];

/* =========================
   UI State
   ========================= */

#[derive(Default)]
pub struct UiState {
    pub input_text: String,
    pub show_settings: bool,
    pub settings_dirty: bool,
    pub should_auto_scroll: bool,

    /// Set when the engine thread can no longer be reached.
    pub engine_error: Option<String>,

    /// Prompt shown last frame, to spot a newly opened one.
    pub last_prompt: PromptState,
}

/* =========================
   App
   ========================= */

pub struct TreasureApp {
    pub ui: UiState,
    pub settings: UiSettings,
    pub snapshot: Option<GameSnapshot>,

    engine: EngineHandle,
}

impl TreasureApp {
    pub fn new(settings: UiSettings) -> anyhow::Result<Self> {
        let engine = EngineHandle::spawn(StdRng::from_entropy(), GUARD_TICK_INTERVAL)
            .context("starting game engine")?;

        Ok(Self {
            ui: UiState::default(),
            settings,
            snapshot: None,
            engine,
        })
    }

    pub fn send_command(&mut self, cmd: EngineCommand) {
        if let Err(e) = self.engine.send(cmd) {
            error!("{e}");
            self.ui.engine_error = Some(e.to_string());
        }
    }

    fn poll_engine(&mut self) {
        loop {
            match self.engine.try_recv() {
                Ok(Some(EngineResponse::Snapshot(snapshot))) => {
                    let grew = self
                        .snapshot
                        .as_ref()
                        .map_or(true, |old| old.history.len() != snapshot.history.len());
                    if grew {
                        self.ui.should_auto_scroll = true;
                    }
                    self.snapshot = Some(snapshot);
                }
                Ok(None) => break,
                Err(e) => {
                    if self.ui.engine_error.is_none() {
                        error!("{e}");
                        self.ui.engine_error = Some(e.to_string());
                    }
                    break;
                }
            }
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        // Arrow keys belong to the answer box while it has focus.
        if ctx.wants_keyboard_input() {
            return;
        }

        let pressed: Vec<Direction> = ctx.input(|i| {
            MOVE_KEYS
                .iter()
                .filter(|(key, _)| i.key_pressed(*key))
                .map(|(_, dir)| *dir)
                .collect()
        });

        for direction in pressed {
            self.send_command(EngineCommand::Move(direction));
        }
    }

    fn save_settings_if_dirty(&mut self) {
        if !self.ui.settings_dirty {
            return;
        }
        match settings_io::save_settings(&self.settings) {
            Ok(()) => self.ui.settings_dirty = false,
            Err(e) => warn!("could not save UI settings: {e}"),
        }
    }
}

/* =========================
   egui App
   ========================= */

impl eframe::App for TreasureApp {
    fn update(&mut self, ctx: &egui::Context, _: &mut eframe::Frame) {
        ctx.set_pixels_per_point(self.settings.ui_scale);

        self.poll_engine();
        self.handle_keys(ctx);

        draw_left_panel(ctx, self);
        draw_right_panel(ctx, self);
        draw_center_panel(ctx, self.snapshot.as_ref(), &self.settings);

        let was_open = self.ui.show_settings;
        if draw_settings_window(ctx, &mut self.ui.show_settings, &mut self.settings) {
            self.ui.settings_dirty = true;
        }
        if was_open && !self.ui.show_settings {
            self.save_settings_if_dirty();
        }

        self.ui.should_auto_scroll = false;
        ctx.request_repaint_after(REPAINT_INTERVAL);
    }
}

impl Drop for TreasureApp {
    fn drop(&mut self) {
        self.save_settings_if_dirty();
    }
}
