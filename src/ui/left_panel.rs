use eframe::egui;

use crate::engine::protocol::EngineCommand;
use crate::model::event_result::Outcome;
use crate::model::game_state::Phase;
use crate::model::grid::CellTag;
use crate::ui::app::TreasureApp;
use crate::ui::settings::{UiSettings, CHARACTER_KEY, EMPTY_KEY};

pub fn draw_left_panel(ctx: &egui::Context, app: &mut TreasureApp) {
    egui::SidePanel::left("left")
        .resizable(false)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Treasure Hunt");
            ui.separator();

            if let Some(snapshot) = &app.snapshot {
                let phase = match snapshot.phase {
                    Phase::Library => "Library map",
                    Phase::Temple => "Temple map",
                };
                ui.label(format!("Map: {phase}"));
                ui.label(format!(
                    "Position: ({}, {})",
                    snapshot.character.x, snapshot.character.y
                ));

                if snapshot.phase == Phase::Temple {
                    ui.label(format!("Guard ticks: {}", snapshot.ticks));
                    ui.collapsing("Guards", |ui| {
                        for (i, guard) in snapshot.guards.iter().enumerate() {
                            ui.label(format!(
                                "• Guard {}: ({}, {})",
                                i + 1,
                                guard.position.x,
                                guard.position.y
                            ));
                        }
                    });
                }

                ui.separator();
                match snapshot.outcome {
                    None => {
                        ui.label("In progress");
                    }
                    Some(Outcome::Victory) => {
                        ui.colored_label(egui::Color32::from_rgb(40, 140, 60), "Victory");
                    }
                    Some(Outcome::Defeat(cause)) => {
                        ui.colored_label(
                            egui::Color32::from_rgb(170, 40, 40),
                            format!("Defeat ({cause:?})"),
                        );
                    }
                }
            }

            if let Some(err) = &app.ui.engine_error {
                ui.colored_label(egui::Color32::RED, err.as_str());
            }

            ui.separator();

            if ui.button("🔄 Restart").clicked() {
                app.ui.input_text.clear();
                app.send_command(EngineCommand::Restart);
            }
            if ui.button("⚙ Settings").clicked() {
                app.ui.show_settings = true;
            }

            ui.separator();
            ui.small("Arrow keys move. Find the clue in the library (L).");
        });
}

/// Returns true if any setting changed this frame.
pub fn draw_settings_window(ctx: &egui::Context, open: &mut bool, settings: &mut UiSettings) -> bool {
    let mut changed = false;

    egui::Window::new("Settings")
        .open(open)
        .resizable(false)
        .show(ctx, |ui| {
            ui.label("UI Scale");
            changed |= ui
                .add(egui::Slider::new(&mut settings.ui_scale, 0.75..=2.0))
                .changed();

            changed |= ui
                .checkbox(&mut settings.show_coordinates, "Show coordinates")
                .changed();

            ui.separator();
            ui.label("Colors");

            let keys = [
                ("Empty", EMPTY_KEY),
                ("Library", CellTag::Library.short_name()),
                ("Activity room", CellTag::ActivityRoom.short_name()),
                ("Guard", CellTag::Guard.short_name()),
                ("Treasure", CellTag::Treasure.short_name()),
                ("Character", CHARACTER_KEY),
            ];
            for (label, key) in keys {
                let mut color = settings.color(key);
                ui.horizontal(|ui| {
                    if ui.color_edit_button_srgba(&mut color).changed() {
                        settings.set_color(key, color);
                        changed = true;
                    }
                    ui.label(label);
                });
            }

            ui.separator();
            if ui.button("Reset to defaults").clicked() {
                *settings = UiSettings::default();
                changed = true;
            }
        });

    changed
}
