use eframe::egui;
use egui::Layout;

use crate::engine::protocol::EngineCommand;
use crate::model::event_result::Outcome;
use crate::model::game_state::PromptState;
use crate::model::message::Message;
use crate::ui::app::TreasureApp;

const NARRATOR_COLOR: egui::Color32 = egui::Color32::from_rgb(80, 80, 80);
const PLAYER_COLOR: egui::Color32 = egui::Color32::from_rgb(40, 70, 120);
const VICTORY_COLOR: egui::Color32 = egui::Color32::from_rgb(40, 120, 60);
const DEFEAT_COLOR: egui::Color32 = egui::Color32::from_rgb(140, 40, 40);

pub fn draw_right_panel(ctx: &egui::Context, app: &mut TreasureApp) {
    let input_id = egui::Id::new("answer_input_box");

    egui::SidePanel::right("right")
        .resizable(true)
        .default_width(340.0)
        .min_width(260.0)
        .show(ctx, |ui| {
            let Some(snapshot) = app.snapshot.clone() else {
                ui.label("Waiting for the game engine…");
                return;
            };

            /* -------- Message region -------- */

            if !snapshot.message.is_empty() {
                let color = match snapshot.outcome {
                    Some(Outcome::Victory) => VICTORY_COLOR,
                    Some(Outcome::Defeat(_)) => DEFEAT_COLOR,
                    None => NARRATOR_COLOR,
                };
                bubble(ui, color, &snapshot.message);
            }

            ui.add_space(8.0);

            /* -------- Prompt controls -------- */

            let just_opened = text_prompt_opened(app.ui.last_prompt, snapshot.prompt);
            app.ui.last_prompt = snapshot.prompt;

            match snapshot.prompt {
                PromptState::AwaitingText(_) => {
                    let mut submit = false;

                    ui.horizontal(|ui| {
                        let response = ui.add_sized(
                            [ui.available_width() - 70.0, 24.0],
                            egui::TextEdit::singleline(&mut app.ui.input_text)
                                .id(input_id)
                                .hint_text("Your answer…"),
                        );

                        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                            submit = true;
                        }
                        if ui.button("Submit").clicked() {
                            submit = true;
                        }
                    });

                    if just_opened {
                        ui.memory_mut(|m| m.request_focus(input_id));
                    }
                    if submit {
                        let text = std::mem::take(&mut app.ui.input_text);
                        app.send_command(EngineCommand::SubmitAnswer(text));
                    }
                }
                PromptState::AwaitingChoice(_) => {
                    ui.horizontal(|ui| {
                        if ui.button("Yes").clicked() {
                            app.send_command(EngineCommand::Choose(true));
                        }
                        if ui.button("No").clicked() {
                            app.send_command(EngineCommand::Choose(false));
                        }
                    });
                }
                PromptState::Idle => {}
            }

            ui.separator();

            /* -------- Story so far -------- */

            ui.label("Journal");
            egui::ScrollArea::vertical()
                .stick_to_bottom(app.ui.should_auto_scroll)
                .show(ui, |ui| {
                    for msg in &snapshot.history {
                        draw_message(ui, msg);
                    }
                });
        });
}

/// True on the frame a text prompt first appears; the answer box takes
/// focus then and only then.
fn text_prompt_opened(previous: PromptState, current: PromptState) -> bool {
    matches!(current, PromptState::AwaitingText(_)) && previous != current
}

fn draw_message(ui: &mut egui::Ui, msg: &Message) {
    let (bg, right) = match msg {
        Message::Player(_) => (PLAYER_COLOR, true),
        Message::Narrator(_) => (NARRATOR_COLOR, false),
        Message::System(_) => (egui::Color32::DARK_GRAY, false),
    };

    ui.add_space(4.0);

    if right {
        ui.with_layout(Layout::right_to_left(egui::Align::TOP), |ui| {
            bubble(ui, bg, msg.text());
        });
    } else {
        bubble(ui, bg, msg.text());
    }
}

fn bubble(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    egui::Frame::new()
        .fill(color)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(egui::Color32::WHITE));
        });
}
