use eframe::egui;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke};

use crate::model::game_state::GameSnapshot;
use crate::model::grid::{CellTag, Position, CELL_COUNT, GRID_SIZE};
use crate::ui::settings::{UiSettings, CHARACTER_KEY, EMPTY_KEY};

/// Highest-priority tag decides the fill when a cell carries several.
const TAG_PRIORITY: [CellTag; 4] = [
    CellTag::Guard,
    CellTag::Treasure,
    CellTag::Library,
    CellTag::ActivityRoom,
];

pub fn draw_center_panel(ctx: &egui::Context, snapshot: Option<&GameSnapshot>, settings: &UiSettings) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(snapshot) = snapshot else {
            ui.centered_and_justified(|ui| {
                ui.spinner();
            });
            return;
        };

        let side = ui.available_width().min(ui.available_height());
        let (response, painter) = ui.allocate_painter(egui::vec2(side, side), Sense::hover());
        let cell = side / GRID_SIZE as f32;
        let origin = response.rect.min;

        let cell_rect = |pos: Position| {
            Rect::from_min_size(
                origin + egui::vec2(pos.x as f32 * cell, pos.y as f32 * cell),
                egui::vec2(cell, cell),
            )
            .shrink(0.5)
        };

        for index in 0..CELL_COUNT {
            let pos = Position::from_index(index);
            let rect = cell_rect(pos);
            let tags = snapshot.grid.tags_at(pos);

            let top = TAG_PRIORITY.iter().copied().find(|t| tags.contains(t));

            let fill = top
                .map(|t| settings.tag_color(t))
                .unwrap_or_else(|| settings.color(EMPTY_KEY));
            painter.rect_filled(rect, 2.0, fill);

            if let Some(label) = top.map(glyph) {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    label,
                    FontId::monospace(cell * 0.55),
                    Color32::WHITE,
                );
            }

            if settings.show_coordinates {
                painter.text(
                    rect.left_top() + egui::vec2(1.0, 0.0),
                    Align2::LEFT_TOP,
                    format!("{},{}", pos.x, pos.y),
                    FontId::proportional((cell * 0.22).max(6.0)),
                    Color32::from_black_alpha(140),
                );
            }
        }

        // Character
        let center = cell_rect(snapshot.character).center();
        painter.circle_filled(center, cell * 0.32, settings.color(CHARACTER_KEY));
        painter.circle_stroke(center, cell * 0.32, Stroke::new(1.5, Color32::WHITE));

        if let Some(hover) = response.hover_pos() {
            if let Some(pos) = cell_at(origin, cell, hover) {
                response.on_hover_text(format!("({}, {})", pos.x, pos.y));
            }
        }
    });
}

fn glyph(tag: CellTag) -> &'static str {
    match tag {
        CellTag::Guard => "G",
        CellTag::Treasure => "$",
        CellTag::Library => "L",
        CellTag::ActivityRoom => "A",
    }
}

fn cell_at(origin: Pos2, cell: f32, point: Pos2) -> Option<Position> {
    let local = point - origin;
    let pos = Position::new((local.x / cell).floor() as i32, (local.y / cell).floor() as i32);
    pos.in_bounds().then_some(pos)
}
