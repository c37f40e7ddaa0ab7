use serde::{Deserialize, Serialize};
use egui::Color32;
use std::collections::HashMap;

use crate::model::grid::CellTag;

pub const EMPTY_KEY: &str = "empty";
pub const CHARACTER_KEY: &str = "character";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiSettings {
    pub ui_scale: f32,

    /// Print (x, y) in every cell.
    pub show_coordinates: bool,

    // Cell tag / marker → color mapping
    pub colors: HashMap<String, [u8; 4]>,
}

impl Default for UiSettings {
    fn default() -> Self {
        let mut colors = HashMap::new();

        colors.insert(EMPTY_KEY.into(), [235, 225, 200, 255]);
        colors.insert(CellTag::Library.short_name().into(), [70, 110, 170, 255]);
        colors.insert(CellTag::ActivityRoom.short_name().into(), [120, 160, 90, 255]);
        colors.insert(CellTag::Guard.short_name().into(), [180, 50, 40, 255]);
        colors.insert(CellTag::Treasure.short_name().into(), [220, 170, 30, 255]);
        colors.insert(CHARACTER_KEY.into(), [60, 40, 110, 255]);

        Self {
            ui_scale: 1.0,
            show_coordinates: false,
            colors,
        }
    }
}

impl UiSettings {
    pub fn color(&self, key: &str) -> Color32 {
        self.colors
            .get(key)
            .map(|c| Color32::from_rgba_unmultiplied(c[0], c[1], c[2], c[3]))
            .unwrap_or(Color32::GRAY)
    }

    pub fn tag_color(&self, tag: CellTag) -> Color32 {
        self.color(tag.short_name())
    }

    pub fn set_color(&mut self, key: &str, color: Color32) {
        self.colors.insert(
            key.to_string(),
            [color.r(), color.g(), color.b(), color.a()],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_has_a_default_color() {
        let settings = UiSettings::default();
        for tag in [
            CellTag::Library,
            CellTag::ActivityRoom,
            CellTag::Guard,
            CellTag::Treasure,
        ] {
            assert!(settings.colors.contains_key(tag.short_name()));
        }
        assert!(settings.colors.contains_key(EMPTY_KEY));
        assert!(settings.colors.contains_key(CHARACTER_KEY));
    }

    #[test]
    fn set_color_round_trips_through_color32() {
        let mut settings = UiSettings::default();
        let c = Color32::from_rgb(1, 2, 3);
        settings.set_color("guard", c);
        assert_eq!(settings.tag_color(CellTag::Guard), c);
        assert_eq!(settings.color("unknown"), Color32::GRAY);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: UiSettings = serde_json::from_str(r#"{ "ui_scale": 1.5 }"#).unwrap();
        assert_eq!(settings.ui_scale, 1.5);
        assert_eq!(settings.colors, UiSettings::default().colors);
    }
}
