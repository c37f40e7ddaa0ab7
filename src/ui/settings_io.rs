use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::SettingsError;
use crate::ui::settings::UiSettings;

const APP_DIR: &str = "treasure_hunt";
const SETTINGS_FILE: &str = "ui_settings.json";

pub fn settings_path() -> Result<PathBuf, SettingsError> {
    let mut path = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
    path.push(APP_DIR);
    path.push(SETTINGS_FILE);
    Ok(path)
}

pub fn load_settings() -> Result<UiSettings, SettingsError> {
    load_settings_from(&settings_path()?)
}

pub fn save_settings(settings: &UiSettings) -> Result<(), SettingsError> {
    save_settings_to(&settings_path()?, settings)
}

/// Missing file means first run: defaults, not an error.
pub fn load_settings_from(path: &Path) -> Result<UiSettings, SettingsError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("no settings at {}, using defaults", path.display());
            return Ok(UiSettings::default());
        }
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    serde_json::from_str(&text).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn save_settings_to(path: &Path, settings: &UiSettings) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(io_err)?;
    }

    let json = serde_json::to_string_pretty(settings).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, json).map_err(io_err)?;
    debug!("saved settings to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, UiSettings::default());
    }

    #[test]
    fn saved_settings_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let mut settings = UiSettings::default();
        settings.ui_scale = 1.25;
        settings.show_coordinates = true;
        save_settings_to(&path, &settings).unwrap();

        assert_eq!(load_settings_from(&path).unwrap(), settings);
    }

    #[test]
    fn corrupt_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            load_settings_from(&path),
            Err(SettingsError::Parse { .. })
        ));
    }
}
