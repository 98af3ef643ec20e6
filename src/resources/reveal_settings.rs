//! Persisted reveal settings shared by every dialogue surface.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::features::text_reveal::{BuildMethod, Rgba8, SpeedModel};
use crate::resources::cli::CliArgs;

/// Default file name for settings storage.
const SETTINGS_FILE_NAME: &str = "settings.json";
/// Directory under the platform config dir.
const SETTINGS_DIR_NAME: &str = "text-architect";

/// Defaults applied to newly spawned dialogue text.
///
/// Loaded from file on startup, overridden by command-line flags, saved from the debug panel.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealSettings {
    pub build_method: BuildMethod,
    /// Multiplier added to the base speed of 1.0.
    pub speed: f32,
    /// Characters per typewriter tick before the speed tiers apply.
    pub characters_per_cycle: usize,
    pub text_color: Rgba8,
    pub font_size: f32,
}

impl Default for RevealSettings {
    fn default() -> Self {
        Self {
            build_method: BuildMethod::Typewriter,
            speed: 0.0,
            characters_per_cycle: 1,
            text_color: Rgba8::new(40, 28, 16, 255),
            font_size: 26.0,
        }
    }
}

impl RevealSettings {
    pub fn speed_model(&self) -> SpeedModel {
        SpeedModel::new(self.speed, self.characters_per_cycle)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn apply_cli(&mut self, cli: &CliArgs) {
        if let Some(method) = cli.build_method {
            self.build_method = method;
        }
        if let Some(speed) = cli.speed {
            self.speed = speed;
        }
    }

    /// Loads settings from `path`, or from the default location when `None`.
    /// Falls back to defaults if the file is missing or unreadable.
    ///
    /// Default location is platform-specific:
    /// - macOS: ~/Library/Application Support/text-architect/
    /// - Linux: ~/.config/text-architect/
    /// - Windows: %APPDATA%/text-architect/
    pub fn load_from_file(path: Option<&Path>) -> Self {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::get_settings_path) else {
            warn!("Could not determine config directory, using default reveal settings");
            return Self::default();
        };

        if !path.exists() {
            info!("No reveal settings at {:?}, using defaults", path);
            return Self::default();
        }

        match Self::read_from(&path) {
            Ok(settings) => {
                info!("Loaded reveal settings from {:?}", path);
                settings
            }
            Err(e) => {
                error!("{}", e);
                Self::default()
            }
        }
    }

    /// Reads and parses a settings file.
    pub fn read_from(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read settings file {:?}: {}", path, e))?;
        serde_json::from_str(&contents)
            .map_err(|e| format!("Failed to parse settings file {:?}: {}", path, e))
    }

    /// Returns the platform-specific path for the settings file.
    pub fn get_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push(SETTINGS_DIR_NAME);
            path.push(SETTINGS_FILE_NAME);
            path
        })
    }

    /// Saves to the default location.
    pub fn save_to_file(&self) -> Result<(), String> {
        let Some(path) = Self::get_settings_path() else {
            return Err("Could not determine config directory".to_string());
        };
        self.write_to(&path)
    }

    /// Writes the settings as pretty JSON, creating parent directories as needed.
    pub fn write_to(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                std::fs::create_dir_all(dir)
                    .map_err(|e| format!("Failed to create config directory: {}", e))?;
                info!("Created config directory: {:?}", dir);
            }
        }

        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize reveal settings: {}", e))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;
        info!("Saved reveal settings to {:?}", path);
        Ok(())
    }
}
