//! User configuration for Bearnotes.
//!
//! Preferences live in a JSON file at an OS-appropriate location. A missing
//! or corrupt file yields defaults; unknown or absent keys take their default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::export::ExportFormat;
use crate::core::theme::Theme;
use crate::core::view::SidebarBounds;

/// Persisted application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Directory holding the persisted application state.
    pub data_directory: String,
    pub sidebar_min_width: f64,
    pub sidebar_max_width: f64,
    /// Sidebar width used when no saved state exists.
    pub default_sidebar_width: f64,
    /// Theme used when no saved state exists.
    pub default_theme: Theme,
    /// Format used by the menu's Export action.
    pub default_export_format: ExportFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_directory: default_data_directory().to_string_lossy().to_string(),
            sidebar_min_width: 200.0,
            sidebar_max_width: 500.0,
            default_sidebar_width: 300.0,
            default_theme: Theme::MicaWhite,
            default_export_format: ExportFormat::Md,
        }
    }
}

impl Settings {
    pub fn sidebar_bounds(&self) -> SidebarBounds {
        SidebarBounds::new(self.sidebar_min_width, self.sidebar_max_width)
    }

    /// The default sidebar width, held inside the configured bounds.
    pub fn initial_sidebar_width(&self) -> f64 {
        let bounds = self.sidebar_bounds();
        bounds.clamp(self.default_sidebar_width).unwrap_or(bounds.min)
    }
}

/// Per-user configuration directory.
///
/// - macOS / Linux: `~/.config/bearnotes`
/// - Windows: `%APPDATA%/Bearnotes`
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("Bearnotes")
    }
    #[cfg(not(target_os = "windows"))]
    {
        dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config").join("bearnotes")
    }
}

/// Returns the path to the settings JSON file.
pub fn settings_file_path() -> PathBuf {
    config_dir().join("settings.json")
}

/// Returns the default state directory: `<config dir>/state`.
pub fn default_data_directory() -> PathBuf {
    config_dir().join("state")
}

/// Loads settings from the default location.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_file_path())
}

/// Loads settings from `path`; returns defaults if the file is missing or corrupt.
pub fn load_settings_from(path: &Path) -> Settings {
    match fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
            log::warn!("ignoring corrupt settings file {}: {e}", path.display());
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

/// Saves settings to the default location.
pub fn save_settings(settings: &Settings) -> Result<(), String> {
    save_settings_to(&settings_file_path(), settings)
}

/// Saves settings to `path`, creating parent directories as needed.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create settings directory: {e}"))?;
    }
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {e}"))?;
    fs::write(path, json).map_err(|e| format!("Failed to write settings: {e}"))?;
    Ok(())
}
