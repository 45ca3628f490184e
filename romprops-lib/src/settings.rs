//! Shared settings file (`~/.config/romprops/settings.toml`).

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Default edge length of exported thumbnails.
pub const DEFAULT_THUMBNAIL_SIZE: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub ext_images: ExtImageSettings,
    #[serde(default)]
    pub thumbnails: ThumbnailSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtImageSettings {
    /// Whether external image URLs are listed at all
    #[serde(default = "default_true")]
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThumbnailSettings {
    #[serde(default = "default_thumbnail_size")]
    pub size: u32,
}

fn default_true() -> bool {
    true
}

fn default_thumbnail_size() -> u32 {
    DEFAULT_THUMBNAIL_SIZE
}

impl Default for ExtImageSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            size: DEFAULT_THUMBNAIL_SIZE,
        }
    }
}

/// Canonical path to the settings file.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("romprops").join("settings.toml")
}

/// Load settings, returning defaults if the file is missing or corrupt.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

pub fn load_settings_from(path: &Path) -> Settings {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
            log::warn!("Failed to parse settings at {}: {}", path.display(), e);
            Settings::default()
        }),
        Err(_) => Settings::default(),
    }
}

/// Save settings atomically (write to temp, then rename).
pub fn save_settings(settings: &Settings) -> io::Result<()> {
    save_settings_to(&settings_path(), settings)
}

pub fn save_settings_to(path: &Path, settings: &Settings) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let contents = settings_string(settings)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, contents)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Pretty-printed TOML for display.
pub fn settings_string(settings: &Settings) -> io::Result<String> {
    toml::to_string_pretty(settings).map_err(io::Error::other)
}
