// SPDX-License-Identifier: MPL-2.0
//! Cropper settings and constants.
//!
//! Settings live in `settings.toml` under the user's config directory
//! (`AvatarCrop/settings.toml`). Every field is optional; missing or invalid
//! values resolve to the constants in [`defaults`].
//!
//! ```no_run
//! use avatar_crop::config;
//!
//! let settings = config::load().unwrap_or_default();
//! let range = settings.zoom_range();
//! println!("zoom {}%..{}%, quality {}", range.min(), range.max(), settings.quality().value());
//! ```

pub mod defaults;

pub use defaults::*;

use crate::domain::editing::{JpegQuality, ZoomRange};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";
const APP_NAME: &str = "AvatarCrop";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the profile server (scheme and host, no path).
    pub server_url: Option<String>,
    #[serde(default)]
    pub jpeg_quality: Option<u8>,
    #[serde(default)]
    pub min_zoom_percent: Option<f32>,
    #[serde(default)]
    pub max_zoom_percent: Option<f32>,
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: None,
            jpeg_quality: Some(DEFAULT_JPEG_QUALITY),
            min_zoom_percent: Some(MIN_ZOOM_PERCENT),
            max_zoom_percent: Some(MAX_ZOOM_PERCENT),
            request_timeout_secs: Some(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Slider bounds resolved from the optional settings.
    #[must_use]
    pub fn zoom_range(&self) -> ZoomRange {
        ZoomRange::new(
            self.min_zoom_percent.unwrap_or(MIN_ZOOM_PERCENT),
            self.max_zoom_percent.unwrap_or(MAX_ZOOM_PERCENT),
        )
    }

    #[must_use]
    pub fn quality(&self) -> JpegQuality {
        self.jpeg_quality
            .map_or_else(JpegQuality::default, JpegQuality::new)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS)
                .max(1),
        )
    }
}

/// Location of the settings file, if the platform has a config directory.
#[must_use]
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
}

/// Loads the user's settings, or defaults when no settings file exists.
///
/// # Errors
///
/// Returns [`crate::error::Error::Io`] if the file exists but cannot be read.
pub fn load() -> Result<Config> {
    match default_path() {
        Some(path) if path.exists() => load_from_path(&path),
        _ => Ok(Config::default()),
    }
}

/// Writes the settings file. Does nothing on platforms without a config directory.
///
/// # Errors
///
/// Returns [`crate::error::Error::Io`] or [`crate::error::Error::Config`]
/// if the file cannot be written.
pub fn save(config: &Config) -> Result<()> {
    default_path().map_or(Ok(()), |path| save_to_path(config, &path))
}

/// Reads settings from `path`. Invalid TOML is logged and replaced by defaults.
///
/// # Errors
///
/// Returns [`crate::error::Error::Io`] if the file cannot be read.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content).unwrap_or_else(|err| {
        log::warn!("Ignoring invalid settings file {}: {err}", path.display());
        Config::default()
    }))
}

/// Writes settings to `path`, creating missing parent directories.
///
/// # Errors
///
/// Returns [`crate::error::Error::Io`] or [`crate::error::Error::Config`]
/// if the file cannot be written.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    log::debug!("Saved settings to {}", path.display());
    Ok(())
}
