// SPDX-License-Identifier: GPL-3.0-only

use crate::constants::virtual_camera::{DEFAULT_HEIGHT, DEFAULT_JPEG_QUALITY, DEFAULT_WIDTH};
use crate::constants::{APP_DIR_NAME, CONFIG_FILE_NAME, PHOTO_FOLDER};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// How concurrent capture requests share the camera
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPolicy {
    /// One request owns the camera from binding until its capture finishes;
    /// later requests wait their turn (FIFO)
    #[default]
    Exclusive,
    /// Legacy behavior: the camera is locked per command only, so another
    /// request may rebind it while a timer is running
    Unsynchronized,
}

/// Virtual camera sensor settings
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VirtualCameraConfig {
    pub width: u32,
    pub height: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for VirtualCameraConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where photos are written; `None` uses the app data directory
    pub output_dir: Option<PathBuf>,
    /// Camera sharing between overlapping requests
    pub session_policy: SessionPolicy,
    pub virtual_camera: VirtualCameraConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: None,
            session_policy: SessionPolicy::default(), // Exclusive
            virtual_camera: VirtualCameraConfig::default(),
        }
    }
}

impl Config {
    /// Path of the user config file (`~/.config/shutter/config.json`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the user config, falling back to defaults
    ///
    /// A missing file is normal; an unreadable or malformed one is logged.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            debug!("No config directory on this platform, using defaults");
            return Self::default();
        };

        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring invalid config file");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> AppResult<Self> {
        serde_json::from_str(text).map_err(|e| AppError::Config(e.to_string()))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text =
            serde_json::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Directory photos are written to
    pub fn photo_dir(&self) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(default_photo_dir)
    }
}

/// App-private photo directory (`~/.local/share/shutter/pictures`)
pub fn default_photo_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
        .join(APP_DIR_NAME)
        .join(PHOTO_FOLDER)
}
