/// Kiosk configuration
///
/// Read once at startup from a JSON file in the user's config directory:
/// - Linux: ~/.config/photo-booth/config.json
/// - macOS: ~/Library/Application Support/photo-booth/config.json
/// - Windows: %APPDATA%\photo-booth\config.json
///
/// Every field is optional in the file; missing fields take the defaults below.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{BoothError, Result};
use crate::i18n::Language;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct KioskConfig {
    // ========== Capture ==========

    /// Seconds counted down before the shutter fires
    pub countdown_secs: u8,

    /// Camera device index (0 = default camera)
    pub camera_index: u32,

    /// Requested camera resolution
    pub camera_width: u32,
    pub camera_height: u32,

    /// Mirror the live feed and the still, like a bathroom mirror
    pub mirror_preview: bool,

    /// How often the live feed pulls a new frame
    pub preview_interval_ms: u64,

    // ========== Generation ==========

    /// Interval between simulated progress steps
    pub progress_interval_ms: u64,

    /// Inclusive range of each random progress step (percent)
    pub progress_step_min: u8,
    pub progress_step_max: u8,

    /// Pause at 100% before the decoration page opens
    pub completion_delay_ms: u64,

    // ========== Layout ==========

    /// Photo container size in logical pixels
    pub photo_width: f32,
    pub photo_height: f32,

    /// Edge length of a placed sticker
    pub sticker_size: f32,

    /// Directory holding the bundled images (background, logo, style thumbnails)
    pub assets_dir: PathBuf,

    /// Open the window fullscreen
    pub fullscreen: bool,

    /// Language shown before anyone picks one
    pub default_language: Language,
}

impl Default for KioskConfig {
    fn default() -> Self {
        Self {
            countdown_secs: 3,
            camera_index: 0,
            camera_width: 1280,
            camera_height: 720,
            mirror_preview: true,
            preview_interval_ms: 33,
            progress_interval_ms: 150,
            progress_step_min: 1,
            progress_step_max: 6,
            completion_delay_ms: 800,
            photo_width: 720.0,
            photo_height: 540.0,
            sticker_size: 72.0,
            assets_dir: PathBuf::from("assets"),
            fullscreen: false,
            default_language: Language::English,
        }
    }
}

impl KioskConfig {
    /// Load the config file, falling back to defaults when there is none
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            Some(path) => {
                log::info!("⚙️  No config at {}, using defaults", path.display());
                let config = Self::default();
                if let Ok(json) = config.to_json() {
                    log::debug!("Starter config:\n{}", json);
                }
                Ok(config)
            }
            None => {
                log::info!("⚙️  No config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load and validate a specific config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| BoothError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        log::info!("⚙️  Loaded config from {}", path.display());
        Ok(config)
    }

    /// Get the path where the config file is expected
    pub fn config_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir()?;
        path.push("photo-booth");
        path.push("config.json");
        Some(path)
    }

    /// Parse from a JSON string and validate
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Convert to a JSON string (for writing a starter config)
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.countdown_secs == 0 {
            return Err(BoothError::InvalidConfig(
                "countdown_secs must be at least 1".into(),
            ));
        }
        if self.progress_step_min == 0 || self.progress_step_min > self.progress_step_max {
            return Err(BoothError::InvalidConfig(format!(
                "progress step range {}..={} is empty",
                self.progress_step_min, self.progress_step_max
            )));
        }
        if self.preview_interval_ms == 0
            || self.progress_interval_ms == 0
            || self.completion_delay_ms == 0
        {
            return Err(BoothError::InvalidConfig(
                "timer intervals must be non-zero".into(),
            ));
        }
        if self.photo_width <= 0.0 || self.photo_height <= 0.0 || self.sticker_size <= 0.0 {
            return Err(BoothError::InvalidConfig(
                "photo and sticker sizes must be positive".into(),
            ));
        }
        Ok(())
    }

    pub fn preview_interval(&self) -> Duration {
        Duration::from_millis(self.preview_interval_ms)
    }

    pub fn progress_interval(&self) -> Duration {
        Duration::from_millis(self.progress_interval_ms)
    }

    pub fn completion_delay(&self) -> Duration {
        Duration::from_millis(self.completion_delay_ms)
    }
}
