// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::constants::{DEFAULT_LABELS, FRAME_INTERVAL_MS};
use crate::errors::{AppError, AppResult};
use crate::overlay::LabelLayout;
use crate::viewer::VisualMode;

/// Directory name under the user's config dir
pub const CONFIG_DIR_NAME: &str = "sensor-view";
pub const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Phrases attached to newly tracked bodies
    pub label_pool: Vec<String>,
    /// Overlay geometry
    pub layout: LabelLayout,
    /// Replace the sensor-reported reliable depth range (min, max)
    pub reliable_range_override: Option<(u16, u16)>,
    /// Stream shown on startup
    pub visual_mode: VisualMode,
    /// Pause between ticks in milliseconds
    pub frame_interval_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            label_pool: DEFAULT_LABELS.iter().map(|s| s.to_string()).collect(),
            layout: LabelLayout::default(),
            reliable_range_override: None,
            visual_mode: VisualMode::default(),
            frame_interval_ms: FRAME_INTERVAL_MS,
        }
    }
}

impl Config {
    /// Default location: `<config dir>/sensor-view/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text)?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring invalid config");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.label_pool.is_empty() {
            return Err(AppError::Config("label_pool must not be empty".into()));
        }
        if let Some((min, max)) = self.reliable_range_override
            && min > max
        {
            return Err(AppError::Config(format!(
                "reliable range min {} is above max {}",
                min, max
            )));
        }
        if !(self.layout.display_scale.is_finite() && self.layout.display_scale > 0.0) {
            return Err(AppError::Config(
                "layout.display_scale must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Reliable range to use for a frame that reports `(min, max)`
    pub fn reliable_range(&self, reported: (u16, u16)) -> (u16, u16) {
        self.reliable_range_override.unwrap_or(reported)
    }
}
