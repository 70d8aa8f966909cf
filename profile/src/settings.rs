use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{ProfileError, Result};

/// Window options and key bindings the player may override on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub window_fullscreen: bool,
    pub window_width: Option<u32>,
    pub window_height: Option<u32>,

    pub bird_event: String,
    pub window_fullscreen_event: String,
    pub window_start_event: String,
    pub window_exit_event: String,

    pub background_animation: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_fullscreen: true,
            window_width: None,
            window_height: None,

            bird_event: "<Up>".to_string(),
            window_fullscreen_event: "<F11>".to_string(),
            window_start_event: "<Return>".to_string(),
            window_exit_event: "<Escape>".to_string(),

            background_animation: true,
        }
    }
}

impl Settings {
    /// Read settings from `path`. A missing or unreadable file is replaced
    /// with the defaults, creating its directory if needed.
    pub fn load_or_create(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(settings) => Ok(settings),
            Err(err) => {
                warn!("{err}; writing default settings");
                let settings = Self::default();
                settings.save(path)?;
                Ok(settings)
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|err| ProfileError::io(path, err))?;
        serde_json::from_str(&text).map_err(|err| ProfileError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|err| ProfileError::io(dir, err))?;
        }
        let text = serde_json::to_string_pretty(self).map_err(|err| ProfileError::Parse {
            path: path.to_path_buf(),
            reason: err.to_string(),
        })?;
        fs::write(path, text).map_err(|err| ProfileError::io(path, err))?;
        info!("saved settings to {}", path.display());
        Ok(())
    }

    /// Window size, if both dimensions were configured
    pub fn window_size(&self) -> Option<(u32, u32)> {
        self.window_width.zip(self.window_height)
    }
}
