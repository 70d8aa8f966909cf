use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ProfileError, Result};

/// The best score ever reached, kept in a text file as a binary literal (`0b101`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestScore {
    path: PathBuf,
    value: u32,
}

impl BestScore {
    /// Load the score at `path`, recreating the file if it can't be read
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let value = match Self::read(&path) {
            Ok(value) => value,
            Err(err) => {
                warn!("{err}; starting from a best score of 0");
                let score = Self { path, value: 0 };
                score.save()?;
                return Ok(score);
            }
        };
        debug!("best score {} from {}", value, path.display());
        Ok(Self { path, value })
    }

    fn read(path: &Path) -> Result<u32> {
        let text = fs::read_to_string(path).map_err(|err| ProfileError::io(path, err))?;
        parse_binary(&text).ok_or_else(|| ProfileError::Parse {
            path: path.to_path_buf(),
            reason: format!("{:?} is not a binary number", text.trim()),
        })
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Keep `score` if it beats the stored best. Returns whether it did.
    pub fn record(&mut self, score: u32) -> bool {
        if score > self.value {
            self.value = score;
            true
        } else {
            false
        }
    }

    pub fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|err| ProfileError::io(dir, err))?;
        }
        fs::write(&self.path, format!("{:#b}", self.value))
            .map_err(|err| ProfileError::io(&self.path, err))
    }
}

fn parse_binary(text: &str) -> Option<u32> {
    let text = text.trim();
    let digits = text
        .strip_prefix("0b")
        .or_else(|| text.strip_prefix("0B"))
        .unwrap_or(text);
    u32::from_str_radix(digits, 2).ok()
}
