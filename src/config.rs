//! Trainer configuration
//!
//! Read from `~/.config/flashcards/config.toml` (or whatever `--config`
//! points at). Every key is optional:
//! ```toml
//! seed = 42
//! skip_malformed_lines = true
//! import = "cards.txt"
//! export = "cards.txt"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::flashcards::MalformedLines;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    /// Seed for the quiz's random card picks
    pub seed: Option<u64>,
    /// Skip unparseable lines on import instead of rejecting the file
    pub skip_malformed_lines: bool,
    /// Card file loaded at startup when no `-import` is given
    pub import: Option<PathBuf>,
    /// Card file written at shutdown when no `-export` is given
    pub export: Option<PathBuf>,
}

impl TrainerConfig {
    /// `<config dir>/flashcards/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("flashcards").join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path)?;
        let config: TrainerConfig = toml::from_str(&content)?;
        log::debug!("Loaded config from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Load `explicit` if given (it must exist), else the default file if
    /// present, else defaults.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn malformed_lines(&self) -> MalformedLines {
        if self.skip_malformed_lines {
            MalformedLines::Skip
        } else {
            MalformedLines::Reject
        }
    }
}
