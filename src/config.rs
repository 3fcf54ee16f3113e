use std::{
    fs,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::{NoteError, Result, SortDirection, SortKey};

const APP_DIR: &str = "noteverse";
const CONFIG_FILE: &str = "config.json";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Directory where notes are stored
    pub notes_dir: PathBuf,

    /// Whether to write the welcome notes into an empty notes directory
    pub seed_on_empty: bool,

    /// Timeline sort key used when none is given on the command line
    pub default_sort_key: SortKey,

    /// Timeline sort direction used when none is given on the command line
    pub default_sort_direction: SortDirection,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            notes_dir: data_dir.join(APP_DIR).join("notes"),
            seed_on_empty: false,
            default_sort_key: SortKey::Date,
            default_sort_direction: SortDirection::Descending,
        }
    }
}

impl Config {
    /// Location of the config file when none is given explicitly
    pub fn default_path() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
            .ok_or_else(|| NoteError::ConfigError {
                message: "could not determine the user config directory".to_string(),
            })
    }

    /// Reads the config at `path`, or the defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            warn!("Failed to parse config {}: {}", path.display(), e);
            NoteError::ConfigError {
                message: format!("{}: {}", path.display(), e),
            }
        })
    }

    /// Writes the config as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|_| NoteError::DirectoryError {
                path: parent.to_path_buf(),
            })?;
        }

        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Configuration written to {}", path.display());
        Ok(())
    }
}
