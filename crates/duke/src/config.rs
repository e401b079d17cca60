use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;

const APP_DIR: &str = "duke";
const CONFIG_FILE: &str = "config.toml";
const DATA_FILE: &str = "tasks.txt";

/// User configuration loaded from `<config dir>/duke/config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Where the task list is stored.
    #[serde(default)]
    pub data_file: Option<PathBuf>,
    /// Print the welcome banner when a session starts.
    #[serde(default = "default_greeting")]
    pub greeting: bool,
}

const fn default_greeting() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            greeting: default_greeting(),
        }
    }
}

impl Config {
    /// Load from `explicit` when given (the file must exist), otherwise from the
    /// platform config directory, falling back to defaults when that file is absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load from a known file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Configured data file, or `<data dir>/duke/tasks.txt`.
    pub fn data_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.data_file {
            return Ok(path.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR).join(DATA_FILE))
            .ok_or_else(|| anyhow!("failed to resolve a data directory; pass --data-file"))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
}
