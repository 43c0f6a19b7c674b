//! Game configuration.
//!
//! Settings come from an optional `bletheria.toml`. The file is looked up via the
//! `BLETHERIA_CONFIG` environment variable first, then in a few conventional
//! locations relative to the working directory and the executable. A missing or
//! unreadable file is never fatal: the defaults below are used instead.

use anyhow::{Context, Result};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_ENV_VAR: &str = "BLETHERIA_CONFIG";
pub const CONFIG_FILE: &str = "bletheria.toml";
pub const STORE_FILE: &str = "bletheria.ron";

/// Complete configuration for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub persistence: PersistenceConfig,
    pub display: DisplayConfig,
}

/// Whether player accounts are used and where they're kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    pub enabled: bool,
    pub store_path: Option<PathBuf>,
}
impl PersistenceConfig {
    /// The configured store path, or `<data dir>/bletheria/bletheria.ron`.
    pub fn resolved_store_path(&self) -> PathBuf {
        self.store_path.clone().unwrap_or_else(default_store_path)
    }
}

/// Terminal presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub clear_screen: bool,
    pub wrap_width: Option<usize>,
}
impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            clear_screen: true,
            wrap_width: None,
        }
    }
}

impl GameConfig {
    /// Locate and load the configuration, falling back to defaults.
    pub fn load() -> GameConfig {
        match config_path() {
            Some(path) => load_config(&path),
            None => {
                info!("no {CONFIG_FILE} found, using default settings");
                GameConfig::default()
            },
        }
    }
}

/// Loads configuration from a TOML file, falling back to defaults on error.
///
/// This function never fails -- it logs a warning and returns defaults if the file
/// cannot be read or parsed.
pub fn load_config(path: &Path) -> GameConfig {
    match try_load_config(path) {
        Ok(config) => {
            info!("settings loaded from '{}'", path.display());
            config
        },
        Err(e) => {
            warn!("could not load settings from '{}': {e:#}. Using defaults.", path.display());
            GameConfig::default()
        },
    }
}

/// Parse configuration from TOML text.
///
/// # Errors
/// Returns an error if the text isn't valid TOML or has fields of the wrong type.
pub fn parse_config(text: &str) -> Result<GameConfig> {
    toml::from_str(text).context("parsing settings")
}

fn try_load_config(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path).with_context(|| format!("reading settings from '{}'", path.display()))?;
    parse_config(&text)
}

/// Resolve the config file to use, if any.
fn config_path() -> Option<PathBuf> {
    if let Ok(explicit) = env::var(CONFIG_ENV_VAR)
        && !explicit.trim().is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    let mut candidates = vec![PathBuf::from(CONFIG_FILE), PathBuf::from("data").join(CONFIG_FILE)];
    if let Ok(exe_path) = env::current_exe()
        && let Some(dir) = exe_path.parent()
    {
        candidates.push(dir.join(CONFIG_FILE));
        candidates.push(dir.join("data").join(CONFIG_FILE));
    }
    candidates.into_iter().find(|candidate| candidate.is_file())
}

fn default_store_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|base| base.join("bletheria").join(STORE_FILE))
        .unwrap_or_else(|| PathBuf::from(STORE_FILE))
}
