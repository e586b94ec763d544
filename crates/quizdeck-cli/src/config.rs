//! Configuration file handling.
//!
//! Every CLI flag can also be set in an optional `quizdeck.toml`; flags win
//! over the file, and built-in defaults cover the rest.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const DEFAULT_FILE: &str = "problems.csv";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_SHUFFLE: bool = true;

/// Top-level quizdeck configuration. All keys optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuizdeckConfig {
    /// Path to the problems CSV.
    #[serde(default)]
    pub file: Option<PathBuf>,
    /// Total quiz duration in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    /// Whether to randomize question order.
    #[serde(default)]
    pub shuffle: Option<bool>,
}

/// Effective settings after flag > config file > default resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub file: PathBuf,
    pub timeout_secs: u64,
    pub shuffle: bool,
}

impl QuizdeckConfig {
    pub fn resolve(
        &self,
        file: Option<PathBuf>,
        timeout_secs: Option<u64>,
        shuffle: Option<bool>,
    ) -> Settings {
        Settings {
            file: file
                .or_else(|| self.file.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE)),
            timeout_secs: timeout_secs
                .or(self.timeout_secs)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            shuffle: shuffle.or(self.shuffle).unwrap_or(DEFAULT_SHUFFLE),
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. the explicit `--config` path (must exist)
/// 2. `quizdeck.toml` in the current directory
/// 3. `~/.config/quizdeck/config.toml`
pub fn load_config_from(path: Option<&Path>) -> Result<QuizdeckConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizdeck.toml");
        if local.exists() {
            Some(local)
        } else if let Some(dir) = config_dir() {
            let global = dir.join("config.toml");
            global.exists().then_some(global)
        } else {
            None
        }
    };

    match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))
        }
        None => Ok(QuizdeckConfig::default()),
    }
}

fn config_dir() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizdeck"))
}
