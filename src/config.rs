//! Configuration for Classpatch
//!
//! Configuration hierarchy:
//! 1. `CLASSPATCH_CONFIG` environment variable (explicit file path)
//! 2. `classpatch.toml` in the working directory
//! 3. Built-in defaults
//!
//! The config only carries transport knobs; everything else is CLI flags.

use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Classpatch configuration
///
/// ```toml
/// ssh = "ssh"
/// scp = "scp"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Program used for remote command execution
    #[serde(default = "default_ssh")]
    pub ssh: String,

    /// Program used for remote byte transfer
    #[serde(default = "default_scp")]
    pub scp: String,
}

fn default_ssh() -> String {
    "ssh".to_string()
}

fn default_scp() -> String {
    "scp".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ssh: default_ssh(),
            scp: default_scp(),
        }
    }
}

impl Config {
    /// Load config from a specific path
    pub fn load(path: &Path) -> Option<Self> {
        let content = fs::read_to_string(path).ok()?;
        toml::from_str(&content).ok()
    }

    /// Load config from the environment override or the working directory,
    /// falling back to defaults when absent or unreadable.
    pub fn load_or_default() -> Self {
        if let Ok(path) = std::env::var("CLASSPATCH_CONFIG") {
            return Self::load(Path::new(&path)).unwrap_or_default();
        }
        Self::load(Path::new("classpatch.toml")).unwrap_or_default()
    }
}
