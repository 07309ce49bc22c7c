//! Runtime configuration: scan settings and tracker credentials.
//!
//! Scan settings come from an optional `.todos.yaml` under the scan root.
//! Tracker credentials come from the environment (`TODOS_GITHUB`,
//! `TODOS_TOKEN`), with `.env` files honored.

use std::path::Path;

use serde::Deserialize;

use crate::ports::filesystem::FileSystem;

/// Name of the optional settings file under the scan root.
pub const CONFIG_FILE: &str = ".todos.yaml";

/// Scan and reconciliation settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Marker keywords recognized as action comments.
    pub markers: Vec<String>,
    /// Regex deciding which tracker issue titles this tool manages.
    ///
    /// Issues whose title does not match are ignored entirely: never
    /// created, never closed.
    pub title_pattern: String,
    /// Maximum number of tracker calls in flight during sync.
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            markers: vec!["TODO".to_string(), "FIXME".to_string(), "NOTE".to_string()],
            title_pattern: "^TODO:.+:[0-9]+$".to_string(),
            concurrency: 4,
        }
    }
}

impl Config {
    /// Loads settings from `<root>/.todos.yaml`, falling back to defaults
    /// when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, root: &Path) -> Result<Self, String> {
        let path = root.join(CONFIG_FILE);
        if !fs.exists(&path) {
            return Ok(Self::default());
        }
        let contents = fs
            .read_to_string(&path)
            .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {e}", path.display()))
    }
}

/// Remote tracker location and credentials.
///
/// Constructed once per run, validated up front, and injected into the
/// tracker adapter; there is no process-wide client.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Repository owner (user or organization).
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// API token used for authentication.
    pub token: String,
}

impl TrackerConfig {
    /// Reads `TODOS_GITHUB` (`owner/repo`) and `TODOS_TOKEN` from the
    /// environment. A `.env` file in the working directory is honored.
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing or malformed variable.
    pub fn from_env() -> Result<Self, String> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::var("TODOS_GITHUB").ok(), std::env::var("TODOS_TOKEN").ok())
    }

    /// Builds a tracker config from the raw variable values.
    ///
    /// # Errors
    ///
    /// Returns an error naming the missing or malformed variable.
    pub fn from_vars(github: Option<String>, token: Option<String>) -> Result<Self, String> {
        let github = github.ok_or("TODOS_GITHUB environment variable not set")?;
        let token = token.ok_or("TODOS_TOKEN environment variable not set")?;
        let (owner, repo) = github
            .split_once('/')
            .ok_or_else(|| format!("TODOS_GITHUB must be owner/repo, got: {github}"))?;
        if owner.is_empty() || repo.is_empty() {
            return Err(format!("TODOS_GITHUB must be owner/repo, got: {github}"));
        }
        Ok(Self { owner: owner.to_string(), repo: repo.to_string(), token })
    }
}
