//! Server settings
//!
//! Stored as JSON. Precedence: command-line flag, then environment variable,
//! then settings file, then built-in default.

use crate::error::{Form16Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const ENV_CONFIG: &str = "FORM16_CONFIG";
pub const ENV_BIND: &str = "FORM16_BIND";
pub const ENV_MAX_UPLOAD: &str = "FORM16_MAX_UPLOAD_BYTES";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Upper bound on the multipart request body
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

fn default_bind_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_upload_bytes: default_max_upload_bytes(),
            cors_permissive: true,
        }
    }
}

impl Settings {
    /// Load settings from disk; a missing file gives defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| Form16Error::Settings(format!("{}: {}", path.display(), e)))
    }

    /// Save settings to disk
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| Form16Error::Settings(e.to_string()))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    /// Apply environment overrides on top of file values
    pub fn apply_env(mut self) -> Result<Self> {
        if let Some(bind) = non_empty_env(ENV_BIND) {
            self.bind_addr = bind;
        }
        if let Some(max) = non_empty_env(ENV_MAX_UPLOAD) {
            self.max_upload_bytes = max.parse().map_err(|_| {
                Form16Error::Settings(format!("{} must be a byte count, got '{}'", ENV_MAX_UPLOAD, max))
            })?;
        }
        Ok(self)
    }

    /// Resolve settings for a run: file (explicit or discovered), then env
    pub fn resolve(config_arg: Option<&Path>) -> Result<Self> {
        let path = config_path(config_arg);
        tracing::debug!(path = %path.display(), "loading settings");
        Settings::load(&path)?.apply_env()
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Settings file location: argument, then `FORM16_CONFIG`, then data dir
pub fn config_path(config_arg: Option<&Path>) -> PathBuf {
    if let Some(path) = config_arg {
        return path.to_path_buf();
    }

    if let Some(path) = non_empty_env(ENV_CONFIG) {
        return PathBuf::from(path);
    }

    dirs::data_dir()
        .map(|p| p.join("form16").join("settings.json"))
        .unwrap_or_else(|| PathBuf::from("settings.json"))
}
