pub mod schema;

pub use schema::{Config, ReconcileConfig, UploadConfig, UpstreamConfig};

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Overrides `upstream.endpoint`.
pub const ENDPOINT_ENV: &str = "EVIDENCE_CHAT_ENDPOINT";

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    NotFound(PathBuf),
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Default config location, e.g. `~/.config/evidence-chat/config.toml`.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "evidence-chat").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

impl Config {
    /// Load config from `path` (which must exist) or from the default
    /// location (which may be absent), then apply environment overrides.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(raw) => {
                let path = PathBuf::from(shellexpand::tilde(raw).to_string());
                if !path.exists() {
                    return Err(ConfigError::NotFound(path));
                }
                Self::from_file(&path)?
            }
            None => match default_config_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(&path)?,
                None => {
                    debug!("no config file, using defaults");
                    Self::default()
                }
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    /// Apply environment overrides through `lookup`.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(endpoint) = lookup(ENDPOINT_ENV).filter(|e| !e.trim().is_empty()) {
            self.upstream.endpoint = Some(endpoint.trim().to_string());
        }
    }

    /// True when no endpoint is configured and answers come from the
    /// built-in knowledge base.
    pub fn is_offline(&self) -> bool {
        self.upstream.endpoint.is_none()
    }
}
