use crate::evidence::archive::{ArchiveOptions, DEFAULT_MAX_ARCHIVE_BYTES};
use crate::evidence::extract::DEFAULT_PREVIEW_CHARS;
use crate::evidence::reconcile::{ReconcilePolicy, DEFAULT_QUOTA_SIGNATURE};
use serde::{Deserialize, Serialize};

/// Environment variable consulted for the API key when none is set inline.
pub const DEFAULT_API_KEY_ENV: &str = "EVIDENCE_CHAT_API_KEY";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub upstream: UpstreamConfig,
    pub upload: UploadConfig,
    pub reconcile: ReconcileConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Prediction endpoint URL. Without one the assistant answers offline.
    pub endpoint: Option<String>,
    /// Inline API key. Prefer `api_key_env`.
    pub api_key: Option<String>,
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 120,
            connect_timeout_secs: 10,
        }
    }
}

impl UpstreamConfig {
    /// Inline key first, then the configured environment variable.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_archive_bytes: u64,
    pub preview_chars: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_archive_bytes: DEFAULT_MAX_ARCHIVE_BYTES,
            preview_chars: DEFAULT_PREVIEW_CHARS,
        }
    }
}

impl UploadConfig {
    pub fn archive_options(&self) -> ArchiveOptions {
        ArchiveOptions {
            max_archive_bytes: self.max_archive_bytes,
            preview_chars: self.preview_chars,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReconcileConfig {
    pub quota_signature: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            quota_signature: DEFAULT_QUOTA_SIGNATURE.to_string(),
        }
    }
}

impl ReconcileConfig {
    pub fn policy(&self) -> ReconcilePolicy {
        ReconcilePolicy {
            quota_signature: self.quota_signature.clone(),
        }
    }
}
