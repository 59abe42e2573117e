// src/config/file.rs
// File-based configuration from ~/.groq-chat/config.toml

use crate::error::{ChatError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Top-level config structure
#[derive(Debug, Deserialize, Default, Clone)]
pub struct FileConfig {
    #[serde(default)]
    pub llm: LlmSection,
    #[serde(default)]
    pub chat: ChatSection,
    #[serde(default)]
    pub server: ServerSection,
}

/// `[llm]` section
#[derive(Debug, Deserialize, Default, Clone)]
pub struct LlmSection {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub default_model: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
}

/// `[chat]` section
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ChatSection {
    pub persona: Option<String>,
    pub memory_length: Option<usize>,
}

/// `[server]` section
#[derive(Debug, Deserialize, Default, Clone)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl FileConfig {
    /// Load config from a file such as ~/.groq-chat/config.toml.
    /// A missing file gives defaults; an unreadable or unparseable one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config = toml::from_str(&contents).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Failed to parse config file");
            ChatError::Config(format!("{}: {}", path.display(), e))
        })?;
        debug!(path = %path.display(), "Loaded config from file");
        Ok(config)
    }
}

/// Directory holding config.toml and .env
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".groq-chat")
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}
