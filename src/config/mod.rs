// src/config/mod.rs
// Configuration: environment and config file layered over built-in defaults.
// Precedence: CLI flags > environment > config file > defaults.

pub mod env;
pub mod file;

pub use env::{ConfigValidation, EnvConfig};
pub use file::{FileConfig, config_dir, config_path};

use crate::llm::http_client::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::llm::{GROQ_BASE_URL, Model};
use crate::memory::MemoryLength;
use crate::persona::Persona;
use crate::session::{ApiKey, ChatDefaults};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8501;

/// Values given on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Fully resolved settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub defaults: ChatDefaults,
    pub base_url: String,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Read the environment and the config file
    pub fn load(overrides: &CliOverrides) -> (Self, ConfigValidation) {
        Self::load_from(&EnvConfig::from_env(), &config_path(), overrides)
    }

    /// Like [`Settings::load`] with an explicit config file. A broken file is
    /// reported as an error and its values are ignored.
    pub fn load_from(
        env: &EnvConfig,
        config_file: &Path,
        overrides: &CliOverrides,
    ) -> (Self, ConfigValidation) {
        let (file, file_error) = match FileConfig::load_from(config_file) {
            Ok(file) => (file, None),
            Err(e) => (FileConfig::default(), Some(e)),
        };
        let (settings, mut validation) = Self::resolve(env, &file, overrides);
        if let Some(e) = file_error {
            validation.add_error(e.to_string());
        }
        (settings, validation)
    }

    /// Merge the layers. Invalid values fall back to defaults and are
    /// reported as errors.
    pub fn resolve(
        env: &EnvConfig,
        file: &FileConfig,
        overrides: &CliOverrides,
    ) -> (Self, ConfigValidation) {
        let mut validation = ConfigValidation::new();

        let model = match env.model.as_deref().or(file.llm.default_model.as_deref()) {
            Some(raw) => raw.parse::<Model>().unwrap_or_else(|_| {
                validation.add_error(format!(
                    "unknown model '{}', expected one of: {}",
                    raw,
                    Model::all()
                        .iter()
                        .map(|m| m.id())
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                Model::default()
            }),
            None => Model::default(),
        };

        let persona = match env.persona.as_deref().or(file.chat.persona.as_deref()) {
            Some(raw) => raw.parse::<Persona>().unwrap_or_else(|_| {
                validation.add_error(format!(
                    "unknown persona '{}', expected default, expert or creative",
                    raw
                ));
                Persona::default()
            }),
            None => Persona::default(),
        };

        let memory_length = match env.memory_length.as_deref() {
            Some(raw) => raw.parse::<MemoryLength>(),
            None => file
                .chat
                .memory_length
                .map(MemoryLength::new)
                .unwrap_or_else(|| Ok(MemoryLength::default())),
        }
        .unwrap_or_else(|e| {
            validation.add_error(e.to_string());
            MemoryLength::default()
        });

        let api_key = env
            .api_key
            .as_deref()
            .or(file.llm.api_key.as_deref())
            .and_then(ApiKey::new);
        if api_key.is_none() {
            validation.add_warning(format!(
                "{} is not set; the API key must be entered in the page",
                env::API_KEY_VAR
            ));
        }

        let base_url = match env.base_url.as_deref().or(file.llm.base_url.as_deref()) {
            Some(raw) if raw.starts_with("http://") || raw.starts_with("https://") => {
                raw.to_string()
            }
            Some(raw) => {
                validation.add_error(format!("base URL must be http(s): {}", raw));
                GROQ_BASE_URL.to_string()
            }
            None => GROQ_BASE_URL.to_string(),
        };

        let settings = Self {
            defaults: ChatDefaults {
                persona,
                model,
                memory_length,
                api_key,
            },
            base_url,
            request_timeout: Duration::from_secs(
                file.llm
                    .request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            connect_timeout: Duration::from_secs(
                file.llm
                    .connect_timeout_secs
                    .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
            ),
            host: overrides
                .host
                .clone()
                .or_else(|| file.server.host.clone())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: overrides
                .port
                .or(file.server.port)
                .unwrap_or(DEFAULT_PORT),
        };

        (settings, validation)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Load `~/.groq-chat/.env` then `./.env`; values already set win.
pub fn load_dotenv() {
    let _ = dotenvy::from_path(config_dir().join(".env"));
    let _ = dotenvy::dotenv();
}
