// src/config/env.rs
// Environment-based configuration - every env var the app reads lives here

use tracing::{debug, warn};

pub const API_KEY_VAR: &str = "GROQ_API_KEY";
pub const BASE_URL_VAR: &str = "GROQ_BASE_URL";
pub const MODEL_VAR: &str = "GROQ_CHAT_MODEL";
pub const PERSONA_VAR: &str = "GROQ_CHAT_PERSONA";
pub const MEMORY_LENGTH_VAR: &str = "GROQ_CHAT_MEMORY_LENGTH";

/// Raw values read from the environment, before validation
#[derive(Debug, Clone, Default)]
pub struct EnvConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub persona: Option<String>,
    pub memory_length: Option<String>,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        let config = Self {
            api_key: read_var(API_KEY_VAR),
            base_url: read_var(BASE_URL_VAR),
            model: read_var(MODEL_VAR),
            persona: read_var(PERSONA_VAR),
            memory_length: read_var(MEMORY_LENGTH_VAR),
        };
        if config.api_key.is_some() {
            debug!("{} found in environment", API_KEY_VAR);
        } else {
            debug!("{} not set", API_KEY_VAR);
        }
        config
    }
}

/// Read a single variable, filtering empty values
fn read_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Configuration validation result
#[derive(Debug)]
pub struct ConfigValidation {
    pub warnings: Vec<String>,
    pub errors: Vec<String>,
}

impl Default for ConfigValidation {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidation {
    pub fn new() -> Self {
        Self {
            warnings: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_warning(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        warn!("{}", msg);
        self.warnings.push(msg);
    }

    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    /// Format as a human-readable report
    pub fn report(&self) -> String {
        let mut lines = Vec::new();

        if !self.errors.is_empty() {
            lines.push("Errors:".to_string());
            for err in &self.errors {
                lines.push(format!("  - {}", err));
            }
        }

        if !self.warnings.is_empty() {
            lines.push("Warnings:".to_string());
            for warn in &self.warnings {
                lines.push(format!("  - {}", warn));
            }
        }

        if lines.is_empty() {
            "Configuration OK".to_string()
        } else {
            lines.join("\n")
        }
    }
}
