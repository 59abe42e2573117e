// src/llm/types.rs
// Message and result types shared by the completion client

use serde::{Deserialize, Serialize};

/// Chat message in OpenAI-compatible format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            content: content.into(),
        }
    }
}

/// Token usage reported by the provider
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Result of one chat completion call
#[derive(Debug, Clone)]
pub struct ChatResult {
    pub request_id: String,
    pub content: Option<String>,
    pub usage: Option<Usage>,
    pub duration_ms: u64,
}
