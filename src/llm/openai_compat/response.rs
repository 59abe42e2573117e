// src/llm/openai_compat/response.rs
// OpenAI-compatible chat response parsing

use crate::error::CompletionFailure;
use crate::llm::{ChatResult, Usage};
use serde::Deserialize;

/// Non-streaming chat response (OpenAI-compatible format)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ResponseChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ResponseChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Parse an OpenAI-compatible chat response into a ChatResult
pub fn parse_chat_response(
    response_body: &str,
    request_id: &str,
    duration_ms: u64,
) -> Result<ChatResult, CompletionFailure> {
    let data: ChatResponse = serde_json::from_str(response_body).map_err(|e| {
        CompletionFailure::malformed(format!("Failed to parse chat response: {}", e))
    })?;

    let content = data.choices.into_iter().next().and_then(|c| c.message.content);

    Ok(ChatResult {
        request_id: request_id.to_owned(),
        content,
        usage: data.usage,
        duration_ms,
    })
}
