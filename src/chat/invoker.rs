// src/chat/invoker.rs
// Completion invoker: one persona-templated prompt, one call, one reply

use crate::error::CompletionFailure;
use crate::llm::{LlmClient, Message};
use crate::memory::format_history;
use crate::persona::Persona;
use crate::session::ChatMessage;
use tracing::{debug, instrument};

/// Build the full prompt sent for `input`
pub fn build_prompt(persona: Persona, window: &[ChatMessage], input: &str) -> String {
    persona.template().render(&format_history(window), input)
}

/// Send one request and return the reply text.
///
/// The rendered prompt goes out as a single user message. A reply with no
/// text counts as a malformed response.
#[instrument(skip_all, fields(persona = %persona, window_len = window.len()))]
pub async fn invoke(
    client: &dyn LlmClient,
    persona: Persona,
    window: &[ChatMessage],
    input: &str,
) -> Result<String, CompletionFailure> {
    let prompt = build_prompt(persona, window, input);
    debug!(prompt_len = prompt.len(), model = %client.model_name(), "Invoking completion");

    let result = client.chat(vec![Message::user(prompt)]).await?;

    match result.content {
        Some(content) if !content.trim().is_empty() => Ok(content),
        _ => Err(CompletionFailure::malformed(format!(
            "empty reply (request {})",
            result.request_id
        ))),
    }
}
