// src/llm/groq.rs
// Groq chat completions client (OpenAI-compatible endpoint)

use crate::error::CompletionFailure;
use crate::llm::http_client::LlmHttpClient;
use crate::llm::openai_compat::{ChatRequest, parse_chat_response};
use crate::llm::provider::{ClientFactory, LlmClient, Model};
use crate::llm::{ChatResult, Message};
use crate::session::ApiKey;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Span, debug, info, instrument};
use uuid::Uuid;

/// Default Groq API base URL
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Groq API client bound to one key and one model
pub struct GroqClient {
    api_key: ApiKey,
    model: String,
    base_url: String,
    http: LlmHttpClient,
}

impl GroqClient {
    /// Create a client against a custom base URL with a shared HTTP client
    pub fn with_http_client(
        api_key: ApiKey,
        model: Model,
        base_url: impl Into<String>,
        http: LlmHttpClient,
    ) -> Self {
        Self {
            api_key,
            model: model.id(),
            base_url: base_url.into(),
            http,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    #[instrument(skip(self, messages), fields(request_id, model = %self.model, message_count = messages.len()))]
    async fn send(&self, messages: Vec<Message>) -> Result<ChatResult, CompletionFailure> {
        let request_id = Uuid::new_v4().to_string();
        let start_time = Instant::now();

        Span::current().record("request_id", &request_id);

        info!(
            request_id = %request_id,
            message_count = messages.len(),
            model = %self.model,
            "Starting Groq chat request"
        );

        let request = ChatRequest::new(&self.model, messages);
        let body = serde_json::to_string(&request)
            .map_err(|e| CompletionFailure::malformed(format!("Failed to encode request: {}", e)))?;
        debug!(request_id = %request_id, body_len = body.len(), "Groq request encoded");

        let response_body = self
            .http
            .execute(&request_id, &self.completions_url(), self.api_key.expose(), body)
            .await?;

        let duration_ms = start_time.elapsed().as_millis() as u64;
        let result = parse_chat_response(&response_body, &request_id, duration_ms)?;

        if let Some(ref u) = result.usage {
            crate::llm::logging::log_usage(&request_id, "Groq", u);
        }
        crate::llm::logging::log_completion(
            &request_id,
            "Groq",
            duration_ms,
            result.content.as_ref().map(|c| c.len()).unwrap_or(0),
        );

        Ok(result)
    }
}

#[async_trait]
impl LlmClient for GroqClient {
    async fn chat(&self, messages: Vec<Message>) -> Result<ChatResult, CompletionFailure> {
        self.send(messages).await
    }

    fn model_name(&self) -> String {
        self.model.clone()
    }
}

/// Builds [`GroqClient`]s that share one HTTP client and base URL
#[derive(Clone)]
pub struct GroqClientFactory {
    base_url: String,
    http: LlmHttpClient,
}

impl GroqClientFactory {
    pub fn new(base_url: impl Into<String>, http: LlmHttpClient) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }
}

impl Default for GroqClientFactory {
    fn default() -> Self {
        Self::new(GROQ_BASE_URL, LlmHttpClient::default())
    }
}

impl ClientFactory for GroqClientFactory {
    fn build(&self, api_key: &ApiKey, model: Model) -> Arc<dyn LlmClient> {
        Arc::new(GroqClient::with_http_client(
            api_key.clone(),
            model,
            self.base_url.clone(),
            self.http.clone(),
        ))
    }
}
