// src/llm/mod.rs
// Hosted chat completion client (Groq, OpenAI-compatible)

pub mod groq;
pub mod http_client;
pub mod logging;
pub mod openai_compat;
mod provider;
mod types;

pub use groq::{GROQ_BASE_URL, GroqClient, GroqClientFactory};
pub use http_client::LlmHttpClient;
pub use provider::{ClientFactory, LlmClient, Model};
pub use types::{ChatResult, Message, Usage};
