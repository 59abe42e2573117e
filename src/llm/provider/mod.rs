// src/llm/provider/mod.rs
// Completion client abstraction and the closed list of chat models

use crate::error::CompletionFailure;
use crate::session::ApiKey;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use super::{ChatResult, Message};

/// Models offered in the sidebar
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
pub enum Model {
    #[default]
    #[serde(rename = "mixtral-8x7b-32768")]
    #[strum(serialize = "mixtral-8x7b-32768")]
    Mixtral8x7b,
    #[serde(rename = "llama3-70b-8192")]
    #[strum(serialize = "llama3-70b-8192")]
    Llama3_70b,
    #[serde(rename = "llama3-8b-8192")]
    #[strum(serialize = "llama3-8b-8192")]
    Llama3_8b,
}

impl Model {
    /// Identifier sent to the provider
    pub fn id(&self) -> String {
        self.to_string()
    }

    pub fn all() -> Vec<Model> {
        Model::iter().collect()
    }
}

/// Trait for chat completion clients
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a chat completion request. One attempt, no retries.
    async fn chat(&self, messages: Vec<Message>) -> Result<ChatResult, CompletionFailure>;

    /// Model this client was built for
    fn model_name(&self) -> String;
}

/// Builds a client from the session's credential and model choice
pub trait ClientFactory: Send + Sync {
    fn build(&self, api_key: &ApiKey, model: Model) -> Arc<dyn LlmClient>;
}
