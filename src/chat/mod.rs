// src/chat/mod.rs
// UI events and the handlers that apply them to the session, one at a time.

pub mod invoker;

pub use invoker::{build_prompt, invoke};

use crate::error::{ChatError, CompletionFailure};
use crate::llm::{ClientFactory, Model};
use crate::memory::MemoryLength;
use crate::persona::Persona;
use crate::session::{ChatMessage, SessionState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

/// An action taken in the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    Send(String),
    Clear,
    NewTopic,
    SetPersona(Persona),
    SetModel(Model),
    SetMemoryLength(MemoryLength),
    SetApiKey(String),
}

/// What handling an event did
#[derive(Debug)]
pub enum Outcome {
    /// Nothing to do (blank message, blank key)
    Ignored,
    /// Session changed with nothing to report
    Updated,
    /// A reply arrived and was appended
    Replied(ChatMessage),
    /// Earlier turns left the memory window
    TopicStarted,
    /// A precondition blocked the call; nothing was sent
    Rejected(ChatError),
    /// The call was made and failed; history is unchanged
    Failed(CompletionFailure),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

/// Message shown above the input box after a redraw
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

impl Outcome {
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Outcome::TopicStarted => Some(Notice::new(
                NoticeLevel::Success,
                "Memory cleared for new topic!",
            )),
            Outcome::Rejected(err) => Some(Notice::new(NoticeLevel::Warning, err.to_user_string())),
            Outcome::Failed(failure) => Some(Notice::new(
                NoticeLevel::Error,
                ChatError::Completion(failure.clone()).to_user_string(),
            )),
            Outcome::Ignored | Outcome::Updated | Outcome::Replied(_) => None,
        }
    }
}

/// Apply one event to the session and run it to completion.
pub async fn handle_event(
    state: &mut SessionState,
    event: ChatEvent,
    factory: &dyn ClientFactory,
    now: DateTime<Utc>,
) -> Outcome {
    match event {
        ChatEvent::Send(text) => send(state, text, factory, now).await,
        ChatEvent::Clear => {
            state.clear();
            info!("Chat history cleared");
            Outcome::Updated
        }
        ChatEvent::NewTopic => {
            state.new_topic();
            info!(topic_start = state.topic_start(), "New topic started");
            Outcome::TopicStarted
        }
        ChatEvent::SetPersona(persona) => {
            state.selected_persona = persona;
            Outcome::Updated
        }
        ChatEvent::SetModel(model) => {
            state.selected_model = model;
            Outcome::Updated
        }
        ChatEvent::SetMemoryLength(k) => {
            state.memory_length = k;
            Outcome::Updated
        }
        ChatEvent::SetApiKey(raw) => {
            if state.set_api_key(&raw) {
                info!("API key updated for this session");
                Outcome::Updated
            } else {
                Outcome::Ignored
            }
        }
    }
}

async fn send(
    state: &mut SessionState,
    text: String,
    factory: &dyn ClientFactory,
    now: DateTime<Utc>,
) -> Outcome {
    if text.trim().is_empty() {
        return Outcome::Ignored;
    }

    let Some(api_key) = state.api_key().cloned() else {
        return Outcome::Rejected(ChatError::MissingCredential(
            "no API key configured or entered".into(),
        ));
    };

    state.record_start(now);
    state.total_message += 1;

    let client = factory.build(&api_key, state.selected_model);
    let reply = invoke(
        client.as_ref(),
        state.selected_persona,
        state.memory_window(),
        &text,
    )
    .await;

    match reply {
        Ok(ai) => {
            let message = ChatMessage::new(text, ai);
            state.append(message.clone());
            info!(history_len = state.chat_history.len(), "Reply appended");
            Outcome::Replied(message)
        }
        Err(failure) => {
            warn!(reason = %failure.reason, error = %failure.message, "Completion failed");
            Outcome::Failed(failure)
        }
    }
}
