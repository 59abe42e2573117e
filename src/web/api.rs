// src/web/api.rs
// JSON API over the same session the page shows

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chat::{ChatEvent, Outcome};
use crate::llm::Model;
use crate::memory::MemoryLength;
use crate::persona::Persona;
use crate::session::{ChatMessage, ChatStats, SessionState};
use crate::web::state::AppState;

/// Envelope for every API reply
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Session as seen from outside. The API key itself is never exposed.
#[derive(Debug, Serialize)]
pub struct StateView {
    pub chat_history: Vec<ChatMessage>,
    pub total_message: u64,
    pub start_time: Option<DateTime<Utc>>,
    pub selected_persona: Persona,
    pub selected_model: Model,
    pub memory_length: MemoryLength,
    pub has_api_key: bool,
    pub topic_start: usize,
    pub stats: Option<ChatStats>,
}

impl StateView {
    fn from_session(session: &SessionState, now: DateTime<Utc>) -> Self {
        Self {
            chat_history: session.chat_history.clone(),
            total_message: session.total_message,
            start_time: session.start_time,
            selected_persona: session.selected_persona,
            selected_model: session.selected_model,
            memory_length: session.memory_length,
            has_api_key: session.has_api_key(),
            topic_start: session.topic_start(),
            stats: session.stats(now),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SendRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingsRequest {
    pub api_key: Option<String>,
    pub persona: Option<Persona>,
    pub model: Option<Model>,
    pub memory_length: Option<MemoryLength>,
}

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn get_state(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.snapshot().await;
    Json(ApiResponse::ok(StateView::from_session(&session, Utc::now())))
}

/// Send one message. Replies with the new turn, or the reason nothing was
/// appended.
pub async fn send(
    State(state): State<AppState>,
    Json(req): Json<SendRequest>,
) -> impl IntoResponse {
    match state.apply(ChatEvent::Send(req.message)).await {
        Outcome::Replied(message) => (StatusCode::OK, Json(ApiResponse::ok(message))),
        Outcome::Ignored => (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::err("message is empty")),
        ),
        Outcome::Rejected(err) => (
            StatusCode::PRECONDITION_FAILED,
            Json(ApiResponse::err(err.to_user_string())),
        ),
        Outcome::Failed(failure) => (
            StatusCode::BAD_GATEWAY,
            Json(ApiResponse::err(failure.to_string())),
        ),
        Outcome::Updated | Outcome::TopicStarted => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse::err("unexpected outcome")),
        ),
    }
}

pub async fn clear(State(state): State<AppState>) -> impl IntoResponse {
    state.apply(ChatEvent::Clear).await;
    Json(ApiResponse::<()>::ok(()))
}

pub async fn new_topic(State(state): State<AppState>) -> impl IntoResponse {
    let outcome = state.apply(ChatEvent::NewTopic).await;
    let text = outcome.notice().map(|n| n.text).unwrap_or_default();
    Json(ApiResponse::ok(text))
}

/// Apply whichever settings are present, then return the new state
pub async fn update_settings(
    State(state): State<AppState>,
    Json(req): Json<SettingsRequest>,
) -> impl IntoResponse {
    let mut events = Vec::new();
    if let Some(model) = req.model {
        events.push(ChatEvent::SetModel(model));
    }
    if let Some(persona) = req.persona {
        events.push(ChatEvent::SetPersona(persona));
    }
    if let Some(k) = req.memory_length {
        events.push(ChatEvent::SetMemoryLength(k));
    }
    if let Some(key) = req.api_key {
        events.push(ChatEvent::SetApiKey(key));
    }
    state.apply_all(events).await;
    let session = state.snapshot().await;
    Json(ApiResponse::ok(StateView::from_session(&session, Utc::now())))
}
