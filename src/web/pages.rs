// src/web/pages.rs
// HTML page and form handlers. Every form runs its events under one lock,
// then redirects to the page, which is rendered fresh from the session.

use axum::{
    Form,
    extract::State,
    response::{Html, IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::debug;

use crate::chat::{ChatEvent, Notice, NoticeLevel};
use crate::error::ChatError;
use crate::llm::Model;
use crate::memory::MemoryLength;
use crate::persona::Persona;
use crate::web::render::{PageView, render_page};
use crate::web::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SendForm {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub api_key: String,
    pub model: Option<String>,
    pub memory_length: Option<String>,
    pub persona: Option<String>,
}

impl SettingsForm {
    /// Parse the form into events. Any invalid field rejects the whole form.
    fn into_events(self) -> Result<Vec<ChatEvent>, ChatError> {
        let mut events = Vec::new();
        if let Some(raw) = self.model.as_deref() {
            let model = raw
                .parse::<Model>()
                .map_err(|_| ChatError::InvalidInput(format!("unknown model: {}", raw)))?;
            events.push(ChatEvent::SetModel(model));
        }
        if let Some(raw) = self.memory_length.as_deref() {
            events.push(ChatEvent::SetMemoryLength(raw.parse::<MemoryLength>()?));
        }
        if let Some(raw) = self.persona.as_deref() {
            let persona = raw
                .parse::<Persona>()
                .map_err(|_| ChatError::InvalidInput(format!("unknown persona: {}", raw)))?;
            events.push(ChatEvent::SetPersona(persona));
        }
        events.push(ChatEvent::SetApiKey(self.api_key));
        Ok(events)
    }
}

pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    let (session, notice) = state.take_view().await;
    Html(render_page(&PageView {
        session: &session,
        notice: notice.as_ref(),
        now: chrono::Utc::now(),
    }))
}

pub async fn send(State(state): State<AppState>, Form(form): Form<SendForm>) -> Redirect {
    debug!(message_len = form.message.len(), "Send clicked");
    state.apply_and_flash(ChatEvent::Send(form.message)).await;
    Redirect::to("/")
}

pub async fn clear(State(state): State<AppState>) -> Redirect {
    state.apply_and_flash(ChatEvent::Clear).await;
    Redirect::to("/")
}

pub async fn new_topic(State(state): State<AppState>) -> Redirect {
    state.apply_and_flash(ChatEvent::NewTopic).await;
    Redirect::to("/")
}

pub async fn settings(State(state): State<AppState>, Form(form): Form<SettingsForm>) -> Redirect {
    match form.into_events() {
        Ok(events) => {
            state.apply_all(events).await;
        }
        Err(e) => {
            state
                .flash(Notice::new(NoticeLevel::Warning, e.to_user_string()))
                .await;
        }
    }
    Redirect::to("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_form_events() {
        let form = SettingsForm {
            api_key: String::new(),
            model: Some("llama3-70b-8192".into()),
            memory_length: Some("3".into()),
            persona: Some("expert".into()),
        };
        let events = form.into_events().unwrap();
        assert_eq!(
            events,
            vec![
                ChatEvent::SetModel(Model::Llama3_70b),
                ChatEvent::SetMemoryLength(MemoryLength::new(3).unwrap()),
                ChatEvent::SetPersona(Persona::Expert),
                ChatEvent::SetApiKey(String::new()),
            ]
        );
    }

    #[test]
    fn test_settings_form_rejects_bad_values() {
        let form = SettingsForm {
            api_key: String::new(),
            model: None,
            memory_length: Some("0".into()),
            persona: None,
        };
        assert!(form.into_events().is_err());

        let form = SettingsForm {
            api_key: String::new(),
            model: Some("gpt-4".into()),
            memory_length: None,
            persona: None,
        };
        assert!(form.into_events().is_err());
    }
}
