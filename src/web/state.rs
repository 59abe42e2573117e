// src/web/state.rs
// Web server state: the one session this process serves

use std::sync::Arc;
use tokio::sync::Mutex;

use crate::chat::{ChatEvent, Notice, Outcome, handle_event};
use crate::llm::ClientFactory;
use crate::session::{ChatDefaults, SessionState};

/// Session plus the notice waiting for the next page render
#[derive(Debug)]
pub struct WebSession {
    pub session: SessionState,
    pub notice: Option<Notice>,
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Held for the whole of an event, completion call included, so two
    /// sends never overlap
    inner: Arc<Mutex<WebSession>>,

    /// Builds a completion client per send
    factory: Arc<dyn ClientFactory>,
}

impl AppState {
    /// Initialise the session once, from configured defaults
    pub fn new(defaults: &ChatDefaults, factory: Arc<dyn ClientFactory>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(WebSession {
                session: SessionState::init(defaults),
                notice: None,
            })),
            factory,
        }
    }

    /// Run one event to completion
    pub async fn apply(&self, event: ChatEvent) -> Outcome {
        let mut guard = self.inner.lock().await;
        handle_event(
            &mut guard.session,
            event,
            self.factory.as_ref(),
            chrono::Utc::now(),
        )
        .await
    }

    /// Run one event and keep its notice for the next render
    pub async fn apply_and_flash(&self, event: ChatEvent) -> Outcome {
        let mut guard = self.inner.lock().await;
        let outcome = handle_event(
            &mut guard.session,
            event,
            self.factory.as_ref(),
            chrono::Utc::now(),
        )
        .await;
        if let Some(notice) = outcome.notice() {
            guard.notice = Some(notice);
        }
        outcome
    }

    /// Run a batch of events under one lock, keeping the last notice for the
    /// next render
    pub async fn apply_all(&self, events: Vec<ChatEvent>) -> Vec<Outcome> {
        let mut guard = self.inner.lock().await;
        let mut outcomes = Vec::with_capacity(events.len());
        for event in events {
            let outcome = handle_event(
                &mut guard.session,
                event,
                self.factory.as_ref(),
                chrono::Utc::now(),
            )
            .await;
            if let Some(notice) = outcome.notice() {
                guard.notice = Some(notice);
            }
            outcomes.push(outcome);
        }
        outcomes
    }

    pub async fn flash(&self, notice: Notice) {
        self.inner.lock().await.notice = Some(notice);
    }

    /// Snapshot of the session and the pending notice, which is consumed
    pub async fn take_view(&self) -> (SessionState, Option<Notice>) {
        let mut guard = self.inner.lock().await;
        let notice = guard.notice.take();
        (guard.session.clone(), notice)
    }

    pub async fn snapshot(&self) -> SessionState {
        self.inner.lock().await.session.clone()
    }
}
