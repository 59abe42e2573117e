// src/session.rs
// Process-local session state: history, counters and the sidebar selections.

use crate::llm::Model;
use crate::memory::{self, MemoryLength};
use crate::persona::Persona;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One completed round-trip. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub human: String,
    #[serde(rename = "AI")]
    pub ai: String,
}

impl ChatMessage {
    pub fn new(human: impl Into<String>, ai: impl Into<String>) -> Self {
        Self {
            human: human.into(),
            ai: ai.into(),
        }
    }
}

/// Provider API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Trims the input; blank keys are rejected.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(***)")
    }
}

/// Values a fresh session starts from
#[derive(Debug, Clone, Default)]
pub struct ChatDefaults {
    pub persona: Persona,
    pub model: Model,
    pub memory_length: MemoryLength,
    pub api_key: Option<ApiKey>,
}

/// Numbers shown in the statistics panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChatStats {
    pub messages: usize,
    pub duration_secs: i64,
}

impl ChatStats {
    pub fn duration_label(&self) -> String {
        format!("{}m {}s", self.duration_secs / 60, self.duration_secs % 60)
    }
}

/// State of one browser session
#[derive(Debug, Clone)]
pub struct SessionState {
    pub chat_history: Vec<ChatMessage>,
    /// Sends that reached the completion client since the last clear
    pub total_message: u64,
    pub start_time: Option<DateTime<Utc>>,
    pub selected_persona: Persona,
    pub selected_model: Model,
    pub memory_length: MemoryLength,
    api_key: Option<ApiKey>,
    /// Index of the first turn the memory window may see
    topic_start: usize,
}

impl SessionState {
    pub fn init(defaults: &ChatDefaults) -> Self {
        Self {
            chat_history: Vec::new(),
            total_message: 0,
            start_time: None,
            selected_persona: defaults.persona,
            selected_model: defaults.model,
            memory_length: defaults.memory_length,
            api_key: defaults.api_key.clone(),
            topic_start: 0,
        }
    }

    /// Drop the conversation and restart the session clock.
    /// Selections and the API key are kept.
    pub fn clear(&mut self) {
        self.chat_history.clear();
        self.start_time = None;
        self.total_message = 0;
        self.topic_start = 0;
    }

    /// Set the start time unless it is already set.
    pub fn record_start(&mut self, now: DateTime<Utc>) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.chat_history.push(message);
    }

    /// Hide everything said so far from the memory window.
    /// The turns stay in history and on the page.
    pub fn new_topic(&mut self) {
        self.topic_start = self.chat_history.len();
    }

    pub fn topic_start(&self) -> usize {
        self.topic_start
    }

    /// Turns replayed into the next model call
    pub fn memory_window(&self) -> &[ChatMessage] {
        let current_topic = &self.chat_history[self.topic_start.min(self.chat_history.len())..];
        memory::window(current_topic, self.memory_length)
    }

    pub fn api_key(&self) -> Option<&ApiKey> {
        self.api_key.as_ref()
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Replace the key. Blank input leaves the current key in place.
    pub fn set_api_key(&mut self, raw: &str) -> bool {
        match ApiKey::new(raw) {
            Some(key) => {
                self.api_key = Some(key);
                true
            }
            None => false,
        }
    }

    /// Statistics, once the session has started
    pub fn stats(&self, now: DateTime<Utc>) -> Option<ChatStats> {
        self.start_time.map(|start| ChatStats {
            messages: self.chat_history.len(),
            duration_secs: (now - start).num_seconds().max(0),
        })
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::init(&ChatDefaults::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn with_messages(n: usize) -> SessionState {
        let mut state = SessionState::default();
        state.record_start(Utc::now());
        for i in 0..n {
            state.append(ChatMessage::new(format!("q{}", i), format!("a{}", i)));
        }
        state
    }

    #[test]
    fn test_init_defaults() {
        let state = SessionState::default();
        assert!(state.chat_history.is_empty());
        assert_eq!(state.total_message, 0);
        assert!(state.start_time.is_none());
        assert_eq!(state.selected_persona, Persona::Default);
        assert_eq!(state.memory_length.get(), 5);
        assert!(!state.has_api_key());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let mut state = with_messages(5);
        state.new_topic();
        state.clear();
        let once = (state.chat_history.clone(), state.start_time, state.topic_start());
        state.clear();
        assert_eq!(once, (state.chat_history.clone(), state.start_time, state.topic_start()));
        assert!(state.chat_history.is_empty());
        assert!(state.start_time.is_none());
        assert!(state.stats(Utc::now()).is_none());
    }

    #[test]
    fn test_clear_keeps_selections_and_key() {
        let mut state = with_messages(2);
        state.selected_persona = Persona::Expert;
        state.set_api_key("gsk_test");
        state.clear();
        assert_eq!(state.selected_persona, Persona::Expert);
        assert!(state.has_api_key());
    }

    #[test]
    fn test_record_start_is_idempotent() {
        let mut state = SessionState::default();
        let first = Utc::now();
        state.record_start(first);
        state.record_start(first + Duration::seconds(30));
        assert_eq!(state.start_time, Some(first));

        state.clear();
        let second = first + Duration::seconds(60);
        state.record_start(second);
        assert_eq!(state.start_time, Some(second));
    }

    #[test]
    fn test_stats_duration_label() {
        let mut state = with_messages(3);
        let start = state.start_time.unwrap();
        let stats = state.stats(start + Duration::seconds(125)).unwrap();
        assert_eq!(stats.messages, 3);
        assert_eq!(stats.duration_label(), "2m 5s");

        state.clear();
        assert!(state.stats(Utc::now()).is_none());
    }

    #[test]
    fn test_memory_window_follows_k() {
        let mut state = with_messages(7);
        state.memory_length = MemoryLength::new(3).unwrap();
        let humans: Vec<_> = state.memory_window().iter().map(|m| m.human.clone()).collect();
        assert_eq!(humans, vec!["q4", "q5", "q6"]);

        state.memory_length = MemoryLength::new(10).unwrap();
        assert_eq!(state.memory_window().len(), 7);
    }

    #[test]
    fn test_new_topic_hides_earlier_turns() {
        let mut state = with_messages(4);
        state.new_topic();
        assert!(state.memory_window().is_empty());
        assert_eq!(state.chat_history.len(), 4);

        state.append(ChatMessage::new("fresh", "start"));
        let window = state.memory_window();
        assert_eq!(window.len(), 1);
        assert_eq!(window[0].human, "fresh");
    }

    #[test]
    fn test_set_api_key_ignores_blank() {
        let mut state = SessionState::default();
        assert!(!state.set_api_key("   "));
        assert!(!state.has_api_key());
        assert!(state.set_api_key("  gsk_abc  "));
        assert_eq!(state.api_key().unwrap().expose(), "gsk_abc");
        assert!(!state.set_api_key(""));
        assert_eq!(state.api_key().unwrap().expose(), "gsk_abc");
    }

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("gsk_secret").unwrap();
        assert!(!format!("{:?}", key).contains("secret"));
    }

    #[test]
    fn test_chat_message_serializes_ai_field() {
        let msg = ChatMessage::new("Hello", "Hi there");
        let json = serde_json::to_string(&msg).unwrap();
        assert_eq!(json, r#"{"human":"Hello","AI":"Hi there"}"#);
    }
}
