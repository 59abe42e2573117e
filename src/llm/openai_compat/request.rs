// src/llm/openai_compat/request.rs
// OpenAI-compatible chat request builder

use crate::llm::Message;
use serde::Serialize;

/// Chat completion request (OpenAI-compatible format)
#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_request_new() {
        let req = ChatRequest::new("test-model", vec![]);
        assert_eq!(req.model, "test-model");
        assert!(req.messages.is_empty());
    }

    #[test]
    fn test_request_body_shape() {
        let req = ChatRequest::new("m", vec![Message::user("hi")]);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
        assert_eq!(json.as_object().unwrap().len(), 2);
    }
}
