// tests/groq_client.rs
// Groq client against a local mock endpoint: request shape and failure classes


use axum::http::StatusCode;
use groq_chat::error::FailureReason;
use groq_chat::llm::{GroqClient, GroqClientFactory, LlmClient, LlmHttpClient, Message, Model};
use groq_chat::session::ApiKey;
use std::time::Duration;
use test_helpers::{completion_body, spawn_mock_groq};

fn client(base_url: &str, model: Model) -> GroqClient {
    GroqClient::with_http_client(
        ApiKey::new("gsk_test").unwrap(),
        model,
        base_url,
        LlmHttpClient::new(Duration::from_secs(5), Duration::from_secs(2)),
    )
}

#[tokio::test]
async fn test_successful_completion() {
    let (base_url, captured) = spawn_mock_groq(StatusCode::OK, completion_body("Hi there")).await;
    let client = client(&base_url, Model::Llama3_70b);

    let result = client.chat(vec![Message::user("Hello")]).await.unwrap();

    assert_eq!(result.content.as_deref(), Some("Hi there"));
    assert_eq!(result.usage.unwrap().total_tokens, 15);
    assert!(!result.request_id.is_empty());

    let requests = captured.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer gsk_test"));
    assert_eq!(requests[0].body["model"], "llama3-70b-8192");
    assert_eq!(requests[0].body["messages"][0]["role"], "user");
    assert_eq!(requests[0].body["messages"][0]["content"], "Hello");
}

#[tokio::test]
async fn test_unauthorized_is_auth_failure() {
    let (base_url, _) = spawn_mock_groq(
        StatusCode::UNAUTHORIZED,
        r#"{"error":{"message":"Invalid API Key"}}"#,
    )
    .await;

    let err = client(&base_url, Model::default())
        .chat(vec![Message::user("Hello")])
        .await
        .unwrap_err();

    assert_eq!(err.reason, FailureReason::Auth);
    assert!(err.message.contains("401"));
    assert!(err.message.contains("Invalid API Key"));
}

#[tokio::test]
async fn test_rate_limit_is_quota_failure() {
    let (base_url, _) =
        spawn_mock_groq(StatusCode::TOO_MANY_REQUESTS, r#"{"error":"rate limited"}"#).await;

    let err = client(&base_url, Model::default())
        .chat(vec![Message::user("Hello")])
        .await
        .unwrap_err();

    assert_eq!(err.reason, FailureReason::Quota);
}

#[tokio::test]
async fn test_server_error_is_unknown_failure() {
    let (base_url, _) = spawn_mock_groq(StatusCode::INTERNAL_SERVER_ERROR, "boom").await;

    let err = client(&base_url, Model::default())
        .chat(vec![Message::user("Hello")])
        .await
        .unwrap_err();

    assert_eq!(err.reason, FailureReason::Unknown);
}

#[tokio::test]
async fn test_garbage_body_is_malformed() {
    let (base_url, _) = spawn_mock_groq(StatusCode::OK, "not json at all").await;

    let err = client(&base_url, Model::default())
        .chat(vec![Message::user("Hello")])
        .await
        .unwrap_err();

    assert_eq!(err.reason, FailureReason::Malformed);
}

#[tokio::test]
async fn test_unreachable_host_is_network_failure() {
    // Bind then drop to get a port nothing listens on
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/openai/v1", addr), Model::default())
        .chat(vec![Message::user("Hello")])
        .await
        .unwrap_err();

    assert_eq!(err.reason, FailureReason::Network);
}

#[tokio::test]
async fn test_factory_builds_client_for_model() {
    use groq_chat::llm::ClientFactory;

    let (base_url, captured) = spawn_mock_groq(StatusCode::OK, completion_body("ok")).await;
    let factory = GroqClientFactory::new(
        base_url,
        LlmHttpClient::new(Duration::from_secs(5), Duration::from_secs(2)),
    );

    let client = factory.build(&ApiKey::new("gsk_other").unwrap(), Model::Llama3_8b);
    assert_eq!(client.model_name(), "llama3-8b-8192");
    client.chat(vec![Message::user("ping")]).await.unwrap();

    let requests = captured.lock().unwrap();
    assert_eq!(requests[0].authorization.as_deref(), Some("Bearer gsk_other"));
    assert_eq!(requests[0].body["model"], "llama3-8b-8192");
}
