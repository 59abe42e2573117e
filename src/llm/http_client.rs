// src/llm/http_client.rs
// Shared HTTP client for the completion API. Single attempt per call.

use crate::error::CompletionFailure;
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// Default request timeout
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 300;
/// Default connect timeout
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 30;

/// HTTP client wrapper that maps transport and status failures to
/// [`CompletionFailure`]
#[derive(Clone)]
pub struct LlmHttpClient {
    client: Client,
    pub request_timeout: Duration,
    pub connect_timeout: Duration,
}

impl LlmHttpClient {
    pub fn new(request_timeout: Duration, connect_timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(request_timeout)
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            request_timeout,
            connect_timeout,
        }
    }

    /// POST a JSON body with Bearer auth and return the response text.
    pub async fn execute(
        &self,
        request_id: &str,
        url: &str,
        api_key: &str,
        body: String,
    ) -> Result<String, CompletionFailure> {
        let response = self
            .client
            .post(url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| {
                warn!(request_id = %request_id, error = %e, "Request failed");
                CompletionFailure::network(format!("Request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            warn!(
                request_id = %request_id,
                status = %status,
                error = %error_body,
                "API returned an error"
            );
            return Err(CompletionFailure::from_status(status.as_u16(), &error_body));
        }

        response
            .text()
            .await
            .map_err(|e| CompletionFailure::network(format!("Failed to read response: {}", e)))
    }
}

impl Default for LlmHttpClient {
    fn default() -> Self {
        Self::new(
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureReason;

    #[test]
    fn test_client_creation() {
        let client = LlmHttpClient::new(Duration::from_secs(10), Duration::from_secs(5));
        assert_eq!(client.request_timeout, Duration::from_secs(10));
        assert_eq!(client.connect_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_default_timeouts() {
        let client = LlmHttpClient::default();
        assert_eq!(
            client.request_timeout,
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)
        );
        assert_eq!(
            client.connect_timeout,
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
        );
    }

    #[tokio::test]
    async fn test_connection_refused_is_network_failure() {
        let client = LlmHttpClient::new(Duration::from_millis(500), Duration::from_millis(200));
        let err = client
            .execute("test", "http://127.0.0.1:1", "key", "{}".into())
            .await
            .unwrap_err();
        assert_eq!(err.reason, FailureReason::Network);
    }
}
