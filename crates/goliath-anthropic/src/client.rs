// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the Anthropic Messages API.
//!
//! Provides [`AnthropicClient`] which handles request construction,
//! authentication, and transient error retry.

use std::time::Duration;

use goliath_core::{BackendErrorKind, GoliathError};
use goliath_security::redact;
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, MessageRequest, MessageResponse};

/// Anthropic API version header value.
pub const API_VERSION: &str = "2023-06-01";

const PROVIDER: &str = "claude";

/// HTTP client for Anthropic API communication.
///
/// Manages authentication headers and retry logic for transient errors
/// (429, 500, 502, 503, 529).
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl AnthropicClient {
    pub fn new(
        client: reqwest::Client,
        base_url: &str,
        api_key: String,
        max_retries: u32,
    ) -> Result<Self, GoliathError> {
        // Reject keys that cannot travel as a header before the first request.
        HeaderValue::from_str(&api_key)
            .map_err(|_| GoliathError::Config("API key is not a valid header value".into()))?;

        Ok(Self {
            client,
            api_key: SecretString::from(api_key),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
            retry_delay: Duration::from_secs(1),
        })
    }

    /// Overrides the pause between retry attempts (for testing with wiremock).
    #[cfg(test)]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    fn headers(&self) -> Result<HeaderMap, GoliathError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(self.api_key.expose_secret())
            .map_err(|_| GoliathError::Config("API key is not a valid header value".into()))?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);
        headers.insert("anthropic-version", HeaderValue::from_static(API_VERSION));
        Ok(headers)
    }

    /// Sends a non-streaming request and returns the full response.
    pub async fn complete_message(
        &self,
        request: &MessageRequest,
        timeout: Duration,
    ) -> Result<MessageResponse, GoliathError> {
        let url = format!("{}/v1/messages", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(self.retry_delay).await;
            }

            let sent = self
                .client
                .post(&url)
                .headers(self.headers()?)
                .timeout(timeout)
                .json(request)
                .send()
                .await;

            let response = match sent {
                Ok(response) => response,
                Err(e) => {
                    let err = transport_error(&e);
                    if e.is_connect() && attempt < self.max_retries {
                        last_error = Some(err);
                        continue;
                    }
                    return Err(err);
                }
            };

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| transport_error(&e))?;
                return serde_json::from_str::<MessageResponse>(&body).map_err(|e| {
                    debug!(error = %e, "unparseable messages response");
                    GoliathError::backend(
                        PROVIDER,
                        BackendErrorKind::InvalidResponse,
                        "response body was not a message",
                    )
                });
            }

            let body = response.text().await.unwrap_or_default();
            debug!(status = %status, body = %body, "completion request failed");
            let err = self.status_error(status, &body);

            if is_transient_error(status) && attempt < self.max_retries {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        Err(last_error.unwrap_or_else(|| {
            GoliathError::backend(
                PROVIDER,
                BackendErrorKind::NetworkError,
                "completion request failed after retries",
            )
        }))
    }

    /// Probes `GET {base_url}/v1/models` without spending tokens.
    pub async fn ping(&self, timeout: Duration) -> Result<reqwest::StatusCode, GoliathError> {
        let response = self
            .client
            .get(format!("{}/v1/models", self.base_url))
            .headers(self.headers()?)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| transport_error(&e))?;
        Ok(response.status())
    }

    fn status_error(&self, status: reqwest::StatusCode, body: &str) -> GoliathError {
        let secrets = [self.api_key.expose_secret().to_string()];
        let message = match serde_json::from_str::<ApiErrorResponse>(body) {
            Ok(api_err) if !api_err.error.message.is_empty() => format!(
                "HTTP {} {}: {}",
                status.as_u16(),
                api_err.error.type_,
                redact(&api_err.error.message, &secrets)
            ),
            _ => format!("HTTP {}", status.as_u16()),
        };
        GoliathError::backend(PROVIDER, status_kind(status), message)
    }
}

fn transport_error(e: &reqwest::Error) -> GoliathError {
    debug!(error = %e, "transport failure");
    let (kind, message) = if e.is_timeout() {
        (BackendErrorKind::Timeout, "request timed out")
    } else if e.is_decode() || e.is_body() {
        (
            BackendErrorKind::InvalidResponse,
            "response body could not be read",
        )
    } else {
        (BackendErrorKind::NetworkError, "connection failed")
    };
    GoliathError::backend(PROVIDER, kind, message)
}

fn status_kind(status: reqwest::StatusCode) -> BackendErrorKind {
    match status.as_u16() {
        401 | 403 => BackendErrorKind::AuthError,
        429 => BackendErrorKind::RateLimit,
        408 | 504 => BackendErrorKind::Timeout,
        // 529 is Anthropic's "overloaded".
        500..=599 => BackendErrorKind::NetworkError,
        _ => BackendErrorKind::InvalidResponse,
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 529)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ApiMessage;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> AnthropicClient {
        AnthropicClient::new(reqwest::Client::new(), base_url, "test-api-key".into(), 1)
            .unwrap()
            .with_retry_delay(Duration::ZERO)
    }

    fn test_request() -> MessageRequest {
        MessageRequest {
            model: "claude-sonnet-4-5-20250929".into(),
            messages: vec![ApiMessage {
                role: "user".into(),
                content: "Hello".into(),
            }],
            system: Some("You are GOLIATH.".into()),
            max_tokens: 1024,
            temperature: 0.7,
        }
    }

    fn message(text: &str) -> serde_json::Value {
        serde_json::json!({
            "id": "msg_test",
            "type": "message",
            "role": "assistant",
            "content": [{"type": "text", "text": text}],
            "model": "claude-sonnet-4-5-20250929",
            "stop_reason": "end_turn",
            "usage": {"input_tokens": 10, "output_tokens": 5}
        })
    }

    async fn complete(server: &MockServer) -> Result<MessageResponse, GoliathError> {
        test_client(&server.uri())
            .complete_message(&test_request(), Duration::from_secs(5))
            .await
    }

    #[tokio::test]
    async fn client_sends_correct_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "test-api-key"))
            .and(header("anthropic-version", API_VERSION))
            .respond_with(ResponseTemplate::new(200).set_body_json(message("ok")))
            .mount(&server)
            .await;

        let result = complete(&server).await;
        assert!(result.is_ok(), "headers should match: {result:?}");
    }

    #[tokio::test]
    async fn complete_message_retries_on_529() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "overloaded_error", "message": "Overloaded"}
            })))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(message("After retry")))
            .mount(&server)
            .await;

        let result = complete(&server).await.unwrap();
        assert_eq!(result.usage.unwrap().output_tokens, 5);
    }

    #[tokio::test]
    async fn complete_message_fails_on_400() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "invalid_request_error", "message": "Bad model"}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let err = complete(&server).await.unwrap_err();
        assert_eq!(err.backend_kind(), Some(BackendErrorKind::InvalidResponse));
        assert!(err.to_string().contains("invalid_request_error"), "got: {err}");
    }

    #[tokio::test]
    async fn authentication_error_is_classified() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "type": "error",
                "error": {"type": "authentication_error", "message": "invalid x-api-key"}
            })))
            .mount(&server)
            .await;

        let err = complete(&server).await.unwrap_err();
        assert_eq!(err.backend_kind(), Some(BackendErrorKind::AuthError));
    }

    #[tokio::test]
    async fn exhausted_retries_do_not_leak_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503).set_body_string("upstream trace: panic at x.rs:12"),
            )
            .expect(2)
            .mount(&server)
            .await;

        let err = complete(&server).await.unwrap_err();
        assert_eq!(err.backend_kind(), Some(BackendErrorKind::NetworkError));
        assert!(!err.to_string().contains("panic"), "body leaked: {err}");
    }

    #[test]
    fn invalid_header_key_is_rejected() {
        let err = AnthropicClient::new(
            reqwest::Client::new(),
            "https://api.anthropic.com",
            "bad\nkey".into(),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, GoliathError::Config(_)));
        assert!(!err.to_string().contains("bad"));
    }
}
