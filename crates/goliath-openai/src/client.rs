// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for OpenAI-compatible chat completions endpoints.
//!
//! [`ChatClient`] builds requests, attaches bearer auth, retries transient
//! failures, and maps every failure onto a [`BackendErrorKind`]. Upstream
//! response bodies never reach the returned error; only the parsed
//! `error.message` does, after redaction.

use std::time::Duration;

use goliath_core::{BackendErrorKind, GoliathError};
use goliath_security::redact;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

/// Longest upstream error message carried into a [`GoliathError`].
const MAX_ERROR_MESSAGE_CHARS: usize = 200;

#[derive(Debug, Clone)]
pub struct ChatClient {
    provider: String,
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
}

impl ChatClient {
    /// Creates a client for `provider` talking to `base_url`.
    ///
    /// `api_key` is `None` for keyless endpoints such as a local Ollama.
    pub fn new(
        provider: impl Into<String>,
        client: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
        max_retries: u32,
    ) -> Self {
        Self {
            provider: provider.into(),
            client,
            api_key: api_key.map(SecretString::from),
            base_url: base_url.trim_end_matches('/').to_string(),
            max_retries,
            retry_delay: Duration::from_secs(1),
        }
    }

    /// Overrides the pause between retry attempts.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.bearer_auth(key.expose_secret()),
            None => builder,
        }
    }

    fn secrets(&self) -> Vec<String> {
        self.api_key
            .iter()
            .map(|k| k.expose_secret().to_string())
            .collect()
    }

    /// Sends a chat completion request.
    ///
    /// Retries up to `max_retries` times on 429, 500, 502, 503 and 529, and
    /// on connection failures.
    pub async fn chat(
        &self,
        request: &ChatRequest,
        timeout: Duration,
    ) -> Result<ChatResponse, GoliathError> {
        let url = format!("{}/chat/completions", self.base_url);
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(
                    provider = %self.provider,
                    attempt,
                    "retrying chat request after transient error"
                );
                tokio::time::sleep(self.retry_delay).await;
            }

            let sent = self
                .authorize(self.client.post(&url))
                .timeout(timeout)
                .json(request)
                .send()
                .await;

            let response = match sent {
                Ok(response) => response,
                Err(e) => {
                    let err = self.transport_error(&e);
                    if e.is_connect() && attempt < self.max_retries {
                        last_error = Some(err);
                        continue;
                    }
                    return Err(err);
                }
            };

            let status = response.status();
            debug!(provider = %self.provider, status = %status, attempt, "chat response received");

            if status.is_success() {
                let body = response
                    .text()
                    .await
                    .map_err(|e| self.transport_error(&e))?;
                return serde_json::from_str::<ChatResponse>(&body).map_err(|e| {
                    debug!(provider = %self.provider, error = %e, "unparseable chat response");
                    self.error(
                        BackendErrorKind::InvalidResponse,
                        "response body was not a chat completion",
                    )
                });
            }

            let body = response.text().await.unwrap_or_default();
            debug!(
                provider = %self.provider,
                status = %status,
                body = %body,
                "chat request failed"
            );
            let err = self.status_error(status, &body);

            if is_transient_error(status) && attempt < self.max_retries {
                last_error = Some(err);
                continue;
            }
            return Err(err);
        }

        Err(last_error.unwrap_or_else(|| {
            self.error(
                BackendErrorKind::NetworkError,
                "chat request failed after retries",
            )
        }))
    }

    /// Probes `GET {base_url}/models` without spending tokens.
    pub async fn ping(&self, timeout: Duration) -> Result<reqwest::StatusCode, GoliathError> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .authorize(self.client.get(&url))
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| self.transport_error(&e))?;
        Ok(response.status())
    }

    fn error(&self, kind: BackendErrorKind, message: impl Into<String>) -> GoliathError {
        GoliathError::backend(&self.provider, kind, message)
    }

    fn transport_error(&self, e: &reqwest::Error) -> GoliathError {
        debug!(provider = %self.provider, error = %e, "transport failure");
        if e.is_timeout() {
            self.error(BackendErrorKind::Timeout, "request timed out")
        } else if e.is_decode() || e.is_body() {
            self.error(
                BackendErrorKind::InvalidResponse,
                "response body could not be read",
            )
        } else {
            self.error(BackendErrorKind::NetworkError, "connection failed")
        }
    }

    fn status_error(&self, status: reqwest::StatusCode, body: &str) -> GoliathError {
        let detail = serde_json::from_str::<ApiErrorResponse>(body)
            .ok()
            .map(|e| e.error.message)
            .filter(|m| !m.trim().is_empty())
            .map(|m| truncate(&redact(&m, &self.secrets()), MAX_ERROR_MESSAGE_CHARS));

        let message = match detail {
            Some(detail) => format!("HTTP {}: {detail}", status.as_u16()),
            None => format!("HTTP {}", status.as_u16()),
        };
        self.error(status_kind(status), message)
    }
}

/// Maps an HTTP status onto the uniform failure taxonomy.
pub(crate) fn status_kind(status: reqwest::StatusCode) -> BackendErrorKind {
    match status.as_u16() {
        401 | 403 => BackendErrorKind::AuthError,
        429 => BackendErrorKind::RateLimit,
        408 | 504 => BackendErrorKind::Timeout,
        500..=599 => BackendErrorKind::NetworkError,
        _ => BackendErrorKind::InvalidResponse,
    }
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 502 | 503 | 529)
}

fn truncate(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const KEY: &str = "sk-test0123456789abcdefghijklmnop";

    fn test_client(base_url: &str, key: Option<&str>) -> ChatClient {
        ChatClient::new(
            "grok",
            reqwest::Client::new(),
            base_url,
            key.map(str::to_string),
            1,
        )
        .with_retry_delay(Duration::ZERO)
    }

    fn test_request() -> ChatRequest {
        ChatRequest {
            model: "grok-3-latest".into(),
            messages: vec![ChatMessage::user("What is 2+2?")],
            max_tokens: 64,
            temperature: 0.0,
        }
    }

    fn completion(text: &str) -> serde_json::Value {
        serde_json::json!({
            "model": "grok-3-latest",
            "choices": [{"message": {"role": "assistant", "content": text}}],
            "usage": {"prompt_tokens": 5, "completion_tokens": 1}
        })
    }

    async fn run(server: &MockServer, key: Option<&str>) -> Result<ChatResponse, GoliathError> {
        test_client(&server.uri(), key)
            .chat(&test_request(), Duration::from_secs(5))
            .await
    }

    #[tokio::test]
    async fn chat_success_with_bearer_auth() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", format!("Bearer {KEY}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("4")))
            .mount(&server)
            .await;

        let resp = run(&server, Some(KEY)).await.unwrap();
        assert_eq!(resp.choices[0].message.content.as_deref(), Some("4"));
    }

    #[tokio::test]
    async fn trailing_slash_in_base_url_is_ignored() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("ok")))
            .mount(&server)
            .await;

        let client = test_client(&format!("{}/v1/", server.uri()), None);
        assert_eq!(client.base_url(), format!("{}/v1", server.uri()));
        let resp = client
            .chat(&test_request(), Duration::from_secs(5))
            .await
            .unwrap();
        assert_eq!(resp.choices.len(), 1);
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
                "error": {"message": "Incorrect API key provided", "type": "invalid_request_error"}
            })))
            .mount(&server)
            .await;

        let err = run(&server, Some(KEY)).await.unwrap_err();
        assert_eq!(err.backend_kind(), Some(BackendErrorKind::AuthError));
        assert!(err.to_string().contains("Incorrect API key provided"));
    }

    #[tokio::test]
    async fn rate_limit_retries_then_succeeds() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion("after retry")))
            .mount(&server)
            .await;

        let resp = run(&server, Some(KEY)).await.unwrap();
        assert_eq!(
            resp.choices[0].message.content.as_deref(),
            Some("after retry")
        );
    }

    #[tokio::test]
    async fn persistent_503_exhausts_retries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(503))
            .expect(2)
            .mount(&server)
            .await;

        let err = run(&server, Some(KEY)).await.unwrap_err();
        assert_eq!(err.backend_kind(), Some(BackendErrorKind::NetworkError));
        assert!(err.to_string().contains("HTTP 503"));
    }

    #[tokio::test]
    async fn bad_request_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("<html>oops</html>"))
            .expect(1)
            .mount(&server)
            .await;

        let err = run(&server, Some(KEY)).await.unwrap_err();
        assert_eq!(err.backend_kind(), Some(BackendErrorKind::InvalidResponse));
        assert!(!err.to_string().contains("oops"), "raw body leaked: {err}");
    }

    #[tokio::test]
    async fn echoed_key_is_redacted_from_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_json(serde_json::json!({
                "error": {"message": format!("key {KEY} is revoked")}
            })))
            .mount(&server)
            .await;

        let err = run(&server, Some(KEY)).await.unwrap_err().to_string();
        assert!(!err.contains(KEY), "key leaked: {err}");
        assert!(err.contains("[REDACTED]"));
    }

    #[tokio::test]
    async fn malformed_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = run(&server, None).await.unwrap_err();
        assert_eq!(err.backend_kind(), Some(BackendErrorKind::InvalidResponse));
        assert!(!err.to_string().contains("not json"));
    }

    #[tokio::test]
    async fn slow_upstream_maps_to_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(completion("late"))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let err = test_client(&server.uri(), None)
            .chat(&test_request(), Duration::from_millis(50))
            .await
            .unwrap_err();
        assert_eq!(err.backend_kind(), Some(BackendErrorKind::Timeout));
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_network_error() {
        let err = test_client("http://127.0.0.1:9", None)
            .chat(&test_request(), Duration::from_secs(2))
            .await
            .unwrap_err();
        assert_eq!(err.backend_kind(), Some(BackendErrorKind::NetworkError));
    }

    #[test]
    fn status_mapping() {
        use reqwest::StatusCode;
        assert_eq!(status_kind(StatusCode::FORBIDDEN), BackendErrorKind::AuthError);
        assert_eq!(
            status_kind(StatusCode::TOO_MANY_REQUESTS),
            BackendErrorKind::RateLimit
        );
        assert_eq!(
            status_kind(StatusCode::BAD_GATEWAY),
            BackendErrorKind::NetworkError
        );
        assert_eq!(
            status_kind(StatusCode::GATEWAY_TIMEOUT),
            BackendErrorKind::Timeout
        );
        assert_eq!(
            status_kind(StatusCode::NOT_FOUND),
            BackendErrorKind::InvalidResponse
        );
    }

    #[test]
    fn truncate_respects_char_boundaries() {
        assert_eq!(truncate("héllo", 2), "hé...");
        assert_eq!(truncate("short", 10), "short");
    }
}
