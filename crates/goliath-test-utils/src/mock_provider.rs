// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted provider for deterministic testing.
//!
//! `MockProvider` implements `ProviderAdapter` with pre-configured replies
//! and failures, and records every request it receives.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use goliath_core::{
    BackendErrorKind, GoliathError, HealthStatus, PluginAdapter, ProviderAdapter,
    ProviderRequest, ProviderResponse, TokenUsage,
};

/// Registry name reported by the mock.
pub const MOCK_PROVIDER_NAME: &str = "mock";

#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Fail(BackendErrorKind, String),
}

/// A provider that answers from a FIFO script.
///
/// When the script is empty the fallback applies: "mock response", or the
/// configured failure for providers built with [`MockProvider::failing`].
#[derive(Debug, Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<Scripted>>,
    fallback_failure: Option<(BackendErrorKind, String)>,
    delay: Option<Duration>,
    requests: Mutex<Vec<ProviderRequest>>,
    calls: AtomicUsize,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock provider pre-loaded with the given replies.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            script: Mutex::new(responses.into_iter().map(Scripted::Reply).collect()),
            ..Self::default()
        }
    }

    /// A provider whose every call fails with `kind`.
    pub fn failing(kind: BackendErrorKind) -> Self {
        Self::failing_with(kind, "simulated failure")
    }

    pub fn failing_with(kind: BackendErrorKind, message: impl Into<String>) -> Self {
        Self {
            fallback_failure: Some((kind, message.into())),
            ..Self::default()
        }
    }

    /// Sleep before answering, to exercise deadlines.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn add_response(&self, text: impl Into<String>) {
        self.lock_script().push_back(Scripted::Reply(text.into()));
    }

    /// Queue a single failure ahead of later replies.
    pub fn add_failure(&self, kind: BackendErrorKind, message: impl Into<String>) {
        self.lock_script()
            .push_back(Scripted::Fail(kind, message.into()));
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every request received, oldest first.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn last_request(&self) -> Option<ProviderRequest> {
        self.requests().pop()
    }

    fn lock_script(&self) -> std::sync::MutexGuard<'_, VecDeque<Scripted>> {
        self.script.lock().unwrap_or_else(|p| p.into_inner())
    }

    fn next(&self) -> Scripted {
        if let Some(step) = self.lock_script().pop_front() {
            return step;
        }
        match &self.fallback_failure {
            Some((kind, message)) => Scripted::Fail(*kind, message.clone()),
            None => Scripted::Reply("mock response".to_string()),
        }
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        MOCK_PROVIDER_NAME
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, GoliathError> {
        Ok(match &self.fallback_failure {
            Some((kind, _)) => HealthStatus::Unhealthy(kind.describe().to_string()),
            None => HealthStatus::Healthy,
        })
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn run(&self, request: ProviderRequest) -> Result<ProviderResponse, GoliathError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(request.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.next() {
            Scripted::Reply(text) => Ok(ProviderResponse {
                usage: Some(TokenUsage {
                    input_tokens: request.prompt.chars().count() as u32,
                    output_tokens: text.chars().count() as u32,
                }),
                text,
                provider: MOCK_PROVIDER_NAME.to_string(),
                model: "mock-model".to_string(),
            }),
            Scripted::Fail(kind, message) => {
                Err(GoliathError::backend(MOCK_PROVIDER_NAME, kind, message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ProviderRequest {
        ProviderRequest::new("hi", Duration::from_secs(1))
    }

    #[tokio::test]
    async fn replies_in_order_then_default() {
        let mock = MockProvider::with_responses(vec!["one".into(), "two".into()]);
        assert_eq!(mock.run(request()).await.unwrap().text, "one");
        assert_eq!(mock.run(request()).await.unwrap().text, "two");
        assert_eq!(mock.run(request()).await.unwrap().text, "mock response");
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn queued_failure_then_recovery() {
        let mock = MockProvider::new();
        mock.add_failure(BackendErrorKind::RateLimit, "slow down");
        mock.add_response("ok");

        let err = mock.run(request()).await.unwrap_err();
        assert_eq!(err.backend_kind(), Some(BackendErrorKind::RateLimit));
        assert_eq!(mock.run(request()).await.unwrap().text, "ok");
    }

    #[tokio::test]
    async fn failing_provider_always_fails() {
        let mock = MockProvider::failing(BackendErrorKind::AuthError);
        for _ in 0..2 {
            let err = mock.run(request()).await.unwrap_err();
            assert_eq!(err.backend_kind(), Some(BackendErrorKind::AuthError));
        }
        assert!(matches!(
            mock.health_check().await.unwrap(),
            HealthStatus::Unhealthy(_)
        ));
    }

    #[tokio::test]
    async fn captures_requests() {
        let mock = MockProvider::new();
        mock.run(request().with_system_prompt("sys")).await.unwrap();
        let last = mock.last_request().unwrap();
        assert_eq!(last.prompt, "hi");
        assert_eq!(last.system_prompt.as_deref(), Some("sys"));
        assert_eq!(mock.requests().len(), 1);
    }
}
