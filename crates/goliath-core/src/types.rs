// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Goliath workspace.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{BackendErrorKind, GoliathError};

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Author of a conversation turn.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One role-tagged message in conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
    /// When the turn was recorded. Files written before timestamps existed
    /// load with the Unix epoch.
    #[serde(default)]
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    /// Creates a turn stamped with the current time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// A single dispatch to a backend provider.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderRequest {
    /// Fully assembled prompt (facts, history, then the live task).
    pub prompt: String,
    /// System instructions, sent separately when the backend supports it.
    pub system_prompt: Option<String>,
    /// Deadline for the whole call, retries included.
    pub timeout: Duration,
}

impl ProviderRequest {
    pub fn new(prompt: impl Into<String>, timeout: Duration) -> Self {
        Self {
            prompt: prompt.into(),
            system_prompt: None,
            timeout,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(system_prompt.into());
        self
    }
}

/// Token accounting reported by the backend, when available.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

/// Successful provider answer.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub text: String,
    pub provider: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

/// Kind and sanitized message of a failed dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub kind: BackendErrorKind,
    pub message: String,
}

/// Outcome of one engine dispatch, success or failure.
///
/// Only `text` survives the invocation; it is folded into the assistant turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResult {
    pub text: String,
    pub provider_name: String,
    pub error: Option<ErrorInfo>,
}

impl BackendResult {
    /// Folds a provider outcome into a result. Non-backend errors are
    /// reported as `INVALID_RESPONSE`.
    pub fn from_outcome(
        provider_name: &str,
        outcome: Result<ProviderResponse, GoliathError>,
    ) -> Self {
        match outcome {
            Ok(response) => Self {
                text: response.text,
                provider_name: provider_name.to_string(),
                error: None,
            },
            Err(err) => {
                let (kind, message) = match err {
                    GoliathError::Backend { kind, message, .. } => (kind, message),
                    other => (BackendErrorKind::InvalidResponse, other.to_string()),
                };
                Self {
                    text: String::new(),
                    provider_name: provider_name.to_string(),
                    error: Some(ErrorInfo { kind, message }),
                }
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn legacy_turn_without_timestamp_loads_with_epoch() {
        let turn: ConversationTurn =
            serde_json::from_str(r#"{"role":"user","content":"hi"}"#).unwrap();
        assert_eq!(turn.role, Role::User);
        assert_eq!(turn.content, "hi");
        assert_eq!(turn.timestamp.timestamp(), 0);
    }

    #[test]
    fn turn_round_trips_through_json() {
        let turn = ConversationTurn::assistant("Here's a summary.");
        let json = serde_json::to_string(&turn).unwrap();
        let back: ConversationTurn = serde_json::from_str(&json).unwrap();
        assert_eq!(turn, back);
    }

    #[test]
    fn backend_result_from_success() {
        let result = BackendResult::from_outcome(
            "grok",
            Ok(ProviderResponse {
                text: "done".into(),
                provider: "grok".into(),
                model: "grok-3-latest".into(),
                usage: None,
            }),
        );
        assert!(result.is_ok());
        assert_eq!(result.text, "done");
        assert_eq!(result.provider_name, "grok");
    }

    #[test]
    fn backend_result_keeps_backend_kind() {
        let result = BackendResult::from_outcome(
            "openai",
            Err(GoliathError::backend(
                "openai",
                BackendErrorKind::RateLimit,
                "slow down",
            )),
        );
        let info = result.error.unwrap();
        assert_eq!(info.kind, BackendErrorKind::RateLimit);
        assert_eq!(info.message, "slow down");
    }

    #[test]
    fn backend_result_maps_other_errors_to_invalid_response() {
        let result =
            BackendResult::from_outcome("openai", Err(GoliathError::Internal("boom".into())));
        assert_eq!(
            result.error.unwrap().kind,
            BackendErrorKind::InvalidResponse
        );
    }
}
