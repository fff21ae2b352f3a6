// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Goliath task runner.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use thiserror::Error;

/// Uniform failure taxonomy every provider maps its transport errors into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BackendErrorKind {
    /// Credentials missing, invalid or rejected (HTTP 401/403).
    AuthError,
    /// Upstream throttling (HTTP 429).
    RateLimit,
    /// Connection failure or upstream 5xx.
    NetworkError,
    /// Malformed or unexpected payload.
    InvalidResponse,
    /// Dispatch exceeded its deadline.
    Timeout,
}

impl BackendErrorKind {
    /// Short human-readable description used in user-facing error text.
    pub fn describe(self) -> &'static str {
        match self {
            Self::AuthError => "authentication with the provider failed",
            Self::RateLimit => "the provider is rate limiting requests",
            Self::NetworkError => "the provider could not be reached",
            Self::InvalidResponse => "the provider returned an unexpected response",
            Self::Timeout => "the provider did not answer in time",
        }
    }
}

/// The primary error type used across all Goliath crates.
#[derive(Debug, Error)]
pub enum GoliathError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Input violates a length or shape bound.
    #[error("{message}")]
    Validation { message: String },

    /// The persisted memory file exists but cannot be parsed.
    #[error("memory file {path} is corrupt: {message}")]
    StoreCorruption { path: String, message: String },

    /// Filesystem or serialization failure while persisting state.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A backend provider failed; `kind` is the uniform taxonomy.
    #[error("provider {provider} failed ({kind}): {message}")]
    Backend {
        provider: String,
        kind: BackendErrorKind,
        message: String,
    },

    /// Requested provider was not found in the registry.
    #[error("provider not found: {name}")]
    AdapterNotFound { name: String },

    /// Security policy violation (insecure URL, bad credential header).
    #[error("security error: {0}")]
    Security(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl GoliathError {
    /// Shorthand for a validation failure.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a backend failure.
    pub fn backend(
        provider: impl Into<String>,
        kind: BackendErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self::Backend {
            provider: provider.into(),
            kind,
            message: message.into(),
        }
    }

    /// Returns the backend error kind, if this is a backend failure.
    pub fn backend_kind(&self) -> Option<BackendErrorKind> {
        match self {
            Self::Backend { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GoliathError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            source: Box::new(err),
        }
    }
}
