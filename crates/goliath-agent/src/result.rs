// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outcome of one engine invocation.

use goliath_core::BackendErrorKind;
use goliath_moderation::ModerationCategory;
use serde::Serialize;
use strum::{Display, EnumString};

use crate::state::ExecutionState;

/// Prefix of every ERROR result text.
pub const ERROR_MARKER: &str = "[ERROR]";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum EngineStatus {
    Ok,
    Blocked,
    Error,
}

/// Why an invocation ended in ERROR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailureKind {
    /// The task violated a length or shape bound.
    Validation,
    /// The provider failed.
    Backend(BackendErrorKind),
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FailureKind::Validation => write!(f, "VALIDATION_ERROR"),
            FailureKind::Backend(kind) => write!(f, "{kind}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngineResult {
    pub status: EngineStatus,
    /// Answer, block message, or sanitized error text.
    pub text: String,
    /// Set for BLOCKED results.
    pub category: Option<ModerationCategory>,
    /// Set for ERROR results.
    pub failure: Option<FailureKind>,
    /// Provider the engine is bound to.
    pub provider: String,
    /// States passed through, `Received` first.
    pub trail: Vec<ExecutionState>,
}

impl EngineResult {
    pub(crate) fn ok(text: String, provider: &str, trail: Vec<ExecutionState>) -> Self {
        Self {
            status: EngineStatus::Ok,
            text,
            category: None,
            failure: None,
            provider: provider.to_string(),
            trail,
        }
    }

    pub(crate) fn blocked(
        category: ModerationCategory,
        provider: &str,
        trail: Vec<ExecutionState>,
    ) -> Self {
        Self {
            status: EngineStatus::Blocked,
            text: category.blocked_message(),
            category: Some(category),
            failure: None,
            provider: provider.to_string(),
            trail,
        }
    }

    pub(crate) fn error(
        failure: FailureKind,
        message: &str,
        provider: &str,
        trail: Vec<ExecutionState>,
    ) -> Self {
        Self {
            status: EngineStatus::Error,
            text: format!("{ERROR_MARKER} {message}"),
            category: None,
            failure: Some(failure),
            provider: provider.to_string(),
            trail,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == EngineStatus::Ok
    }

    /// The terminal state of the invocation.
    pub fn final_state(&self) -> ExecutionState {
        self.trail
            .last()
            .copied()
            .unwrap_or(ExecutionState::Received)
    }

    /// The backend error kind, for ERROR results caused by the provider.
    pub fn backend_kind(&self) -> Option<BackendErrorKind> {
        match self.failure {
            Some(FailureKind::Backend(kind)) => Some(kind),
            _ => None,
        }
    }
}
