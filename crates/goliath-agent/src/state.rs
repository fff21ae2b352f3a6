// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-invocation state machine.
//!
//! ```text
//! Received -> Validated -> Screened -> Blocked
//!                                   -> ContextBuilt -> Dispatched -> Recorded
//!                                                                 -> Failed
//! Received -> Failed   (validation)
//! ```

use goliath_core::GoliathError;
use serde::Serialize;
use strum::Display;
use tracing::debug;

/// States of a single `execute` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "snake_case")]
pub enum ExecutionState {
    Received,
    Validated,
    Screened,
    Blocked,
    ContextBuilt,
    Dispatched,
    Recorded,
    Failed,
}

impl ExecutionState {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ExecutionState::Blocked | ExecutionState::Recorded | ExecutionState::Failed
        )
    }

    /// Whether `self -> next` is an edge of the state machine.
    pub fn can_transition_to(self, next: ExecutionState) -> bool {
        use ExecutionState::*;
        matches!(
            (self, next),
            (Received, Validated)
                | (Received, Failed)
                | (Validated, Screened)
                | (Screened, Blocked)
                | (Screened, ContextBuilt)
                | (ContextBuilt, Dispatched)
                | (Dispatched, Recorded)
                | (Dispatched, Failed)
        )
    }
}

/// Tracks the states one invocation has passed through.
#[derive(Debug, Clone)]
pub(crate) struct Invocation {
    trail: Vec<ExecutionState>,
}

impl Invocation {
    pub(crate) fn new() -> Self {
        Self {
            trail: vec![ExecutionState::Received],
        }
    }

    pub(crate) fn current(&self) -> ExecutionState {
        self.trail
            .last()
            .copied()
            .unwrap_or(ExecutionState::Received)
    }

    pub(crate) fn advance(&mut self, next: ExecutionState) -> Result<(), GoliathError> {
        let current = self.current();
        if !current.can_transition_to(next) {
            return Err(GoliathError::Internal(format!(
                "illegal engine transition {current} -> {next}"
            )));
        }
        debug!(from = %current, to = %next, "engine state");
        self.trail.push(next);
        Ok(())
    }

    pub(crate) fn into_trail(self) -> Vec<ExecutionState> {
        self.trail
    }
}
