// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The persisted memory document.

use std::collections::{BTreeMap, VecDeque};

use goliath_core::ConversationTurn;
use serde::{Deserialize, Serialize};

/// Aggregate persisted as a single JSON document.
///
/// Unknown top-level fields written by newer versions are kept in `extra`
/// and written back unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryState {
    #[serde(default)]
    pub history: VecDeque<ConversationTurn>,
    #[serde(default)]
    pub facts: BTreeMap<String, String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MemoryState {
    /// Drops the oldest turns until at most `cap` remain.
    pub fn enforce_history_cap(&mut self, cap: usize) {
        while self.history.len() > cap {
            self.history.pop_front();
        }
    }

    /// The most recent `n` turns, oldest first.
    pub fn recent_turns(&self, n: usize) -> Vec<ConversationTurn> {
        let skip = self.history.len().saturating_sub(n);
        self.history.iter().skip(skip).cloned().collect()
    }

    pub fn summary(&self) -> MemorySummary {
        MemorySummary {
            turns: self.history.len(),
            facts: self.facts.len(),
        }
    }
}

/// Turn and fact counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemorySummary {
    pub turns: usize,
    pub facts: usize,
}

impl std::fmt::Display for MemorySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} conversation turns, {} stored facts",
            self.turns, self.facts
        )
    }
}
