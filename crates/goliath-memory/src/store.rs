// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The memory store: bounded history, fact table, durable writes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use goliath_core::{ConversationTurn, GoliathError, Role};
use tracing::{debug, info};

use crate::file;
use crate::state::{MemoryState, MemorySummary};

/// Size bounds enforced by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLimits {
    /// Maximum number of turns kept; the oldest are evicted first.
    pub max_history: usize,
    /// Maximum fact key length in characters.
    pub max_key_chars: usize,
    /// Maximum fact value length in characters.
    pub max_value_chars: usize,
}

impl Default for MemoryLimits {
    fn default() -> Self {
        Self {
            max_history: 20,
            max_key_chars: 128,
            max_value_chars: 4096,
        }
    }
}

/// Durable holder of conversation history and facts.
///
/// All mutations go through one mutex: the state is cloned, changed,
/// persisted, and only then swapped in, so the in-memory view never runs
/// ahead of the file. Reads return copies.
#[derive(Debug)]
pub struct MemoryStore {
    path: PathBuf,
    limits: MemoryLimits,
    state: Mutex<MemoryState>,
}

impl MemoryStore {
    /// Opens the store at `path`, loading existing state.
    ///
    /// Fails with [`GoliathError::StoreCorruption`] if the file exists but
    /// cannot be parsed. A history longer than `limits.max_history` is
    /// trimmed in memory; the file is rewritten on the next mutation.
    pub fn open(path: impl Into<PathBuf>, limits: MemoryLimits) -> Result<Self, GoliathError> {
        let path = path.into();
        let mut state = file::load(&path)?;
        state.enforce_history_cap(limits.max_history);
        info!(
            path = %path.display(),
            turns = state.history.len(),
            facts = state.facts.len(),
            "memory store opened"
        );
        Ok(Self {
            path,
            limits,
            state: Mutex::new(state),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn limits(&self) -> MemoryLimits {
        self.limits
    }

    /// Appends one turn, evicting the oldest beyond the cap.
    pub fn add_turn(&self, role: Role, content: &str) -> Result<(), GoliathError> {
        let cap = self.limits.max_history;
        self.mutate(|state| {
            state.history.push_back(ConversationTurn::new(role, content));
            state.enforce_history_cap(cap);
            Ok(())
        })
    }

    /// Appends a user turn and its assistant reply in one durable write.
    pub fn add_exchange(&self, user: &str, assistant: &str) -> Result<(), GoliathError> {
        let cap = self.limits.max_history;
        self.mutate(|state| {
            state.history.push_back(ConversationTurn::user(user));
            state.history.push_back(ConversationTurn::assistant(assistant));
            state.enforce_history_cap(cap);
            Ok(())
        })
    }

    /// All retained turns, oldest first.
    pub fn get_history(&self) -> Vec<ConversationTurn> {
        self.lock().history.iter().cloned().collect()
    }

    /// Stores a fact, overwriting any previous value for `key`.
    pub fn remember(&self, key: &str, value: &str) -> Result<(), GoliathError> {
        self.validate_fact(key, value)?;
        self.mutate(|state| {
            state.facts.insert(key.to_string(), value.to_string());
            Ok(())
        })?;
        debug!(key, "fact remembered");
        Ok(())
    }

    pub fn recall(&self, key: &str) -> Option<String> {
        self.lock().facts.get(key).cloned()
    }

    /// Removes a fact. Returns whether it existed; an absent key is not a
    /// mutation and writes nothing.
    pub fn forget(&self, key: &str) -> Result<bool, GoliathError> {
        if !self.lock().facts.contains_key(key) {
            return Ok(false);
        }
        self.mutate(|state| {
            state.facts.remove(key);
            Ok(())
        })?;
        debug!(key, "fact forgotten");
        Ok(true)
    }

    /// All facts, ordered by key.
    pub fn facts(&self) -> BTreeMap<String, String> {
        self.lock().facts.clone()
    }

    pub fn clear_history(&self) -> Result<(), GoliathError> {
        self.mutate(|state| {
            state.history.clear();
            Ok(())
        })
    }

    /// Clears history and facts. Unknown top-level fields are kept.
    pub fn clear_all(&self) -> Result<(), GoliathError> {
        self.mutate(|state| {
            state.history.clear();
            state.facts.clear();
            Ok(())
        })
    }

    /// A consistent copy of the whole state.
    pub fn snapshot(&self) -> MemoryState {
        self.lock().clone()
    }

    pub fn summary(&self) -> MemorySummary {
        self.lock().summary()
    }

    fn validate_fact(&self, key: &str, value: &str) -> Result<(), GoliathError> {
        if key.trim().is_empty() {
            return Err(GoliathError::validation("fact key must not be empty"));
        }
        if key.chars().count() > self.limits.max_key_chars {
            return Err(GoliathError::validation(format!(
                "fact key exceeds {} characters",
                self.limits.max_key_chars
            )));
        }
        if value.chars().count() > self.limits.max_value_chars {
            return Err(GoliathError::validation(format!(
                "fact value exceeds {} characters",
                self.limits.max_value_chars
            )));
        }
        Ok(())
    }

    fn mutate<F>(&self, apply: F) -> Result<(), GoliathError>
    where
        F: FnOnce(&mut MemoryState) -> Result<(), GoliathError>,
    {
        let mut guard = self.lock();
        let mut next = guard.clone();
        apply(&mut next)?;
        file::persist(&self.path, &next)?;
        *guard = next;
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // The guarded state is only replaced after a successful write, so a
        // panic elsewhere cannot leave it half-updated.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
