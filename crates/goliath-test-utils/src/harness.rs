// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end engine tests.
//!
//! `TestHarness` assembles an [`Engine`] over a [`MockProvider`] and a
//! [`MemoryStore`] in a temporary directory that is removed on drop.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use goliath_agent::{Engine, EngineResult, EngineSettings};
use goliath_core::{BackendErrorKind, GoliathError};
use goliath_memory::{MemoryLimits, MemoryStore};

use crate::mock_provider::MockProvider;

/// Builder for creating test environments with configurable options.
#[derive(Debug, Default)]
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    failure: Option<BackendErrorKind>,
    settings: EngineSettings,
    limits: MemoryLimits,
}

impl TestHarnessBuilder {
    /// Set mock provider replies.
    pub fn with_mock_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Make every provider call fail with `kind`.
    pub fn with_failure(mut self, kind: BackendErrorKind) -> Self {
        self.failure = Some(kind);
        self
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_memory_limits(mut self, limits: MemoryLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn build(self) -> Result<TestHarness, GoliathError> {
        let temp_dir = tempfile::tempdir()?;
        let memory_path = temp_dir.path().join("memory.json");
        let memory = Arc::new(MemoryStore::open(&memory_path, self.limits)?);

        let mock_provider = Arc::new(match self.failure {
            Some(kind) => MockProvider::failing(kind),
            None => MockProvider::with_responses(self.responses),
        });
        let engine = Engine::new(mock_provider.clone(), memory.clone(), self.settings);

        Ok(TestHarness {
            engine,
            mock_provider,
            memory,
            memory_path,
            limits: self.limits,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete engine stack with a mock provider and temp storage.
pub struct TestHarness {
    pub engine: Engine,
    pub mock_provider: Arc<MockProvider>,
    pub memory: Arc<MemoryStore>,
    memory_path: PathBuf,
    limits: MemoryLimits,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::default()
    }

    /// Run one task through the full engine pipeline.
    pub async fn execute(&self, task: &str) -> Result<EngineResult, GoliathError> {
        self.engine.execute(task).await
    }

    pub fn memory_path(&self) -> &Path {
        &self.memory_path
    }

    /// Open a second store on the same file, as a restarted process would.
    pub fn reopen_memory(&self) -> Result<MemoryStore, GoliathError> {
        MemoryStore::open(&self.memory_path, self.limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_round_trip() {
        let harness = TestHarness::builder()
            .with_mock_responses(vec!["Here's a summary.".into()])
            .build()
            .unwrap();

        let result = harness.execute("Summarize today's news").await.unwrap();
        assert_eq!(result.text, "Here's a summary.");
        assert_eq!(harness.mock_provider.call_count(), 1);

        let reopened = harness.reopen_memory().unwrap();
        assert_eq!(reopened.get_history().len(), 2);
    }
}
