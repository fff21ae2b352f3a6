// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The execution engine.

use std::sync::Arc;
use std::time::Duration;

use goliath_config::GoliathConfig;
use goliath_core::{
    BackendErrorKind, BackendResult, GoliathError, ProviderAdapter, ProviderRequest,
};
use goliath_memory::MemoryStore;
use goliath_moderation::ModerationScreen;
use goliath_plugin::known_secrets;
use goliath_security::redact;
use tracing::{error, info, warn};

use crate::context::{assemble_prompt, load_system_prompt, DEFAULT_SYSTEM_PROMPT};
use crate::result::{EngineResult, FailureKind};
use crate::state::{ExecutionState, Invocation};

/// Engine knobs, resolved from `[engine]` at construction.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub max_task_chars: usize,
    /// Most recent history turns rendered into the prompt.
    pub context_turns: usize,
    /// Deadline for one dispatch, provider retries included.
    pub timeout: Duration,
    pub system_prompt: String,
    /// Values scrubbed from backend error text.
    pub secrets: Vec<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            max_task_chars: 32_000,
            context_turns: 20,
            timeout: Duration::from_secs(120),
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            secrets: Vec::new(),
        }
    }
}

impl EngineSettings {
    /// Resolves settings from configuration, reading the system prompt file
    /// if one is configured.
    pub async fn from_config(config: &GoliathConfig) -> Self {
        Self {
            max_task_chars: config.engine.max_task_chars,
            context_turns: config.engine.context_turns,
            timeout: Duration::from_secs(config.engine.timeout_secs),
            system_prompt: load_system_prompt(&config.engine).await,
            secrets: known_secrets(config),
        }
    }
}

/// Runs tasks against one provider and one memory store.
///
/// One invocation is processed to completion before the next; the memory
/// store serializes its own writes.
pub struct Engine {
    provider: Arc<dyn ProviderAdapter>,
    memory: Arc<MemoryStore>,
    screen: &'static ModerationScreen,
    settings: EngineSettings,
}

impl Engine {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        memory: Arc<MemoryStore>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            provider,
            memory,
            screen: ModerationScreen::builtin(),
            settings,
        }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn memory(&self) -> &Arc<MemoryStore> {
        &self.memory
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Executes one task.
    ///
    /// Returns `Err` only when the exchange cannot be persisted after a
    /// successful dispatch.
    pub async fn execute(&self, task: &str) -> Result<EngineResult, GoliathError> {
        let provider = self.provider.name().to_string();
        let mut inv = Invocation::new();

        if let Some(message) = self.validate(task) {
            inv.advance(ExecutionState::Failed)?;
            warn!(provider = %provider, "task rejected: {message}");
            return Ok(EngineResult::error(
                FailureKind::Validation,
                &message,
                &provider,
                inv.into_trail(),
            ));
        }
        inv.advance(ExecutionState::Validated)?;

        let verdict = self.screen.classify(task);
        inv.advance(ExecutionState::Screened)?;
        if verdict.blocked {
            inv.advance(ExecutionState::Blocked)?;
            warn!(
                category = %verdict.category,
                rule = verdict.matched_pattern.unwrap_or("unknown"),
                "task blocked by moderation"
            );
            return Ok(EngineResult::blocked(
                verdict.category,
                &provider,
                inv.into_trail(),
            ));
        }

        let snapshot = self.memory.snapshot();
        let history = snapshot.recent_turns(self.settings.context_turns);
        let prompt = assemble_prompt(&snapshot.facts, &history, task);
        inv.advance(ExecutionState::ContextBuilt)?;

        let request = ProviderRequest::new(prompt, self.settings.timeout)
            .with_system_prompt(self.settings.system_prompt.clone());
        inv.advance(ExecutionState::Dispatched)?;
        let outcome = self.dispatch(request).await;
        let result = BackendResult::from_outcome(&provider, outcome);

        if let Some(info) = result.error {
            inv.advance(ExecutionState::Failed)?;
            let message = redact(&info.message, &self.settings.secrets);
            warn!(provider = %provider, kind = %info.kind, "provider failed: {message}");
            return Ok(EngineResult::error(
                FailureKind::Backend(info.kind),
                &format!("{} ({}): {message}", info.kind.describe(), info.kind),
                &provider,
                inv.into_trail(),
            ));
        }

        if let Err(e) = self.memory.add_exchange(task, &result.text) {
            error!(provider = %provider, error = %e, "failed to record exchange");
            return Err(e);
        }
        inv.advance(ExecutionState::Recorded)?;

        info!(
            provider = %provider,
            chars = result.text.chars().count(),
            "task completed"
        );
        Ok(EngineResult::ok(result.text, &provider, inv.into_trail()))
    }

    fn validate(&self, task: &str) -> Option<String> {
        if task.trim().is_empty() {
            return Some("task is empty".to_string());
        }
        if task.chars().count() > self.settings.max_task_chars {
            return Some(format!(
                "task exceeds {} characters",
                self.settings.max_task_chars
            ));
        }
        None
    }

    async fn dispatch(
        &self,
        request: ProviderRequest,
    ) -> Result<goliath_core::ProviderResponse, GoliathError> {
        let timeout = self.settings.timeout;
        match tokio::time::timeout(timeout, self.provider.run(request)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(GoliathError::backend(
                self.provider.name(),
                BackendErrorKind::Timeout,
                format!("no answer within {} seconds", timeout.as_secs()),
            )),
        }
    }
}
