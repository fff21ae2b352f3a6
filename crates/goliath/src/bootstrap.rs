// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Wiring shared by every command: provider registry, memory store, engine.

use std::path::Path;
use std::sync::Arc;

use goliath_agent::{Engine, EngineSettings};
use goliath_config::GoliathConfig;
use goliath_core::{GoliathError, PluginAdapter};
use goliath_memory::{MemoryLimits, MemoryStore};
use goliath_plugin::{PluginRegistry, PluginStatus, Protocol, ProviderFactory};
use tracing::info;

/// Factory for a wire protocol, if support for it was compiled in.
fn factory_for(protocol: Protocol) -> Option<Box<dyn ProviderFactory>> {
    match protocol {
        #[cfg(feature = "openai")]
        Protocol::OpenAiCompatible => Some(Box::new(goliath_openai::OpenAiCompatFactory)),
        #[cfg(feature = "anthropic")]
        Protocol::AnthropicMessages => Some(Box::new(goliath_anthropic::AnthropicFactory)),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}

/// Registers every catalog provider with a status derived from `config`.
pub fn build_registry(config: &GoliathConfig) -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    for manifest in goliath_plugin::builtin_catalog() {
        let status = PluginStatus::for_manifest(&manifest, config);
        let factory = factory_for(manifest.protocol);
        registry.register_with_status(manifest, factory, status);
    }
    registry
}

pub fn memory_limits(config: &GoliathConfig) -> MemoryLimits {
    MemoryLimits {
        max_history: config.memory.max_history,
        max_key_chars: config.memory.max_fact_key_chars,
        max_value_chars: config.memory.max_fact_value_chars,
    }
}

/// Opens the configured memory file.
pub fn open_memory(config: &GoliathConfig) -> Result<MemoryStore, GoliathError> {
    MemoryStore::open(Path::new(&config.memory.path), memory_limits(config))
}

/// Builds an engine bound to `engine.provider`.
pub async fn build_engine(config: &GoliathConfig) -> Result<Engine, GoliathError> {
    let registry = build_registry(config);
    let provider = registry.create_provider(&config.engine.provider, config)?;
    let memory = Arc::new(open_memory(config)?);
    let settings = EngineSettings::from_config(config).await;

    info!(
        provider = provider.name(),
        memory = %memory.path().display(),
        "engine ready"
    );
    Ok(Engine::new(provider, memory, settings))
}
