// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Built-in provider catalog.
//!
//! Returns hardcoded manifests for the nine providers compiled into the
//! `goliath` binary. No network calls are made.

use crate::manifest::{PluginManifest, Protocol};

fn manifest(
    name: &str,
    description: &str,
    protocol: Protocol,
    api_key_env: Option<&str>,
) -> PluginManifest {
    let config_keys = ["base_url", "model", "api_key"]
        .iter()
        .filter(|key| **key != "api_key" || api_key_env.is_some())
        .map(|key| format!("providers.{name}.{key}"))
        .collect();

    PluginManifest {
        name: name.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: description.to_string(),
        protocol,
        api_key_env: api_key_env.map(str::to_string),
        config_keys,
    }
}

/// Manifests for all built-in providers, in config order.
pub fn builtin_catalog() -> Vec<PluginManifest> {
    use Protocol::{AnthropicMessages, OpenAiCompatible};

    vec![
        manifest("grok", "xAI Grok", OpenAiCompatible, Some("XAI_API_KEY")),
        manifest("openai", "OpenAI GPT", OpenAiCompatible, Some("OPENAI_API_KEY")),
        manifest(
            "claude",
            "Anthropic Claude",
            AnthropicMessages,
            Some("ANTHROPIC_API_KEY"),
        ),
        manifest(
            "gemini",
            "Google Gemini (OpenAI-compatible endpoint)",
            OpenAiCompatible,
            Some("GOOGLE_API_KEY"),
        ),
        manifest("mistral", "Mistral AI", OpenAiCompatible, Some("MISTRAL_API_KEY")),
        manifest("deepseek", "DeepSeek", OpenAiCompatible, Some("DEEPSEEK_API_KEY")),
        manifest("ollama", "Local models via Ollama", OpenAiCompatible, None),
        manifest(
            "cohere",
            "Cohere Command (compatibility API)",
            OpenAiCompatible,
            Some("COHERE_API_KEY"),
        ),
        manifest(
            "perplexity",
            "Perplexity Sonar",
            OpenAiCompatible,
            Some("PERPLEXITY_API_KEY"),
        ),
    ]
}
