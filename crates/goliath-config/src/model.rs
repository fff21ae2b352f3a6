// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Goliath task runner.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Names of every built-in provider section, in catalog order.
pub const PROVIDER_NAMES: [&str; 9] = [
    "grok",
    "openai",
    "claude",
    "gemini",
    "mistral",
    "deepseek",
    "ollama",
    "cohere",
    "perplexity",
];

/// Top-level Goliath configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GoliathConfig {
    /// Execution engine settings.
    #[serde(default)]
    pub engine: EngineConfig,

    /// Persistent memory settings.
    #[serde(default)]
    pub memory: MemoryConfig,

    /// Per-backend credentials and endpoints.
    #[serde(default)]
    pub providers: ProvidersConfig,
}

/// Execution engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Name of the active provider (a key of `[providers]`).
    #[serde(default = "default_provider")]
    pub provider: String,

    /// Maximum task length in characters.
    #[serde(default = "default_max_task_chars")]
    pub max_task_chars: usize,

    /// Number of most recent history turns injected into each prompt.
    #[serde(default = "default_context_turns")]
    pub context_turns: usize,

    /// Deadline for a single backend dispatch, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Inline system prompt string. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a file containing the system prompt.
    #[serde(default)]
    pub system_prompt_file: Option<String>,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            max_task_chars: default_max_task_chars(),
            context_turns: default_context_turns(),
            timeout_secs: default_timeout_secs(),
            system_prompt: None,
            system_prompt_file: None,
            log_level: default_log_level(),
        }
    }
}

fn default_provider() -> String {
    "grok".to_string()
}

fn default_max_task_chars() -> usize {
    32_000
}

fn default_context_turns() -> usize {
    20
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Memory store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MemoryConfig {
    /// Path to the JSON memory file.
    #[serde(default = "default_memory_path")]
    pub path: String,

    /// Maximum number of conversation turns kept (oldest evicted first).
    #[serde(default = "default_max_history")]
    pub max_history: usize,

    /// Maximum fact key length in characters.
    #[serde(default = "default_max_fact_key_chars")]
    pub max_fact_key_chars: usize,

    /// Maximum fact value length in characters.
    #[serde(default = "default_max_fact_value_chars")]
    pub max_fact_value_chars: usize,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            path: default_memory_path(),
            max_history: default_max_history(),
            max_fact_key_chars: default_max_fact_key_chars(),
            max_fact_value_chars: default_max_fact_value_chars(),
        }
    }
}

fn default_memory_path() -> String {
    dirs::config_dir()
        .map(|p| p.join("goliath").join("memory.json"))
        .unwrap_or_else(|| std::path::PathBuf::from("memory.json"))
        .to_string_lossy()
        .into_owned()
}

fn default_max_history() -> usize {
    20
}

fn default_max_fact_key_chars() -> usize {
    128
}

fn default_max_fact_value_chars() -> usize {
    4096
}

/// Settings for one text-generation backend.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ProviderConfig {
    /// API key. `None` falls back to the provider's environment variable.
    pub api_key: Option<String>,

    /// API root, e.g. `https://api.x.ai/v1`.
    pub base_url: String,

    /// Model identifier sent with every request.
    pub model: String,

    /// Upper bound on generated tokens.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: f64,

    /// Retries on transient upstream errors (429/5xx).
    pub max_retries: u32,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: String::new(),
            model: String::new(),
            max_tokens: 4096,
            temperature: 0.7,
            max_retries: 1,
        }
    }
}

impl ProviderConfig {
    fn preset(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            model: model.to_string(),
            ..Self::default()
        }
    }

    fn grok() -> Self {
        Self::preset("https://api.x.ai/v1", "grok-3-latest")
    }

    fn openai() -> Self {
        Self::preset("https://api.openai.com/v1", "gpt-4o")
    }

    fn claude() -> Self {
        Self::preset("https://api.anthropic.com", "claude-sonnet-4-5-20250929")
    }

    fn gemini() -> Self {
        Self::preset(
            "https://generativelanguage.googleapis.com/v1beta/openai",
            "gemini-2.0-flash",
        )
    }

    fn mistral() -> Self {
        Self::preset("https://api.mistral.ai/v1", "mistral-large-latest")
    }

    fn deepseek() -> Self {
        Self::preset("https://api.deepseek.com", "deepseek-chat")
    }

    fn ollama() -> Self {
        Self::preset("http://localhost:11434/v1", "llama3.1")
    }

    fn cohere() -> Self {
        Self::preset("https://api.cohere.ai/compatibility/v1", "command-r-plus")
    }

    fn perplexity() -> Self {
        Self::preset("https://api.perplexity.ai", "sonar-pro")
    }
}

/// Backend settings, one section per built-in provider.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProvidersConfig {
    #[serde(default = "ProviderConfig::grok")]
    pub grok: ProviderConfig,
    #[serde(default = "ProviderConfig::openai")]
    pub openai: ProviderConfig,
    #[serde(default = "ProviderConfig::claude")]
    pub claude: ProviderConfig,
    #[serde(default = "ProviderConfig::gemini")]
    pub gemini: ProviderConfig,
    #[serde(default = "ProviderConfig::mistral")]
    pub mistral: ProviderConfig,
    #[serde(default = "ProviderConfig::deepseek")]
    pub deepseek: ProviderConfig,
    #[serde(default = "ProviderConfig::ollama")]
    pub ollama: ProviderConfig,
    #[serde(default = "ProviderConfig::cohere")]
    pub cohere: ProviderConfig,
    #[serde(default = "ProviderConfig::perplexity")]
    pub perplexity: ProviderConfig,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            grok: ProviderConfig::grok(),
            openai: ProviderConfig::openai(),
            claude: ProviderConfig::claude(),
            gemini: ProviderConfig::gemini(),
            mistral: ProviderConfig::mistral(),
            deepseek: ProviderConfig::deepseek(),
            ollama: ProviderConfig::ollama(),
            cohere: ProviderConfig::cohere(),
            perplexity: ProviderConfig::perplexity(),
        }
    }
}

impl ProvidersConfig {
    /// Looks up a provider section by name.
    pub fn get(&self, name: &str) -> Option<&ProviderConfig> {
        match name {
            "grok" => Some(&self.grok),
            "openai" => Some(&self.openai),
            "claude" => Some(&self.claude),
            "gemini" => Some(&self.gemini),
            "mistral" => Some(&self.mistral),
            "deepseek" => Some(&self.deepseek),
            "ollama" => Some(&self.ollama),
            "cohere" => Some(&self.cohere),
            "perplexity" => Some(&self.perplexity),
            _ => None,
        }
    }

    /// Iterates `(name, settings)` in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ProviderConfig)> {
        PROVIDER_NAMES
            .into_iter()
            .filter_map(move |name| self.get(name).map(|cfg| (name, cfg)))
    }

    /// Every explicitly configured API key, for log redaction.
    pub fn configured_secrets(&self) -> Vec<String> {
        self.iter()
            .filter_map(|(_, cfg)| cfg.api_key.clone())
            .filter(|key| !key.is_empty())
            .collect()
    }
}
