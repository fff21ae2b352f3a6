// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenAI-compatible provider adapter.
//!
//! One implementation serves every vendor that exposes
//! `POST {base_url}/chat/completions`: Grok, OpenAI, Gemini's compatibility
//! endpoint, Mistral, DeepSeek, Ollama, Cohere, and Perplexity. The registry
//! name and `[providers.<name>]` section select the vendor.

pub mod client;
pub mod types;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use goliath_config::{GoliathConfig, ProviderConfig};
use goliath_core::{
    BackendErrorKind, GoliathError, HealthStatus, PluginAdapter, ProviderAdapter,
    ProviderRequest, ProviderResponse, TokenUsage,
};
use goliath_plugin::{PluginManifest, ProviderFactory, resolve_api_key};
use goliath_security::{build_secure_client, validate_provider_url};
use tracing::info;

use crate::client::ChatClient;
use crate::types::{ChatMessage, ChatRequest};

/// Deadline for `health_check` requests.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider speaking the OpenAI chat completions protocol.
#[derive(Debug)]
pub struct OpenAiCompatProvider {
    name: String,
    model: String,
    max_tokens: u32,
    temperature: f64,
    client: ChatClient,
}

impl OpenAiCompatProvider {
    /// Builds a provider from its config section.
    ///
    /// # API Key Resolution
    /// 1. `providers.<name>.api_key` if set
    /// 2. the `api_key_env` environment variable
    /// 3. error, unless `api_key_env` is `None` (keyless endpoint)
    pub fn from_config(
        name: &str,
        config: &ProviderConfig,
        api_key_env: Option<&str>,
        request_timeout: Duration,
    ) -> Result<Self, GoliathError> {
        validate_provider_url(&config.base_url)?;

        let api_key = resolve_api_key(config.api_key.as_deref(), api_key_env);
        if let (None, Some(var)) = (&api_key, api_key_env) {
            return Err(GoliathError::Config(format!(
                "provider {name} has no API key: set providers.{name}.api_key or export {var}"
            )));
        }

        let http = build_secure_client(request_timeout)?;
        let client = ChatClient::new(name, http, &config.base_url, api_key, config.max_retries);

        info!(provider = name, model = %config.model, "OpenAI-compatible provider initialized");

        Ok(Self {
            name: name.to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            client,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_chat_request(&self, request: &ProviderRequest) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = request.system_prompt.as_deref().filter(|s| !s.is_empty()) {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(request.prompt.clone()));

        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl PluginAdapter for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, GoliathError> {
        let status = match self.client.ping(HEALTH_TIMEOUT).await {
            Ok(status) => status,
            Err(e) => {
                let kind = e.backend_kind().unwrap_or(BackendErrorKind::NetworkError);
                return Ok(HealthStatus::Unhealthy(kind.describe().to_string()));
            }
        };

        Ok(match status.as_u16() {
            200..=299 => HealthStatus::Healthy,
            401 | 403 => HealthStatus::Unhealthy("credentials rejected".into()),
            code => HealthStatus::Degraded(format!("model listing returned HTTP {code}")),
        })
    }
}

#[async_trait]
impl ProviderAdapter for OpenAiCompatProvider {
    async fn run(&self, request: ProviderRequest) -> Result<ProviderResponse, GoliathError> {
        let chat = self.to_chat_request(&request);
        let response = self.client.chat(&chat, request.timeout).await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| {
                GoliathError::backend(
                    &self.name,
                    BackendErrorKind::InvalidResponse,
                    "response contained no completion text",
                )
            })?;

        Ok(ProviderResponse {
            text,
            provider: self.name.clone(),
            model: response.model.unwrap_or_else(|| self.model.clone()),
            usage: response.usage.map(|u| TokenUsage {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            }),
        })
    }
}

/// Registry factory for every OpenAI-compatible catalog entry.
#[derive(Debug, Default)]
pub struct OpenAiCompatFactory;

impl ProviderFactory for OpenAiCompatFactory {
    fn create(
        &self,
        manifest: &PluginManifest,
        config: &GoliathConfig,
    ) -> Result<Arc<dyn ProviderAdapter>, GoliathError> {
        let section = config.providers.get(&manifest.name).ok_or_else(|| {
            GoliathError::Config(format!("no [providers.{}] section", manifest.name))
        })?;
        let provider = OpenAiCompatProvider::from_config(
            &manifest.name,
            section,
            manifest.api_key_env.as_deref(),
            Duration::from_secs(config.engine.timeout_secs),
        )?;
        Ok(Arc::new(provider))
    }
}
