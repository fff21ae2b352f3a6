// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Anthropic Claude provider adapter.
//!
//! Implements [`ProviderAdapter`] over the Anthropic Messages API
//! (`POST {base_url}/v1/messages`).

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

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest, ResponseContentBlock};

const DEFAULT_KEY_ENV: &str = "ANTHROPIC_API_KEY";
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Anthropic Claude provider implementing [`ProviderAdapter`].
///
/// API key resolution order: config -> `ANTHROPIC_API_KEY` env var -> error.
#[derive(Debug)]
pub struct AnthropicProvider {
    client: AnthropicClient,
    model: String,
    max_tokens: u32,
    temperature: f64,
}

impl AnthropicProvider {
    pub fn from_config(
        config: &ProviderConfig,
        api_key_env: &str,
        request_timeout: Duration,
    ) -> Result<Self, GoliathError> {
        validate_provider_url(&config.base_url)?;

        let api_key = resolve_api_key(config.api_key.as_deref(), Some(api_key_env))
            .ok_or_else(|| {
                GoliathError::Config(format!(
                    "provider claude has no API key: set providers.claude.api_key or export {api_key_env}"
                ))
            })?;

        let client = AnthropicClient::new(
            build_secure_client(request_timeout)?,
            &config.base_url,
            api_key,
            config.max_retries,
        )?;

        info!(model = %config.model, "Anthropic provider initialized");

        Ok(Self {
            client,
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn to_message_request(&self, request: &ProviderRequest) -> MessageRequest {
        MessageRequest {
            model: self.model.clone(),
            messages: vec![ApiMessage {
                role: "user".into(),
                content: request.prompt.clone(),
            }],
            system: request.system_prompt.clone().filter(|s| !s.is_empty()),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl PluginAdapter for AnthropicProvider {
    fn name(&self) -> &str {
        "claude"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    async fn health_check(&self) -> Result<HealthStatus, GoliathError> {
        match self.client.ping(HEALTH_TIMEOUT).await {
            Ok(status) if status.is_success() => Ok(HealthStatus::Healthy),
            Ok(status) if matches!(status.as_u16(), 401 | 403) => {
                Ok(HealthStatus::Unhealthy("credentials rejected".into()))
            }
            Ok(status) => Ok(HealthStatus::Degraded(format!(
                "model listing returned HTTP {}",
                status.as_u16()
            ))),
            Err(e) => {
                let kind = e.backend_kind().unwrap_or(BackendErrorKind::NetworkError);
                Ok(HealthStatus::Unhealthy(kind.describe().to_string()))
            }
        }
    }
}

#[async_trait]
impl ProviderAdapter for AnthropicProvider {
    async fn run(&self, request: ProviderRequest) -> Result<ProviderResponse, GoliathError> {
        let api_request = self.to_message_request(&request);
        let response = self
            .client
            .complete_message(&api_request, request.timeout)
            .await?;

        let text = response
            .content
            .iter()
            .filter_map(|block| match block {
                ResponseContentBlock::Text { text } => Some(text.as_str()),
                ResponseContentBlock::Other => None,
            })
            .collect::<Vec<_>>()
            .join("");

        if text.is_empty() {
            return Err(GoliathError::backend(
                "claude",
                BackendErrorKind::InvalidResponse,
                "response contained no text blocks",
            ));
        }

        Ok(ProviderResponse {
            text,
            provider: "claude".into(),
            model: response.model.unwrap_or_else(|| self.model.clone()),
            usage: response.usage.map(|u| TokenUsage {
                input_tokens: u.input_tokens,
                output_tokens: u.output_tokens,
            }),
        })
    }
}

/// Registry factory for the `claude` catalog entry.
#[derive(Debug, Default)]
pub struct AnthropicFactory;

impl ProviderFactory for AnthropicFactory {
    fn create(
        &self,
        manifest: &PluginManifest,
        config: &GoliathConfig,
    ) -> Result<Arc<dyn ProviderAdapter>, GoliathError> {
        let provider = AnthropicProvider::from_config(
            &config.providers.claude,
            manifest.api_key_env.as_deref().unwrap_or(DEFAULT_KEY_ENV),
            Duration::from_secs(config.engine.timeout_secs),
        )?;
        Ok(Arc::new(provider))
    }
}
