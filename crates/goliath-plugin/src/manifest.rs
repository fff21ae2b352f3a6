// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider manifests.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Wire protocol a provider speaks.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Protocol {
    /// `POST {base_url}/chat/completions` with bearer auth.
    OpenAiCompatible,
    /// `POST {base_url}/v1/messages` with `x-api-key` auth.
    AnthropicMessages,
}

/// Metadata describing a registered provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginManifest {
    /// Registry name, also the `[providers.<name>]` config section.
    pub name: String,
    /// Semantic version string.
    pub version: String,
    /// Human-readable description.
    pub description: String,
    pub protocol: Protocol,
    /// Environment variable consulted when the config has no key.
    /// `None` means the provider needs no credential.
    pub api_key_env: Option<String>,
    /// Config keys the provider reads.
    pub config_keys: Vec<String>,
}

impl PluginManifest {
    pub fn requires_api_key(&self) -> bool {
        self.api_key_env.is_some()
    }
}
