// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider adapter trait for text-generation backends.

use async_trait::async_trait;

use crate::error::GoliathError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ProviderRequest, ProviderResponse};

/// Uniform capability every text-generation backend implements.
///
/// Implementations translate their transport failures (HTTP status codes,
/// timeouts, malformed payloads) into [`GoliathError::Backend`] with a
/// [`BackendErrorKind`](crate::BackendErrorKind) before returning. Any retry
/// policy lives inside the implementation.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends the prompt and returns the full answer.
    async fn run(&self, request: ProviderRequest) -> Result<ProviderResponse, GoliathError>;
}
