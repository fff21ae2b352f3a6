// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that all plugin adapters must implement.

use async_trait::async_trait;

use crate::error::GoliathError;
use crate::types::HealthStatus;

/// The base trait for all Goliath plugin adapters.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the registry name of this adapter instance (e.g. `grok`).
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, GoliathError>;
}
