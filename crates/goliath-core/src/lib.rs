// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Goliath task runner.
//!
//! This crate provides the error taxonomy, the adapter traits every backend
//! implements, and the value types exchanged between the engine, the memory
//! store and the providers.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{BackendErrorKind, GoliathError};
pub use types::{
    BackendResult, ConversationTurn, ErrorInfo, HealthStatus, ProviderRequest, ProviderResponse,
    Role, TokenUsage,
};

pub use traits::{PluginAdapter, ProviderAdapter};
