// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Provider registry and built-in provider catalog.
//!
//! The registry is a static table built at process start that maps a
//! provider name to a factory producing a [`ProviderAdapter`]. New providers
//! are added by registering another entry; the engine never changes.
//!
//! [`ProviderAdapter`]: goliath_core::ProviderAdapter

pub mod catalog;
pub mod credentials;
pub mod manifest;
pub mod registry;

pub use catalog::builtin_catalog;
pub use credentials::{known_secrets, resolve_api_key, resolve_api_key_from};
pub use manifest::{PluginManifest, Protocol};
pub use registry::{PluginEntry, PluginRegistry, PluginStatus, ProviderFactory};
