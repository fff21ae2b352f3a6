// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy, highest priority first: `./goliath.toml`,
//! `~/.config/goliath/goliath.toml`, `/etc/goliath/goliath.toml`. Environment
//! variables with the `GOLIATH_` prefix override all files.

// figment::Error is external and cannot be boxed without a wrapper.
#![allow(clippy::result_large_err)]

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::{GoliathConfig, PROVIDER_NAMES};

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/goliath/goliath.toml` (system-wide)
/// 3. `~/.config/goliath/goliath.toml` (user XDG config)
/// 4. `./goliath.toml` (local directory)
/// 5. `GOLIATH_*` environment variables
pub fn load_config() -> Result<GoliathConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string on top of the defaults (no files, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<GoliathConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GoliathConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<GoliathConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(GoliathConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used for config loading, before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(GoliathConfig::default()))
        .merge(Toml::file("/etc/goliath/goliath.toml"))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file("goliath.toml"))
        .merge(env_provider())
}

/// `<config dir>/goliath/goliath.toml`, when a config directory exists.
pub fn user_config_path() -> Option<std::path::PathBuf> {
    dirs::config_dir().map(|d| d.join("goliath").join("goliath.toml"))
}

/// Environment provider with explicit section mapping.
///
/// `Env::split("_")` would turn `GOLIATH_MEMORY_MAX_HISTORY` into
/// `memory.max.history`, so keys are mapped by known section prefix instead.
fn env_provider() -> Env {
    Env::prefixed("GOLIATH_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env var name to a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    if let Some(rest) = key.strip_prefix("engine_") {
        return format!("engine.{rest}");
    }
    if let Some(rest) = key.strip_prefix("memory_") {
        return format!("memory.{rest}");
    }
    if let Some(rest) = key.strip_prefix("providers_") {
        for name in PROVIDER_NAMES {
            if let Some(field) = rest
                .strip_prefix(name)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("providers.{name}.{field}");
            }
        }
    }
    key.to_string()
}
