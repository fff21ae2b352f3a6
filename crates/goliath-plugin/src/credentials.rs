// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! API key resolution: config value first, then the provider's env var.

use goliath_config::GoliathConfig;

use crate::catalog::builtin_catalog;

/// Resolves an API key from the configured value or the named environment
/// variable. Empty strings count as unset.
pub fn resolve_api_key(configured: Option<&str>, env_var: Option<&str>) -> Option<String> {
    resolve_api_key_from(configured, env_var, |name| std::env::var(name).ok())
}

/// Same as [`resolve_api_key`] with an injectable environment lookup.
pub fn resolve_api_key_from<F>(
    configured: Option<&str>,
    env_var: Option<&str>,
    lookup: F,
) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = configured.filter(|k| !k.trim().is_empty()) {
        return Some(key.to_string());
    }
    env_var
        .and_then(lookup)
        .filter(|k| !k.trim().is_empty())
}

/// Every API key reachable from `config` or the catalog's environment
/// variables. Used to seed log and error redaction.
pub fn known_secrets(config: &GoliathConfig) -> Vec<String> {
    let mut secrets: Vec<String> = builtin_catalog()
        .iter()
        .filter_map(|manifest| {
            let configured = config
                .providers
                .get(&manifest.name)
                .and_then(|p| p.api_key.as_deref());
            resolve_api_key(configured, manifest.api_key_env.as_deref())
        })
        .collect();
    secrets.sort();
    secrets.dedup();
    secrets
}
