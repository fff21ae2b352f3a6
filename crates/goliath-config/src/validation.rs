// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::{suggest_key, ConfigError};
use crate::model::{GoliathConfig, PROVIDER_NAMES};

/// Validate a deserialized configuration for semantic correctness.
///
/// Collects every problem instead of failing fast.
pub fn validate_config(config: &GoliathConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let active = config.engine.provider.trim();
    match config.providers.get(active) {
        None => errors.push(ConfigError::UnknownProvider {
            name: active.to_string(),
            suggestion: suggest_key(active, &PROVIDER_NAMES),
            valid_names: PROVIDER_NAMES.join(", "),
        }),
        Some(provider) => {
            if provider.base_url.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("providers.{active}.base_url must not be empty"),
                });
            } else if let Err(e) = goliath_security::validate_provider_url(&provider.base_url) {
                errors.push(ConfigError::Validation {
                    message: format!("providers.{active}.base_url: {e}"),
                });
            }
            if provider.model.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: format!("providers.{active}.model must not be empty"),
                });
            }
        }
    }

    for (name, provider) in config.providers.iter() {
        if !(0.0..=2.0).contains(&provider.temperature) {
            errors.push(ConfigError::Validation {
                message: format!(
                    "providers.{name}.temperature must be between 0.0 and 2.0, got {}",
                    provider.temperature
                ),
            });
        }
    }

    let positive = [
        ("engine.max_task_chars", config.engine.max_task_chars),
        ("engine.context_turns", config.engine.context_turns),
        ("memory.max_history", config.memory.max_history),
        ("memory.max_fact_key_chars", config.memory.max_fact_key_chars),
        ("memory.max_fact_value_chars", config.memory.max_fact_value_chars),
    ];
    for (key, value) in positive {
        if value == 0 {
            errors.push(ConfigError::Validation {
                message: format!("{key} must be at least 1"),
            });
        }
    }

    if config.engine.timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "engine.timeout_secs must be at least 1".to_string(),
        });
    }

    if config.memory.path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "memory.path must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
