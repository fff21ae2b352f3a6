// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `goliath doctor` command implementation.
//!
//! Runs diagnostic checks against the local setup: configuration, the
//! memory file, and credentials and reachability of the active provider.

use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use goliath_config::GoliathConfig;
use goliath_core::{GoliathError, HealthStatus, PluginAdapter};
use goliath_memory::MemoryStore;
use goliath_plugin::PluginStatus;

use crate::bootstrap;

/// Upper bound on the provider health check.
const HEALTH_TIMEOUT: Duration = Duration::from_secs(10);

/// Status of a diagnostic check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckStatus {
    /// Check passed successfully.
    Pass,
    /// Check passed with a warning.
    Warn,
    /// Check failed.
    Fail,
}

/// Result of a single diagnostic check.
#[derive(Debug, Clone)]
pub struct CheckResult {
    /// Name of the check.
    pub name: String,
    /// Check status.
    pub status: CheckStatus,
    /// Human-readable message.
    pub message: String,
    /// Duration the check took.
    pub duration: Duration,
}

impl CheckResult {
    fn new(name: &str, status: CheckStatus, message: impl Into<String>, start: Instant) -> Self {
        Self {
            name: name.to_string(),
            status,
            message: message.into(),
            duration: start.elapsed(),
        }
    }
}

/// Run the `goliath doctor` command.
///
/// With `--plain`, disables colored output. Exits non-zero when any check
/// fails; warnings alone do not.
pub async fn run_doctor(
    config: &GoliathConfig,
    config_path: Option<&Path>,
    plain: bool,
) -> Result<ExitCode, GoliathError> {
    let use_color = !plain && std::io::stdout().is_terminal();

    let mut results = vec![
        check_config(config_path),
        check_memory(config),
        check_credentials(config),
    ];
    results.push(check_provider_health(config).await);

    println!();
    println!("  goliath doctor");
    println!("  {}", "-".repeat(50));

    let mut fail_count = 0;
    let mut warn_count = 0;
    for result in &results {
        match result.status {
            CheckStatus::Warn => warn_count += 1,
            CheckStatus::Fail => fail_count += 1,
            CheckStatus::Pass => {}
        }
        println!("{}", render_line(result, use_color));
    }

    println!();
    if fail_count > 0 || warn_count > 0 {
        let issues = fail_count + warn_count;
        let issue_word = if issues == 1 { "issue" } else { "issues" };
        println!("  {issues} {issue_word} found.");
    } else {
        println!("  All checks passed.");
    }
    println!();

    Ok(if fail_count > 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Formats one check as a report line.
pub fn render_line(result: &CheckResult, use_color: bool) -> String {
    let duration_ms = result.duration.as_millis();
    let (name, message) = (&result.name, &result.message);

    if !use_color {
        let tag = match result.status {
            CheckStatus::Pass => "[OK]  ",
            CheckStatus::Warn => "[WARN]",
            CheckStatus::Fail => "[FAIL]",
        };
        return format!("    {tag} {name:<20} {message} ({duration_ms}ms)");
    }

    use colored::Colorize;
    let (symbol, message) = match result.status {
        CheckStatus::Pass => ("✓".green(), message.normal()),
        CheckStatus::Warn => ("!".yellow(), message.yellow()),
        CheckStatus::Fail => ("✗".red(), message.red()),
    };
    format!("    {symbol} {name:<20} {message} ({duration_ms}ms)")
}

/// Check configuration loads without errors.
fn check_config(config_path: Option<&Path>) -> CheckResult {
    let start = Instant::now();
    let loaded = match config_path {
        Some(path) => goliath_config::load_and_validate_path(path),
        None => goliath_config::load_and_validate(),
    };
    match loaded {
        Ok(_) => CheckResult::new("Configuration", CheckStatus::Pass, "valid", start),
        Err(errors) => CheckResult::new(
            "Configuration",
            CheckStatus::Fail,
            format!("{} error(s)", errors.len()),
            start,
        ),
    }
}

/// Check the memory file exists and parses.
fn check_memory(config: &GoliathConfig) -> CheckResult {
    let start = Instant::now();
    let path = Path::new(&config.memory.path);

    if !path.exists() {
        return CheckResult::new(
            "Memory",
            CheckStatus::Warn,
            format!("not found: {} (created on first write)", path.display()),
            start,
        );
    }

    match MemoryStore::open(path, bootstrap::memory_limits(config)) {
        Ok(store) => CheckResult::new(
            "Memory",
            CheckStatus::Pass,
            store.summary().to_string(),
            start,
        ),
        Err(e) => CheckResult::new("Memory", CheckStatus::Fail, e.to_string(), start),
    }
}

/// Check the active provider exists and has a credential.
fn check_credentials(config: &GoliathConfig) -> CheckResult {
    let start = Instant::now();
    let name = config.engine.provider.as_str();
    let registry = bootstrap::build_registry(config);

    let Some(entry) = registry.get(name) else {
        return CheckResult::new(
            "Credentials",
            CheckStatus::Fail,
            format!("unknown provider: {name}"),
            start,
        );
    };

    match (&entry.status, entry.manifest.api_key_env.as_deref()) {
        (PluginStatus::Enabled, None) => CheckResult::new(
            "Credentials",
            CheckStatus::Pass,
            format!("{name}: no key needed"),
            start,
        ),
        (PluginStatus::Enabled, Some(_)) => CheckResult::new(
            "Credentials",
            CheckStatus::Pass,
            format!("{name}: key found"),
            start,
        ),
        (PluginStatus::Disabled, _) => CheckResult::new(
            "Credentials",
            CheckStatus::Warn,
            format!("{name} is disabled"),
            start,
        ),
        (PluginStatus::NotConfigured, var) => CheckResult::new(
            "Credentials",
            CheckStatus::Fail,
            format!(
                "{name}: no API key (set providers.{name}.api_key or {})",
                var.unwrap_or("the key variable")
            ),
            start,
        ),
    }
}

/// Probe the active provider.
async fn check_provider_health(config: &GoliathConfig) -> CheckResult {
    let start = Instant::now();
    let registry = bootstrap::build_registry(config);

    let provider = match registry.create_provider(&config.engine.provider, config) {
        Ok(provider) => provider,
        Err(e) => {
            return CheckResult::new("Provider", CheckStatus::Fail, e.to_string(), start);
        }
    };

    match tokio::time::timeout(HEALTH_TIMEOUT, provider.health_check()).await {
        Ok(Ok(HealthStatus::Healthy)) => {
            CheckResult::new("Provider", CheckStatus::Pass, "reachable", start)
        }
        Ok(Ok(HealthStatus::Degraded(reason))) => {
            CheckResult::new("Provider", CheckStatus::Warn, reason, start)
        }
        Ok(Ok(HealthStatus::Unhealthy(reason))) => {
            CheckResult::new("Provider", CheckStatus::Fail, reason, start)
        }
        Ok(Err(e)) => CheckResult::new("Provider", CheckStatus::Fail, e.to_string(), start),
        Err(_) => CheckResult::new(
            "Provider",
            CheckStatus::Fail,
            format!("timeout ({}s)", HEALTH_TIMEOUT.as_secs()),
            start,
        ),
    }
}
