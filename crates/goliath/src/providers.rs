// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `goliath providers` command implementation.

use colored::Colorize;
use goliath_config::GoliathConfig;
use goliath_plugin::{PluginEntry, PluginStatus};

use crate::bootstrap;

/// Prints the provider catalog with status, marking the active provider.
pub fn run_providers(config: &GoliathConfig) {
    let registry = bootstrap::build_registry(config);
    let active = config.engine.provider.as_str();

    println!();
    println!("  goliath providers");
    println!("  {}", "-".repeat(60));
    for entry in registry.list_all() {
        let line = render_entry(entry, active);
        match entry.status {
            PluginStatus::Enabled => println!("{line}"),
            PluginStatus::Disabled => println!("{}", line.dimmed()),
            PluginStatus::NotConfigured => println!("{}", line.yellow()),
        }
    }
    println!();
    println!("  * active provider (change with --provider or engine.provider)");
    println!();
}

/// One catalog line: marker, name, status, description and key hint.
pub fn render_entry(entry: &PluginEntry, active: &str) -> String {
    let marker = if entry.manifest.name == active { '*' } else { ' ' };
    let mut line = format!(
        "  {marker} {:<12} {:<16} {}",
        entry.manifest.name,
        entry.status.to_string(),
        entry.manifest.description
    );
    if entry.status == PluginStatus::NotConfigured
        && let Some(var) = &entry.manifest.api_key_env
    {
        line.push_str(&format!(" (set {var})"));
    }
    line
}
