// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `goliath memory` command implementation.
//!
//! The rendering helpers are shared with the shell's slash commands.

use std::process::ExitCode;

use clap::Subcommand;
use goliath_config::GoliathConfig;
use goliath_core::{ConversationTurn, GoliathError};
use goliath_memory::MemoryStore;

use crate::bootstrap;

/// Longest turn excerpt printed by history listings.
pub const HISTORY_PREVIEW_CHARS: usize = 120;

/// Memory subcommands.
#[derive(Subcommand, Debug)]
pub enum MemoryAction {
    /// Print turn and fact counts.
    Show,
    /// Print stored conversation turns, oldest first.
    History {
        /// Only print the most recent N turns.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print all stored facts.
    Facts,
    /// Store a fact.
    Remember {
        key: String,
        /// Value words are joined with spaces.
        #[arg(required = true, num_args = 1..)]
        value: Vec<String>,
    },
    /// Print one fact.
    Recall { key: String },
    /// Delete one fact.
    Forget { key: String },
    /// Clear conversation history.
    Clear {
        /// Also delete all facts.
        #[arg(long)]
        all: bool,
    },
}

/// Runs a memory subcommand against the configured store.
pub fn run_memory(config: &GoliathConfig, action: MemoryAction) -> Result<ExitCode, GoliathError> {
    let store = bootstrap::open_memory(config)?;

    match action {
        MemoryAction::Show => println!("{}", store.summary()),
        MemoryAction::History { limit } => {
            let history = store.get_history();
            let skip = limit.map_or(0, |n| history.len().saturating_sub(n));
            print_lines(&render_history(&history[skip..]));
        }
        MemoryAction::Facts => print_lines(&render_facts(&store)),
        MemoryAction::Remember { key, value } => {
            println!("{}", remember(&store, &key, &value.join(" "))?);
        }
        MemoryAction::Recall { key } => match store.recall(&key) {
            Some(value) => println!("{value}"),
            None => {
                eprintln!("no fact stored under '{key}'");
                return Ok(ExitCode::FAILURE);
            }
        },
        MemoryAction::Forget { key } => println!("{}", forget(&store, &key)?),
        MemoryAction::Clear { all } => println!("{}", clear(&store, all)?),
    }
    Ok(ExitCode::SUCCESS)
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{line}");
    }
}

/// Truncates `text` to `max` characters, appending an ellipsis when cut.
pub fn preview(text: &str, max: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= max {
        return flat;
    }
    let cut: String = flat.chars().take(max).collect();
    format!("{cut}...")
}

/// One line per turn: `[role] content`.
pub fn render_history(turns: &[ConversationTurn]) -> Vec<String> {
    if turns.is_empty() {
        return vec!["no conversation history".to_string()];
    }
    turns
        .iter()
        .map(|turn| {
            format!(
                "[{}] {}",
                turn.role,
                preview(&turn.content, HISTORY_PREVIEW_CHARS)
            )
        })
        .collect()
}

/// One line per fact: `key: value`, in key order.
pub fn render_facts(store: &MemoryStore) -> Vec<String> {
    let facts = store.facts();
    if facts.is_empty() {
        return vec!["no stored facts".to_string()];
    }
    facts.iter().map(|(k, v)| format!("{k}: {v}")).collect()
}

pub fn remember(store: &MemoryStore, key: &str, value: &str) -> Result<String, GoliathError> {
    store.remember(key, value)?;
    Ok(format!("remembered '{key}'"))
}

pub fn forget(store: &MemoryStore, key: &str) -> Result<String, GoliathError> {
    Ok(if store.forget(key)? {
        format!("forgot '{key}'")
    } else {
        format!("no fact stored under '{key}'")
    })
}

pub fn clear(store: &MemoryStore, all: bool) -> Result<String, GoliathError> {
    if all {
        store.clear_all()?;
        Ok("cleared history and facts".to_string())
    } else {
        store.clear_history()?;
        Ok("cleared history".to_string())
    }
}
