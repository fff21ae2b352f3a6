// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context assembly for provider requests.
//!
//! Loads the system prompt from config and renders stored facts and recent
//! history ahead of the live task.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use goliath_config::model::EngineConfig;
use goliath_core::{ConversationTurn, Role};
use tracing::{info, warn};

/// System prompt used when neither a file nor an inline prompt is configured.
pub const DEFAULT_SYSTEM_PROMPT: &str = "You are GOLIATH, a universal AI automation engine. \
When given a task, respond with a clear, actionable answer. \
If the task requires multiple steps, break it down. \
Be concise and precise.";

/// Loads the system prompt following config priority: file > inline > default.
///
/// An unreadable or empty file falls through to the next source.
pub async fn load_system_prompt(config: &EngineConfig) -> String {
    if let Some(ref file_path) = config.system_prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    info!(path = file_path.as_str(), "loaded system prompt from file");
                    return trimmed.to_string();
                }
            }
            Err(e) => {
                warn!(
                    path = file_path.as_str(),
                    error = %e,
                    "failed to read system prompt file, falling back"
                );
            }
        }
    }

    if let Some(ref prompt) = config.system_prompt
        && !prompt.trim().is_empty()
    {
        return prompt.clone();
    }

    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn render_facts(out: &mut String, facts: &BTreeMap<String, String>) {
    out.push_str("Known facts:\n");
    for (key, value) in facts {
        let _ = writeln!(out, "- {key}: {value}");
    }
}

fn render_history(out: &mut String, history: &[ConversationTurn]) {
    out.push_str("Conversation so far:\n");
    for turn in history {
        let speaker = match turn.role {
            Role::User => "User",
            Role::Assistant => "Assistant",
        };
        let _ = writeln!(out, "{speaker}: {}", turn.content);
    }
}

/// Builds the prompt payload: facts, then history, then the task.
///
/// With no facts and no history the task is returned verbatim.
pub fn assemble_prompt(
    facts: &BTreeMap<String, String>,
    history: &[ConversationTurn],
    task: &str,
) -> String {
    if facts.is_empty() && history.is_empty() {
        return task.to_string();
    }

    let mut out = String::new();
    if !facts.is_empty() {
        render_facts(&mut out, facts);
        out.push('\n');
    }
    if !history.is_empty() {
        render_history(&mut out, history);
        out.push('\n');
    }
    out.push_str("Task:\n");
    out.push_str(task);
    out
}
