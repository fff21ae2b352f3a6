// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `goliath shell` command implementation.
//!
//! Launches an interactive REPL with colored prompt and readline history.
//! Lines starting with `/` operate on memory; anything else is a task.

use std::process::ExitCode;

use colored::Colorize;
use goliath_agent::{Engine, EngineStatus};
use goliath_config::GoliathConfig;
use goliath_core::GoliathError;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::{bootstrap, memory_cmd};

const HELP: &str = "\
commands:
  <task>                  run a task
  /memory                 show turn and fact counts
  /history                list conversation turns
  /facts                  list stored facts
  /remember <key> <value> store a fact
  /recall <key>           print a fact
  /forget <key>           delete a fact
  /clear history|all      clear history, or history and facts
  /help                   show this help
  quit                    leave the shell";

/// A parsed shell input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Quit,
    Help,
    Memory,
    History,
    Facts,
    Remember { key: String, value: String },
    Recall { key: String },
    Forget { key: String },
    Clear { all: bool },
    Task(String),
    Empty,
    /// Slash command with bad or missing arguments.
    Usage(&'static str),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if matches!(trimmed, "quit" | "exit" | "/quit" | "/exit") {
            return Self::Quit;
        }
        let Some(rest) = trimmed.strip_prefix('/') else {
            return Self::Task(trimmed.to_string());
        };

        let (command, args) = match rest.split_once(char::is_whitespace) {
            Some((command, args)) => (command, args.trim()),
            None => (rest, ""),
        };

        match command {
            "help" => Self::Help,
            "memory" => Self::Memory,
            "history" => Self::History,
            "facts" => Self::Facts,
            "remember" => match args.split_once(char::is_whitespace) {
                Some((key, value)) if !value.trim().is_empty() => Self::Remember {
                    key: key.to_string(),
                    value: value.trim().to_string(),
                },
                _ => Self::Usage("/remember <key> <value>"),
            },
            "recall" if !args.is_empty() => Self::Recall {
                key: args.to_string(),
            },
            "recall" => Self::Usage("/recall <key>"),
            "forget" if !args.is_empty() => Self::Forget {
                key: args.to_string(),
            },
            "forget" => Self::Usage("/forget <key>"),
            "clear" => match args {
                "history" => Self::Clear { all: false },
                "all" => Self::Clear { all: true },
                _ => Self::Usage("/clear history|all"),
            },
            _ => Self::Task(trimmed.to_string()),
        }
    }
}

/// Runs the `goliath shell` interactive REPL.
pub async fn run_shell(config: &GoliathConfig) -> Result<ExitCode, GoliathError> {
    let engine = bootstrap::build_engine(config).await?;

    let mut rl = DefaultEditor::new()
        .map_err(|e| GoliathError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", "goliath shell".bold().green());
    println!(
        "provider {}, {}. Type {} for commands, {} to exit.\n",
        engine.provider_name().cyan(),
        engine.memory().summary(),
        "/help".yellow(),
        "quit".yellow()
    );

    let prompt = format!("{}> ", "goliath".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let command = ShellCommand::parse(&line);
                if command == ShellCommand::Quit {
                    break;
                }
                if command == ShellCommand::Empty {
                    continue;
                }
                let _ = rl.add_history_entry(line.trim());

                if let Err(e) = handle_command(&engine, command).await {
                    eprintln!("{}: {e}", "error".red());
                }
            }
            // Ctrl+C / Ctrl+D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(ExitCode::SUCCESS)
}

async fn handle_command(engine: &Engine, command: ShellCommand) -> Result<(), GoliathError> {
    let memory = engine.memory();
    match command {
        ShellCommand::Task(task) => {
            let result = engine.execute(&task).await?;
            match result.status {
                EngineStatus::Ok => println!("{}\n", result.text),
                EngineStatus::Blocked => println!("{}\n", result.text.yellow()),
                EngineStatus::Error => eprintln!("{}\n", result.text.red()),
            }
        }
        ShellCommand::Help => println!("{HELP}"),
        ShellCommand::Memory => println!("{}", memory.summary()),
        ShellCommand::History => {
            for line in memory_cmd::render_history(&memory.get_history()) {
                println!("{}", line.dimmed());
            }
        }
        ShellCommand::Facts => {
            for line in memory_cmd::render_facts(memory) {
                println!("{line}");
            }
        }
        ShellCommand::Remember { key, value } => {
            println!("{}", memory_cmd::remember(memory, &key, &value)?.dimmed());
        }
        ShellCommand::Recall { key } => match memory.recall(&key) {
            Some(value) => println!("{value}"),
            None => println!("{}", format!("no fact stored under '{key}'").dimmed()),
        },
        ShellCommand::Forget { key } => {
            println!("{}", memory_cmd::forget(memory, &key)?.dimmed());
        }
        ShellCommand::Clear { all } => {
            println!("{}", memory_cmd::clear(memory, all)?.dimmed());
        }
        ShellCommand::Usage(usage) => eprintln!("usage: {}", usage.yellow()),
        ShellCommand::Quit | ShellCommand::Empty => {}
    }
    Ok(())
}
