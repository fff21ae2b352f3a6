// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goliath - a plugin-driven task runner.
//!
//! This is the binary entry point.

mod bootstrap;
mod doctor;
mod memory_cmd;
mod providers;
mod shell;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use goliath_agent::EngineStatus;
use goliath_config::GoliathConfig;
use goliath_security::{RedactingWriter, SecretList};

/// Goliath - screen a task, route it to a model backend, remember the exchange.
#[derive(Parser, Debug)]
#[command(name = "goliath", version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Task to run once. Words are joined with spaces.
    task: Vec<String>,

    /// Provider to use instead of `engine.provider`.
    #[arg(long, global = true)]
    provider: Option<String>,

    /// Load this config file instead of the search path.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive REPL session.
    Shell,
    /// Inspect or edit stored history and facts.
    Memory {
        #[command(subcommand)]
        action: memory_cmd::MemoryAction,
    },
    /// List built-in providers and their status.
    Providers,
    /// Run diagnostic checks.
    Doctor {
        /// Disable colored output.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => goliath_config::load_and_validate_path(path),
        None => goliath_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            goliath_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };
    if let Some(provider) = cli.provider {
        config.engine.provider = provider;
    }

    let secrets: SecretList = Default::default();
    for secret in goliath_plugin::known_secrets(&config) {
        RedactingWriter::<std::io::Stderr>::add_secret(&secrets, secret);
    }
    init_tracing(&config.engine.log_level, secrets);

    let outcome = match cli.command {
        Some(Commands::Shell) => shell::run_shell(&config).await,
        Some(Commands::Memory { action }) => memory_cmd::run_memory(&config, action),
        Some(Commands::Providers) => {
            providers::run_providers(&config);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Doctor { plain }) => {
            doctor::run_doctor(&config, cli.config.as_deref(), plain).await
        }
        None if cli.task.is_empty() => {
            println!("goliath: pass a task, or use --help for available commands");
            Ok(ExitCode::SUCCESS)
        }
        None => run_task(&config, &cli.task.join(" ")).await,
    };

    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// One-shot mode: run a task and print the answer, block or error text.
async fn run_task(
    config: &GoliathConfig,
    task: &str,
) -> Result<ExitCode, goliath_core::GoliathError> {
    let engine = bootstrap::build_engine(config).await?;
    let result = engine.execute(task).await?;

    match result.status {
        EngineStatus::Ok => {
            println!("{}", result.text);
            Ok(ExitCode::SUCCESS)
        }
        EngineStatus::Blocked | EngineStatus::Error => {
            eprintln!("{}", result.text);
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str, secrets: SecretList) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("goliath={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(move || RedactingWriter::new(std::io::stderr(), secrets.clone()))
        .init();
}
