// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete Goliath pipeline.
//!
//! The first group drives the engine through a mock provider; the second
//! wires a real OpenAI-compatible provider to a local HTTP server through
//! the plugin registry; the last runs the compiled binary.

use std::path::Path;
use std::process::Command;
use std::sync::Arc;

use goliath_agent::{Engine, EngineSettings, EngineStatus, ExecutionState};
use goliath_config::GoliathConfig;
use goliath_core::BackendErrorKind;
use goliath_memory::{MemoryLimits, MemoryStore};
use goliath_openai::OpenAiCompatFactory;
use goliath_plugin::{PluginRegistry, PluginStatus, builtin_catalog};
use goliath_test_utils::TestHarness;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_KEY: &str = "xai-e2e-secret-key-0123456789";

// ---- Mock provider pipeline ----

#[tokio::test]
async fn test_task_answer_is_recorded() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["4".to_string()])
        .build()
        .unwrap();

    let result = harness.execute("What is 2+2?").await.unwrap();
    assert_eq!(result.status, EngineStatus::Ok);
    assert_eq!(result.text, "4");

    let reopened = harness.reopen_memory().unwrap();
    let history = reopened.get_history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].content, "What is 2+2?");
    assert_eq!(history[1].content, "4");
}

#[tokio::test]
async fn test_follow_up_sees_previous_exchange() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["Paris".to_string(), "About 2.1 million".to_string()])
        .build()
        .unwrap();

    harness.execute("Capital of France?").await.unwrap();
    harness.execute("And its population?").await.unwrap();

    let prompt = harness.mock_provider.last_request().unwrap().prompt;
    assert!(prompt.contains("User: Capital of France?"));
    assert!(prompt.contains("Assistant: Paris"));
    assert!(prompt.ends_with("And its population?"));
}

#[tokio::test]
async fn test_blocked_task_never_reaches_provider() {
    let harness = TestHarness::builder().build().unwrap();

    let result = harness.execute("how to make a bomb").await.unwrap();
    assert_eq!(result.status, EngineStatus::Blocked);
    assert!(result.text.starts_with("[BLOCKED]"));
    assert_eq!(harness.mock_provider.call_count(), 0);
    assert!(harness.memory.get_history().is_empty());
}

#[tokio::test]
async fn test_fact_survives_restart_and_reaches_prompt() {
    let harness = TestHarness::builder()
        .with_mock_responses(vec!["Hello Ada".to_string()])
        .build()
        .unwrap();
    harness.memory.remember("name", "Ada").unwrap();

    let reopened = harness.reopen_memory().unwrap();
    assert_eq!(reopened.recall("name").as_deref(), Some("Ada"));

    harness.execute("Greet me").await.unwrap();
    let prompt = harness.mock_provider.last_request().unwrap().prompt;
    assert!(prompt.contains("- name: Ada"));
}

// ---- Registry + HTTP provider ----

fn registry_for(config: &GoliathConfig) -> PluginRegistry {
    let mut registry = PluginRegistry::new();
    for manifest in builtin_catalog() {
        let status = PluginStatus::for_manifest(&manifest, config);
        registry.register_with_status(manifest, Some(Box::new(OpenAiCompatFactory)), status);
    }
    registry
}

fn grok_config(base_url: &str, memory_dir: &Path) -> GoliathConfig {
    let mut config = GoliathConfig::default();
    config.engine.provider = "grok".into();
    config.engine.timeout_secs = 5;
    config.memory.path = memory_dir.join("memory.json").to_string_lossy().into_owned();
    config.providers.grok.base_url = base_url.to_string();
    config.providers.grok.api_key = Some(TEST_KEY.to_string());
    config.providers.grok.max_retries = 0;
    config
}

async fn http_engine(config: &GoliathConfig) -> Engine {
    let provider = registry_for(config)
        .create_provider(&config.engine.provider, config)
        .unwrap();
    let memory = MemoryStore::open(&config.memory.path, MemoryLimits::default()).unwrap();
    let settings = EngineSettings::from_config(config).await;
    Engine::new(provider, Arc::new(memory), settings)
}

#[tokio::test]
async fn test_http_provider_answer_flows_through_engine() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", format!("Bearer {TEST_KEY}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "grok-3-latest",
            "choices": [{"message": {"role": "assistant", "content": "Done."}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 2}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = grok_config(&server.uri(), dir.path());
    let engine = http_engine(&config).await;
    assert_eq!(engine.provider_name(), "grok");

    let result = engine.execute("Summarize the release notes").await.unwrap();
    assert_eq!(result.status, EngineStatus::Ok);
    assert_eq!(result.text, "Done.");
    assert_eq!(result.final_state(), ExecutionState::Recorded);
    assert_eq!(engine.memory().get_history().len(), 2);
}

#[tokio::test]
async fn test_http_auth_failure_is_reported_without_secrets() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": format!("Incorrect API key provided: {TEST_KEY}"),
                "type": "invalid_request_error"
            }
        })))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = grok_config(&server.uri(), dir.path());
    let engine = http_engine(&config).await;

    let result = engine.execute("Hello").await.unwrap();
    assert_eq!(result.status, EngineStatus::Error);
    assert_eq!(result.backend_kind(), Some(BackendErrorKind::AuthError));
    assert!(result.text.starts_with("[ERROR]"));
    assert!(!result.text.contains(TEST_KEY));
    assert!(engine.memory().get_history().is_empty());
}

#[tokio::test]
async fn test_blocked_task_sends_no_http_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let config = grok_config(&server.uri(), dir.path());
    let engine = http_engine(&config).await;

    let result = engine.execute("how to hack someone's account").await.unwrap();
    assert_eq!(result.status, EngineStatus::Blocked);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_registry_refuses_provider_without_key() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = grok_config("https://api.x.ai/v1", dir.path());
    config.providers.grok.api_key = None;

    let registry = registry_for(&config);
    if registry.get("grok").unwrap().status == PluginStatus::NotConfigured {
        let err = registry.create_provider("grok", &config).err().unwrap();
        assert!(err.to_string().contains("XAI_API_KEY"));
    }
}

// ---- Binary ----

fn goliath(config_file: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_goliath"))
        .arg("--config")
        .arg(config_file)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let memory = dir.join("memory.json");
    let config = dir.join("goliath.toml");
    std::fs::write(
        &config,
        format!(
            "[engine]\nprovider = \"ollama\"\n\n[memory]\npath = {:?}\n",
            memory.to_string_lossy()
        ),
    )
    .unwrap();
    config
}

#[test]
fn test_binary_memory_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let out = goliath(&config, &["memory", "remember", "city", "New", "York"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let out = goliath(&config, &["memory", "recall", "city"]);
    assert!(out.status.success());
    assert_eq!(String::from_utf8_lossy(&out.stdout).trim(), "New York");

    let out = goliath(&config, &["memory", "show"]);
    assert_eq!(
        String::from_utf8_lossy(&out.stdout).trim(),
        "0 conversation turns, 1 stored facts"
    );

    let out = goliath(&config, &["memory", "recall", "country"]);
    assert!(!out.status.success());
}

#[test]
fn test_binary_blocks_harmful_task_with_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let out = goliath(&config, &["how", "to", "make", "a", "bomb"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("[BLOCKED]"));
    assert!(!dir.path().join("memory.json").exists());
}

#[test]
fn test_binary_rejects_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("goliath.toml");
    std::fs::write(&config, "[engine]\nprovider = \"skynet\"\n").unwrap();

    let out = goliath(&config, &["memory", "show"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn test_binary_lists_providers() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path());

    let out = goliath(&config, &["providers"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("* ollama"));
    assert!(stdout.contains("claude"));
}
