// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! TLS policy for provider endpoints.

use std::time::Duration;

use goliath_core::GoliathError;
use tracing::error;

/// Build a reqwest client with TLS 1.2 minimum and the given request timeout.
pub fn build_secure_client(timeout: Duration) -> Result<reqwest::Client, GoliathError> {
    reqwest::Client::builder()
        .min_tls_version(reqwest::tls::Version::TLS_1_2)
        .timeout(timeout)
        .build()
        .map_err(|e| {
            error!("failed to build secure HTTP client: {e}");
            GoliathError::Security(format!("failed to build secure HTTP client: {e}"))
        })
}

/// Validate a provider base URL.
///
/// Localhost endpoints (a local Ollama, a test server) may use plain HTTP;
/// anything remote must use HTTPS since every request carries a credential.
pub fn validate_provider_url(url: &str) -> Result<(), GoliathError> {
    let parsed =
        url::Url::parse(url).map_err(|e| GoliathError::Security(format!("invalid URL: {e}")))?;

    match parsed.scheme() {
        "https" => Ok(()),
        "http" if is_localhost(parsed.host_str().unwrap_or("")) => Ok(()),
        "http" => Err(GoliathError::Security(
            "TLS required for remote providers, use https".to_string(),
        )),
        other => Err(GoliathError::Security(format!(
            "unsupported URL scheme `{other}`"
        ))),
    }
}

/// Check if a host refers to the local machine.
pub fn is_localhost(host: &str) -> bool {
    matches!(host, "localhost" | "::1" | "[::1]") || host.starts_with("127.")
}
