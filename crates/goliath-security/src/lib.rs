// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Security helpers for the Goliath task runner.
//!
//! Provides secret redaction for log output and user-facing error text, and
//! the TLS policy applied to provider endpoints.

pub mod redact;
pub mod tls;

pub use redact::{redact, RedactingWriter, SecretList};
pub use tls::{build_secure_client, is_localhost, validate_provider_url};
