// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Goliath integration tests.
//!
//! Provides a scripted provider and a harness that wires it to a real
//! engine and a memory store in a temporary directory, so tests run without
//! network access.
//!
//! # Components
//!
//! - [`MockProvider`] - provider with queued replies and injected failures
//! - [`TestHarness`] - engine + temp memory store + mock provider

pub mod harness;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::MockProvider;
