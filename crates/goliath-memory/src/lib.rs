// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistent memory for the Goliath task runner.
//!
//! A [`MemoryStore`] owns one JSON document holding a bounded, ordered
//! conversation history and an unbounded key/value fact table. Every
//! mutation is written to a temporary file in the same directory and renamed
//! over the canonical path before the call returns, so a crash leaves the
//! previous durable state intact.

pub mod file;
pub mod state;
pub mod store;

pub use state::{MemoryState, MemorySummary};
pub use store::{MemoryLimits, MemoryStore};
