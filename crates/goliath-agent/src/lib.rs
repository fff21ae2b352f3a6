// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Task execution engine for the Goliath task runner.
//!
//! The [`Engine`] runs one task through a fixed sequence of gates:
//! - length validation
//! - moderation screen (short-circuits on a block)
//! - context assembly from stored facts and recent history
//! - dispatch to the active provider under a deadline
//! - recording of the exchange in the memory store
//!
//! Validation failures, blocks and backend failures come back as
//! [`EngineResult`] values. Only storage failures escape as errors.

pub mod context;
pub mod engine;
pub mod result;
pub mod state;

pub use context::{assemble_prompt, load_system_prompt, DEFAULT_SYSTEM_PROMPT};
pub use engine::{Engine, EngineSettings};
pub use result::{EngineResult, EngineStatus, FailureKind};
pub use state::ExecutionState;
