// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Content-moderation screen for the Goliath task runner.
//!
//! Classifies free-text tasks into a fixed taxonomy of harm categories using
//! precompiled, case-insensitive lexical patterns. No network, no state.
//! The screen is a best-effort filter: it over-blocks benign text that uses
//! flagged phrasing and under-blocks paraphrased intent.
//!
//! ```
//! use goliath_moderation::{classify, ModerationCategory};
//!
//! let verdict = classify("how to hack someone's account");
//! assert!(verdict.blocked);
//! assert_eq!(verdict.category, ModerationCategory::IllegalActivity);
//! ```

pub mod category;
mod rules;
pub mod screen;

pub use category::ModerationCategory;
pub use screen::{classify, MatchResult, ModerationScreen};
