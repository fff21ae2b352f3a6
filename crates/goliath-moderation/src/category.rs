// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Harm categories and their user-facing block messages.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Marker that prefixes every block message.
pub const BLOCKED_MARKER: &str = "[BLOCKED]";

/// Verdict category of the moderation screen.
///
/// Labels are wire-visible (`illegal_activity`, `self_harm`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ModerationCategory {
    None,
    IllegalActivity,
    Violence,
    HateSpeech,
    Harassment,
    SelfHarm,
    SexualExploitation,
    SpamFraud,
}

impl ModerationCategory {
    /// Every blocking category, in evaluation order.
    pub const EVALUATION_ORDER: [ModerationCategory; 7] = [
        Self::SelfHarm,
        Self::SexualExploitation,
        Self::IllegalActivity,
        Self::Violence,
        Self::HateSpeech,
        Self::Harassment,
        Self::SpamFraud,
    ];

    /// Short human-readable description.
    pub fn description(self) -> &'static str {
        match self {
            Self::None => "no policy concern",
            Self::IllegalActivity => "illegal activity",
            Self::Violence => "violence or threats",
            Self::HateSpeech => "hate speech",
            Self::Harassment => "harassment or stalking",
            Self::SelfHarm => "self-harm",
            Self::SexualExploitation => "the sexual exploitation of minors",
            Self::SpamFraud => "spam or fraud",
        }
    }

    /// Deterministic message shown to the user when a task is blocked.
    ///
    /// Never contains the matched pattern or any part of the input.
    pub fn blocked_message(self) -> String {
        match self {
            Self::SelfHarm => format!(
                "{BLOCKED_MARKER} It sounds like you may be going through a difficult time. \
                 Goliath cannot help with this request, but you do not have to face it alone. \
                 In the US, call or text 988 (Suicide & Crisis Lifeline) or text HOME to 741741. \
                 Elsewhere, find a local crisis centre at https://www.iasp.info/resources/Crisis_Centres/"
            ),
            other => format!(
                "{BLOCKED_MARKER} This request appears to involve {}. Goliath cannot assist with this.",
                other.description()
            ),
        }
    }
}
