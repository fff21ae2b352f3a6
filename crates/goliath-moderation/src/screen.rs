// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Compiled moderation screen and the `classify` entry point.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};
use unicode_normalization::UnicodeNormalization;

use crate::category::ModerationCategory;
use crate::rules::{CategorySpec, CATEGORIES};

/// Verdict of the moderation screen for one input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchResult {
    pub blocked: bool,
    pub category: ModerationCategory,
    /// Identifier of the rule that fired, for logs and diagnostics only.
    pub matched_pattern: Option<&'static str>,
}

impl MatchResult {
    /// The verdict for input that matched nothing.
    pub const ALLOWED: MatchResult = MatchResult {
        blocked: false,
        category: ModerationCategory::None,
        matched_pattern: None,
    };

    fn blocked(category: ModerationCategory, rule_id: &'static str) -> Self {
        Self {
            blocked: true,
            category,
            matched_pattern: Some(rule_id),
        }
    }
}

struct CompiledRule {
    id: &'static str,
    regex: Regex,
    excluded_targets: &'static [&'static str],
    yields_to_input_allow: bool,
}

struct CompiledCategory {
    category: ModerationCategory,
    rules: Vec<CompiledRule>,
    span_allow: Vec<Regex>,
    input_allow: Vec<Regex>,
}

/// An ordered list of compiled categories.
///
/// Evaluation stops at the first category with a hit that survives its
/// allow-lists, so an input matching several categories always reports the
/// same one.
pub struct ModerationScreen {
    categories: Vec<CompiledCategory>,
}

static BUILTIN: LazyLock<ModerationScreen> = LazyLock::new(|| {
    ModerationScreen::from_specs(CATEGORIES).expect("valid moderation regex")
});

/// Classify a task with the built-in screen.
///
/// Pure and deterministic. Never fails: text that is not matched by any
/// pattern, including empty input and control characters, is allowed.
pub fn classify(input: &str) -> MatchResult {
    BUILTIN.classify(input)
}

impl ModerationScreen {
    /// The process-wide built-in screen.
    pub fn builtin() -> &'static ModerationScreen {
        &BUILTIN
    }

    fn from_specs(specs: &[CategorySpec]) -> Result<Self, regex::Error> {
        let categories = specs
            .iter()
            .map(|spec| {
                let rules = spec
                    .rules
                    .iter()
                    .map(|rule| {
                        Ok(CompiledRule {
                            id: rule.id,
                            regex: compile(rule.pattern)?,
                            excluded_targets: rule.excluded_targets,
                            yields_to_input_allow: rule.yields_to_input_allow,
                        })
                    })
                    .collect::<Result<Vec<_>, regex::Error>>()?;
                Ok(CompiledCategory {
                    category: spec.category,
                    rules,
                    span_allow: compile_all(spec.span_allow)?,
                    input_allow: compile_all(spec.input_allow)?,
                })
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;
        Ok(Self { categories })
    }

    /// Classify one input.
    pub fn classify(&self, input: &str) -> MatchResult {
        if input.trim().is_empty() {
            return MatchResult::ALLOWED;
        }

        // Fold compatibility forms (full-width letters, ligatures) onto ASCII.
        let text: String = input.nfkc().collect();

        for category in &self.categories {
            if let Some(rule_id) = category.first_hit(&text) {
                return MatchResult::blocked(category.category, rule_id);
            }
        }
        MatchResult::ALLOWED
    }

    /// Number of compiled rules across all categories.
    pub fn rule_count(&self) -> usize {
        self.categories.iter().map(|c| c.rules.len()).sum()
    }
}

impl CompiledCategory {
    fn first_hit(&self, text: &str) -> Option<&'static str> {
        let input_allowed = self.input_allow.iter().any(|allow| allow.is_match(text));

        for rule in &self.rules {
            if input_allowed && rule.yields_to_input_allow {
                continue;
            }
            for caps in rule.regex.captures_iter(text) {
                let Some(hit) = caps.get(0) else { continue };

                if let Some(target) = caps.name("target")
                    && is_excluded(target.as_str(), rule.excluded_targets)
                {
                    continue;
                }

                if self
                    .span_allow
                    .iter()
                    .any(|allow| matches_at(allow, text, hit.start()))
                {
                    continue;
                }

                return Some(rule.id);
            }
        }
        None
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

fn compile_all(patterns: &[&str]) -> Result<Vec<Regex>, regex::Error> {
    patterns.iter().map(|p| compile(p)).collect()
}

fn matches_at(regex: &Regex, text: &str, start: usize) -> bool {
    regex
        .find_at(text, start)
        .is_some_and(|m| m.start() == start)
}

/// Whether `target` is an excluded word or its plural.
fn is_excluded(target: &str, excluded: &[&str]) -> bool {
    let target = target.to_lowercase();
    excluded.iter().any(|word| {
        target == *word
            || target.strip_suffix('s') == Some(*word)
            || target.strip_suffix("es") == Some(*word)
    })
}
