// SPDX-FileCopyrightText: 2026 Goliath Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostics for rejected `goliath.toml` files.
//!
//! Figment reports every problem it finds in one error value. This module
//! splits that value into [`ConfigError`]s, points unknown keys back at the
//! line that introduced them, and offers the closest valid key name when a
//! key or provider looks like a typo.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::fmt::{self, Write as _};

use figment::error::Kind;
use miette::{Diagnostic, GraphicalReportHandler, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a candidate must beat to be offered as a correction.
///
/// High enough that `zzzzzz` suggests nothing, low enough that
/// `max_histroy` still finds `max_history`.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// One problem with the loaded configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key that no section of `goliath.toml` declares.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(goliath::config::unknown_key),
        help("{}", correction_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        key: String,
        /// Closest declared key, when one is close enough.
        suggestion: Option<String>,
        /// Comma-separated keys the enclosing section accepts.
        valid_keys: String,
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(goliath::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        /// Dotted path, e.g. `memory.max_history`.
        key: String,
        detail: String,
        expected: String,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(goliath::config::missing_key),
        help("add `{key} = <value>` to your goliath.toml")
    )]
    MissingKey { key: String },

    /// `engine.provider` names none of the built-in providers.
    #[error("unknown provider `{name}`")]
    #[diagnostic(
        code(goliath::config::unknown_provider),
        help("{}", correction_help(suggestion.as_deref(), valid_names))
    )]
    UnknownProvider {
        name: String,
        suggestion: Option<String>,
        valid_names: String,
    },

    /// A value that parsed but is out of range or inconsistent.
    #[error("validation error: {message}")]
    #[diagnostic(code(goliath::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(goliath::config::other))]
    Other(String),
}

fn correction_help(suggestion: Option<&str>, valid: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid}"),
        None => format!("valid keys: {valid}"),
    }
}

/// Split a figment error into one diagnostic per problem.
///
/// `toml_sources` pairs each file path with its contents; they are only used
/// to attach a source span to unknown keys.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(field, expected) => {
                let (span, src) = locate_key(&error, field, toml_sources).unzip();
                ConfigError::UnknownKey {
                    key: field.clone(),
                    suggestion: suggest_key(field, expected),
                    valid_keys: expected.join(", "),
                    span,
                    src,
                }
            }
            Kind::MissingField(field) => ConfigError::MissingKey {
                key: field.to_string(),
            },
            Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                key: error.path.join("."),
                detail: format!("found {actual}, expected {expected}"),
                expected: expected.clone(),
            },
            _ => ConfigError::Other(error.to_string()),
        })
        .collect()
}

/// Find the file that produced `error` and the span of `field` inside it.
fn locate_key(
    error: &figment::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> Option<(SourceSpan, NamedSource<String>)> {
    let origin = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|source| match source {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    let (path, content) = match origin {
        Some(origin) => toml_sources.iter().find(|(path, _)| *path == origin)?,
        // Inline strings carry no file metadata; a single source is unambiguous.
        None if toml_sources.len() == 1 => toml_sources.first()?,
        None => return None,
    };

    let offset = find_key_offset(content, &error.path, field)?;
    Some((
        SourceSpan::new(offset.into(), field.len()),
        NamedSource::new(path, content.clone()),
    ))
}

/// Byte offset of `field` as a key under the `[section]` header named by
/// `section`, or at the top of the file when `section` is empty.
fn find_key_offset(content: &str, section: &[String], field: &str) -> Option<usize> {
    let start = if section.is_empty() {
        0
    } else {
        let header = format!("[{}]", section.join("."));
        content.find(&header)? + header.len()
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let key = line.trim_start();
        if let Some(rest) = key.strip_prefix(field)
            && rest.trim_start().starts_with('=')
        {
            return Some(offset + line.len() - key.len());
        }
        offset += line.len();
    }
    None
}

/// Closest entry of `candidates` to `unknown`, if any is close enough.
pub fn suggest_key(unknown: &str, candidates: &[&str]) -> Option<String> {
    candidates
        .iter()
        .map(|candidate| (strsim::jaro_winkler(unknown, candidate), *candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.to_string())
}

/// Render every error into `out` with miette's graphical handler.
pub fn write_errors(out: &mut impl fmt::Write, errors: &[ConfigError]) -> fmt::Result {
    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        if handler.render_report(&mut report, error).is_ok() {
            out.write_str(&report)?;
        } else {
            writeln!(out, "Error: {error}")?;
        }
    }
    Ok(())
}

/// Print every error to stderr.
pub fn render_errors(errors: &[ConfigError]) {
    let mut rendered = String::new();
    // Writing into a String cannot fail.
    let _ = write_errors(&mut rendered, errors);
    eprint!("{rendered}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_typo_suggests_closest_name() {
        let names = &["grok", "openai", "anthropic", "ollama"];
        assert_eq!(suggest_key("olama", names), Some("ollama".to_string()));
        assert_eq!(suggest_key("anthropik", names), Some("anthropic".to_string()));
    }

    #[test]
    fn field_typo_suggests_memory_key() {
        let keys = &["max_history", "max_fact_key_chars", "path"];
        assert_eq!(suggest_key("max_histroy", keys), Some("max_history".to_string()));
    }

    #[test]
    fn distant_name_suggests_nothing() {
        let keys = &["provider", "max_task_chars", "log_level"];
        assert_eq!(suggest_key("zzzzzz", keys), None);
    }

    #[test]
    fn key_offset_is_scoped_to_its_section() {
        let content = "api_kye = 1\n[engine]\nprovider = \"grok\"\n\n\
                       [providers.grok]\n  api_kye = \"x\"\n";
        let section = vec!["providers".to_string(), "grok".to_string()];
        let offset = find_key_offset(content, &section, "api_kye").unwrap();
        assert_eq!(&content[offset..offset + 7], "api_kye");
        assert!(offset > content.find("[providers.grok]").unwrap());
    }

    #[test]
    fn key_offset_ignores_longer_keys_with_same_prefix() {
        let content = "[memory]\npath_override = 1\npath = \"x\"\n";
        let offset = find_key_offset(content, &["memory".to_string()], "path").unwrap();
        assert_eq!(offset, content.find("path =").unwrap());
    }

    #[test]
    fn missing_section_has_no_offset() {
        let content = "[engine]\nprovider = \"grok\"\n";
        assert_eq!(find_key_offset(content, &["memory".to_string()], "path"), None);
    }

    #[test]
    fn written_report_names_key_and_suggestion() {
        let errors = vec![ConfigError::UnknownProvider {
            name: "olama".to_string(),
            suggestion: Some("ollama".to_string()),
            valid_names: "grok, openai, anthropic, ollama".to_string(),
        }];
        let mut out = String::new();
        write_errors(&mut out, &errors).unwrap();
        assert!(out.contains("olama"));
        assert!(out.contains("ollama"));
    }
}
