// SPDX-FileCopyrightText: 2026 Starlog Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration diagnostics.
//!
//! Figment reports every problem it meets while extracting [`StarlogConfig`];
//! each one becomes a [`ConfigError`] that miette can render against the
//! offending `starlog.toml`, with a "did you mean" hint for misspelled keys.
//!
//! [`StarlogConfig`]: crate::model::StarlogConfig

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a known key needs before it is offered as a fix.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// One problem with the loaded configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("`{key}` is not a {section} setting")]
    #[diagnostic(
        code(starlog::config::unknown_key),
        help("{}", unknown_key_help(suggestion.as_deref(), known))
    )]
    UnknownKey {
        key: String,
        /// Table the key was found in, `top-level` outside any table.
        section: String,
        suggestion: Option<String>,
        known: String,
        #[label("unknown key")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("`{key}` has the wrong type: found {found}")]
    #[diagnostic(code(starlog::config::wrong_type), help("`{key}` takes {expected}"))]
    WrongType {
        key: String,
        found: String,
        expected: String,
    },

    /// A value deserialized but is out of range or malformed.
    #[error("{message}")]
    #[diagnostic(
        code(starlog::config::invalid_value),
        help("fix `{key}` in starlog.toml or its STARLOG_* variable")
    )]
    Validation { key: &'static str, message: String },

    #[error("could not load configuration: {0}")]
    #[diagnostic(code(starlog::config::load))]
    Load(String),
}

fn unknown_key_help(suggestion: Option<&str>, known: &str) -> String {
    match suggestion {
        Some(key) => format!("did you mean `{key}`? Known keys: {known}"),
        None => format!("known keys: {known}"),
    }
}

/// Turns every error figment collected into a diagnostic.
///
/// `toml_sources` are `(path, content)` pairs; an unknown key found in one of
/// them gets a source span pointing at it.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| match &error.kind {
            Kind::UnknownField(key, known) => {
                let (span, src) = locate_key(&error, key, toml_sources);
                ConfigError::UnknownKey {
                    key: key.clone(),
                    section: error
                        .path
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "top-level".to_string()),
                    suggestion: suggest_key(key, *known),
                    known: known.join(", "),
                    span,
                    src,
                }
            }
            Kind::InvalidType(found, expected) => ConfigError::WrongType {
                key: error.path.join("."),
                found: found.to_string(),
                expected: expected.clone(),
            },
            _ => ConfigError::Load(error.to_string()),
        })
        .collect()
}

fn locate_key(
    error: &figment::Error,
    key: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let file = match error.metadata.as_ref().and_then(|m| m.source.as_ref()) {
        Some(figment::Source::File(path)) => path.display().to_string(),
        _ => return (None, None),
    };
    let Some((name, content)) = toml_sources.iter().find(|(p, _)| *p == file) else {
        return (None, None);
    };
    match find_key_offset(content, &error.path, key) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), key.len())),
            Some(NamedSource::new(name, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `key` within the `[table]` named by the first path element,
/// or within the whole document for top-level keys.
pub fn find_key_offset(content: &str, path: &[String], key: &str) -> Option<usize> {
    let start = match path.first() {
        Some(table) => {
            let header = format!("[{table}]");
            content.find(&header)? + header.len()
        }
        None => 0,
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let body = line.trim_start();
        if body.starts_with('[') {
            break;
        }
        if let Some(rest) = body.strip_prefix(key)
            && rest.trim_start().starts_with('=')
        {
            return Some(offset + line.len() - body.len());
        }
        offset += line.len();
    }
    None
}

/// Closest known key to `unknown`, when it is close enough to be a typo.
pub fn suggest_key<S: AsRef<str>>(unknown: &str, known: &[S]) -> Option<String> {
    known
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key.as_ref()), key.as_ref()))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Prints each error to stderr through miette's graphical report handler.
pub fn render_errors(errors: &[ConfigError]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("config error: {error}"),
        }
    }
}
