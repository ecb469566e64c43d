// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns Figment's deserialization errors into miette diagnostics: source
//! spans pointing at the offending TOML, the list of keys a section accepts,
//! and a Jaro-Winkler "did you mean?" suggestion for typos.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Minimum Jaro-Winkler similarity score to suggest a correction.
/// 0.75 catches common typos like `prot` -> `port` and
/// `databse_path` -> `database_path` while filtering noise.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A configuration defect, carrying whatever context miette needs to
/// render it: span, suggestion, accepted keys.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key no section accepts.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(tellbox::config::unknown_key),
        help("{}", format_unknown_key_help(suggestion.as_deref(), valid_keys))
    )]
    UnknownKey {
        /// The key as written.
        key: String,
        /// Closest accepted key, when one is close enough.
        suggestion: Option<String>,
        /// Comma-separated keys the section accepts.
        valid_keys: String,
        /// Where the key sits in the TOML source.
        #[label("this key is not recognized")]
        span: Option<SourceSpan>,
        /// The TOML file the span points into.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A value whose TOML type does not match the field.
    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(
        code(tellbox::config::invalid_type),
        help("expected {expected}")
    )]
    InvalidType {
        /// Dotted path of the mistyped key.
        key: String,
        /// What was found versus what the field wants.
        detail: String,
        /// The expected type, for the help line.
        expected: String,
        /// Where the value sits in the TOML source.
        #[label("wrong type here")]
        span: Option<SourceSpan>,
        /// The TOML file the span points into.
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    /// A key the schema requires but no layer supplied.
    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(tellbox::config::missing_key),
        help("add `{key} = <value>` to your tellbox.toml")
    )]
    MissingKey {
        /// The absent key name.
        key: String,
    },

    /// A well-typed value that fails a semantic check.
    #[error("validation error: {message}")]
    #[diagnostic(code(tellbox::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Anything figment reports that has no dedicated variant.
    #[error("configuration error: {0}")]
    #[diagnostic(code(tellbox::config::other))]
    Other(String),
}

fn format_unknown_key_help(suggestion: Option<&str>, valid_keys: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid keys: {valid_keys}"),
        None => format!("valid keys: {valid_keys}"),
    }
}

/// Convert a `figment::Error` into a list of `ConfigError` diagnostics.
///
/// A figment error iterates over several underlying errors; each maps to
/// the matching `ConfigError` variant. Unknown-field errors additionally
/// get a typo suggestion and, when the source file is known, a span.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| convert_one(error, toml_sources))
        .collect()
}

fn convert_one(error: figment::Error, toml_sources: &[(String, String)]) -> ConfigError {
    use figment::error::Kind;

    match &error.kind {
        Kind::UnknownField(field, expected) => {
            let valid_keys: Vec<&str> = expected.to_vec();
            let suggestion = suggest_key(field, &valid_keys);
            let (span, src) = find_source_span(&error, field, toml_sources);

            ConfigError::UnknownKey {
                key: field.clone(),
                suggestion,
                valid_keys: valid_keys.join(", "),
                span,
                src,
            }
        }
        Kind::MissingField(field) => ConfigError::MissingKey {
            key: field.clone().into_owned(),
        },
        Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
            key: dotted_path(&error),
            detail: format!("found {actual}, expected {expected}"),
            expected: expected.to_string(),
            span: None,
            src: None,
        },
        _ => ConfigError::Other(format!("{error}")),
    }
}

/// The error's key path as `section.key`.
fn dotted_path(error: &figment::Error) -> String {
    error
        .path
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

/// Locate the span of an offending key in the TOML source files, if the
/// figment metadata identifies which file it came from.
fn find_source_span(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let source_path = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    let Some(path) = source_path else {
        return (None, None);
    };
    let Some((path, content)) = toml_sources
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(p, content)| (p.as_str(), content.as_str()))
    else {
        return (None, None);
    };

    // The error path names the section, e.g. ["server"] for `server.prot`.
    let section: Vec<String> = error.path.iter().map(|s| s.to_string()).collect();

    match find_key_offset(content, &section, field) {
        Some(offset) => {
            let span = SourceSpan::new(offset.into(), field.len());
            let named = NamedSource::new(path, content.to_string());
            (Some(span), Some(named))
        }
        None => (None, None),
    }
}

/// Find the byte offset of a key in TOML content, relative to a section path.
///
/// For `path = ["server"]` and `field = "prot"`, finds the `[server]` header
/// then searches for `prot` after it. Top-level fields search from the start.
pub fn find_key_offset(content: &str, path: &[String], field: &str) -> Option<usize> {
    let search_start = match path.first() {
        None => 0,
        Some(section) => {
            let header = format!("[{section}]");
            content.find(&header)? + header.len()
        }
    };

    // The key must start a line (after indentation) and be followed by
    // whitespace or '=' so that prefixes of longer keys don't match.
    let mut line_start = search_start;
    for line in content[search_start..].split_inclusive('\n') {
        let trimmed = line.trim_start();
        let is_key = trimmed.strip_prefix(field).is_some_and(|after| {
            after.starts_with(' ') || after.starts_with('=') || after.starts_with('\t')
        });
        if is_key {
            return Some(line_start + (line.len() - trimmed.len()));
        }
        line_start += line.len();
    }

    None
}

/// Suggest a similar key name using Jaro-Winkler string similarity.
///
/// Returns the closest valid key scoring above the threshold, or `None`
/// when nothing comes near.
pub fn suggest_key(unknown: &str, valid_keys: &[&str]) -> Option<String> {
    valid_keys
        .iter()
        .map(|key| (strsim::jaro_winkler(unknown, key), *key))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, key)| key.to_string())
}

/// Render a list of `ConfigError`s to stderr using miette's graphical handler.
pub fn render_errors(errors: &[ConfigError]) {
    use miette::GraphicalReportHandler;

    let handler = GraphicalReportHandler::new();
    for error in errors {
        let mut rendered = String::new();
        match handler.render_report(&mut rendered, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{rendered}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suggest_prot_for_port() {
        let valid = &["host", "port", "log_level"];
        assert_eq!(suggest_key("prot", valid), Some("port".to_string()));
    }

    #[test]
    fn suggest_databse_path_for_database_path() {
        let valid = &["database_path"];
        assert_eq!(
            suggest_key("databse_path", valid),
            Some("database_path".to_string())
        );
    }

    #[test]
    fn no_suggestion_for_distant_typo() {
        let valid = &["host", "port", "log_level"];
        assert_eq!(suggest_key("zzzzzz", valid), None);
    }

    #[test]
    fn find_key_offset_in_section() {
        let content = "[server]\nprot = 4000\n";
        let path = vec!["server".to_string()];
        let offset = find_key_offset(content, &path, "prot");
        assert!(offset.is_some());
        let o = offset.unwrap();
        assert_eq!(&content[o..o + 4], "prot");
    }

    #[test]
    fn find_key_offset_skips_longer_keys_sharing_a_prefix() {
        let content = "[client]\nbase_url_extra = \"x\"\nbase_url = \"y\"\n";
        let path = vec!["client".to_string()];
        let offset = find_key_offset(content, &path, "base_url").unwrap();
        assert_eq!(&content[offset..offset + 8], "base_url");
        assert!(content[offset..].starts_with("base_url ="));
    }
}
