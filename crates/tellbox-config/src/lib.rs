// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration for the Tellbox feedback service.
//!
//! Layered TOML loading over the XDG hierarchy with `TELLBOX_*` environment
//! overrides, strict schema checking (`deny_unknown_fields`), and miette
//! diagnostics that point into the offending file and suggest fixes for
//! typoed keys.
//!
//! # Usage
//!
//! ```no_run
//! use tellbox_config::load_and_validate;
//!
//! let config = load_and_validate().expect("config errors");
//! println!("Serving on port {}", config.server.port);
//! ```

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{render_errors, ConfigError};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::TellboxConfig;

/// Load configuration from the XDG hierarchy and validate it.
///
/// The high-level entry point: loads TOML files plus env vars via figment,
/// then runs the semantic checks in [`validation`]. Figment errors come
/// back converted to diagnostics with spans and typo suggestions; semantic
/// failures come back as plain validation errors.
pub fn load_and_validate() -> Result<TellboxConfig, Vec<ConfigError>> {
    validated(loader::load_config(), collect_toml_sources)
}

/// Load configuration from a TOML string only and validate it.
///
/// Useful for testing and explicit configuration.
pub fn load_and_validate_str(toml_content: &str) -> Result<TellboxConfig, Vec<ConfigError>> {
    validated(loader::load_config_from_str(toml_content), || {
        vec![("<inline>".to_string(), toml_content.to_string())]
    })
}

fn validated(
    loaded: Result<TellboxConfig, figment::Error>,
    sources: impl FnOnce() -> Vec<(String, String)>,
) -> Result<TellboxConfig, Vec<ConfigError>> {
    match loaded {
        Ok(config) => {
            validation::validate_config(&config)?;
            Ok(config)
        }
        Err(err) => Err(diagnostic::figment_to_config_errors(err, &sources())),
    }
}

/// Read whichever config files exist, keyed by the path figment reports,
/// so that diagnostics can carry source spans.
fn collect_toml_sources() -> Vec<(String, String)> {
    let mut candidates = vec![std::path::PathBuf::from("/etc/tellbox/tellbox.toml")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("tellbox/tellbox.toml"));
    }
    // Figment reports the local file with an absolute path when the cwd
    // is known.
    let local = std::env::current_dir()
        .map(|d| d.join("tellbox.toml"))
        .unwrap_or_else(|_| "tellbox.toml".into());
    candidates.push(local);

    candidates
        .into_iter()
        .filter_map(|path| {
            let content = std::fs::read_to_string(&path).ok()?;
            Some((path.display().to_string(), content))
        })
        .collect()
}
