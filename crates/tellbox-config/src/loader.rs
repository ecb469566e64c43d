// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./tellbox.toml` > `~/.config/tellbox/tellbox.toml` > `/etc/tellbox/tellbox.toml`
//! with environment variable overrides via `TELLBOX_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::TellboxConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/tellbox/tellbox.toml` (system-wide)
/// 3. `~/.config/tellbox/tellbox.toml` (user XDG config)
/// 4. `./tellbox.toml` (local directory)
/// 5. `TELLBOX_*` environment variables
pub fn load_config() -> Result<TellboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TellboxConfig::default()))
        .merge(Toml::file("/etc/tellbox/tellbox.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("tellbox/tellbox.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("tellbox.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a specific TOML string only (no XDG lookup).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<TellboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TellboxConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<TellboxConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(TellboxConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Environment variable provider with section-to-dot key mapping.
///
/// `Env::split("_")` would be ambiguous for key names that themselves
/// contain underscores: `TELLBOX_STORAGE_DATABASE_PATH` must map to
/// `storage.database_path`, not `storage.database.path`. An explicit
/// `map()` over the known section prefixes sidesteps that.
fn env_provider() -> Env {
    Env::prefixed("TELLBOX_").map(|key| {
        // Figment hands over the lowercased var name with the prefix
        // stripped, e.g. TELLBOX_STORAGE_DATABASE_PATH -> "storage_database_path".
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("client_", "client.", 1)
            .replacen("admin_", "admin.", 1);
        mapped.into()
    })
}
