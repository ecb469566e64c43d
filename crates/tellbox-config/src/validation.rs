// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks on deserialized configuration.
//!
//! Everything serde cannot express: the bind host has to look like an
//! address, the client base URL needs a scheme, admin credentials must
//! not be blank.

use crate::diagnostic::ConfigError;
use crate::model::TellboxConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Check a deserialized configuration for semantic correctness.
///
/// Runs every check and collects all failures rather than stopping at
/// the first, so one edit-reload cycle surfaces the full damage.
pub fn validate_config(config: &TellboxConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    // Port 0 would bind an arbitrary ephemeral port, which the client could
    // never be configured to find.
    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must not be 0".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.server.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "server.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.server.log_level
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    // The HTTP client needs an absolute URL with a scheme.
    let base_url = config.client.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "client.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("client.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    if config.client.session_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "client.session_path must not be empty".to_string(),
        });
    }

    // An empty username or password would make the admin console
    // permanently inaccessible.
    if config.admin.username.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "admin.username must not be empty".to_string(),
        });
    }

    if config.admin.password.is_empty() {
        errors.push(ConfigError::Validation {
            message: "admin.password must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
