// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `tellbox config` command implementation.
//!
//! Prints the effective configuration after file and environment merging,
//! with the admin password redacted so the output is safe to share.

use tellbox_config::TellboxConfig;
use tellbox_core::TellboxError;

const REDACTED: &str = "[redacted]";

/// Runs the `tellbox config` command.
pub fn run_config(config: &TellboxConfig, json: bool) -> Result<(), TellboxError> {
    println!("{}", render_config(config, json)?);
    Ok(())
}

/// Renders the configuration as TOML (default) or JSON.
fn render_config(config: &TellboxConfig, json: bool) -> Result<String, TellboxError> {
    let mut effective = config.clone();
    effective.admin.password = REDACTED.to_string();

    if json {
        serde_json::to_string_pretty(&effective)
            .map_err(|e| TellboxError::Internal(format!("failed to render config: {e}")))
    } else {
        toml::to_string_pretty(&effective)
            .map_err(|e| TellboxError::Internal(format!("failed to render config: {e}")))
    }
}
