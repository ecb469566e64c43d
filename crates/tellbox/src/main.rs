// SPDX-FileCopyrightText: 2026 Tellbox Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tellbox - feedback collection service and admin console.
//!
//! This is the binary entry point for the Tellbox service.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};
use colored::Colorize;

mod admin;
mod config;
mod serve;
mod submit;

/// Tellbox - feedback collection service and admin console.
#[derive(Parser, Debug)]
#[command(name = "tellbox", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the feedback API server.
    Serve,
    /// Submit feedback from the command line.
    Submit(submit::SubmitArgs),
    /// Browse submissions in the interactive admin console.
    Admin,
    /// Print the effective configuration.
    Config {
        /// Output JSON instead of TOML.
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup
    let config = match tellbox_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            tellbox_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Submit(args)) => submit::run_submit(&config, &args).await,
        Some(Commands::Admin) => admin::run_admin(&config).await,
        Some(Commands::Config { json }) => config::run_config(&config, json),
        None => {
            println!("tellbox: use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}
