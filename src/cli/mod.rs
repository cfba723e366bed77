//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for snaplink using clap's derive macros.

use clap::{Parser, Subcommand};

use crate::config::DEFAULT_CONFIG_PATH;

/// Snaplink - A URL shortener with owner-scoped links and click counting
#[derive(Parser, Debug)]
#[command(name = "snaplink")]
#[command(version)]
#[command(about = "A URL shortener with owner-scoped links and click counting", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c', global = true, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve,

    /// Mint a bearer token for a user id
    ///
    /// Requires `auth.jwt_secret` to be set so the server accepts the token.
    Token {
        /// Opaque owner id placed in the token subject
        user_id: String,
    },

    /// Print a sample config.toml
    Config,
}

impl Cli {
    /// Subcommand to run; no subcommand means `serve`
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Serve)
    }
}
