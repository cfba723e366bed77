//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - Token mode (mint a bearer token and exit)
//! - Config mode (print a sample configuration and exit)

pub mod server;

pub use server::{build_app, run_server};

use anyhow::{Result, bail};

use crate::api::JwtService;
use crate::config::{StaticConfig, get_config};

/// Print a bearer token for `user_id`
///
/// Refuses to run with an empty `auth.jwt_secret`: the server would generate
/// a different random secret and reject the token.
pub fn run_token(user_id: &str) -> Result<()> {
    let config = get_config();
    if config.auth.jwt_secret.is_empty() {
        bail!("auth.jwt_secret is empty; set it in config.toml or SNAPLINK__AUTH__JWT_SECRET");
    }
    if user_id.trim().is_empty() {
        bail!("user id must not be empty");
    }

    let jwt = JwtService::from_config(&config.auth);
    let token = jwt.issue_token(user_id)?;
    println!("{}", token);
    Ok(())
}

/// Print a sample `config.toml`
pub fn run_config() {
    print!("{}", StaticConfig::generate_sample_config());
}
